use crate::account::AccountName;
use crate::error::{StoreError, StoreErrorExt};
use crate::file::{FileStore, FileStoreInner};
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone)]
struct StoreConfig {
    account: String,
    create: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { account: AccountName::DEFAULT.to_owned(), create: true }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct FileStoreBuilder<S: Sealed = NoRoot> {
    state: S,
    config: StoreConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> FileStoreBuilder<S> {
    /// Account whose record this store reads and writes. Validated on connect.
    #[must_use = "Sets the account served by the store"]
    pub fn account(mut self, name: impl Into<String>) -> Self {
        self.config.account = name.into();
        self
    }

    #[must_use = "Sets whether the root directory should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.config.create = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> FileStoreBuilder<N> {
        FileStoreBuilder { state, config: self.config }
    }
}

impl FileStoreBuilder<NoRoot> {
    #[must_use = "Creates a new store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the root directory holding all account records"]
    pub fn root(self, path: impl Into<PathBuf>) -> FileStoreBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl FileStoreBuilder<WithRoot> {
    /// Validates the account name, prepares the root directory and returns the store.
    ///
    /// Stale temporary files left by interrupted writes are removed; cleanup failures are
    /// logged and do not fail the call.
    ///
    /// # Errors
    /// * [`StoreError::InvalidAccount`] if the account name is empty or has illegal characters.
    /// * [`StoreError::Io`] if the root is missing and `create` is false, or cannot be resolved.
    pub async fn connect(self) -> Result<FileStore, StoreError> {
        let account = AccountName::try_from(self.config.account.as_str())?;
        let root = &self.state.0;

        if self.config.create {
            fs::create_dir_all(root)
                .await
                .context(format!("Failed to bootstrap store root: {}", root.display()))?;
            info!(path = %root.display(), "Bootstrapped store root directory");
        }

        let canonical = fs::canonicalize(root)
            .await
            .context(format!("Failed to resolve store root: {}", root.display()))?;

        let store = FileStore {
            inner: Arc::new(FileStoreInner {
                root: canonical,
                account,
                tmp_counter: AtomicU64::new(1),
                write_lock: Mutex::new(()),
            }),
        };

        store.purge_tmp().await;

        Ok(store)
    }
}
