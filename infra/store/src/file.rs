//! Filesystem-backed [`VaultStore`].
//!
//! Each account owns one JSON record at `<root>/<account>/account.json`. Every write goes
//! through an atomic swap (unique temp file, `fsync`, `rename`, directory sync), so the record
//! on disk is always either the previous version or the new one.

use crate::account::AccountName;
use crate::builder::FileStoreBuilder;
use crate::error::{StoreError, StoreErrorExt};
use crate::maintenance::{self, TMP_MARKER};
use crate::record::{AccountRecord, StoredRecord, StoredVault};
use crate::store::VaultStore;
use pinvault_crypto::{PinDigest, SealedVault};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

const RECORD_FILE: &str = "account.json";

#[derive(Debug)]
pub(crate) struct FileStoreInner {
    /// Canonicalized root directory.
    pub(crate) root: PathBuf,
    pub(crate) account: AccountName,
    pub(crate) tmp_counter: AtomicU64,
    /// Serializes read-modify-write cycles within this process.
    pub(crate) write_lock: Mutex<()>,
}

/// A thread-safe handle to one account's record on disk.
///
/// Cloning is cheap; clones share the same write lock.
///
/// # Example
///
/// ```rust
/// use pinvault_store::{FileStore, StoreError, VaultStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), StoreError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     let store = FileStore::builder().root(tmp.path()).account("alice").connect().await?;
///
///     assert!(store.load_vault().await?.is_none());
///     assert!(store.record_path().ends_with("alice/account.json"));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    pub(crate) inner: Arc<FileStoreInner>,
}

impl FileStore {
    #[must_use = "The store is not initialized until you call .connect()"]
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder::new()
    }

    #[must_use]
    pub fn account(&self) -> &AccountName {
        &self.inner.account
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Physical path of this account's record.
    #[must_use]
    pub fn record_path(&self) -> PathBuf {
        self.inner.root.join(self.inner.account.as_str()).join(RECORD_FILE)
    }

    /// Reads the account record. A missing file is an empty record.
    ///
    /// # Errors
    /// * [`StoreError::Io`] if the file exists but cannot be read.
    /// * [`StoreError::Serialization`] if the file is not a valid record.
    /// * [`StoreError::Corrupt`] if either half holds a field that does not decode.
    pub async fn read_record(&self) -> Result<AccountRecord, StoreError> {
        self.read_stored().await?.decode()
    }

    async fn read_stored(&self) -> Result<StoredRecord, StoreError> {
        let path = self.record_path();

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredRecord::default());
            },
            Err(err) => {
                return Err(StoreError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", path.display()).into()),
                });
            },
        };

        serde_json::from_slice(&data).context(format!("Malformed record: {}", path.display()))
    }

    /// Applies `change` to the current record and writes the result atomically.
    ///
    /// The half that `change` leaves alone is carried over as stored text, undecoded.
    async fn update(&self, change: impl FnOnce(&mut StoredRecord)) -> Result<(), StoreError> {
        let _guard = self.inner.write_lock.lock().await;

        let mut record = self.read_stored().await?;
        change(&mut record);
        self.write_record(&record).await
    }

    async fn write_record(&self, record: &StoredRecord) -> Result<(), StoreError> {
        let resolved = self.record_path();
        let data = serde_json::to_vec_pretty(record).context("Encoding account record")?;

        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create account directory {}", parent.display()))?;
        }

        let temp = unique_tmp_path(&resolved, &self.inner.tmp_counter);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&data).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &resolved).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::Io {
                source: err,
                context: Some(
                    format!("Atomic swap failed: {} -> {}", temp.display(), resolved.display())
                        .into(),
                ),
            });
        }

        if let Some(parent) = resolved.parent() {
            Self::sync_dir(parent).await;
        }

        debug!(account = %self.inner.account, "Account record saved atomically");
        Ok(())
    }

    /// Removes temporary files abandoned by interrupted writes.
    pub async fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.inner.root).await;
    }

    async fn sync_dir(path: &Path) {
        match fs::File::open(path).await {
            Ok(dir) => {
                if let Err(err) = dir.sync_all().await {
                    tracing::warn!(path = %path.display(), error = %err, "Directory sync failed");
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Directory open failed");
            },
        }
    }
}

impl VaultStore for FileStore {
    async fn load_pin_digest(&self) -> Result<Option<PinDigest>, StoreError> {
        self.read_stored().await?.pin_digest()
    }

    async fn load_vault(&self) -> Result<Option<SealedVault>, StoreError> {
        self.read_stored().await?.vault()
    }

    async fn persist_pin_digest(&self, digest: &PinDigest) -> Result<(), StoreError> {
        let encoded = digest.to_base64();
        self.update(|record| record.pin_hash = Some(encoded)).await
    }

    async fn persist_vault(&self, vault: &SealedVault) -> Result<(), StoreError> {
        let stored = StoredVault::from(vault);
        self.update(|record| record.vault = Some(stored)).await
    }

    async fn persist_account(
        &self,
        digest: &PinDigest,
        vault: &SealedVault,
    ) -> Result<(), StoreError> {
        let _guard = self.inner.write_lock.lock().await;

        let record = AccountRecord { pin_hash: Some(*digest), vault: Some(vault.clone()) };
        self.write_record(&StoredRecord::from(&record)).await
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or(RECORD_FILE);
    let tmp_name = format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id());
    target.with_file_name(tmp_name)
}
