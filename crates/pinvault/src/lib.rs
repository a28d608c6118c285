//! Facade crate for `PinVault`.
//! Re-exports the crypto, store, session and kernel crates and wires configuration to a
//! ready-to-use session. Keep this crate thin: it composes other crates, it does not
//! implement vault logic.
//!
//! ## Usage
//! ```rust,no_run
//! # async fn run() -> Result<(), pinvault::session::SessionError> {
//! use pinvault::kernel::config::StorageConfig;
//!
//! let mut session = pinvault::open_file_session(&StorageConfig::default()).await?;
//! if !session.exists().await? {
//!     session.create_vault("1234").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub use pinvault_crypto as crypto;
pub use pinvault_kernel as kernel;
pub use pinvault_session as session;
pub use pinvault_store as store;

#[cfg(feature = "file-store")]
use pinvault_kernel::config::StorageConfig;
#[cfg(feature = "file-store")]
use pinvault_session::{SessionError, VaultSession};
#[cfg(feature = "file-store")]
use pinvault_store::FileStore;

/// Build-time enabled features (by Cargo feature).
pub mod features {
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "file-store")]
        "file-store",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Connects the configured account's [`FileStore`] and wraps it in a locked session.
///
/// # Errors
/// Returns [`SessionError::Store`] if the account name is invalid or the data directory
/// cannot be prepared.
#[cfg(feature = "file-store")]
pub async fn open_file_session(
    storage: &StorageConfig,
) -> Result<VaultSession<FileStore>, SessionError> {
    let store = FileStore::builder()
        .root(&storage.data_dir)
        .account(storage.account.as_str())
        .connect()
        .await?;
    Ok(VaultSession::new(store))
}
