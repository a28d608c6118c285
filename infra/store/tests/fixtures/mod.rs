use pinvault_crypto::{Nonce, PinDigest, Salt, SealedVault};
use pinvault_store::FileStore;
use std::path::Path;

#[must_use]
pub fn digest(byte: u8) -> PinDigest {
    PinDigest::from_bytes([byte; 32])
}

#[must_use]
pub fn vault(byte: u8) -> SealedVault {
    SealedVault::from_parts(vec![byte; 24], Salt::from_bytes([byte; 16]), Nonce::from_bytes([byte; 12]))
}

/// Connects a store for `account` under `root`.
/// # Panics
/// * If the store cannot be connected.
pub async fn connect(root: &Path, account: &str) -> FileStore {
    FileStore::builder().root(root).account(account).connect().await.expect("store connect failed")
}
