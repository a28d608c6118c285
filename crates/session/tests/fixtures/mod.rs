use pinvault_session::{NewEntry, VaultSession};
use pinvault_store::{FileStore, MemoryStore};
use std::path::Path;

pub const PIN: &str = "1234";
pub const NEW_PIN: &str = "5678";
pub const WRONG_PIN: &str = "0000";

#[must_use]
pub fn mail() -> NewEntry {
    NewEntry::new("Mail", "a@b.com", "xYz123!")
}

/// A session over a fresh [`MemoryStore`], already created and unlocked with [`PIN`].
/// Returns a second handle on the store for inspection.
/// # Panics
/// * If the vault cannot be created.
pub async fn unlocked_memory() -> (VaultSession<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    let mut session = VaultSession::new(store.clone());
    session.create_vault(PIN).await.expect("create vault failed");
    (session, store)
}

/// Connects a file store for the default account under `root`.
/// # Panics
/// * If the store cannot be connected.
pub async fn file_store(root: &Path) -> FileStore {
    FileStore::builder().root(root).account("default").connect().await.expect("store connect failed")
}
