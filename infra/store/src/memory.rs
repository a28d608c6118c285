use crate::error::StoreError;
use crate::record::AccountRecord;
use crate::store::VaultStore;
use parking_lot::Mutex;
use pinvault_crypto::{PinDigest, SealedVault};
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryState {
    record: AccountRecord,
    fail_writes: bool,
    writes: usize,
}

/// In-process [`VaultStore`] holding a single account record.
///
/// Clones share state, so a test can keep one handle for inspection while a session owns
/// another. Writes can be made to fail on demand; a failed write never touches the record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing record, e.g. one read from a fixture.
    #[must_use]
    pub fn with_record(record: AccountRecord) -> Self {
        let store = Self::default();
        store.state.lock().record = record;
        store
    }

    /// While enabled, every persist call fails with [`StoreError::Unavailable`].
    pub fn fail_writes(&self, enable: bool) {
        self.state.lock().fail_writes = enable;
    }

    /// Snapshot of the stored record.
    #[must_use]
    pub fn record(&self) -> AccountRecord {
        self.state.lock().record.clone()
    }

    /// Number of successful persist calls.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.state.lock().writes
    }

    fn write(&self, change: impl FnOnce(&mut AccountRecord)) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(StoreError::Unavailable {
                message: "writes are disabled".into(),
                context: Some("memory store".into()),
            });
        }
        change(&mut state.record);
        state.writes += 1;
        Ok(())
    }
}

impl VaultStore for MemoryStore {
    async fn load_pin_digest(&self) -> Result<Option<PinDigest>, StoreError> {
        Ok(self.state.lock().record.pin_hash)
    }

    async fn load_vault(&self) -> Result<Option<SealedVault>, StoreError> {
        Ok(self.state.lock().record.vault.clone())
    }

    async fn persist_pin_digest(&self, digest: &PinDigest) -> Result<(), StoreError> {
        self.write(|record| record.pin_hash = Some(*digest))
    }

    async fn persist_vault(&self, vault: &SealedVault) -> Result<(), StoreError> {
        self.write(|record| record.vault = Some(vault.clone()))
    }

    async fn persist_account(
        &self,
        digest: &PinDigest,
        vault: &SealedVault,
    ) -> Result<(), StoreError> {
        self.write(|record| {
            record.pin_hash = Some(*digest);
            record.vault = Some(vault.clone());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinvault_crypto::{Nonce, Salt};

    fn sample_vault() -> SealedVault {
        SealedVault::from_parts(vec![0u8; 16], Salt::from_bytes([1; 16]), Nonce::from_bytes([2; 12]))
    }

    #[tokio::test]
    async fn test_failed_write_leaves_record_untouched() {
        let store = MemoryStore::new();
        let digest = PinDigest::from_bytes([9; 32]);
        store.persist_pin_digest(&digest).await.unwrap();

        store.fail_writes(true);
        let err = store.persist_account(&PinDigest::from_bytes([8; 32]), &sample_vault()).await;
        assert!(matches!(err, Err(StoreError::Unavailable { .. })));
        assert_eq!(store.record().pin_hash, Some(digest));
        assert!(store.record().vault.is_none());
        assert_eq!(store.writes(), 1);

        store.fail_writes(false);
        store.persist_vault(&sample_vault()).await.unwrap();
        assert_eq!(store.load_vault().await.unwrap(), Some(sample_vault()));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let observer = store.clone();

        store.persist_vault(&sample_vault()).await.unwrap();
        assert!(observer.record().vault.is_some());
    }
}
