use crate::error::StoreError;
use pinvault_crypto::{PinDigest, SealedVault};
use std::future::Future;

/// Where one account's PIN digest and sealed vault live between sessions.
///
/// Implementations hold exactly one account. Every method either completes fully or leaves
/// the previously persisted state untouched; `persist_account` replaces both halves in a
/// single step so a reader never sees a digest from one PIN next to a vault sealed under another.
pub trait VaultStore: Send + Sync {
    /// Returns the stored digest, or `None` if the account has none.
    fn load_pin_digest(&self) -> impl Future<Output = Result<Option<PinDigest>, StoreError>> + Send;

    /// Returns the stored vault, or `None` if the account has none.
    fn load_vault(&self) -> impl Future<Output = Result<Option<SealedVault>, StoreError>> + Send;

    fn persist_pin_digest(
        &self,
        digest: &PinDigest,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn persist_vault(&self, vault: &SealedVault)
    -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Writes digest and vault together.
    fn persist_account(
        &self,
        digest: &PinDigest,
        vault: &SealedVault,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
