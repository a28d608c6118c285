use crate::backup::Backup;
use crate::collection::{Applied, Mutation, PasswordCollection};
use crate::entry::{EntryPatch, NewEntry, PasswordEntry};
use crate::error::SessionError;
use pinvault_crypto::{CryptoError, Pin, PinVerifier, SealedVault, VaultCipher};
use pinvault_store::{StoreError, VaultStore};
use std::fmt;
use tracing::{debug, info, warn};

/// Secrets held only while unlocked. Both fields wipe themselves on drop.
struct Unlocked {
    pin: Pin,
    collection: PasswordCollection,
}

enum SessionState {
    Locked,
    Unlocked(Unlocked),
}

/// Lock state of a [`VaultSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

/// One account's vault, cycling between locked and unlocked.
///
/// The session owns the PIN and the plaintext collection while unlocked and discards both on
/// [`lock`](Self::lock) or drop. Every operation that writes through the store commits its
/// in-memory change only after the write succeeds, so a failed or cancelled call leaves the
/// session exactly as it was.
///
/// # Example
///
/// ```rust
/// use pinvault_session::{NewEntry, VaultSession};
/// use pinvault_store::MemoryStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), pinvault_session::SessionError> {
/// let mut session = VaultSession::new(MemoryStore::new());
/// session.create_vault("1234").await?;
/// session.add_entry(NewEntry::new("Mail", "a@b.com", "xYz123!")).await?;
/// session.lock();
///
/// session.unlock("1234").await?;
/// assert_eq!(session.entries()?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct VaultSession<S: VaultStore> {
    store: S,
    state: SessionState,
}

impl<S: VaultStore> fmt::Debug for VaultSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultSession").field("state", &self.lock_state()).finish_non_exhaustive()
    }
}

impl<S: VaultStore> VaultSession<S> {
    /// Starts a locked session over `store`.
    pub const fn new(store: S) -> Self {
        Self { store, state: SessionState::Locked }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn lock_state(&self) -> LockState {
        match self.state {
            SessionState::Locked => LockState::Locked,
            SessionState::Unlocked(_) => LockState::Unlocked,
        }
    }

    pub const fn is_unlocked(&self) -> bool {
        matches!(self.state, SessionState::Unlocked(_))
    }

    /// Whether the account already holds a vault or a PIN digest.
    ///
    /// # Errors
    /// Returns [`SessionError::Store`] if the store cannot be read.
    pub async fn exists(&self) -> Result<bool, SessionError> {
        if self.store.load_pin_digest().await?.is_some() {
            return Ok(true);
        }
        Ok(self.store.load_vault().await?.is_some())
    }

    /// Creates a vault holding an empty collection and unlocks it.
    ///
    /// # Errors
    /// * [`SessionError::InvalidPinFormat`] if `pin` is not four digits.
    /// * [`SessionError::InvalidState`] if the session is unlocked.
    /// * [`SessionError::AlreadyExists`] if the account has a vault or digest.
    /// * [`SessionError::Crypto`] / [`SessionError::Store`] if sealing or writing fails.
    pub async fn create_vault(&mut self, pin: &str) -> Result<(), SessionError> {
        let pin = Pin::parse(pin).map_err(SessionError::from_pin)?;
        if self.is_unlocked() {
            return Err(SessionError::unlocked());
        }
        if self.exists().await? {
            return Err(SessionError::AlreadyExists {
                message: "account already holds a vault".into(),
                context: None,
            });
        }

        let collection = PasswordCollection::new();
        let sealed = seal(&collection, &pin)?;
        let digest = PinVerifier::digest(&pin);

        self.store.persist_account(&digest, &sealed).await?;

        info!("Vault created");
        self.state = SessionState::Unlocked(Unlocked { pin, collection });
        Ok(())
    }

    /// Verifies `pin`, opens the stored vault and unlocks the session.
    ///
    /// On any error the session stays locked.
    ///
    /// # Errors
    /// * [`SessionError::InvalidPinFormat`] if `pin` is not four digits.
    /// * [`SessionError::InvalidState`] if the session is already unlocked.
    /// * [`SessionError::NotFound`] if the account has no digest or no vault.
    /// * [`SessionError::InvalidPin`] if `pin` does not match the stored digest.
    /// * [`SessionError::CorruptVault`] if the digest matched but the stored vault does not decode
    ///   or fails authentication.
    /// * [`SessionError::Decode`] if the plaintext is not a valid collection.
    pub async fn unlock(&mut self, pin: &str) -> Result<(), SessionError> {
        let pin = Pin::parse(pin).map_err(SessionError::from_pin)?;
        if self.is_unlocked() {
            return Err(SessionError::unlocked());
        }

        let digest = self.store.load_pin_digest().await?.ok_or_else(|| SessionError::NotFound {
            message: "no PIN digest stored".into(),
            context: None,
        })?;

        if !PinVerifier::verify(&pin, &digest) {
            warn!("Unlock rejected: PIN does not match");
            return Err(SessionError::InvalidPin {
                message: "PIN does not match".into(),
                context: None,
            });
        }

        let sealed = self.store.load_vault().await.map_err(|err| match err {
            StoreError::Corrupt { source, .. } => {
                warn!("Unlock failed: stored vault fields do not decode");
                SessionError::CorruptVault {
                    message: format!("sealed vault is unreadable: {source}").into(),
                    context: None,
                }
            },
            other => other.into(),
        })?;
        let sealed = sealed.ok_or_else(|| SessionError::NotFound {
            message: "no sealed vault stored".into(),
            context: None,
        })?;

        let plaintext = VaultCipher::open(&sealed, &pin).map_err(|err| match err {
            CryptoError::Authentication { .. } => {
                warn!("Unlock failed: vault did not authenticate under a verified PIN");
                SessionError::CorruptVault {
                    message: "sealed vault failed authentication".into(),
                    context: None,
                }
            },
            other => other.into(),
        })?;

        let collection = PasswordCollection::from_json(&plaintext)?;

        info!(entries = collection.len(), "Vault unlocked");
        self.state = SessionState::Unlocked(Unlocked { pin, collection });
        Ok(())
    }

    /// Discards the PIN and collection. Always succeeds; locking a locked session is a no-op.
    pub fn lock(&mut self) {
        if let SessionState::Unlocked(_) = std::mem::replace(&mut self.state, SessionState::Locked)
        {
            info!("Vault locked");
        }
    }

    /// # Errors
    /// Returns [`SessionError::InvalidState`] if the session is locked.
    pub fn collection(&self) -> Result<&PasswordCollection, SessionError> {
        Ok(&self.unlocked()?.collection)
    }

    /// # Errors
    /// Returns [`SessionError::InvalidState`] if the session is locked.
    pub fn entries(&self) -> Result<&[PasswordEntry], SessionError> {
        Ok(self.unlocked()?.collection.entries())
    }

    /// # Errors
    /// * [`SessionError::InvalidState`] if the session is locked.
    /// * [`SessionError::EntryNotFound`] if no entry has `id`.
    pub fn entry(&self, id: &str) -> Result<&PasswordEntry, SessionError> {
        self.unlocked()?.collection.get(id).ok_or_else(|| SessionError::EntryNotFound {
            message: id.to_owned().into(),
            context: None,
        })
    }

    /// Applies `mutation` to a working copy, reseals it under the session PIN and persists it.
    ///
    /// The in-memory collection is replaced only after the store accepts the new vault.
    ///
    /// # Errors
    /// * [`SessionError::InvalidState`] if the session is locked.
    /// * [`SessionError::InvalidEntry`] / [`SessionError::EntryNotFound`] from the mutation.
    /// * [`SessionError::Crypto`] / [`SessionError::Store`] if sealing or writing fails.
    pub async fn mutate(&mut self, mutation: Mutation) -> Result<Applied, SessionError> {
        let op = mutation.name();
        let unlocked = self.unlocked()?;

        let mut working = unlocked.collection.clone();
        let applied = working.apply(mutation)?;
        let sealed = seal(&working, &unlocked.pin)?;

        if let Err(err) = self.store.persist_vault(&sealed).await {
            warn!(op, error = %err, "Vault write failed; session unchanged");
            return Err(err.into());
        }

        debug!(op, entries = working.len(), "Vault resealed");
        if let SessionState::Unlocked(unlocked) = &mut self.state {
            unlocked.collection = working;
        }
        Ok(applied)
    }

    /// Adds an entry and returns its generated id.
    ///
    /// # Errors
    /// See [`mutate`](Self::mutate).
    pub async fn add_entry(&mut self, draft: NewEntry) -> Result<String, SessionError> {
        match self.mutate(Mutation::Add(draft)).await? {
            Applied::Added { id } => Ok(id),
            other => Err(unexpected(&other)),
        }
    }

    /// # Errors
    /// See [`mutate`](Self::mutate).
    pub async fn update_entry(
        &mut self,
        id: impl Into<String>,
        patch: EntryPatch,
    ) -> Result<(), SessionError> {
        self.mutate(Mutation::Update { id: id.into(), patch }).await.map(|_| ())
    }

    /// # Errors
    /// See [`mutate`](Self::mutate).
    pub async fn delete_entry(&mut self, id: impl Into<String>) -> Result<(), SessionError> {
        self.mutate(Mutation::Delete { id: id.into() }).await.map(|_| ())
    }

    /// Reseals an empty collection and returns how many entries were removed.
    ///
    /// # Errors
    /// See [`mutate`](Self::mutate).
    pub async fn clear(&mut self) -> Result<usize, SessionError> {
        match self.mutate(Mutation::Clear).await? {
            Applied::Cleared { removed } => Ok(removed),
            other => Err(unexpected(&other)),
        }
    }

    /// Snapshots the unlocked collection as a plaintext [`Backup`].
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidState`] if the session is locked.
    pub fn export_backup(&self) -> Result<Backup, SessionError> {
        let collection = &self.unlocked()?.collection;
        info!(entries = collection.len(), "Backup exported");
        Ok(Backup::of(collection))
    }

    /// Merges entries from a backup document; entries whose ids already exist are skipped.
    /// Returns the number of entries added.
    ///
    /// # Errors
    /// * [`SessionError::InvalidState`] if the session is locked.
    /// * [`SessionError::Decode`] if the document or any entry is invalid; nothing is imported.
    /// * See [`mutate`](Self::mutate).
    pub async fn import_backup(&mut self, document: &str) -> Result<usize, SessionError> {
        self.unlocked()?;
        let entries = Backup::from_json(document)?;

        match self.mutate(Mutation::Import(entries)).await? {
            Applied::Imported { added, skipped } => {
                info!(added, skipped, "Backup imported");
                Ok(added)
            },
            other => Err(unexpected(&other)),
        }
    }

    /// Re-keys the vault under `new_pin`.
    ///
    /// `old_pin` is checked against the stored digest, not the session copy. The collection is
    /// resealed with a fresh salt and nonce, and digest plus vault are written in one step.
    ///
    /// # Errors
    /// * [`SessionError::InvalidPinFormat`] if either PIN is not four digits.
    /// * [`SessionError::InvalidState`] if the session is locked.
    /// * [`SessionError::NotFound`] if no digest is stored.
    /// * [`SessionError::InvalidPin`] if `old_pin` does not match.
    /// * [`SessionError::Rekey`] if the combined write fails; nothing changes.
    pub async fn change_pin(&mut self, old_pin: &str, new_pin: &str) -> Result<(), SessionError> {
        let old_pin = Pin::parse(old_pin).map_err(SessionError::from_pin)?;
        let new_pin = Pin::parse(new_pin).map_err(SessionError::from_pin)?;
        let unlocked = self.unlocked()?;

        let stored = self.store.load_pin_digest().await?.ok_or_else(|| SessionError::NotFound {
            message: "no PIN digest stored".into(),
            context: None,
        })?;

        if !PinVerifier::verify(&old_pin, &stored) {
            warn!("PIN change rejected: current PIN does not match");
            return Err(SessionError::InvalidPin {
                message: "current PIN does not match".into(),
                context: None,
            });
        }

        let sealed = seal(&unlocked.collection, &new_pin)?;
        let digest = PinVerifier::digest(&new_pin);

        if let Err(err) = self.store.persist_account(&digest, &sealed).await {
            warn!(error = %err, "Re-key write failed; PIN unchanged");
            return Err(SessionError::Rekey { message: err.to_string().into(), context: None });
        }

        info!(entries = unlocked.collection.len(), "Vault re-keyed");
        if let SessionState::Unlocked(unlocked) = &mut self.state {
            unlocked.pin = new_pin;
        }
        Ok(())
    }

    fn unlocked(&self) -> Result<&Unlocked, SessionError> {
        match &self.state {
            SessionState::Unlocked(unlocked) => Ok(unlocked),
            SessionState::Locked => Err(SessionError::locked()),
        }
    }
}

fn seal(collection: &PasswordCollection, pin: &Pin) -> Result<SealedVault, SessionError> {
    let plaintext = collection.to_json()?;
    Ok(VaultCipher::seal(&plaintext, pin)?)
}

fn unexpected(applied: &Applied) -> SessionError {
    SessionError::Internal {
        message: format!("unexpected mutation result: {applied:?}").into(),
        context: None,
    }
}
