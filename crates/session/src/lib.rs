//! Vault session for a PIN-unlocked password collection.
//!
//! A [`VaultSession`] binds one [`VaultStore`](pinvault_store::VaultStore) account to a
//! lock state. While locked it holds nothing secret. Unlocking verifies the PIN against the
//! stored digest, opens the sealed vault and keeps the decrypted [`PasswordCollection`] and
//! the PIN in memory until [`VaultSession::lock`] or drop.
//!
//! Every change goes through [`Mutation`]: the session applies it to a copy, reseals the copy
//! under a fresh salt and nonce, persists it, and only then swaps it in.
//!
//! ```text
//!  create_vault ──► Unlocked ◄── unlock
//!                     │  ▲
//!      add / update / │  │ change_pin
//!      delete / clear │  │
//!      import         ▼  │
//!                   Unlocked ──► lock ──► Locked
//! ```
//!
//! Plaintext [`Backup`] documents can be exported from and merged into an unlocked session.

mod backup;
mod collection;
mod entry;
mod error;
mod session;

pub use backup::{BACKUP_VERSION, Backup, BackupMetadata, EXPORTED_BY};
pub use collection::{Applied, Mutation, PasswordCollection};
pub use entry::{EntryPatch, NewEntry, PasswordEntry};
pub use error::{SessionError, SessionErrorExt};
pub use session::{LockState, VaultSession};
