//! Plaintext backup documents.
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "timestamp": "2026-10-19T08:30:00.000Z",
//!   "passwords": [ ... ],
//!   "metadata": { "totalPasswords": 1, "exportedBy": "PinVault" }
//! }
//! ```
//!
//! A backup is **not encrypted**. Whoever holds the file holds every password in it.

use crate::collection::PasswordCollection;
use crate::entry::{PasswordEntry, RawEntry};
use crate::error::SessionError;
use pinvault_kernel::clock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

pub const BACKUP_VERSION: &str = "1.0";
pub const EXPORTED_BY: &str = "PinVault";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMetadata {
    pub total_passwords: usize,
    pub exported_by: String,
}

/// A decrypted snapshot of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backup {
    pub version: String,
    pub timestamp: String,
    pub passwords: Vec<PasswordEntry>,
    pub metadata: BackupMetadata,
}

/// Only `passwords` is required on import; the envelope is informational.
#[derive(Deserialize)]
struct RawBackup {
    passwords: Vec<RawEntry>,
}

impl Backup {
    /// Snapshots `collection`, stamped with the current time.
    #[must_use]
    pub fn of(collection: &PasswordCollection) -> Self {
        Self {
            version: BACKUP_VERSION.to_owned(),
            timestamp: clock::now_rfc3339(),
            passwords: collection.entries().to_vec(),
            metadata: BackupMetadata {
                total_passwords: collection.len(),
                exported_by: EXPORTED_BY.to_owned(),
            },
        }
    }

    /// Pretty-printed JSON. The buffer is wiped on drop.
    ///
    /// # Errors
    /// Returns [`SessionError::Internal`] if serialization fails.
    pub fn to_json(&self) -> Result<Zeroizing<String>, SessionError> {
        serde_json::to_string_pretty(self)
            .map(Zeroizing::new)
            .map_err(|e| SessionError::encode(&e, "backup"))
    }

    /// Parses a backup document, validating every entry.
    ///
    /// Any invalid entry rejects the whole document.
    ///
    /// # Errors
    /// Returns [`SessionError::Decode`] if the document has no `passwords` array or an
    /// entry is invalid.
    pub fn from_json(text: &str) -> Result<Vec<PasswordEntry>, SessionError> {
        let raw: RawBackup =
            serde_json::from_str(text).map_err(|e| SessionError::decode(&e, "backup"))?;
        Ok(PasswordCollection::from_raw(raw.passwords, "backup")?.into_entries())
    }
}
