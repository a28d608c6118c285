use crate::entry::{EntryPatch, NewEntry, PasswordEntry, RawEntry};
use crate::error::SessionError;
use std::collections::HashSet;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The ordered list of entries held by an unlocked session.
///
/// Serializes as a bare JSON array of entries. Wiped on drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PasswordCollection {
    entries: Vec<PasswordEntry>,
}

/// A change to a [`PasswordCollection`].
#[derive(Debug, Clone)]
pub enum Mutation {
    Add(NewEntry),
    Update { id: String, patch: EntryPatch },
    Delete { id: String },
    Clear,
    /// Appends entries whose ids are not present yet; the rest are skipped.
    Import(Vec<PasswordEntry>),
}

impl Mutation {
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Clear => "clear",
            Self::Import(_) => "import",
        }
    }
}

/// What a successfully applied [`Mutation`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Added { id: String },
    Updated { id: String },
    Deleted { id: String },
    Cleared { removed: usize },
    Imported { added: usize, skipped: usize },
}

impl PasswordCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[PasswordEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PasswordEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies `mutation` in place. On error the collection is unchanged.
    ///
    /// # Errors
    /// * [`SessionError::InvalidEntry`] if a new or patched entry fails validation.
    /// * [`SessionError::EntryNotFound`] if an update or delete names an unknown id.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Applied, SessionError> {
        match mutation {
            Mutation::Add(draft) => {
                let entry = PasswordEntry::create(draft)?;
                let id = entry.id().to_owned();
                self.entries.push(entry);
                Ok(Applied::Added { id })
            },
            Mutation::Update { id, patch } => {
                let index = self.position(&id)?;
                let next = self.entries[index].patched(&patch)?;
                self.entries[index] = next;
                Ok(Applied::Updated { id })
            },
            Mutation::Delete { id } => {
                let index = self.position(&id)?;
                self.entries.remove(index);
                Ok(Applied::Deleted { id })
            },
            Mutation::Clear => {
                let removed = self.entries.len();
                self.entries.clear();
                Ok(Applied::Cleared { removed })
            },
            Mutation::Import(incoming) => {
                let mut seen: HashSet<String> =
                    self.entries.iter().map(|e| e.id().to_owned()).collect();
                let (mut added, mut skipped) = (0, 0);
                for entry in incoming {
                    if seen.insert(entry.id().to_owned()) {
                        self.entries.push(entry);
                        added += 1;
                    } else {
                        skipped += 1;
                    }
                }
                Ok(Applied::Imported { added, skipped })
            },
        }
    }

    fn position(&self, id: &str) -> Result<usize, SessionError> {
        self.entries.iter().position(|e| e.id() == id).ok_or_else(|| {
            SessionError::EntryNotFound { message: id.to_owned().into(), context: None }
        })
    }

    /// Serializes to the JSON array that gets sealed. The buffer is wiped on drop.
    ///
    /// # Errors
    /// Returns [`SessionError::Internal`] if serialization fails.
    pub fn to_json(&self) -> Result<Zeroizing<Vec<u8>>, SessionError> {
        serde_json::to_vec(&self.entries)
            .map(Zeroizing::new)
            .map_err(|e| SessionError::encode(&e, "collection"))
    }

    /// Parses and validates decrypted plaintext.
    ///
    /// # Errors
    /// Returns [`SessionError::Decode`] if the bytes are not a JSON array of valid entries.
    /// The message carries the position or entry index, never entry contents.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SessionError> {
        let raw: Vec<RawEntry> =
            serde_json::from_slice(bytes).map_err(|e| SessionError::decode(&e, "collection"))?;
        Self::from_raw(raw, "collection")
    }

    pub(crate) fn from_raw(raw: Vec<RawEntry>, what: &'static str) -> Result<Self, SessionError> {
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                PasswordEntry::try_from(raw).map_err(|err| SessionError::Decode {
                    message: format!("entry {index}: {}", entry_reason(&err)).into(),
                    context: Some(what.into()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub(crate) fn into_entries(mut self) -> Vec<PasswordEntry> {
        std::mem::take(&mut self.entries)
    }
}

fn entry_reason(err: &SessionError) -> String {
    match err {
        SessionError::InvalidEntry { message, .. } => message.to_string(),
        other => other.to_string(),
    }
}
