use crate::error::SessionError;
use pinvault_kernel::{clock, safe_nanoid};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One stored credential.
///
/// Instances are only built through validation, so every entry in memory has a non-empty
/// id, service name, username and password, and a `url` that is empty or absolute.
/// Field contents are wiped on drop and the password never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase", try_from = "RawEntry")]
pub struct PasswordEntry {
    id: String,
    service_name: String,
    url: String,
    username: String,
    password: String,
    notes: String,
    created_at: i64,
    updated_at: i64,
}

impl PasswordEntry {
    /// Creates an entry with a fresh id and both timestamps set to now.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidEntry`] if the draft fails validation.
    pub fn create(mut draft: NewEntry) -> Result<Self, SessionError> {
        let now = clock::now_millis();
        let entry = Self {
            id: safe_nanoid!(),
            service_name: mem::take(&mut draft.service_name),
            url: mem::take(&mut draft.url),
            username: mem::take(&mut draft.username),
            password: mem::take(&mut draft.password),
            notes: mem::take(&mut draft.notes),
            created_at: now,
            updated_at: now,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Returns a copy with the patch applied and `updatedAt` bumped.
    ///
    /// `id` and `createdAt` never change.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidEntry`] if the result fails validation.
    pub fn patched(&self, patch: &EntryPatch) -> Result<Self, SessionError> {
        let mut next = self.clone();
        if let Some(value) = &patch.service_name {
            next.service_name.clone_from(value);
        }
        if let Some(value) = &patch.url {
            next.url.clone_from(value);
        }
        if let Some(value) = &patch.username {
            next.username.clone_from(value);
        }
        if let Some(value) = &patch.password {
            next.password.clone_from(value);
        }
        if let Some(value) = &patch.notes {
            next.notes.clone_from(value);
        }
        next.updated_at = clock::now_millis().max(self.updated_at);
        next.validate()?;
        Ok(next)
    }

    fn validate(&self) -> Result<(), SessionError> {
        if self.id.trim().is_empty() {
            return Err(SessionError::invalid_entry("id is required"));
        }
        validate_fields(&self.service_name, &self.username, &self.password, &self.url)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Empty when no URL was given.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Unix milliseconds.
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Unix milliseconds.
    #[must_use]
    pub const fn updated_at(&self) -> i64 {
        self.updated_at
    }
}

impl fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordEntry")
            .field("id", &self.id)
            .field("service_name", &self.service_name)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

/// Wire shape accepted on decode. Optional text fields default to empty; missing required
/// fields are reported by validation rather than by serde.
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    service_name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl TryFrom<RawEntry> for PasswordEntry {
    type Error = SessionError;

    fn try_from(mut raw: RawEntry) -> Result<Self, Self::Error> {
        let created_at =
            raw.created_at.ok_or_else(|| SessionError::invalid_entry("createdAt is required"))?;
        let updated_at =
            raw.updated_at.ok_or_else(|| SessionError::invalid_entry("updatedAt is required"))?;
        let entry = Self {
            id: mem::take(&mut raw.id),
            service_name: mem::take(&mut raw.service_name),
            url: raw.url.take().unwrap_or_default(),
            username: mem::take(&mut raw.username),
            password: mem::take(&mut raw.password),
            notes: raw.notes.take().unwrap_or_default(),
            created_at,
            updated_at,
        };
        entry.validate()?;
        Ok(entry)
    }
}

/// Caller-supplied fields for a new entry.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct NewEntry {
    pub service_name: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
}

impl NewEntry {
    #[must_use]
    pub fn new(
        service_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            username: username.into(),
            password: password.into(),
            url: String::new(),
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

impl fmt::Debug for NewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEntry")
            .field("service_name", &self.service_name)
            .field("username", &self.username)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Field changes for an existing entry; `None` keeps the current value.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EntryPatch {
    pub service_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl EntryPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.service_name.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.url.is_none()
            && self.notes.is_none()
    }
}

impl From<NewEntry> for EntryPatch {
    fn from(mut entry: NewEntry) -> Self {
        Self {
            service_name: Some(mem::take(&mut entry.service_name)),
            username: Some(mem::take(&mut entry.username)),
            password: Some(mem::take(&mut entry.password)),
            url: Some(mem::take(&mut entry.url)),
            notes: Some(mem::take(&mut entry.notes)),
        }
    }
}

impl fmt::Debug for EntryPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPatch")
            .field("service_name", &self.service_name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

fn validate_fields(
    service_name: &str,
    username: &str,
    password: &str,
    link: &str,
) -> Result<(), SessionError> {
    if service_name.trim().is_empty() {
        return Err(SessionError::invalid_entry("serviceName is required"));
    }
    if username.is_empty() {
        return Err(SessionError::invalid_entry("username is required"));
    }
    if password.is_empty() {
        return Err(SessionError::invalid_entry("password is required"));
    }
    if !link.is_empty() && url::Url::parse(link).is_err() {
        return Err(SessionError::invalid_entry("url must be empty or an absolute URL"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail() -> NewEntry {
        NewEntry::new("Mail", "a@b.com", "xYz123!")
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let entry = PasswordEntry::create(mail()).unwrap();
        assert_eq!(entry.id().len(), 12);
        assert_eq!(entry.created_at(), entry.updated_at());
        assert_eq!(entry.service_name(), "Mail");
        assert_eq!(entry.url(), "");
    }

    #[test]
    fn test_create_rejects_missing_required_fields() {
        for draft in [
            NewEntry::new("", "a@b.com", "pw"),
            NewEntry::new("Mail", "", "pw"),
            NewEntry::new("Mail", "a@b.com", ""),
            mail().url("not a url"),
        ] {
            assert!(matches!(PasswordEntry::create(draft), Err(SessionError::InvalidEntry { .. })));
        }
        assert!(PasswordEntry::create(mail().url("https://mail.example.com")).is_ok());
    }

    #[test]
    fn test_patch_keeps_identity() {
        let entry = PasswordEntry::create(mail()).unwrap();
        let mut patch = EntryPatch::default();
        patch.password = Some("n3w".into());
        let next = entry.patched(&patch).unwrap();

        assert_eq!(next.id(), entry.id());
        assert_eq!(next.created_at(), entry.created_at());
        assert!(next.updated_at() >= entry.updated_at());
        assert_eq!(next.password(), "n3w");
        assert_eq!(next.username(), "a@b.com");

        let mut bad = EntryPatch::default();
        bad.username = Some(String::new());
        assert!(entry.patched(&bad).is_err());
    }

    #[test]
    fn test_json_field_names() {
        let entry = PasswordEntry::create(mail().notes("personal")).unwrap();
        let json = serde_json::to_value(&entry).unwrap();

        for key in ["id", "serviceName", "url", "username", "password", "notes", "createdAt", "updatedAt"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_decode_accepts_missing_optional_fields() {
        let json = r#"{"id":"x1","serviceName":"Mail","username":"a","password":"p","createdAt":1,"updatedAt":2}"#;
        let entry: PasswordEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.url(), "");
        assert_eq!(entry.notes(), "");
        assert_eq!(entry.updated_at(), 2);
    }

    #[test]
    fn test_decode_requires_timestamps() {
        for json in [
            r#"{"id":"x1","serviceName":"Mail","username":"a","password":"p","updatedAt":2}"#,
            r#"{"id":"x1","serviceName":"Mail","username":"a","password":"p","createdAt":1}"#,
        ] {
            let err = serde_json::from_str::<PasswordEntry>(json).unwrap_err();
            assert!(err.to_string().contains("is required"), "{err}");
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let entry = PasswordEntry::create(mail()).unwrap();
        let rendered = format!("{entry:?}");
        assert!(!rendered.contains("xYz123!"));
        assert!(!format!("{:?}", mail()).contains("xYz123!"));
    }
}
