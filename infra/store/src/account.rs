use crate::error::StoreError;
use std::fmt;

/// A validated account identifier, safe to use as a single directory name.
///
/// Names are lowercased and may contain only ASCII letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountName(String);

impl AccountName {
    /// Name used when no account is configured.
    pub const DEFAULT: &'static str = "default";

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccountName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl TryFrom<String> for AccountName {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, StoreError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&String> for AccountName {
    type Error = StoreError;

    fn try_from(value: &String) -> Result<Self, StoreError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for AccountName {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self, StoreError> {
        let name = value.to_lowercase();

        if name.is_empty() {
            return Err(StoreError::InvalidAccount {
                message: "EMPTY".into(),
                context: Some("Account name cannot be empty".into()),
            });
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(StoreError::InvalidAccount {
                message: name.into(),
                context: Some("Account name contains illegal characters".into()),
            });
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_lowercased() {
        let name = AccountName::try_from("Alice_01").unwrap();
        assert_eq!(name.as_str(), "alice_01");
    }

    #[test]
    fn test_rejects_traversal_and_separators() {
        for bad in ["", "..", "a/b", "a\\b", "a b", "a.json", "ünï"] {
            assert!(
                matches!(AccountName::try_from(bad), Err(StoreError::InvalidAccount { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_default() {
        assert_eq!(AccountName::default().to_string(), "default");
    }
}
