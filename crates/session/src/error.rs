//! # Session Errors
//!
//! Every variant is safe to show to a user or write to a log: messages name fields, ids and
//! positions, never PIN digits, key bytes or entry contents.

use pinvault_crypto::CryptoError;
use pinvault_store::StoreError;
use std::borrow::Cow;

/// A specialized [`SessionError`] enum for vault session failures.
#[pinvault_derive::pinvault_error]
pub enum SessionError {
    /// The PIN is not exactly four ASCII digits.
    #[error("Invalid PIN format{}: {message}", format_context(.context))]
    InvalidPinFormat { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The PIN does not match the stored digest. The session stays locked.
    #[error("Invalid PIN{}: {message}", format_context(.context))]
    InvalidPin { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The digest matched but the sealed vault failed authentication.
    #[error("Vault is corrupt{}: {message}", format_context(.context))]
    CorruptVault { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The account already holds a vault or a PIN digest.
    #[error("Vault already exists{}: {message}", format_context(.context))]
    AlreadyExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The account holds no vault or no PIN digest.
    #[error("Vault not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Writing the re-keyed account failed. Session PIN and stored state are unchanged.
    #[error("PIN change failed{}: {message}", format_context(.context))]
    Rekey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Decrypted plaintext (or a backup) is not a valid password collection.
    #[error("Decode error{}: {message}", format_context(.context))]
    Decode { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// An entry failed field validation.
    #[error("Invalid entry{}: {message}", format_context(.context))]
    InvalidEntry { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Entry not found{}: {message}", format_context(.context))]
    EntryNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The operation is not allowed in the current lock state.
    #[error("Invalid session state{}: {message}", format_context(.context))]
    InvalidState { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Crypto failure{}: {source}", format_context(.context))]
    Crypto { source: CryptoError, context: Option<Cow<'static, str>> },

    #[error("Store failure{}: {source}", format_context(.context))]
    Store { source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Internal session error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SessionError {
    pub(crate) const fn locked() -> Self {
        Self::InvalidState { message: Cow::Borrowed("vault is locked"), context: None }
    }

    pub(crate) const fn unlocked() -> Self {
        Self::InvalidState { message: Cow::Borrowed("vault is already unlocked"), context: None }
    }

    pub(crate) fn invalid_entry(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidEntry { message: message.into(), context: None }
    }

    /// Builds a [`SessionError::Decode`] from a JSON error without echoing any input.
    pub(crate) fn decode(err: &serde_json::Error, what: &'static str) -> Self {
        Self::Decode {
            message: format!(
                "{:?} error at line {} column {}",
                err.classify(),
                err.line(),
                err.column()
            )
            .into(),
            context: Some(what.into()),
        }
    }

    /// Builds a [`SessionError::Internal`] for a value that could not be serialized.
    pub(crate) fn encode(err: &serde_json::Error, what: &'static str) -> Self {
        Self::Internal {
            message: format!("encoding failed: {:?} error", err.classify()).into(),
            context: Some(what.into()),
        }
    }

    /// Maps a PIN parse failure, keeping every other crypto error as is.
    pub(crate) fn from_pin(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidPinFormat { message, context } => {
                Self::InvalidPinFormat { message, context }
            },
            other => other.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_does_not_echo_input() {
        let err = serde_json::from_str::<Vec<String>>(r#"[1, "hunter2", {"password": "xYz123!"}]"#)
            .unwrap_err();
        let message = SessionError::decode(&err, "collection").to_string();

        assert!(message.starts_with("Decode error (collection): Data error"));
        assert!(!message.contains("hunter2"));
        assert!(!message.contains("xYz123!"));
    }

    #[test]
    fn test_encode_failure_is_internal() {
        let err = serde_json::from_str::<u8>("300").unwrap_err();
        let encoded = SessionError::encode(&err, "collection");
        assert!(matches!(encoded, SessionError::Internal { .. }));
        assert!(encoded.to_string().starts_with("Internal session error (collection)"));
    }
}
