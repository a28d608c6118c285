//! # Crypto Errors
//!
//! [`CryptoError`] covers every failure of key derivation, sealing, opening and
//! artifact decoding. Messages never carry PIN digits, key bytes or plaintext.

use std::borrow::Cow;

/// A specialized [`CryptoError`] enum for vault cryptography failures.
#[pinvault_derive::pinvault_error]
pub enum CryptoError {
    /// The PIN does not have the expected shape (exactly four ASCII digits).
    #[error("Invalid PIN format{}: {message}", format_context(.context))]
    InvalidPinFormat { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The AEAD tag did not verify.
    ///
    /// Wrong PIN, corrupted ciphertext and tampered salt or nonce are all reported
    /// through this single variant with the same message.
    #[error("Vault authentication failed{}: {message}", format_context(.context))]
    Authentication { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during the encryption process.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A stored artifact is not valid base64.
    #[error("Encoding error{}: {source}", format_context(.context))]
    Encoding { source: base64::DecodeError, context: Option<Cow<'static, str>> },

    /// A decoded artifact has the wrong number of bytes.
    #[error("Invalid length{}: {message}", format_context(.context))]
    InvalidLength { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The operating system RNG could not produce a salt or nonce.
    #[error("Random generator unavailable{}: {source}", format_context(.context))]
    Rng { source: getrandom::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal crypto error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CryptoError {
    /// The one error every failed `open` produces.
    pub(crate) const fn authentication() -> Self {
        Self::Authentication { message: Cow::Borrowed("integrity check failed"), context: None }
    }
}
