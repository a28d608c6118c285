use std::borrow::Cow;

/// A specialized [`StoreError`] enum of this crate.
#[pinvault_derive::pinvault_error]
pub enum StoreError {
    #[error("Invalid account name{}: {message}", format_context(.context))]
    InvalidAccount { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Hardware I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Record serialization failure{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// A stored field is present but does not decode (bad base64 or wrong length).
    #[error("Corrupt record{}: {source}", format_context(.context))]
    Corrupt { source: pinvault_crypto::CryptoError, context: Option<Cow<'static, str>> },

    /// The backend refused the operation. The persisted state is unchanged.
    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal store error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
