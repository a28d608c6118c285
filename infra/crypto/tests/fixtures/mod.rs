use pinvault_crypto::prelude::*;

pub const PIN: &str = "1234";
pub const OTHER_PIN: &str = "9999";

pub const SAMPLE_COLLECTION: &str = r#"[{"id":"abc123def456","serviceName":"Mail","url":"","username":"ada","password":"hunter2","notes":"","createdAt":1700000000000,"updatedAt":1700000000000}]"#;

/// Parses a known-good PIN literal.
/// # Panics
/// * If the literal is not four digits.
#[must_use]
pub fn pin(raw: &str) -> Pin {
    Pin::parse(raw).expect("fixture PIN must be valid")
}

/// Seals [`SAMPLE_COLLECTION`] under [`PIN`].
/// # Panics
/// * If sealing fails.
#[must_use]
pub fn sealed_sample() -> SealedVault {
    VaultCipher::seal(SAMPLE_COLLECTION.as_bytes(), &pin(PIN)).expect("fixture seal failed")
}
