//! PIN-based vault cryptography.
//!
//! This crate turns a four-digit PIN into everything needed to protect a password
//! collection at rest:
//!
//! * [`PinVerifier`] produces the unsalted SHA-256 [`PinDigest`] used to accept or reject
//!   unlock attempts.
//! * [`KeyDerivation`] stretches the PIN with PBKDF2-HMAC-SHA256 (100 000 rounds) and a
//!   fresh 16-byte [`Salt`] into a 256-bit key.
//! * [`VaultCipher`] seals plaintext with AES-256-GCM under a fresh 12-byte [`Nonce`] and
//!   opens it again, reporting every integrity failure as the same
//!   [`CryptoError::Authentication`].
//!
//! ## Threat Model
//!
//! A four-digit PIN has 10 000 possible values. Anyone holding the stored digest or the
//! sealed vault can enumerate the whole space offline; PBKDF2 only slows that down.
//! The crate protects against casual disclosure of the at-rest files, not a determined
//! attacker with a copy of them.
//!
//! ## Stored Form
//!
//! ```text
//! pinHash        base64(SHA-256(pin))
//! encryptedData  base64(AES-256-GCM ciphertext || 16-byte tag)
//! salt           base64(16 bytes)
//! iv             base64(12 bytes)
//! ```
//!
//! ## Example
//! ```rust
//! use pinvault_crypto::prelude::*;
//!
//! # fn main() -> Result<(), CryptoError> {
//! let pin = Pin::parse("1234")?;
//! let digest = PinVerifier::digest(&pin);
//! assert!(PinVerifier::verify(&pin, &digest));
//!
//! let sealed = VaultCipher::seal(b"[]", &pin)?;
//! let opened = VaultCipher::open(&sealed, &pin)?;
//! assert_eq!(opened.as_slice(), b"[]");
//! # Ok(())
//! # }
//! ```

mod cipher;
mod encoding;
mod error;
mod kdf;
mod pin;
mod types;

pub use cipher::VaultCipher;
pub use error::{CryptoError, CryptoErrorExt};
pub use kdf::{DerivedKey, KEY_LEN, KeyDerivation, PBKDF2_ITERATIONS};
pub use pin::{PIN_DIGEST_LEN, PIN_LEN, Pin, PinDigest, PinVerifier};
pub use types::{NONCE_LEN, Nonce, SALT_LEN, Salt, SealedVault, TAG_LEN};
pub use zeroize::Zeroizing;

pub mod prelude {
    pub use crate::cipher::VaultCipher;
    pub use crate::error::{CryptoError, CryptoErrorExt};
    pub use crate::pin::{Pin, PinDigest, PinVerifier};
    pub use crate::types::SealedVault;
}
