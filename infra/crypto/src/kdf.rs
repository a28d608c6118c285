use crate::pin::Pin;
use crate::types::Salt;
use sha2::Sha256;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2-HMAC-SHA256 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// A 256-bit AES key derived from a PIN and salt.
///
/// Lives only for the duration of one seal or open call and is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    pub(crate) const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Stretches a [`Pin`] into an encryption key.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDerivation;

impl KeyDerivation {
    /// Runs PBKDF2-HMAC-SHA256 over the PIN digits with [`PBKDF2_ITERATIONS`] rounds.
    ///
    /// Deterministic in `(pin, salt)`.
    #[must_use]
    pub fn derive(pin: &Pin, salt: &Salt) -> DerivedKey {
        let mut key = DerivedKey([0u8; KEY_LEN]);
        pbkdf2::pbkdf2_hmac::<Sha256>(pin.as_bytes(), salt.as_bytes(), PBKDF2_ITERATIONS, &mut key.0);
        key
    }
}
