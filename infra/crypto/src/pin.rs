use crate::encoding::{decode_fixed, encode};
use crate::error::CryptoError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of decimal digits in a PIN.
pub const PIN_LEN: usize = 4;

/// Length of a [`PinDigest`] in bytes (SHA-256).
pub const PIN_DIGEST_LEN: usize = 32;

/// A validated numeric PIN.
///
/// Construction is the only place the shape is checked, so every `Pin` in the
/// process is exactly [`PIN_LEN`] ASCII digits. The digits are wiped on drop and
/// never printed by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Pin([u8; PIN_LEN]);

impl Pin {
    /// Parses raw user input into a [`Pin`].
    ///
    /// No trimming or normalization is applied.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidPinFormat`] unless the input is exactly four ASCII digits.
    pub fn parse(input: &str) -> Result<Self, CryptoError> {
        let bytes = input.as_bytes();

        if bytes.len() != PIN_LEN || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(CryptoError::InvalidPinFormat {
                message: format!("PIN must be exactly {PIN_LEN} digits").into(),
                context: None,
            });
        }

        let mut digits = [0u8; PIN_LEN];
        digits.copy_from_slice(bytes);
        Ok(Self(digits))
    }

    pub(crate) const fn as_bytes(&self) -> &[u8; PIN_LEN] {
        &self.0
    }
}

impl FromStr for Pin {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// One-way digest of a raw PIN, used only to accept or reject unlock attempts.
///
/// The digest is unsalted SHA-256, so identical PINs share a digest across accounts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinDigest([u8; PIN_DIGEST_LEN]);

impl PinDigest {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; PIN_DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PIN_DIGEST_LEN] {
        &self.0
    }

    /// Standard base64 text form used for storage.
    #[must_use]
    pub fn to_base64(&self) -> String {
        encode(&self.0)
    }

    /// Decodes the storage form produced by [`PinDigest::to_base64`].
    ///
    /// # Errors
    /// * [`CryptoError::Encoding`] if the text is not base64.
    /// * [`CryptoError::InvalidLength`] if it does not decode to 32 bytes.
    pub fn from_base64(text: &str) -> Result<Self, CryptoError> {
        decode_fixed(text, "PIN digest").map(Self)
    }
}

impl fmt::Debug for PinDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinDigest([REDACTED])")
    }
}

impl Serialize for PinDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for PinDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_base64(&text).map_err(serde::de::Error::custom)
    }
}

/// Computes and checks [`PinDigest`] values.
///
/// Deliberately independent of [`crate::KeyDerivation`]: a digest is proof of knowledge,
/// never key material.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinVerifier;

impl PinVerifier {
    /// SHA-256 of the raw PIN digits.
    #[must_use]
    pub fn digest(pin: &Pin) -> PinDigest {
        let hash = Sha256::digest(pin.as_bytes());
        let mut bytes = [0u8; PIN_DIGEST_LEN];
        bytes.copy_from_slice(&hash);
        PinDigest(bytes)
    }

    /// Recomputes the digest of `pin` and compares it to `stored` in constant time.
    #[must_use]
    pub fn verify(pin: &Pin, stored: &PinDigest) -> bool {
        Self::digest(pin).0.ct_eq(&stored.0).into()
    }
}
