use crate::encoding::{bytes_as_base64, decode, decode_fixed, encode};
use crate::error::{CryptoError, CryptoErrorExt};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Declares a fixed-size random artifact stored as base64 text.
macro_rules! random_artifact {
    ($(#[$meta:meta])* $name:ident, $len:expr, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Draws fresh bytes from the operating system RNG.
            ///
            /// # Errors
            /// Returns [`CryptoError::Rng`] if the RNG is unavailable.
            pub fn generate() -> Result<Self, CryptoError> {
                let mut bytes = [0u8; $len];
                getrandom::fill(&mut bytes).context(concat!("Generating ", $label))?;
                Ok(Self(bytes))
            }

            #[must_use]
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// # Errors
            /// Returns [`CryptoError::InvalidLength`] unless `bytes` is exactly the artifact size.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
                bytes.try_into().map(Self).map_err(|_| CryptoError::InvalidLength {
                    message: format!("expected {} bytes, got {}", $len, bytes.len()).into(),
                    context: Some($label.into()),
                })
            }

            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            #[must_use]
            pub fn to_base64(&self) -> String {
                encode(&self.0)
            }

            /// # Errors
            /// * [`CryptoError::Encoding`] if the text is not base64.
            /// * [`CryptoError::InvalidLength`] if it decodes to the wrong size.
            pub fn from_base64(text: &str) -> Result<Self, CryptoError> {
                decode_fixed(text, $label).map(Self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.to_base64()).finish()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_base64())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                Self::from_base64(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

random_artifact!(
    /// Per-seal PBKDF2 salt. Public, but never reused across seals.
    Salt,
    SALT_LEN,
    "salt"
);

random_artifact!(
    /// Per-seal AES-GCM nonce. Public, but never reused under the same key.
    Nonce,
    NONCE_LEN,
    "nonce"
);

/// The persisted, encrypted form of a password collection.
///
/// Serializes as `{ "encryptedData": .., "salt": .., "iv": .. }`, each field standard
/// padded base64. The ciphertext carries the 16-byte GCM tag at its end.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedVault {
    #[serde(rename = "encryptedData", with = "bytes_as_base64")]
    ciphertext: Vec<u8>,
    salt: Salt,
    #[serde(rename = "iv")]
    nonce: Nonce,
}

impl SealedVault {
    #[must_use]
    pub const fn from_parts(ciphertext: Vec<u8>, salt: Salt, nonce: Nonce) -> Self {
        Self { ciphertext, salt, nonce }
    }

    /// Rebuilds a vault from its three stored base64 strings.
    ///
    /// # Errors
    /// * [`CryptoError::Encoding`] if any field is not base64.
    /// * [`CryptoError::InvalidLength`] if the salt or nonce has the wrong size, or the
    ///   ciphertext is shorter than the GCM tag.
    pub fn from_encoded_parts(
        encrypted_data: &str,
        salt: &str,
        iv: &str,
    ) -> Result<Self, CryptoError> {
        let ciphertext = decode(encrypted_data, "encrypted data")?;
        if ciphertext.len() < TAG_LEN {
            return Err(CryptoError::InvalidLength {
                message: format!("ciphertext shorter than the {TAG_LEN}-byte tag").into(),
                context: Some("encrypted data".into()),
            });
        }

        Ok(Self { ciphertext, salt: Salt::from_base64(salt)?, nonce: Nonce::from_base64(iv)? })
    }

    /// Returns `(encrypted_data, salt, iv)` as base64 strings.
    #[must_use]
    pub fn encoded_parts(&self) -> (String, String, String) {
        (encode(&self.ciphertext), self.salt.to_base64(), self.nonce.to_base64())
    }

    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    #[must_use]
    pub const fn salt(&self) -> &Salt {
        &self.salt
    }

    #[must_use]
    pub const fn nonce(&self) -> &Nonce {
        &self.nonce
    }
}

impl fmt::Debug for SealedVault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedVault")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("salt", &self.salt)
            .field("nonce", &self.nonce)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_distinct_values() {
        let a = Salt::generate().unwrap();
        let b = Salt::generate().unwrap();
        assert_ne!(a, b);

        let n = Nonce::generate().unwrap();
        assert_eq!(n.as_bytes().len(), NONCE_LEN);
    }

    #[test]
    fn test_from_slice_checks_length() {
        assert!(Salt::from_slice(&[0u8; SALT_LEN]).is_ok());
        assert!(matches!(Salt::from_slice(&[0u8; 15]), Err(CryptoError::InvalidLength { .. })));
        assert!(matches!(Nonce::from_slice(&[0u8; 16]), Err(CryptoError::InvalidLength { .. })));
    }

    #[test]
    fn test_sealed_vault_json_shape() {
        let sealed = SealedVault::from_parts(
            vec![7u8; 20],
            Salt::from_bytes([1u8; SALT_LEN]),
            Nonce::from_bytes([2u8; NONCE_LEN]),
        );

        let json = serde_json::to_value(&sealed).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["salt"], "AQEBAQEBAQEBAQEBAQEBAQ==");
        assert_eq!(object["iv"], "AgICAgICAgICAgIC");
        assert!(object["encryptedData"].is_string());

        let back: SealedVault = serde_json::from_value(json).unwrap();
        assert_eq!(back, sealed);
    }

    #[test]
    fn test_from_encoded_parts_validation() {
        let salt = Salt::from_bytes([1u8; SALT_LEN]).to_base64();
        let iv = Nonce::from_bytes([2u8; NONCE_LEN]).to_base64();
        let data = encode(&[9u8; TAG_LEN]);

        assert!(SealedVault::from_encoded_parts(&data, &salt, &iv).is_ok());
        assert!(matches!(
            SealedVault::from_encoded_parts(&encode(&[9u8; 4]), &salt, &iv),
            Err(CryptoError::InvalidLength { .. })
        ));
        assert!(matches!(
            SealedVault::from_encoded_parts(&data, "%%%", &iv),
            Err(CryptoError::Encoding { .. })
        ));
        assert!(matches!(
            SealedVault::from_encoded_parts(&data, &salt, &salt),
            Err(CryptoError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_debug_omits_ciphertext_bytes() {
        let sealed = SealedVault::from_parts(
            vec![0xAB; 32],
            Salt::from_bytes([0u8; SALT_LEN]),
            Nonce::from_bytes([0u8; NONCE_LEN]),
        );
        let rendered = format!("{sealed:?}");
        assert!(rendered.contains("ciphertext_len: 32"));
    }
}
