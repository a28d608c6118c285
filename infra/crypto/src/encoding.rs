//! Standard padded base64, the text form of every persisted artifact.

use crate::error::{CryptoError, CryptoErrorExt};
use base64::{Engine as _, engine::general_purpose};

pub(crate) fn encode(bytes: &[u8]) -> String {
    let mut buf = String::with_capacity(bytes.len().div_ceil(3) * 4);
    general_purpose::STANDARD.encode_string(bytes, &mut buf);
    buf
}

pub(crate) fn decode(text: &str, what: &'static str) -> Result<Vec<u8>, CryptoError> {
    general_purpose::STANDARD.decode(text).context(what)
}

pub(crate) fn decode_fixed<const N: usize>(
    text: &str,
    what: &'static str,
) -> Result<[u8; N], CryptoError> {
    let bytes = decode(text, what)?;
    bytes.as_slice().try_into().map_err(|_| CryptoError::InvalidLength {
        message: format!("expected {N} bytes, got {}", bytes.len()).into(),
        context: Some(what.into()),
    })
}

/// `#[serde(with = "bytes_as_base64")]` helper for ciphertext buffers.
pub(crate) mod bytes_as_base64 {
    use base64::{Engine as _, engine::general_purpose};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(v: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::encode(v))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        match general_purpose::STANDARD.decode(String::deserialize(d)?) {
            Ok(bytes) => Ok(bytes),
            Err(e) => Err(serde::de::Error::custom(format!("Invalid Base64: {e}"))),
        }
    }
}
