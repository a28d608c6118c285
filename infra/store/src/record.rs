use crate::error::{StoreError, StoreErrorExt};
use pinvault_crypto::{PinDigest, SealedVault};
use serde::{Deserialize, Serialize};

/// On-disk shape of one account: `{ "pinHash": .., "vault": { .. } }`.
///
/// Either half may be absent while an account is being created by separate writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_hash: Option<PinDigest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<SealedVault>,
}

impl AccountRecord {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pin_hash.is_none() && self.vault.is_none()
    }
}

/// The record as text, before either half is decoded.
///
/// Reads and partial writes go through this form so that a damaged vault never hides a
/// readable digest, and the other way round.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) pin_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) vault: Option<StoredVault>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredVault {
    encrypted_data: String,
    salt: String,
    iv: String,
}

impl From<&SealedVault> for StoredVault {
    fn from(vault: &SealedVault) -> Self {
        let (encrypted_data, salt, iv) = vault.encoded_parts();
        Self { encrypted_data, salt, iv }
    }
}

impl From<&AccountRecord> for StoredRecord {
    fn from(record: &AccountRecord) -> Self {
        Self {
            pin_hash: record.pin_hash.as_ref().map(PinDigest::to_base64),
            vault: record.vault.as_ref().map(StoredVault::from),
        }
    }
}

impl StoredRecord {
    pub(crate) fn pin_digest(&self) -> Result<Option<PinDigest>, StoreError> {
        self.pin_hash
            .as_deref()
            .map(|text| PinDigest::from_base64(text).context("pinHash"))
            .transpose()
    }

    pub(crate) fn vault(&self) -> Result<Option<SealedVault>, StoreError> {
        self.vault
            .as_ref()
            .map(|v| {
                SealedVault::from_encoded_parts(&v.encrypted_data, &v.salt, &v.iv).context("vault")
            })
            .transpose()
    }

    pub(crate) fn decode(&self) -> Result<AccountRecord, StoreError> {
        Ok(AccountRecord { pin_hash: self.pin_digest()?, vault: self.vault()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinvault_crypto::{Nonce, Salt};

    #[test]
    fn test_record_json_shape() {
        let record = AccountRecord {
            pin_hash: Some(PinDigest::from_bytes([0u8; 32])),
            vault: Some(SealedVault::from_parts(
                vec![1u8; 16],
                Salt::from_bytes([2u8; 16]),
                Nonce::from_bytes([3u8; 12]),
            )),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["pinHash"].is_string());
        assert!(json["vault"]["encryptedData"].is_string());
        assert!(json["vault"]["salt"].is_string());
        assert!(json["vault"]["iv"].is_string());

        let back: AccountRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_stored_halves_decode_independently() {
        let record = AccountRecord {
            pin_hash: Some(PinDigest::from_bytes([7u8; 32])),
            vault: Some(SealedVault::from_parts(
                vec![1u8; 16],
                Salt::from_bytes([2u8; 16]),
                Nonce::from_bytes([3u8; 12]),
            )),
        };
        let mut json = serde_json::to_value(StoredRecord::from(&record)).unwrap();
        assert_eq!(json, serde_json::to_value(&record).unwrap());

        json["vault"]["salt"] = "AAAA*AAA".into();
        let stored: StoredRecord = serde_json::from_value(json).unwrap();

        assert_eq!(stored.pin_digest().unwrap(), record.pin_hash);
        assert!(matches!(stored.vault(), Err(StoreError::Corrupt { .. })));
        assert!(matches!(stored.decode(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_empty_record_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&AccountRecord::default()).unwrap(), "{}");
        assert!(AccountRecord::default().is_empty());
    }
}
