mod fixtures;

use fixtures::{OTHER_PIN, PIN, SAMPLE_COLLECTION, pin, sealed_sample};
use pinvault_crypto::prelude::*;
use pinvault_crypto::{NONCE_LEN, Nonce, SALT_LEN, Salt, TAG_LEN};

#[test]
fn test_roundtrip_through_stored_strings() {
    let sealed = sealed_sample();
    let (data, salt, iv) = sealed.encoded_parts();

    let restored = SealedVault::from_encoded_parts(&data, &salt, &iv).unwrap();
    let plaintext = VaultCipher::open(&restored, &pin(PIN)).unwrap();

    assert_eq!(plaintext.as_slice(), SAMPLE_COLLECTION.as_bytes());
}

#[test]
fn test_roundtrip_through_json() {
    let sealed = sealed_sample();
    let json = serde_json::to_string(&sealed).unwrap();

    assert!(json.contains("\"encryptedData\""));
    assert!(json.contains("\"iv\""));

    let restored: SealedVault = serde_json::from_str(&json).unwrap();
    let plaintext = VaultCipher::open(&restored, &pin(PIN)).unwrap();
    assert_eq!(plaintext.as_slice(), SAMPLE_COLLECTION.as_bytes());
}

#[test]
fn test_wrong_pin_is_authentication_error() {
    let err = VaultCipher::open(&sealed_sample(), &pin(OTHER_PIN)).unwrap_err();
    assert!(matches!(err, CryptoError::Authentication { .. }));
}

#[test]
fn test_tampering_any_field_fails_identically() {
    let sealed = sealed_sample();
    let wrong_pin = VaultCipher::open(&sealed, &pin(OTHER_PIN)).unwrap_err().to_string();

    let mut ciphertext = sealed.ciphertext().to_vec();
    ciphertext[0] ^= 0x01;
    let flipped_body = SealedVault::from_parts(ciphertext, *sealed.salt(), *sealed.nonce());

    let mut tag = sealed.ciphertext().to_vec();
    let last = tag.len() - 1;
    tag[last] ^= 0x80;
    let flipped_tag = SealedVault::from_parts(tag, *sealed.salt(), *sealed.nonce());

    let mut salt = *sealed.salt().as_bytes();
    salt[SALT_LEN - 1] ^= 0x01;
    let flipped_salt =
        SealedVault::from_parts(sealed.ciphertext().to_vec(), Salt::from_bytes(salt), *sealed.nonce());

    let mut nonce = *sealed.nonce().as_bytes();
    nonce[NONCE_LEN - 1] ^= 0x01;
    let flipped_nonce =
        SealedVault::from_parts(sealed.ciphertext().to_vec(), *sealed.salt(), Nonce::from_bytes(nonce));

    for tampered in [flipped_body, flipped_tag, flipped_salt, flipped_nonce] {
        let err = VaultCipher::open(&tampered, &pin(PIN)).unwrap_err();
        assert!(matches!(err, CryptoError::Authentication { .. }));
        assert_eq!(err.to_string(), wrong_pin);
    }
}

#[test]
fn test_truncated_ciphertext_is_rejected() {
    let sealed = sealed_sample();
    let (data, salt, iv) = sealed.encoded_parts();
    let short = SealedVault::from_parts(sealed.ciphertext()[..TAG_LEN - 1].to_vec(), *sealed.salt(), *sealed.nonce());

    assert!(VaultCipher::open(&short, &pin(PIN)).is_err());
    assert!(SealedVault::from_encoded_parts(&data[..8], &salt, &iv).is_err());
}

#[test]
fn test_digest_matches_only_its_pin() {
    let digest = PinVerifier::digest(&pin(PIN));
    let stored = digest.to_base64();
    let restored = PinDigest::from_base64(&stored).unwrap();

    assert!(PinVerifier::verify(&pin(PIN), &restored));
    assert!(!PinVerifier::verify(&pin(OTHER_PIN), &restored));
}

#[test]
fn test_error_messages_do_not_leak_pin() {
    let err = Pin::parse("12a4").unwrap_err().to_string();
    assert!(!err.contains("12a4"));

    let err = VaultCipher::open(&sealed_sample(), &pin(OTHER_PIN)).unwrap_err().to_string();
    assert!(!err.contains(OTHER_PIN));
    assert!(!err.contains(PIN));
}
