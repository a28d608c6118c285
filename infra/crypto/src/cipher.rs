use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::kdf::KeyDerivation;
use crate::pin::Pin;
use crate::types::{Nonce, Salt, SealedVault};

/// Seals and opens vault plaintext under a PIN.
///
/// Every seal draws a fresh salt and nonce, so sealing the same plaintext twice never
/// yields the same ciphertext. No associated data is bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultCipher;

impl VaultCipher {
    /// Encrypts `plaintext` with a key derived from `pin` and a fresh salt.
    ///
    /// # Errors
    /// * [`CryptoError::Rng`] if the salt or nonce cannot be generated.
    /// * [`CryptoError::Encryption`] if the AEAD rejects the input.
    pub fn seal(plaintext: &[u8], pin: &Pin) -> Result<SealedVault, CryptoError> {
        let salt = Salt::generate()?;
        let nonce = Nonce::generate()?;
        Self::seal_with(plaintext, pin, salt, nonce)
    }

    pub(crate) fn seal_with(
        plaintext: &[u8],
        pin: &Pin,
        salt: Salt,
        nonce: Nonce,
    ) -> Result<SealedVault, CryptoError> {
        let key = KeyDerivation::derive(pin, &salt);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

        let ciphertext = cipher
            .encrypt(aes_gcm::Nonce::from_slice(nonce.as_bytes()), plaintext)
            .map_err(|_| CryptoError::Encryption {
                message: "AES-GCM encryption failed".into(),
                context: None,
            })?;

        Ok(SealedVault::from_parts(ciphertext, salt, nonce))
    }

    /// Decrypts a [`SealedVault`] with a key derived from `pin` and the stored salt.
    ///
    /// The plaintext is returned in a buffer that is wiped when dropped.
    ///
    /// # Errors
    /// Returns [`CryptoError::Authentication`] for a wrong PIN or any modified field;
    /// the two cases are indistinguishable.
    pub fn open(sealed: &SealedVault, pin: &Pin) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let key = KeyDerivation::derive(pin, sealed.salt());
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

        cipher
            .decrypt(aes_gcm::Nonce::from_slice(sealed.nonce().as_bytes()), sealed.ciphertext())
            .map(Zeroizing::new)
            .map_err(|_| CryptoError::authentication())
    }
}
