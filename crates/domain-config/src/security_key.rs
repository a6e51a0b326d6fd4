//! Instance security key
//!
//! The configured key string is hashed with SHA-256 into AES-256-GCM key
//! material, so the same string always yields the same key. Encrypted
//! payloads are base64 of `nonce || ciphertext`.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::{ConfigError, ErrorCode, Result};

/// Nonce size for AES-256-GCM (96 bits)
const NONCE_SIZE: usize = 12;

/// Key size for AES-256 (256 bits)
const KEY_SIZE: usize = 32;

/// Derived key material for the instance
#[derive(Clone)]
pub struct SecurityKey {
    key: [u8; KEY_SIZE],
    /// Characters in the string the key was derived from
    source_length: usize,
    ephemeral: bool,
}

impl SecurityKey {
    /// Derive key material from a configured key string
    pub fn new(value: &str) -> Result<Self> {
        Self::derive(value, false)
    }

    /// Derive key material from a freshly generated key string
    pub fn ephemeral(value: &str) -> Result<Self> {
        Self::derive(value, true)
    }

    fn derive(value: &str, ephemeral: bool) -> Result<Self> {
        let digest = Sha256::digest(value.as_bytes());
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&digest);

        // Fail at derivation time rather than on first use
        Aes256Gcm::new_from_slice(&key).map_err(|e| {
            ConfigError::unrecoverable(
                ErrorCode::InvalidSecurityKey,
                format!("unable to create cipher from security key: {e}"),
            )
        })?;

        Ok(Self {
            key,
            source_length: value.chars().count(),
            ephemeral,
        })
    }

    /// Random alphanumeric key string of `length` characters
    pub fn generate_value(length: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }

    /// True when the key was generated rather than configured
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Length in characters of the key string
    pub fn source_length(&self) -> usize {
        self.source_length
    }

    /// Hex SHA-256 of the key material, safe to log
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.key))
    }

    fn cipher(&self) -> Result<Aes256Gcm> {
        Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| ConfigError::encryption(format!("Failed to create cipher: {e}")))
    }

    /// Encrypt a value with this key
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = self.cipher()?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| ConfigError::encryption(format!("Encryption failed: {e}")))?;

        let mut payload = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(payload))
    }

    /// Decrypt a value produced by [`SecurityKey::encrypt`]
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let cipher = self.cipher()?;

        let payload = BASE64
            .decode(encoded.trim())
            .map_err(|e| ConfigError::encryption(format!("Invalid payload base64: {e}")))?;

        if payload.len() <= NONCE_SIZE {
            return Err(ConfigError::encryption("Payload too short"));
        }
        let (nonce_bytes, ciphertext) = payload.split_at(NONCE_SIZE);

        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|e| ConfigError::encryption(format!("Decryption failed: {e}")))?;

        String::from_utf8(plaintext)
            .map_err(|e| ConfigError::encryption(format!("Invalid UTF-8 in decrypted value: {e}")))
    }
}

impl PartialEq for SecurityKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SecurityKey {}

impl fmt::Debug for SecurityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityKey")
            .field("key", &"<redacted>")
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}
