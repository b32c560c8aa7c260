/*!
 * In-memory sandbox session
 *
 * Holds at most one Ed25519 and one RSA key, the latest signature and the
 * encodings currently selected for display and input. Nothing is persisted;
 * [`Session::reset`] discards everything.
 */

use std::collections::HashMap;

use sigsandbox_crypto::{
    ImportFormat, JWK, KeyMaterial, export_private_key, import_private_key,
    import_private_key_encoded,
};
use sigsandbox_encoding::{EncodedBytes, Encoding, KeyType};
use tokio::task::spawn_blocking;
use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    config::SandboxConfig,
    errors::{Result, SandboxError},
    signature::SignatureTranscoder,
    ucan::{self, UcanValidation},
    verification::{VerificationResult, verify_input},
};

/// A key together with every encoding of its public key bytes
#[derive(Debug)]
struct LoadedKey {
    key: KeyMaterial,
    public_key: EncodedBytes,
}

impl LoadedKey {
    fn new(key: KeyMaterial) -> Self {
        let public_key = EncodedBytes::new(key.public_key_bytes().to_vec());
        LoadedKey { key, public_key }
    }
}

#[derive(Debug)]
pub struct Session {
    config: SandboxConfig,
    keys: HashMap<KeyType, LoadedKey>,
    public_key_encoding: Encoding,
    verifier_encoding: Encoding,
    import_encoding: Encoding,
    signature: SignatureTranscoder,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(SandboxConfig::default())
    }
}

impl Session {
    pub fn new(config: SandboxConfig) -> Self {
        Session {
            keys: HashMap::new(),
            public_key_encoding: config.public_key_encoding,
            verifier_encoding: config.verifier_encoding,
            import_encoding: config.import_encoding,
            signature: SignatureTranscoder::new(config.signature_encoding),
            config,
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Generates a new key of the given type, replacing any existing one
    pub async fn generate(&mut self, key_type: KeyType) -> Result<&KeyMaterial> {
        let modulus_bits = self.config.rsa_modulus_bits;

        let key = spawn_blocking(move || match key_type {
            KeyType::Ed25519 => KeyMaterial::generate(KeyType::Ed25519),
            KeyType::Rsa => KeyMaterial::generate_rsa(modulus_bits),
        })
        .await??;

        Ok(self.load(key))
    }

    /// Imports a private key from text, replacing any existing key of that type
    pub fn import(
        &mut self,
        text: &str,
        format: ImportFormat,
        key_type: KeyType,
    ) -> Result<&KeyMaterial> {
        let key = import_private_key(text, format, key_type)?;
        Ok(self.load(key))
    }

    /// Imports private key bytes written in the selected import encoding
    pub fn import_encoded(&mut self, text: &str, key_type: KeyType) -> Result<&KeyMaterial> {
        let key = import_private_key_encoded(text, self.import_encoding, key_type)?;
        Ok(self.load(key))
    }

    /// Loads a key, replacing any existing key of the same type
    pub fn load(&mut self, key: KeyMaterial) -> &KeyMaterial {
        let key_type = key.key_type();
        debug!("Loaded {key_type} key {}", key.did());

        &self
            .keys
            .entry(key_type)
            .insert_entry(LoadedKey::new(key))
            .into_mut()
            .key
    }

    pub fn keys(&self, key_type: KeyType) -> Option<&KeyMaterial> {
        self.keys.get(&key_type).map(|loaded| &loaded.key)
    }

    fn loaded(&self, key_type: KeyType) -> Result<&LoadedKey> {
        self.keys
            .get(&key_type)
            .ok_or(SandboxError::NoKeys(key_type))
    }

    pub fn did(&self, key_type: KeyType) -> Result<String> {
        Ok(self.loaded(key_type)?.key.did())
    }

    pub fn multikey(&self, key_type: KeyType) -> Result<String> {
        Ok(self.loaded(key_type)?.key.multikey())
    }

    /// Public key in the selected public key encoding
    pub fn encoded_public_key(&self, key_type: KeyType) -> Result<&str> {
        Ok(self
            .loaded(key_type)?
            .public_key
            .encoded(self.public_key_encoding))
    }

    /// Exported private key bytes in the selected public key encoding
    pub fn encoded_private_key(&self, key_type: KeyType) -> Result<Zeroizing<String>> {
        let bytes = self.loaded(key_type)?.key.private_key_bytes()?;
        Ok(Zeroizing::new(self.public_key_encoding.encode(&bytes)))
    }

    /// Private key as raw, JWK or PEM text
    pub fn export(&self, key_type: KeyType, format: ImportFormat) -> Result<Zeroizing<String>> {
        Ok(export_private_key(&self.loaded(key_type)?.key, format)?)
    }

    pub fn public_jwk(&self, key_type: KeyType) -> Result<JWK> {
        Ok(self.loaded(key_type)?.key.public_jwk())
    }

    /// Signs the UTF-8 bytes of a message and returns the signature in the
    /// selected signature encoding
    pub async fn sign(&mut self, key_type: KeyType, message: &str) -> Result<&str> {
        let key = self.loaded(key_type)?.key.clone();
        let message = message.as_bytes().to_vec();
        debug!("Signing {} byte message with {key_type} key", message.len());

        let signature = spawn_blocking(move || key.sign(&message)).await??;

        self.signature.set_signature(signature);
        self.signature()
    }

    /// The latest signature in the selected signature encoding
    pub fn signature(&self) -> Result<&str> {
        self.signature.current().ok_or(SandboxError::NoSignature)
    }

    pub fn signature_bytes(&self) -> Option<&[u8]> {
        self.signature.bytes()
    }

    /// Verifies a message against a signer (did:key or public key) and a
    /// signature, both in the selected verifier encoding
    pub fn verify(
        &self,
        key_type: KeyType,
        message: &str,
        signer: &str,
        signature: &str,
    ) -> VerificationResult {
        verify_input(message, signer, signature, self.verifier_encoding, key_type)
    }

    /// Validates a UCAN token against the current clock
    pub fn validate_ucan(&self, token: &str) -> UcanValidation {
        UcanValidation::from(ucan::validate(token, self.config.ucan_clock_leeway))
    }

    pub fn public_key_encoding(&self) -> Encoding {
        self.public_key_encoding
    }

    pub fn set_public_key_encoding(&mut self, encoding: Encoding) {
        self.public_key_encoding = encoding;
    }

    pub fn signature_encoding(&self) -> Encoding {
        self.signature.encoding()
    }

    pub fn set_signature_encoding(&mut self, encoding: Encoding) {
        self.signature.select_encoding(encoding);
    }

    pub fn verifier_encoding(&self) -> Encoding {
        self.verifier_encoding
    }

    pub fn set_verifier_encoding(&mut self, encoding: Encoding) {
        self.verifier_encoding = encoding;
    }

    pub fn import_encoding(&self) -> Encoding {
        self.import_encoding
    }

    pub fn set_import_encoding(&mut self, encoding: Encoding) {
        self.import_encoding = encoding;
    }

    /// Drops all keys and the latest signature. Selected encodings are kept.
    pub fn reset(&mut self) {
        debug!("Resetting session");
        self.keys.clear();
        self.signature.clear();
    }
}
