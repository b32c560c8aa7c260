//! A private key of either supported type, with its derived public forms

use sigsandbox_encoding::{KeyType, encode_multikey, public_key_to_did};
use zeroize::Zeroizing;

use crate::{JWK, ed25519, error::Result, rsa};

/// A private signing key.
///
/// The public key bytes, did:key and multikey are always derived from the
/// private key, never supplied separately.
#[derive(Clone, Debug)]
pub enum KeyMaterial {
    Ed25519(ed25519::KeyPair),
    Rsa(rsa::KeyPair),
}

impl KeyMaterial {
    /// Generates a random key. RSA keys use [`rsa::DEFAULT_MODULUS_BITS`].
    pub fn generate(key_type: KeyType) -> Result<Self> {
        match key_type {
            KeyType::Ed25519 => Ok(Self::Ed25519(ed25519::generate(None))),
            KeyType::Rsa => Self::generate_rsa(rsa::DEFAULT_MODULUS_BITS),
        }
    }

    pub fn generate_rsa(modulus_bits: usize) -> Result<Self> {
        rsa::generate(modulus_bits).map(Self::Rsa)
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Rsa(_) => KeyType::Rsa,
        }
    }

    /// Raw Ed25519 public key, or PKCS#1 DER for RSA
    pub fn public_key_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(keypair) => &keypair.public_bytes,
            Self::Rsa(keypair) => &keypair.public_bytes,
        }
    }

    /// Exported private key bytes: the 32 byte seed for Ed25519, PKCS#8 DER
    /// for RSA
    pub fn private_key_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            Self::Ed25519(keypair) => keypair.private_bytes(),
            Self::Rsa(keypair) => Ok(Zeroizing::new(keypair.private_bytes().to_vec())),
        }
    }

    /// Private JWK including every private member
    pub fn private_jwk(&self) -> &JWK {
        match self {
            Self::Ed25519(keypair) => &keypair.jwk,
            Self::Rsa(keypair) => &keypair.jwk,
        }
    }

    pub fn public_jwk(&self) -> JWK {
        self.private_jwk().to_public()
    }

    pub fn did(&self) -> String {
        public_key_to_did(self.public_key_bytes(), self.key_type())
    }

    /// base58btc multikey of the public key
    pub fn multikey(&self) -> String {
        encode_multikey(self.public_key_bytes(), self.key_type())
    }

    /// Signs with EdDSA (Ed25519) or RS256 (RSA)
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Ed25519(keypair) => Ok(keypair.sign(message)),
            Self::Rsa(keypair) => keypair.sign(message),
        }
    }

    /// Verifies a signature against this key's public key
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool> {
        crate::verify::verify_with_public_key(
            self.key_type(),
            self.public_key_bytes(),
            message,
            signature,
        )
    }
}
