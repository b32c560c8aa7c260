//! Private key import and export
//!
//! | key type | raw          | jwk         | pem / pkcs8 |
//! |----------|--------------|-------------|-------------|
//! | ed25519  | 32 byte seed | OKP Ed25519 | unsupported |
//! | rsa      | unsupported  | RSA         | PKCS#8 PEM  |
//!
//! Raw Ed25519 seeds are read as base64url text (padding optional). Every
//! other combination is a [`CryptoError::UnsupportedImport`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sigsandbox_encoding::{Encoding, KeyType};
use tracing::debug;
use zeroize::Zeroizing;

use crate::{CryptoError, JWK, KeyMaterial, Params, ed25519, error::Result, rsa};

/// Text format of a private key being imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    Raw,
    Jwk,
    Pem,
    Pkcs8,
}

impl ImportFormat {
    pub const ALL: [ImportFormat; 4] = [
        ImportFormat::Raw,
        ImportFormat::Jwk,
        ImportFormat::Pem,
        ImportFormat::Pkcs8,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ImportFormat::Raw => "raw",
            ImportFormat::Jwk => "jwk",
            ImportFormat::Pem => "pem",
            ImportFormat::Pkcs8 => "pkcs8",
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImportFormat {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        ImportFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CryptoError::InvalidKeyFormat(format!("Unknown import format ({s})")))
    }
}

/// Imports a private key from text.
///
/// The public key, did:key and multikey of the result are derived from the
/// imported private key.
pub fn import_private_key(
    text: &str,
    format: ImportFormat,
    key_type: KeyType,
) -> Result<KeyMaterial> {
    let text = text.trim();

    let key = match (key_type, format) {
        (KeyType::Ed25519, ImportFormat::Raw) => import_ed25519_raw(text)?,
        (KeyType::Ed25519, ImportFormat::Jwk) => import_jwk(text, KeyType::Ed25519)?,
        (KeyType::Rsa, ImportFormat::Jwk) => import_jwk(text, KeyType::Rsa)?,
        (KeyType::Rsa, ImportFormat::Pem | ImportFormat::Pkcs8) => {
            KeyMaterial::Rsa(rsa::from_pem(text)?)
        }
        (key_type, format) => return Err(CryptoError::UnsupportedImport { format, key_type }),
    };

    debug!("Imported {key_type} private key from {format}");
    Ok(key)
}

/// Imports a private key given as encoded bytes: an Ed25519 seed or RSA
/// PKCS#8 DER, in the given encoding.
pub fn import_private_key_encoded(
    text: &str,
    encoding: Encoding,
    key_type: KeyType,
) -> Result<KeyMaterial> {
    let bytes = Zeroizing::new(encoding.decode(text.trim())?);

    let key = match key_type {
        KeyType::Ed25519 => KeyMaterial::Ed25519(ed25519::from_seed_bytes(&bytes)?),
        KeyType::Rsa => KeyMaterial::Rsa(rsa::from_pkcs8_der(&bytes)?),
    };

    debug!("Imported {key_type} private key from {encoding} bytes");
    Ok(key)
}

/// Private key as text in the given import format
pub fn export_private_key(key: &KeyMaterial, format: ImportFormat) -> Result<Zeroizing<String>> {
    match (key, format) {
        (KeyMaterial::Ed25519(_), ImportFormat::Raw) => Ok(Zeroizing::new(
            Encoding::Base64Url.encode(&key.private_key_bytes()?),
        )),
        (_, ImportFormat::Jwk) => key.private_jwk().to_json().map(Zeroizing::new),
        (KeyMaterial::Rsa(keypair), ImportFormat::Pem | ImportFormat::Pkcs8) => {
            keypair.to_pkcs8_pem()
        }
        (key, format) => Err(CryptoError::UnsupportedImport {
            format,
            key_type: key.key_type(),
        }),
    }
}

fn import_ed25519_raw(text: &str) -> Result<KeyMaterial> {
    // Seeds pasted in the standard alphabet are accepted as well
    let text = Zeroizing::new(text.replace('+', "-").replace('/', "_"));
    let seed = Zeroizing::new(Encoding::Base64Url.decode(&text).map_err(|e| {
        CryptoError::InvalidKeyFormat(format!("Raw Ed25519 key isn't base64: {e}"))
    })?);

    Ok(KeyMaterial::Ed25519(ed25519::from_seed_bytes(&seed)?))
}

fn import_jwk(text: &str, key_type: KeyType) -> Result<KeyMaterial> {
    let jwk = JWK::from_json(text)?;

    if jwk.key_type()? != key_type {
        return Err(CryptoError::InvalidKeyFormat(format!(
            "Expected an {key_type} JWK, got {}",
            jwk.key_type()?
        )));
    }

    match &jwk.params {
        Params::OKP(params) => Ok(KeyMaterial::Ed25519(ed25519::from_jwk(params)?)),
        Params::RSA(params) => Ok(KeyMaterial::Rsa(rsa::from_jwk(params)?)),
    }
}
