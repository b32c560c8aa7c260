//! JWK (JSON Web Key) types per RFC 7517
//!
//! Only the two key families the sandbox works with are modelled: OKP keys on
//! the Ed25519 curve (RFC 8037) and RSA keys (RFC 7518 section 6.3).

use serde::{Deserialize, Serialize};
use sigsandbox_encoding::{KeyType, decode_multikey};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{CryptoError, error::Result};

/// Curve name used in OKP Ed25519 JWKs
pub const ED25519_CURVE: &str = "Ed25519";

/// RFC 7517 JWK Struct
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct JWK {
    #[serde(rename = "kid")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(flatten)]
    pub params: Params,
}

impl JWK {
    /// Parses a JWK from its JSON text.
    ///
    /// An unknown `kty` or missing required members is an
    /// [`CryptoError::InvalidKeyFormat`].
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| CryptoError::InvalidKeyFormat(format!("Couldn't parse JWK: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| CryptoError::KeyError(format!("Couldn't serialize JWK: {e}")))
    }

    /// Returns the KeyType for a JWK
    pub fn key_type(&self) -> Result<KeyType> {
        match &self.params {
            Params::OKP(params) if params.curve == ED25519_CURVE => Ok(KeyType::Ed25519),
            Params::OKP(params) => Err(CryptoError::InvalidKeyFormat(format!(
                "Unsupported OKP curve ({})",
                params.curve
            ))),
            Params::RSA(_) => Ok(KeyType::Rsa),
        }
    }

    /// True if the JWK carries private key members
    pub fn is_private(&self) -> bool {
        match &self.params {
            Params::OKP(params) => params.d.is_some(),
            Params::RSA(params) => params.d.is_some(),
        }
    }

    /// Converts a multikey string into a public JWK
    pub fn from_multikey(key: &str) -> Result<Self> {
        let (key_type, data) = decode_multikey(key)?;

        match key_type {
            KeyType::Ed25519 => crate::ed25519::public_jwk(&data),
            KeyType::Rsa => crate::rsa::public_jwk(&data),
        }
    }

    /// Returns a copy with all private members removed
    pub fn to_public(&self) -> Self {
        let params = match &self.params {
            Params::OKP(params) => Params::OKP(OctetParams {
                curve: params.curve.clone(),
                x: params.x.clone(),
                d: None,
            }),
            Params::RSA(params) => Params::RSA(RsaParams {
                n: params.n.clone(),
                e: params.e.clone(),
                d: None,
                p: None,
                q: None,
                dp: None,
                dq: None,
                qi: None,
            }),
        };

        JWK {
            key_id: self.key_id.clone(),
            params,
        }
    }
}

/// JWK Key Types and associated Parameters
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
#[serde(tag = "kty")]
pub enum Params {
    OKP(OctetParams),
    RSA(RsaParams),
}

/// Octet Key Pair parameters (Ed25519)
#[derive(Debug, Serialize, Deserialize, Clone, Zeroize, PartialEq, ZeroizeOnDrop)]
pub struct OctetParams {
    #[serde(rename = "crv")]
    pub curve: String,
    pub x: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

/// RSA parameters, every member base64url encoded big-endian integers
#[derive(Debug, Serialize, Deserialize, Clone, Zeroize, PartialEq, ZeroizeOnDrop)]
pub struct RsaParams {
    pub n: String,
    pub e: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
}
