//! Key type enumeration

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::EncodingError;

/// Asymmetric key types supported by the sandbox
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Zeroize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Edwards curve keys, shown to users as "ecc"
    #[serde(alias = "ecc")]
    Ed25519,
    Rsa,
}

impl KeyType {
    /// JWT/JWS algorithm name for signatures produced by this key type
    pub fn jwt_algorithm(&self) -> &'static str {
        match self {
            KeyType::Ed25519 => "EdDSA",
            KeyType::Rsa => "RS256",
        }
    }
}

impl FromStr for KeyType {
    type Err = EncodingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ed25519" | "Ed25519" | "ecc" => Ok(KeyType::Ed25519),
            "rsa" | "RSA" => Ok(KeyType::Rsa),
            _ => Err(EncodingError::UnknownKeyType(value.to_string())),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyType::Ed25519 => write!(f, "ed25519"),
            KeyType::Rsa => write!(f, "rsa"),
        }
    }
}
