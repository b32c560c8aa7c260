//! Error types for cryptographic operations

use sigsandbox_encoding::KeyType;
use thiserror::Error;

use crate::ImportFormat;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key material is structurally wrong (bad JWK fields, bad PEM/PKCS8, ...)
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Can't import {key_type} keys from {format} input")]
    UnsupportedImport {
        format: ImportFormat,
        key_type: KeyType,
    },

    #[error("Key error: {0}")]
    KeyError(String),

    #[error("Signing error: {0}")]
    Signing(String),

    /// Verification couldn't run at all, as opposed to a signature that didn't match
    #[error("Verification failure: {0}")]
    VerificationFailure(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] sigsandbox_encoding::EncodingError),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
