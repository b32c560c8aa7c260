/*!
 * Sandbox errors and handling/conversion
 */

use sigsandbox_crypto::CryptoError;
use sigsandbox_encoding::{EncodingError, KeyType};
use thiserror::Error;
use tokio::task::JoinError;

/// Signature Sandbox Errors
#[derive(Error, Debug)]
pub enum SandboxError {
    /// No key of this type has been generated or imported yet
    #[error("No {0} keys in this session")]
    NoKeys(KeyType),

    #[error("Nothing has been signed yet")]
    NoSignature,

    #[error("Config error: {0}")]
    Config(String),

    /// A blocking key generation or signing task didn't complete
    #[error("Task failed: {0}")]
    TaskFailed(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("UCAN error: {0}")]
    Ucan(#[from] UcanError),
}

pub type Result<T> = std::result::Result<T, SandboxError>;

impl From<JoinError> for SandboxError {
    fn from(error: JoinError) -> Self {
        SandboxError::TaskFailed(error.to_string())
    }
}

/// UCAN validation errors
#[derive(Error, Debug)]
pub enum UcanError {
    #[error("Malformed UCAN: {0}")]
    Malformed(String),

    #[error("Expired")]
    Expired,

    #[error("Not active yet (too early)")]
    NotYetValid,

    #[error("Algorithm {alg} can't be used with a {key_type} issuer")]
    AlgorithmMismatch { alg: String, key_type: KeyType },

    #[error("Signature doesn't match the issuer")]
    InvalidSignature,

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
