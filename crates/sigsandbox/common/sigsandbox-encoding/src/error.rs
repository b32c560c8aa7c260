//! Encoding errors

use thiserror::Error;

use crate::Encoding;

#[derive(Error, Debug)]
pub enum EncodingError {
    /// Text isn't valid for the encoding it was declared as
    #[error("Couldn't decode {encoding} text: {reason}")]
    Decode { encoding: Encoding, reason: String },

    #[error("Unknown multibase prefix: '{0}'")]
    UnknownMultibasePrefix(char),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Unknown key type: {0}")]
    UnknownKeyType(String),

    #[error("Invalid DID format: {0}")]
    InvalidDidFormat(String),

    #[error("Invalid multicodec: {0}")]
    InvalidMulticodec(String),

    #[error("Unknown codec: 0x{0:x}")]
    UnknownCodec(u64),
}

pub type Result<T> = std::result::Result<T, EncodingError>;
