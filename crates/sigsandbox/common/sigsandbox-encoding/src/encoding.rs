//! Binary-to-text encodings
//!
//! Converts raw byte buffers to and from the text encodings offered by the
//! sandbox: standard base64 (unpadded and padded), base64url, base58btc
//! (Bitcoin alphabet) and lowercase hex.

use std::{fmt, str::FromStr};

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::{Deserialize, Serialize};

use crate::{EncodingError, error::Result};

/// Standard alphabet, written without padding, read with or without it
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Standard alphabet, written with padding, read with or without it
const BASE64_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// RFC 4648 §5 URL-safe alphabet, written without padding, read with or without it
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Supported text encodings for byte buffers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Base64,
    Base64Pad,
    Base64Url,
    #[serde(alias = "base58")]
    Base58Btc,
    Hex,
}

impl Encoding {
    /// Every supported encoding, in display order
    pub const ALL: [Encoding; 5] = [
        Encoding::Base64,
        Encoding::Base64Pad,
        Encoding::Base64Url,
        Encoding::Base58Btc,
        Encoding::Hex,
    ];

    /// User-facing name of the encoding
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Base64 => "base64",
            Encoding::Base64Pad => "base64pad",
            Encoding::Base64Url => "base64url",
            Encoding::Base58Btc => "base58btc",
            Encoding::Hex => "hex",
        }
    }

    /// Encode bytes as text
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Base64 => BASE64.encode(bytes),
            Encoding::Base64Pad => BASE64_PAD.encode(bytes),
            Encoding::Base64Url => BASE64_URL.encode(bytes),
            Encoding::Base58Btc => bs58::encode(bytes).into_string(),
            Encoding::Hex => hex::encode(bytes),
        }
    }

    /// Decode text back to bytes
    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        let decoded = match self {
            Encoding::Base64 => BASE64.decode(text).map_err(|e| e.to_string()),
            Encoding::Base64Pad => BASE64_PAD.decode(text).map_err(|e| e.to_string()),
            Encoding::Base64Url => BASE64_URL.decode(text).map_err(|e| e.to_string()),
            Encoding::Base58Btc => bs58::decode(text).into_vec().map_err(|e| e.to_string()),
            Encoding::Hex => {
                let digits = text
                    .strip_prefix("0x")
                    .or_else(|| text.strip_prefix("0X"))
                    .unwrap_or(text);
                hex::decode(digits).map_err(|e| e.to_string())
            }
        };

        decoded.map_err(|reason| EncodingError::Decode {
            encoding: *self,
            reason,
        })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "base64" => Ok(Encoding::Base64),
            "base64pad" => Ok(Encoding::Base64Pad),
            "base64url" => Ok(Encoding::Base64Url),
            "base58btc" | "base58" => Ok(Encoding::Base58Btc),
            "hex" => Ok(Encoding::Hex),
            other => Err(EncodingError::UnknownEncoding(other.to_string())),
        }
    }
}

/// Encode bytes with the given encoding
pub fn encode(bytes: &[u8], encoding: Encoding) -> String {
    encoding.encode(bytes)
}

/// Decode text that was written with the given encoding
pub fn decode(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
    encoding.decode(text)
}
