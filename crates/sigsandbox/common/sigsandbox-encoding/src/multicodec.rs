//! Multicodec encoding/decoding
//!
//! Multicodec is a self-describing format that prefixes data with a varint
//! indicating the type of data that follows.
//!
//! See: <https://github.com/multiformats/multicodec>

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{EncodingError, KeyType, error::Result};

// ****************************************************************************
// Codec Magic Numbers
// See: https://github.com/multiformats/multicodec/blob/master/table.csv
// ****************************************************************************
pub const ED25519_PUB: u64 = 0xed;
pub const ED25519_PRIV: u64 = 0x1300;
pub const RSA_PUB: u64 = 0x1205;

impl KeyType {
    /// Every supported key type
    pub const ALL: [KeyType; 2] = [KeyType::Ed25519, KeyType::Rsa];

    /// Multicodec value for public keys of this type.
    ///
    /// Both did:key derivation and multikey encoding read from this mapping.
    pub const fn public_codec(&self) -> u64 {
        match self {
            KeyType::Ed25519 => ED25519_PUB,
            KeyType::Rsa => RSA_PUB,
        }
    }

    /// Key type for a public key multicodec value, if it is one we know
    pub fn from_public_codec(codec: u64) -> Option<KeyType> {
        KeyType::ALL
            .into_iter()
            .find(|key_type| key_type.public_codec() == codec)
    }
}

/// A multicodec-encoded byte slice, split into its codec and payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiEncoded<'a> {
    codec: u64,
    data: &'a [u8],
}

impl<'a> MultiEncoded<'a> {
    /// Parse a multiencoded byte slice
    /// Validates the codec encoding
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let (codec, data) = unsigned_varint::decode::u64(bytes)
            .map_err(|e| EncodingError::InvalidMulticodec(format!("varint decode: {e}")))?;

        Ok(MultiEncoded { codec, data })
    }

    /// Raw codec value (u64)
    pub fn codec(&self) -> u64 {
        self.codec
    }

    /// Data bytes (without codec prefix)
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// A multicodec-encoded byte buffer (owned)
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MultiEncodedBuf(Vec<u8>);

impl MultiEncodedBuf {
    /// Encode bytes with a raw codec value
    pub fn encode_raw(codec: u64, bytes: &[u8]) -> Self {
        let mut codec_buffer = unsigned_varint::encode::u64_buffer();
        let encoded_codec = unsigned_varint::encode::u64(codec, &mut codec_buffer);
        let mut result = Vec::with_capacity(encoded_codec.len() + bytes.len());
        result.extend(encoded_codec);
        result.extend(bytes);
        Self(result)
    }

    /// Returns a reference to the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
