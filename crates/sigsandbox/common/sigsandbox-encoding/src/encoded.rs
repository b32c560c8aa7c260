//! Byte buffers paired with their text encodings

use std::collections::BTreeMap;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Encoding, error::Result};

/// Raw bytes together with every text encoding of them.
///
/// All encodings are computed once from the same bytes, so each of them
/// decodes back to exactly [`EncodedBytes::as_bytes`].
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncodedBytes {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    encoded: BTreeMap<Encoding, String>,
}

impl EncodedBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        let encoded = Encoding::ALL
            .into_iter()
            .map(|encoding| (encoding, encoding.encode(&bytes)))
            .collect();

        EncodedBytes { bytes, encoded }
    }

    /// Decodes text in the given encoding and caches every other encoding of it
    pub fn decode(text: &str, encoding: Encoding) -> Result<Self> {
        Ok(Self::new(encoding.decode(text)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The bytes as text in the given encoding
    pub fn encoded(&self, encoding: Encoding) -> &str {
        // Every encoding is inserted by new()
        self.encoded
            .get(&encoding)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Iterates over every (encoding, text) pair
    pub fn iter(&self) -> impl Iterator<Item = (Encoding, &str)> {
        self.encoded
            .iter()
            .map(|(encoding, text)| (*encoding, text.as_str()))
    }
}

impl From<Vec<u8>> for EncodedBytes {
    fn from(bytes: Vec<u8>) -> Self {
        EncodedBytes::new(bytes)
    }
}

impl From<&[u8]> for EncodedBytes {
    fn from(bytes: &[u8]) -> Self {
        EncodedBytes::new(bytes.to_vec())
    }
}
