//! Signature transcoding
//!
//! Holds the most recent signature and shows it in the encoding the caller
//! last selected. Verification input goes the other way with
//! [`SignatureTranscoder::decode_input`].

use sigsandbox_encoding::{EncodedBytes, Encoding};

use crate::errors::Result;

#[derive(Debug, Clone)]
pub struct SignatureTranscoder {
    signature: Option<EncodedBytes>,
    encoding: Encoding,
}

impl Default for SignatureTranscoder {
    fn default() -> Self {
        SignatureTranscoder::new(Encoding::Base64Pad)
    }
}

impl SignatureTranscoder {
    pub fn new(encoding: Encoding) -> Self {
        SignatureTranscoder {
            signature: None,
            encoding,
        }
    }

    /// Replaces the held signature
    pub fn set_signature(&mut self, signature: Vec<u8>) {
        self.signature = Some(EncodedBytes::new(signature));
    }

    pub fn clear(&mut self) {
        self.signature = None;
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Selects the display encoding. Selecting the current one changes nothing.
    pub fn select_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    /// The held signature in the selected encoding
    pub fn current(&self) -> Option<&str> {
        self.signature
            .as_ref()
            .map(|signature| signature.encoded(self.encoding))
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.signature.as_ref().map(EncodedBytes::as_bytes)
    }

    /// Reads a pasted signature in the given encoding
    pub fn decode_input(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
        Ok(encoding.decode(text.trim())?)
    }
}
