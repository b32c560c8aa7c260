//! Multibase encoding/decoding utilities
//!
//! Multibase is a protocol for self-describing base encodings.
//! The first character indicates the encoding used.
//!
//! See: <https://github.com/multiformats/multibase>

use crate::{Encoding, EncodingError, error::Result};

/// Multibase prefix for base58btc (Bitcoin alphabet)
pub const BASE58BTC_PREFIX: char = 'z';

impl Encoding {
    /// Multibase prefix character for this encoding
    pub fn multibase_prefix(&self) -> char {
        match self {
            Encoding::Base64 => 'm',
            Encoding::Base64Pad => 'M',
            Encoding::Base64Url => 'U',
            Encoding::Base58Btc => BASE58BTC_PREFIX,
            Encoding::Hex => 'f',
        }
    }

    /// Encoding identified by a multibase prefix character
    pub fn from_multibase_prefix(prefix: char) -> Result<Self> {
        match prefix {
            'm' => Ok(Encoding::Base64),
            'M' => Ok(Encoding::Base64Pad),
            'U' => Ok(Encoding::Base64Url),
            BASE58BTC_PREFIX => Ok(Encoding::Base58Btc),
            'f' => Ok(Encoding::Hex),
            other => Err(EncodingError::UnknownMultibasePrefix(other)),
        }
    }
}

/// Encode bytes and prepend the multibase prefix of the encoding
pub fn to_multibase(bytes: &[u8], encoding: Encoding) -> String {
    let mut encoded = String::from(encoding.multibase_prefix());
    encoded.push_str(&encoding.encode(bytes));
    encoded
}

/// Decode a multibase string, returning the encoding named by its prefix and the bytes
pub fn from_multibase(text: &str) -> Result<(Encoding, Vec<u8>)> {
    let mut chars = text.chars();
    let Some(prefix) = chars.next() else {
        return Err(EncodingError::UnknownMultibasePrefix('\0'));
    };

    let encoding = Encoding::from_multibase_prefix(prefix)?;
    Ok((encoding, encoding.decode(chars.as_str())?))
}

/// Decode a base58btc multibase string (must start with 'z')
///
/// Returns the decoded bytes without the prefix.
pub fn decode_base58btc(s: &str) -> Result<Vec<u8>> {
    let Some(encoded) = s.strip_prefix(BASE58BTC_PREFIX) else {
        let prefix = s.chars().next().unwrap_or('\0');
        return Err(EncodingError::UnknownMultibasePrefix(prefix));
    };

    Encoding::Base58Btc.decode(encoded)
}

/// Encode bytes as base58btc with multibase prefix 'z'
pub fn encode_base58btc(bytes: &[u8]) -> String {
    to_multibase(bytes, Encoding::Base58Btc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base58btc() {
        // "z" + base58btc("hello") = "zCn8eVZg"
        let result = decode_base58btc("zCn8eVZg").unwrap();
        assert_eq!(result, b"hello");
    }

    #[test]
    fn test_encode_base58btc() {
        let encoded = encode_base58btc(b"hello");
        assert_eq!(encoded, "zCn8eVZg");
    }

    #[test]
    fn test_invalid_prefix() {
        let result = decode_base58btc("fABCDEF"); // 'f' is hex, not base58btc
        assert!(matches!(
            result.unwrap_err(),
            EncodingError::UnknownMultibasePrefix('f')
        ));
    }

    #[test]
    fn prefixes_per_encoding() {
        let bytes = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(to_multibase(&bytes, Encoding::Base64Pad), "M3q2+7w==");
        assert_eq!(to_multibase(&bytes, Encoding::Base64), "m3q2+7w");
        assert_eq!(to_multibase(&bytes, Encoding::Base64Url), "U3q2-7w");
        assert_eq!(to_multibase(&bytes, Encoding::Base58Btc), "z6h8cQN");
        assert_eq!(to_multibase(&bytes, Encoding::Hex), "fdeadbeef");
    }

    #[test]
    fn multibase_roundtrip() {
        let samples: [&[u8]; 3] = [&[], &[0, 0, 1], b"test data for encoding"];
        for encoding in Encoding::ALL {
            assert_eq!(
                Encoding::from_multibase_prefix(encoding.multibase_prefix()).unwrap(),
                encoding
            );
            for sample in samples {
                let (decoded_encoding, decoded) =
                    from_multibase(&to_multibase(sample, encoding)).unwrap();
                assert_eq!(decoded_encoding, encoding);
                assert_eq!(decoded, sample);
            }
        }
    }

    #[test]
    fn unknown_prefix() {
        assert!(matches!(
            from_multibase("b3q2"),
            Err(EncodingError::UnknownMultibasePrefix('b'))
        ));
        assert!(matches!(
            from_multibase(""),
            Err(EncodingError::UnknownMultibasePrefix('\0'))
        ));
    }

    #[test]
    fn bad_payload_after_valid_prefix() {
        assert!(matches!(
            from_multibase("z0OIl"),
            Err(EncodingError::Decode {
                encoding: Encoding::Base58Btc,
                ..
            })
        ));
        assert!(from_multibase("fabc").is_err());
    }
}
