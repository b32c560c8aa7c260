//! Multikey encoding
//!
//! A multikey is `z` + base58btc(multicodec prefix || key bytes). It is the
//! method-specific identifier of a did:key and the `publicKeyMultibase` value
//! of a DID document verification method.

use crate::{
    EncodingError, KeyType,
    error::Result,
    multibase::{decode_base58btc, encode_base58btc},
    multicodec::{MultiEncoded, MultiEncodedBuf},
};

/// Encode public key bytes with the multicodec prefix of the key type
pub fn encode_multikey(key_bytes: &[u8], key_type: KeyType) -> String {
    let encoded = MultiEncodedBuf::encode_raw(key_type.public_codec(), key_bytes);
    encode_base58btc(encoded.as_bytes())
}

/// Decode a multikey string into its key type and raw key bytes
pub fn decode_multikey(key: &str) -> Result<(KeyType, Vec<u8>)> {
    let (codec, data) = decode_multikey_with_codec(key)?;
    let key_type = KeyType::from_public_codec(codec).ok_or(EncodingError::UnknownCodec(codec))?;
    Ok((key_type, data))
}

/// Decode a multikey string and return the raw codec value and key bytes
///
/// Does not check that the codec is one the sandbox supports.
pub fn decode_multikey_with_codec(key: &str) -> Result<(u64, Vec<u8>)> {
    let bytes = decode_base58btc(key)?;
    let multi_encoded = MultiEncoded::new(&bytes)?;
    Ok((multi_encoded.codec(), multi_encoded.data().to_vec()))
}
