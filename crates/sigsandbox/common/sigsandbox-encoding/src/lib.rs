//! Encoding utilities for the Signature Sandbox
//!
//! This crate provides the pure byte/text transforms used across the sandbox:
//! - Binary-to-text encodings (base64, base64pad, base64url, base58btc, hex)
//! - Multibase prefixing and prefix detection
//! - Multicodec varint prefixes and the key type codec table
//! - Multikey and did:key encoding/decoding

pub mod did;
pub mod encoded;
pub mod encoding;
pub mod multibase;
pub mod multicodec;
pub mod multikey;

pub use did::{
    BASE58_DID_PREFIX, DID_KEY_PREFIX, did_from_input, did_to_public_key, is_did_key,
    public_key_to_did,
};
pub use encoded::EncodedBytes;
pub use encoding::{Encoding, decode, encode};
pub use multibase::{
    BASE58BTC_PREFIX, decode_base58btc, encode_base58btc, from_multibase, to_multibase,
};
pub use multicodec::{ED25519_PRIV, ED25519_PUB, MultiEncoded, MultiEncodedBuf, RSA_PUB};
pub use multikey::{decode_multikey, decode_multikey_with_codec, encode_multikey};

mod error;
mod key_type;
pub use error::EncodingError;
pub use key_type::KeyType;
