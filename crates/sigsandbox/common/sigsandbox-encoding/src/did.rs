//! did:key derivation
//!
//! A did:key is `did:key:` followed by the multikey of a public key. The
//! method-specific identifier is always base58btc (`z` prefix), regardless of
//! which encoding is used to display keys elsewhere.
//!
//! [https://w3c-ccg.github.io/did-key-spec/]

use tracing::debug;

use crate::{
    Encoding, EncodingError, KeyType,
    error::Result,
    multikey::{decode_multikey_with_codec, encode_multikey},
};

/// Scheme and method prefix of every did:key
pub const DID_KEY_PREFIX: &str = "did:key:";

/// did:key prefix including the mandatory base58btc multibase character
pub const BASE58_DID_PREFIX: &str = "did:key:z";

/// Returns true if the value is already a did:key and must not be re-derived
pub fn is_did_key(value: &str) -> bool {
    value.starts_with(DID_KEY_PREFIX)
}

/// Derives the did:key for raw public key bytes of the given key type
pub fn public_key_to_did(public_key: &[u8], key_type: KeyType) -> String {
    [DID_KEY_PREFIX, &encode_multikey(public_key, key_type)].concat()
}

/// Parses a did:key back into its key type and raw public key bytes
pub fn did_to_public_key(did: &str) -> Result<(KeyType, Vec<u8>)> {
    let Some(identifier) = did.strip_prefix(DID_KEY_PREFIX) else {
        return Err(EncodingError::InvalidDidFormat(format!(
            "DID ({did}) doesn't start with {DID_KEY_PREFIX}"
        )));
    };

    if !identifier.starts_with('z') {
        return Err(EncodingError::InvalidDidFormat(format!(
            "DID ({did}) doesn't start with {BASE58_DID_PREFIX}"
        )));
    }

    let (codec, public_key) = decode_multikey_with_codec(identifier).map_err(|e| match e {
        EncodingError::InvalidMulticodec(reason) => EncodingError::InvalidDidFormat(format!(
            "DID ({did}) has no valid multicodec prefix: {reason}"
        )),
        other => other,
    })?;

    let key_type = KeyType::from_public_codec(codec).ok_or_else(|| {
        EncodingError::InvalidDidFormat(format!("Unrecognized multicodec (0x{codec:x})"))
    })?;

    Ok((key_type, public_key))
}

/// Turns verifier input into a did:key.
///
/// Input that already starts with `did:key:` is returned unmodified. Anything
/// else is read as a public key in `encoding` and derived using `key_type`.
pub fn did_from_input(value: &str, encoding: Encoding, key_type: KeyType) -> Result<String> {
    if is_did_key(value) {
        return Ok(value.to_string());
    }

    debug!("Deriving {key_type} did:key from {encoding} public key");
    let public_key = encoding.decode(value)?;
    Ok(public_key_to_did(&public_key, key_type))
}
