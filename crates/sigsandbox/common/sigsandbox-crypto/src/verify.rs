//! Signature verification against public keys and did:key identifiers

use sigsandbox_encoding::{KeyType, did_to_public_key};
use tracing::debug;

use crate::{ed25519, error::Result, rsa};

/// Verifies a signature with raw public key bytes of the given type.
///
/// `Ok(false)` means the signature doesn't match. An `Err` means verification
/// couldn't run (unusable key or structurally invalid signature).
pub fn verify_with_public_key(
    key_type: KeyType,
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    match key_type {
        KeyType::Ed25519 => ed25519::verify(public_key, message, signature),
        KeyType::Rsa => rsa::verify(public_key, message, signature),
    }
}

/// Verifies a signature against a did:key.
///
/// The key type comes from the DID's multicodec prefix, so an Ed25519 DID is
/// always checked with EdDSA and an RSA DID with RS256.
pub fn verify(message: &[u8], did: &str, signature: &[u8]) -> Result<bool> {
    let (key_type, public_key) = did_to_public_key(did)?;
    debug!("Verifying {key_type} signature ({} bytes)", signature.len());

    verify_with_public_key(key_type, &public_key, message, signature)
}
