//! Cryptographic primitives for the Signature Sandbox
//!
//! This crate provides:
//! - JWK (JSON Web Key) types per RFC 7517 for OKP (Ed25519) and RSA keys
//! - Key generation, signing and verification for Ed25519 (EdDSA) and RSA (RS256)
//! - Private key import from raw seeds, JWK and PKCS#8 PEM, and export back
//! - Verification against did:key identifiers

mod error;
mod import;
mod jwk;
mod key_material;
mod verify;

pub mod ed25519;
pub mod rsa;

pub use error::CryptoError;
pub use import::{ImportFormat, export_private_key, import_private_key, import_private_key_encoded};
pub use jwk::{ED25519_CURVE, JWK, OctetParams, Params, RsaParams};
pub use key_material::KeyMaterial;
pub use sigsandbox_encoding::KeyType;
pub use verify::{verify, verify_with_public_key};
