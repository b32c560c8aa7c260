/*!
 * Signature Sandbox
 *
 * Generate or import Ed25519 and RSA keys, sign messages, verify signatures
 * against a did:key or public key, and validate UCAN tokens.
 *
 * Start a session with [`Session::new`] or [`Session::default`]
 */

pub mod config;
pub mod errors;
pub mod session;
pub mod signature;
pub mod ucan;
pub mod verification;

// Re-export required crates for convenience to applications
pub extern crate sigsandbox_crypto as crypto;
pub extern crate sigsandbox_encoding as encoding;

pub use config::{SandboxConfig, SandboxConfigBuilder};
pub use errors::{Result, SandboxError, UcanError};
pub use session::Session;
pub use signature::SignatureTranscoder;
pub use ucan::{Ucan, UcanDetails, UcanValidation};
pub use verification::VerificationResult;
