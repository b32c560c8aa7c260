//! Signature verification from user input
//!
//! The signer is either a did:key, used as is, or a public key in the
//! verifier encoding, turned into a did:key with the key type of the page
//! doing the verifying.

use serde::{Deserialize, Serialize};
use sigsandbox_encoding::{Encoding, KeyType, did_from_input};
use tracing::{debug, warn};

use crate::{errors::Result, signature::SignatureTranscoder};

/// Outcome of a verification attempt.
///
/// `valid: false` with no `error` is a signature that doesn't match.
/// `valid: false` with an `error` means verification couldn't run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationResult {
    pub fn checked(valid: bool) -> Self {
        VerificationResult { valid, error: None }
    }

    pub fn failed(error: impl ToString) -> Self {
        VerificationResult {
            valid: false,
            error: Some(error.to_string()),
        }
    }

    /// True if verification couldn't run at all
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Verifies a UTF-8 message against user supplied signer and signature text
pub fn verify_input(
    message: &str,
    signer: &str,
    signature: &str,
    encoding: Encoding,
    key_type: KeyType,
) -> VerificationResult {
    match try_verify(message, signer, signature, encoding, key_type) {
        Ok(valid) => {
            debug!("Signature verified: valid={valid}");
            VerificationResult::checked(valid)
        }
        Err(e) => {
            warn!("Verification couldn't run: {e}");
            VerificationResult::failed(e)
        }
    }
}

fn try_verify(
    message: &str,
    signer: &str,
    signature: &str,
    encoding: Encoding,
    key_type: KeyType,
) -> Result<bool> {
    let signature = SignatureTranscoder::decode_input(signature, encoding)?;
    let did = did_from_input(signer.trim(), encoding, key_type)?;

    Ok(sigsandbox_crypto::verify(message.as_bytes(), &did, &signature)?)
}
