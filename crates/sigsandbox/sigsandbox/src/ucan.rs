//! UCAN tokens in JWT form
//!
//! A token is `header.payload.signature`, each segment base64url without
//! padding. The issuer (`iss`) must be a did:key, and its key type must
//! match the header `alg`: `EdDSA` for Ed25519 and `RS256` for RSA.

use std::str::FromStr;

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use sigsandbox_crypto::{CryptoError, KeyMaterial};
use sigsandbox_encoding::did_to_public_key;
use tracing::debug;

use crate::errors::UcanError;

pub const UCAN_VERSION: &str = "0.10.0";

/// Shown in [`UcanDetails`] for absent timestamps
pub const NOT_AVAILABLE: &str = "N/A";

type Result<T> = std::result::Result<T, UcanError>;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct UcanHeader {
    pub alg: String,
    pub typ: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ucv: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct UcanPayload {
    pub iss: String,
    pub aud: String,
    #[serde(default)]
    pub exp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nnc: Option<String>,
    #[serde(default = "empty_capabilities")]
    pub att: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fct: Vec<Value>,
    #[serde(default)]
    pub prf: Vec<String>,
}

fn empty_capabilities() -> Value {
    Value::Array(Vec::new())
}

impl UcanPayload {
    pub fn new(issuer: &str, audience: &str, expiration: Option<u64>) -> Self {
        UcanPayload {
            iss: issuer.to_string(),
            aud: audience.to_string(),
            exp: expiration,
            nbf: None,
            nnc: None,
            att: empty_capabilities(),
            fct: Vec::new(),
            prf: Vec::new(),
        }
    }

    pub fn with_not_before(mut self, not_before: u64) -> Self {
        self.nbf = Some(not_before);
        self
    }

    pub fn with_capabilities(mut self, capabilities: Value) -> Self {
        self.att = capabilities;
        self
    }
}

/// Summary of a validated UCAN, timestamps as RFC 3339 or "N/A"
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UcanDetails {
    pub issuer: String,
    pub audience: String,
    pub expiration: String,
    pub not_before: String,
    pub capabilities: Value,
}

/// Result of validating a pasted token
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct UcanValidation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<UcanDetails>,
}

impl From<Result<UcanDetails>> for UcanValidation {
    fn from(result: Result<UcanDetails>) -> Self {
        match result {
            Ok(details) => UcanValidation {
                valid: true,
                error: None,
                details: Some(details),
            },
            Err(e) => UcanValidation {
                valid: false,
                error: Some(e.to_string()),
                details: None,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ucan {
    header: UcanHeader,
    payload: UcanPayload,
    signed_data: String,
    signature: Vec<u8>,
}

impl Ucan {
    /// Signs a payload with the issuer's key. The payload `iss` must be the
    /// issuer's did:key.
    pub fn issue(issuer: &KeyMaterial, payload: UcanPayload) -> Result<Self> {
        if payload.iss != issuer.did() {
            return Err(UcanError::Malformed(format!(
                "iss ({}) isn't the signing key's DID",
                payload.iss
            )));
        }

        let header = UcanHeader {
            alg: issuer.key_type().jwt_algorithm().to_string(),
            typ: "JWT".to_string(),
            ucv: Some(UCAN_VERSION.to_string()),
        };

        let signed_data = format!("{}.{}", jwt_encode(&header)?, jwt_encode(&payload)?);
        let signature = issuer.sign(signed_data.as_bytes())?;

        debug!("Issued UCAN from {} to {}", payload.iss, payload.aud);
        Ok(Ucan {
            header,
            payload,
            signed_data,
            signature,
        })
    }

    /// Checks timestamps, algorithm and signature.
    ///
    /// `now` is in seconds since the epoch. `leeway` seconds of clock skew are
    /// tolerated on both `exp` and `nbf`.
    pub fn validate(&self, now: u64, leeway: u64) -> Result<()> {
        if self.is_expired(now, leeway) {
            return Err(UcanError::Expired);
        }

        if self.is_too_early(now, leeway) {
            return Err(UcanError::NotYetValid);
        }

        self.check_signature()
    }

    /// Validates that the signed data was signed by the stated issuer
    pub fn check_signature(&self) -> Result<()> {
        let (key_type, _) = did_to_public_key(&self.payload.iss).map_err(CryptoError::from)?;

        if key_type.jwt_algorithm() != self.header.alg {
            return Err(UcanError::AlgorithmMismatch {
                alg: self.header.alg.clone(),
                key_type,
            });
        }

        if sigsandbox_crypto::verify(
            self.signed_data.as_bytes(),
            &self.payload.iss,
            &self.signature,
        )? {
            Ok(())
        } else {
            Err(UcanError::InvalidSignature)
        }
    }

    /// Returns true if the UCAN has passed its expiration date
    pub fn is_expired(&self, now: u64, leeway: u64) -> bool {
        self.payload
            .exp
            .is_some_and(|exp| exp.saturating_add(leeway) < now)
    }

    /// Returns true if the not-before ("nbf") time is still in the future
    pub fn is_too_early(&self, now: u64, leeway: u64) -> bool {
        self.payload
            .nbf
            .is_some_and(|nbf| nbf > now.saturating_add(leeway))
    }

    /// JWT serialization of the token
    pub fn encode(&self) -> String {
        format!(
            "{}.{}",
            self.signed_data,
            BASE64_URL_SAFE_NO_PAD.encode(&self.signature)
        )
    }

    pub fn details(&self) -> UcanDetails {
        UcanDetails {
            issuer: self.payload.iss.clone(),
            audience: self.payload.aud.clone(),
            expiration: display_timestamp(self.payload.exp),
            not_before: display_timestamp(self.payload.nbf),
            capabilities: self.payload.att.clone(),
        }
    }

    pub fn header(&self) -> &UcanHeader {
        &self.header
    }

    pub fn payload(&self) -> &UcanPayload {
        &self.payload
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

impl FromStr for Ucan {
    type Err = UcanError;

    fn from_str(token: &str) -> Result<Self> {
        let token = token.trim();
        let parts: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = parts.as_slice() else {
            return Err(UcanError::Malformed(format!(
                "Expected 3 dot separated segments, got {}",
                parts.len()
            )));
        };

        let header: UcanHeader = jwt_decode("header", header)?;
        let payload: UcanPayload = jwt_decode("payload", payload)?;
        let signature = BASE64_URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| UcanError::Malformed(format!("Couldn't decode signature: {e}")))?;

        Ok(Ucan {
            signed_data: token[..token.len() - parts[2].len() - 1].to_string(),
            header,
            payload,
            signature,
        })
    }
}

/// Parses and validates a token against the current clock
pub fn validate(token: &str, leeway: u64) -> Result<UcanDetails> {
    let ucan = Ucan::from_str(token)?;
    ucan.validate(now(), leeway)?;

    debug!("UCAN from {} is valid", ucan.payload.iss);
    Ok(ucan.details())
}

/// Seconds since the epoch
pub fn now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

fn display_timestamp(seconds: Option<u64>) -> String {
    seconds
        .filter(|seconds| *seconds > 0)
        .and_then(|seconds| i64::try_from(seconds).ok())
        .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn jwt_encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_vec(value)
        .map(|json| BASE64_URL_SAFE_NO_PAD.encode(json))
        .map_err(|e| UcanError::Malformed(format!("Couldn't serialize segment: {e}")))
}

fn jwt_decode<T: DeserializeOwned>(name: &str, segment: &str) -> Result<T> {
    let json = BASE64_URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| UcanError::Malformed(format!("Couldn't decode {name}: {e}")))?;

    serde_json::from_slice(&json)
        .map_err(|e| UcanError::Malformed(format!("Couldn't parse {name} JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sigsandbox_crypto::{ImportFormat, KeyType, import_private_key};

    const SEED: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAE";
    const AUDIENCE: &str = "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";
    // 2030-01-01T00:00:00Z
    const EXPIRATION: u64 = 1_893_456_000;

    fn issuer() -> KeyMaterial {
        import_private_key(SEED, ImportFormat::Raw, KeyType::Ed25519).unwrap()
    }

    fn token(payload: UcanPayload) -> Ucan {
        Ucan::issue(&issuer(), payload).unwrap()
    }

    #[test]
    fn issue_and_validate() {
        let capabilities = json!([{"with": "mailto:alice@example.com", "can": "msg/send"}]);
        let payload = UcanPayload::new(&issuer().did(), AUDIENCE, Some(EXPIRATION))
            .with_capabilities(capabilities.clone());

        let encoded = token(payload).encode();
        let ucan = Ucan::from_str(&encoded).unwrap();

        assert_eq!(ucan.header().alg, "EdDSA");
        ucan.validate(EXPIRATION - 10, 0).unwrap();
        assert_eq!(ucan.encode(), encoded);

        let details = ucan.details();
        assert_eq!(details.issuer, issuer().did());
        assert_eq!(details.audience, AUDIENCE);
        assert_eq!(details.expiration, "2030-01-01T00:00:00.000Z");
        assert_eq!(details.not_before, NOT_AVAILABLE);
        assert_eq!(details.capabilities, capabilities);
    }

    #[test]
    fn expiry_and_not_before() {
        let payload = UcanPayload::new(&issuer().did(), AUDIENCE, Some(EXPIRATION))
            .with_not_before(EXPIRATION - 100);
        let ucan = token(payload);

        assert!(matches!(ucan.validate(EXPIRATION + 1, 0), Err(UcanError::Expired)));
        assert!(ucan.validate(EXPIRATION + 1, 5).is_ok());
        assert!(matches!(
            ucan.validate(EXPIRATION - 101, 0),
            Err(UcanError::NotYetValid)
        ));
        assert!(ucan.validate(EXPIRATION - 101, 1).is_ok());
    }

    #[test]
    fn no_expiration_never_expires() {
        let ucan = token(UcanPayload::new(&issuer().did(), AUDIENCE, None));
        assert!(ucan.validate(u64::MAX, 0).is_ok());
        assert_eq!(ucan.details().expiration, NOT_AVAILABLE);
    }

    #[test]
    fn tampered_payload_is_invalid_signature() {
        let encoded = token(UcanPayload::new(&issuer().did(), AUDIENCE, None)).encode();
        let mut parts: Vec<String> = encoded.split('.').map(str::to_string).collect();

        let other = UcanPayload::new(&issuer().did(), "did:key:z6MkOther", None);
        parts[1] = jwt_encode(&other).unwrap();

        let ucan = Ucan::from_str(&parts.join(".")).unwrap();
        assert!(matches!(
            ucan.validate(0, 0),
            Err(UcanError::InvalidSignature)
        ));
    }

    #[test]
    fn algorithm_must_match_issuer() {
        let ucan = token(UcanPayload::new(&issuer().did(), AUDIENCE, None));
        let header = UcanHeader {
            alg: "RS256".to_string(),
            ..ucan.header().clone()
        };
        let forged = format!(
            "{}.{}.{}",
            jwt_encode(&header).unwrap(),
            jwt_encode(ucan.payload()).unwrap(),
            BASE64_URL_SAFE_NO_PAD.encode(ucan.signature())
        );

        assert!(matches!(
            Ucan::from_str(&forged).unwrap().validate(0, 0),
            Err(UcanError::AlgorithmMismatch { .. })
        ));
    }

    #[test]
    fn issuer_must_be_signing_key() {
        let payload = UcanPayload::new(AUDIENCE, AUDIENCE, None);
        assert!(matches!(
            Ucan::issue(&issuer(), payload),
            Err(UcanError::Malformed(_))
        ));
    }

    #[test]
    fn malformed_tokens() {
        for token in ["", "a.b", "a.b.c.d", "!!.e30.AA", "e30.e30.AA"] {
            assert!(
                matches!(Ucan::from_str(token), Err(UcanError::Malformed(_))),
                "{token}"
            );
        }
    }

    #[test]
    fn non_did_key_issuer_fails() {
        let payload = UcanPayload::new("did:web:example.com", AUDIENCE, None);
        let forged = format!(
            "{}.{}.AA",
            jwt_encode(&UcanHeader {
                alg: "EdDSA".to_string(),
                typ: "JWT".to_string(),
                ucv: None,
            })
            .unwrap(),
            jwt_encode(&payload).unwrap()
        );

        assert!(matches!(
            Ucan::from_str(&forged).unwrap().validate(0, 0),
            Err(UcanError::Crypto(_))
        ));
    }

    #[test]
    fn validation_summary() {
        let expired = token(UcanPayload::new(&issuer().did(), AUDIENCE, Some(1))).encode();

        let summary = UcanValidation::from(validate(&expired, 0));
        assert!(!summary.valid);
        assert_eq!(summary.error.as_deref(), Some("Expired"));
        assert_eq!(summary.details, None);
    }
}
