//! Ed25519 key operations

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use sigsandbox_encoding::Encoding;
use zeroize::Zeroizing;

use crate::{CryptoError, JWK, OctetParams, Params, error::Result, jwk::ED25519_CURVE};

pub const SEED_LENGTH: usize = 32;
pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const SIGNATURE_LENGTH: usize = 64;

/// Ed25519 signing key with raw public bytes and JWK representation
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    pub public_bytes: Vec<u8>,
    pub jwk: JWK,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_bytes", &BASE64_URL_SAFE_NO_PAD.encode(&self.public_bytes))
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    fn from_signing_key(signing_key: SigningKey) -> Self {
        let seed = Zeroizing::new(signing_key.to_bytes());
        let public_bytes = signing_key.verifying_key().to_bytes().to_vec();

        KeyPair {
            jwk: JWK {
                key_id: None,
                params: Params::OKP(OctetParams {
                    curve: ED25519_CURVE.to_string(),
                    x: BASE64_URL_SAFE_NO_PAD.encode(&public_bytes),
                    d: Some(BASE64_URL_SAFE_NO_PAD.encode(seed.as_slice())),
                }),
            },
            signing_key,
            public_bytes,
        }
    }

    /// The 32 byte seed, read back from the `d` member of the private JWK
    pub fn private_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        let Params::OKP(OctetParams { d: Some(d), .. }) = &self.jwk.params else {
            return Err(CryptoError::KeyError(
                "Ed25519 JWK has no private member".to_string(),
            ));
        };

        Encoding::Base64Url
            .decode(d)
            .map(Zeroizing::new)
            .map_err(|e| CryptoError::KeyError(format!("Couldn't decode Ed25519 seed: {e}")))
    }

    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }
}

/// Generates an Ed25519 signing key pair, random unless a seed is given
pub fn generate(seed: Option<&[u8; SEED_LENGTH]>) -> KeyPair {
    let signing_key = match seed {
        Some(seed) => SigningKey::from_bytes(seed),
        None => SigningKey::generate(&mut OsRng),
    };

    KeyPair::from_signing_key(signing_key)
}

/// Builds a key pair from raw seed bytes, which must be exactly 32 bytes long
pub fn from_seed_bytes(seed: &[u8]) -> Result<KeyPair> {
    let seed: Zeroizing<[u8; SEED_LENGTH]> =
        Zeroizing::new(seed.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: SEED_LENGTH,
            actual: seed.len(),
        })?);

    Ok(generate(Some(&*seed)))
}

/// Builds a key pair from private OKP JWK parameters.
///
/// `x`, when present, must match the public key derived from `d`.
pub fn from_jwk(params: &OctetParams) -> Result<KeyPair> {
    if params.curve != ED25519_CURVE {
        return Err(CryptoError::InvalidKeyFormat(format!(
            "Expected crv {ED25519_CURVE}, got {}",
            params.curve
        )));
    }

    let Some(d) = &params.d else {
        return Err(CryptoError::InvalidKeyFormat(
            "Ed25519 JWK is missing the private member d".to_string(),
        ));
    };

    let seed = Zeroizing::new(Encoding::Base64Url.decode(d).map_err(|e| {
        CryptoError::InvalidKeyFormat(format!("Couldn't decode Ed25519 JWK d: {e}"))
    })?);

    let keypair = from_seed_bytes(&seed)?;

    let x = Encoding::Base64Url.decode(&params.x).ok();
    if !params.x.is_empty() && x.as_deref() != Some(keypair.public_bytes.as_slice()) {
        return Err(CryptoError::InvalidKeyFormat(
            "Ed25519 JWK x doesn't match the public key of d".to_string(),
        ));
    }

    Ok(keypair)
}

/// Generates a public JWK from Ed25519 raw bytes
pub fn public_jwk(data: &[u8]) -> Result<JWK> {
    if data.len() != PUBLIC_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: PUBLIC_KEY_LENGTH,
            actual: data.len(),
        });
    }

    Ok(JWK {
        key_id: None,
        params: Params::OKP(OctetParams {
            curve: ED25519_CURVE.to_string(),
            x: BASE64_URL_SAFE_NO_PAD.encode(data),
            d: None,
        }),
    })
}

/// Verifies a signature against raw public key bytes.
///
/// A signature that doesn't match is `Ok(false)`. A public key or signature
/// that can't be parsed (including any signature that isn't 64 bytes) is a
/// [`CryptoError::VerificationFailure`].
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
    let verifying_key = VerifyingKey::try_from(public_key).map_err(|e| {
        CryptoError::VerificationFailure(format!("Couldn't create Ed25519 VerifyingKey: {e}"))
    })?;

    if signature.len() != SIGNATURE_LENGTH {
        return Err(CryptoError::VerificationFailure(format!(
            "Ed25519 signatures are {SIGNATURE_LENGTH} bytes, got {}",
            signature.len()
        )));
    }

    let signature = Signature::from_slice(signature)
        .map_err(|e| CryptoError::VerificationFailure(format!("Invalid Ed25519 signature: {e}")))?;

    Ok(verifying_key.verify(message, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 31 zero bytes followed by 0x01
    const SEED: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAE";
    const PUBLIC_KEY: &str = "TLWr9q15-_WrvMr8wmnYXNJlHtS4hbWGnyQa7fCluik";
    const HELLO_WORLD_SIGNATURE: &str = "wm-3N6Ww-6s0PZrI2AT4NvVCb-yFRBYCWokc0kWjmML7hTl1fkSvl4m2sPgOGaoK4HcJWArxfrt5RZU2JWbHBQ";

    fn seeded() -> KeyPair {
        from_seed_bytes(&BASE64_URL_SAFE_NO_PAD.decode(SEED).unwrap()).unwrap()
    }

    #[test]
    fn generate_ed25519_from_seed() {
        let keypair = seeded();

        assert_eq!(BASE64_URL_SAFE_NO_PAD.encode(&keypair.public_bytes), PUBLIC_KEY);
        assert_eq!(
            keypair.jwk.params,
            Params::OKP(OctetParams {
                curve: "Ed25519".to_string(),
                x: PUBLIC_KEY.to_string(),
                d: Some(SEED.to_string()),
            })
        );
        assert_eq!(
            keypair.private_bytes().unwrap().as_slice(),
            BASE64_URL_SAFE_NO_PAD.decode(SEED).unwrap()
        );
    }

    #[test]
    fn random_keys_differ() {
        assert_ne!(generate(None).public_bytes, generate(None).public_bytes);
    }

    #[test]
    fn signatures_are_deterministic() {
        let signature = seeded().sign(b"hello world");
        assert_eq!(BASE64_URL_SAFE_NO_PAD.encode(&signature), HELLO_WORLD_SIGNATURE);
    }

    #[test]
    fn verify_good_and_tampered() {
        let keypair = seeded();
        let signature = keypair.sign(b"hello world");

        assert!(verify(&keypair.public_bytes, b"hello world", &signature).unwrap());
        assert!(!verify(&keypair.public_bytes, b"hello world!", &signature).unwrap());

        let mut tampered = signature.clone();
        tampered[0] ^= 0x01;
        assert!(!verify(&keypair.public_bytes, b"hello world", &tampered).unwrap());
    }

    #[test]
    fn verify_wrong_signature_length_fails() {
        let keypair = seeded();
        let signature = keypair.sign(b"hello world");

        assert!(matches!(
            verify(&keypair.public_bytes, b"hello world", &signature[..63]),
            Err(CryptoError::VerificationFailure(_))
        ));
    }

    #[test]
    fn verify_bad_public_key_fails() {
        assert!(matches!(
            verify(&[0u8; 31], b"hello world", &[0u8; 64]),
            Err(CryptoError::VerificationFailure(_))
        ));
    }

    #[test]
    fn seed_length_is_checked() {
        assert!(matches!(
            from_seed_bytes(&[0u8; 31]),
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 31
            })
        ));
    }

    #[test]
    fn from_jwk_roundtrip() {
        let keypair = seeded();
        let Params::OKP(params) = &keypair.jwk.params else {
            panic!("expected OKP params");
        };

        assert_eq!(from_jwk(params).unwrap().public_bytes, keypair.public_bytes);
    }

    #[test]
    fn from_jwk_accepts_padded_members() {
        let params = OctetParams {
            curve: "Ed25519".to_string(),
            x: format!("{PUBLIC_KEY}="),
            d: Some(format!("{SEED}=")),
        };

        let keypair = from_jwk(&params).unwrap();
        assert_eq!(BASE64_URL_SAFE_NO_PAD.encode(&keypair.public_bytes), PUBLIC_KEY);
    }

    #[test]
    fn from_jwk_rejects_mismatched_x() {
        let params = OctetParams {
            curve: "Ed25519".to_string(),
            x: "Xx4_L89E6RsyvDTzN9wuN3cDwgifPkXMgFJv_HMIxdk".to_string(),
            d: Some(SEED.to_string()),
        };

        assert!(matches!(
            from_jwk(&params),
            Err(CryptoError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn from_jwk_requires_d() {
        let params = OctetParams {
            curve: "Ed25519".to_string(),
            x: PUBLIC_KEY.to_string(),
            d: None,
        };

        assert!(matches!(
            from_jwk(&params),
            Err(CryptoError::InvalidKeyFormat(_))
        ));
    }
}
