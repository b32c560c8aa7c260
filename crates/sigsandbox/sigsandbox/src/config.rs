/*!
 * Sandbox configuration options
 */

use sigsandbox_crypto::rsa::{DEFAULT_MODULUS_BITS, MIN_MODULUS_BITS};
use sigsandbox_encoding::Encoding;

use crate::errors::{Result, SandboxError};

const DEFAULT_ENCODING: Encoding = Encoding::Base64Pad;

#[derive(Clone, Debug)]
pub struct SandboxConfig {
    pub public_key_encoding: Encoding,
    pub signature_encoding: Encoding,
    pub verifier_encoding: Encoding,
    pub import_encoding: Encoding,
    pub rsa_modulus_bits: usize,
    pub ucan_clock_leeway: u64,
}

impl SandboxConfig {
    /// Returns a builder for `SandboxConfig`
    /// Example:
    /// ```
    /// use sigsandbox::config::SandboxConfig;
    ///
    /// let config = SandboxConfig::builder().build().unwrap();
    /// ```
    pub fn builder() -> SandboxConfigBuilder {
        SandboxConfigBuilder::default()
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        SandboxConfig {
            public_key_encoding: DEFAULT_ENCODING,
            signature_encoding: DEFAULT_ENCODING,
            verifier_encoding: DEFAULT_ENCODING,
            import_encoding: DEFAULT_ENCODING,
            rsa_modulus_bits: DEFAULT_MODULUS_BITS,
            ucan_clock_leeway: 0,
        }
    }
}

/// Builder for `SandboxConfig`.
/// Example:
/// ```
/// use sigsandbox::config::SandboxConfigBuilder;
/// use sigsandbox::encoding::Encoding;
///
/// let config = SandboxConfigBuilder::default()
///     .with_signature_encoding(Encoding::Base58Btc)
///     .with_ucan_clock_leeway(30)
///     .build()
///     .unwrap();
/// ```
pub struct SandboxConfigBuilder {
    /// Encoding public and private keys are displayed in
    /// Default: base64pad
    public_key_encoding: Encoding,

    /// Encoding the latest signature is displayed in
    /// Default: base64pad
    signature_encoding: Encoding,

    /// Encoding signatures and public keys are read in when verifying
    /// Default: base64pad
    verifier_encoding: Encoding,

    /// Encoding private key bytes are read in when importing
    /// Default: base64pad
    import_encoding: Encoding,

    /// Modulus size of generated RSA keys
    /// Default: 2048, must be at least 1024
    rsa_modulus_bits: usize,

    /// Seconds of clock skew tolerated on UCAN `exp` and `nbf`
    /// Default: 0
    ucan_clock_leeway: u64,
}

impl Default for SandboxConfigBuilder {
    fn default() -> Self {
        let config = SandboxConfig::default();

        SandboxConfigBuilder {
            public_key_encoding: config.public_key_encoding,
            signature_encoding: config.signature_encoding,
            verifier_encoding: config.verifier_encoding,
            import_encoding: config.import_encoding,
            rsa_modulus_bits: config.rsa_modulus_bits,
            ucan_clock_leeway: config.ucan_clock_leeway,
        }
    }
}

impl SandboxConfigBuilder {
    /// Default starting constructor for `SandboxConfigBuilder`
    pub fn new() -> SandboxConfigBuilder {
        SandboxConfigBuilder::default()
    }

    /// Build the `SandboxConfig` from the builder
    pub fn build(self) -> Result<SandboxConfig> {
        if self.rsa_modulus_bits < MIN_MODULUS_BITS {
            return Err(SandboxError::Config(format!(
                "rsa_modulus_bits must be at least {MIN_MODULUS_BITS}, got {}",
                self.rsa_modulus_bits
            )));
        }

        Ok(SandboxConfig {
            public_key_encoding: self.public_key_encoding,
            signature_encoding: self.signature_encoding,
            verifier_encoding: self.verifier_encoding,
            import_encoding: self.import_encoding,
            rsa_modulus_bits: self.rsa_modulus_bits,
            ucan_clock_leeway: self.ucan_clock_leeway,
        })
    }

    pub fn with_public_key_encoding(mut self, encoding: Encoding) -> Self {
        self.public_key_encoding = encoding;
        self
    }

    pub fn with_signature_encoding(mut self, encoding: Encoding) -> Self {
        self.signature_encoding = encoding;
        self
    }

    pub fn with_verifier_encoding(mut self, encoding: Encoding) -> Self {
        self.verifier_encoding = encoding;
        self
    }

    pub fn with_import_encoding(mut self, encoding: Encoding) -> Self {
        self.import_encoding = encoding;
        self
    }

    pub fn with_rsa_modulus_bits(mut self, bits: usize) -> Self {
        self.rsa_modulus_bits = bits;
        self
    }

    pub fn with_ucan_clock_leeway(mut self, seconds: u64) -> Self {
        self.ucan_clock_leeway = seconds;
        self
    }
}
