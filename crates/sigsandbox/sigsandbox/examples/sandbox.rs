/*!
 * Command line signature sandbox.
 *
 * Each invocation is a fresh session. Private keys for `sign` are read from
 * `--key` or from STDIN.
 */

use clap::{Parser, Subcommand};
use sigsandbox::{
    Result, SandboxConfig, Session,
    crypto::ImportFormat,
    encoding::{Encoding, KeyType, did_from_input},
};
use std::io::{self, Read};
use tracing_subscriber::filter;

/// Signature Sandbox
#[derive(Parser)]
#[command(name = "sandbox")]
#[command(bin_name = "sandbox")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Key type (ed25519, ecc or rsa)
    #[arg(short, long, default_value = "ed25519")]
    key_type: KeyType,

    /// Encoding for keys and signatures (base64, base64pad, base64url, base58btc, hex)
    #[arg(short, long, default_value = "base64pad")]
    encoding: Encoding,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a key and print its DID, public key and private key
    Generate {
        /// Private key output format (raw, jwk, pem, pkcs8)
        #[arg(short, long, default_value = "jwk")]
        format: ImportFormat,

        /// RSA modulus size
        #[arg(short, long, default_value_t = 2048)]
        bits: usize,
    },

    /// Sign a message with an imported private key
    Sign {
        /// Message to sign
        #[arg(short, long)]
        message: String,

        /// Private key format (raw, jwk, pem, pkcs8)
        #[arg(short, long, default_value = "jwk")]
        format: ImportFormat,

        /// Private key text, read from STDIN if not given
        #[arg(long)]
        key: Option<String>,
    },

    /// Verify a signature
    Verify {
        /// Message that was signed
        #[arg(short, long)]
        message: String,

        /// did:key or public key of the signer
        #[arg(short = 'S', long)]
        signer: String,

        /// Signature to check
        #[arg(short, long)]
        signature: String,
    },

    /// Derive a did:key from a public key
    Did {
        /// Public key in the selected encoding
        public_key: String,
    },

    /// Validate a UCAN token
    Ucan {
        token: String,

        /// Seconds of clock skew to tolerate
        #[arg(short, long, default_value_t = 0)]
        leeway: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // construct a subscriber that prints formatted traces to stdout
    let subscriber = tracing_subscriber::fmt()
        // Use a more compact, abbreviated log format
        .with_env_filter(filter::EnvFilter::from_default_env())
        .finish();
    // use that subscriber to process traces emitted after this point
    tracing::subscriber::set_global_default(subscriber).expect("Logging failed, exiting...");

    let key_type = args.key_type;

    match args.command {
        Commands::Generate { format, bits } => {
            let config = SandboxConfig::builder()
                .with_public_key_encoding(args.encoding)
                .with_rsa_modulus_bits(bits)
                .build()?;
            let mut session = Session::new(config);

            session.generate(key_type).await?;
            println!("DID:         {}", session.did(key_type)?);
            println!("Multikey:    {}", session.multikey(key_type)?);
            println!(
                "Public key:  {} ({})",
                session.encoded_public_key(key_type)?,
                args.encoding.name()
            );
            println!("Private key:\n{}", session.export(key_type, format)?.as_str());
        }
        Commands::Sign {
            message,
            format,
            key,
        } => {
            let key = match key {
                Some(key) => key,
                None => {
                    println!("Paste the private key, then close STDIN (Ctrl-D):");
                    let mut input = String::new();
                    io::stdin()
                        .read_to_string(&mut input)
                        .expect("Couldn't read from STDIN");
                    input
                }
            };

            let config = SandboxConfig::builder()
                .with_signature_encoding(args.encoding)
                .build()?;
            let mut session = Session::new(config);

            session.import(&key, format, key_type)?;
            println!("DID:       {}", session.did(key_type)?);
            println!("Signature: {}", session.sign(key_type, &message).await?);
        }
        Commands::Verify {
            message,
            signer,
            signature,
        } => {
            let config = SandboxConfig::builder()
                .with_verifier_encoding(args.encoding)
                .build()?;
            let session = Session::new(config);

            let result = session.verify(key_type, &message, &signer, &signature);
            match result.error {
                Some(error) => println!("Verification error: {error}"),
                None if result.valid => println!("Signature is valid"),
                None => println!("Signature is NOT valid"),
            }
        }
        Commands::Did { public_key } => {
            println!("{}", did_from_input(public_key.trim(), args.encoding, key_type)?);
        }
        Commands::Ucan { token, leeway } => {
            let config = SandboxConfig::builder()
                .with_ucan_clock_leeway(leeway)
                .build()?;
            let validation = Session::new(config).validate_ucan(token.trim());

            println!(
                "{}",
                serde_json::to_string_pretty(&validation).expect("Couldn't serialize validation")
            );
        }
    }

    Ok(())
}
