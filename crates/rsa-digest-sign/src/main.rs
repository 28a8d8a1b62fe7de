use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rsa_digest_sign::{
    DigestAlgorithm, RsaDigestSigner, RsaKey, sign_with_rsa_private_key, verify_with_rsa_public_key,
};

#[derive(Parser)]
#[clap(name = "rsa-sign", about = "Sign and verify message digests with RSA keys")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a private key and write it as PKCS#8 PEM
    Genkey {
        #[clap(long, default_value = "2048")]
        bits: usize,
        /// Derive the key deterministically from this seed
        #[clap(long, env = "RSA_SIGN_KEY_SEED")]
        seed: Option<String>,
        #[clap(long)]
        out: PathBuf,
        /// Also write the SPKI public key here
        #[clap(long)]
        public_out: Option<PathBuf>,
    },
    /// Print the public half of a key as SPKI PEM
    Pubkey {
        #[clap(long, env = "RSA_SIGN_KEY")]
        key: PathBuf,
    },
    /// Print the hex digest of the input
    Digest {
        #[clap(long, env = "RSA_SIGN_DIGEST", default_value = "SHA256")]
        digest: String,
        #[clap(long)]
        input: Option<PathBuf>,
    },
    /// Print the hex signature over the input's digest
    Sign {
        #[clap(flatten)]
        target: Target,
        /// Print a JSON document with digest, signature and public key
        #[clap(long, conflicts_with = "prehashed")]
        json: bool,
    },
    /// Check a hex signature over the input's digest
    Verify {
        #[clap(flatten)]
        target: Target,
        #[clap(long)]
        signature: String,
    },
}

#[derive(Args)]
struct Target {
    #[clap(long, env = "RSA_SIGN_KEY")]
    key: PathBuf,
    #[clap(long, env = "RSA_SIGN_DIGEST", default_value = "SHA256")]
    digest: String,
    /// Message file, stdin when omitted
    #[clap(long, conflicts_with = "prehashed")]
    input: Option<PathBuf>,
    /// Hex digest to use as is instead of hashing a message
    #[clap(long)]
    prehashed: Option<String>,
}

impl Target {
    fn digest_bytes(&self) -> Result<Vec<u8>> {
        if let Some(prehashed) = &self.prehashed {
            return hex::decode(prehashed.trim()).context("decoding --prehashed digest");
        }
        let algorithm = parse_digest(&self.digest)?;
        Ok(algorithm.digest(&read_input(self.input.as_deref())?))
    }
}

fn parse_digest(name: &str) -> Result<DigestAlgorithm> {
    name.parse::<DigestAlgorithm>()
        .with_context(|| format!("supported digests: {}", supported_digests()))
}

fn supported_digests() -> String {
    DigestAlgorithm::all()
        .iter()
        .map(DigestAlgorithm::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut data = Vec::new();
            std::io::stdin().read_to_end(&mut data).context("reading stdin")?;
            Ok(data)
        }
    }
}

fn load_key(path: &Path) -> Result<RsaKey> {
    let pem = std::fs::read_to_string(path).with_context(|| format!("reading key {}", path.display()))?;
    RsaKey::import_pem(&pem).with_context(|| format!("parsing key {}", path.display()))
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Genkey { bits, seed, out, public_out } => {
            let key = match seed {
                Some(seed) => RsaKey::from_seed(&seed, bits),
                None => RsaKey::generate(bits),
            }
            .context("generating RSA key")?;
            std::fs::write(&out, key.export_private_pem()?).with_context(|| format!("writing {}", out.display()))?;
            if let Some(public_out) = public_out {
                std::fs::write(&public_out, key.export_public_pem()?)
                    .with_context(|| format!("writing {}", public_out.display()))?;
            }
            tracing::info!(bits, path = %out.display(), "wrote private key");
        }
        Command::Pubkey { key } => {
            print!("{}", load_key(&key)?.export_public_pem()?);
        }
        Command::Digest { digest, input } => {
            let algorithm = parse_digest(&digest)?;
            println!("{}", hex::encode(algorithm.digest(&read_input(input.as_deref())?)));
        }
        Command::Sign { target, json: true } => {
            let key = load_key(&target.key)?;
            let signer = RsaDigestSigner::new(key, parse_digest(&target.digest)?)?;
            let data = read_input(target.input.as_deref())?;
            let signed = signer.sign_detached(&data).context("signing message")?;
            println!("{}", serde_json::to_string_pretty(&signed)?);
        }
        Command::Sign { target, json: false } => {
            let key = load_key(&target.key)?;
            let digest = target.digest_bytes()?;
            let signature =
                sign_with_rsa_private_key(&target.digest, &digest, &key).context("signing digest")?;
            println!("{}", hex::encode(signature));
        }
        Command::Verify { target, signature } => {
            let key = load_key(&target.key)?;
            let digest = target.digest_bytes()?;
            let signature = hex::decode(signature.trim()).context("decoding --signature")?;
            let valid = verify_with_rsa_public_key(&target.digest, &digest, &signature, &key)
                .context("verifying signature")?;
            if !valid {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
            println!("valid");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
