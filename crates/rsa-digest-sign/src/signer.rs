use serde::{Deserialize, Serialize};

use crate::digest::DigestAlgorithm;
use crate::error::{Result, SignVerifyError};
use crate::key::RsaKey;
use crate::operations::{sign_with_rsa_private_key, verify_with_rsa_public_key};

/// Signs whole messages, choosing the digest itself.
pub trait MessageSigner: Send + Sync {
    /// Hash and sign `data`. Returns raw signature bytes.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// DER-encoded public key of the signer.
    fn public_key_bytes(&self) -> Result<Vec<u8>>;

    /// Algorithm identifier string (e.g. "rsa-pkcs1v15-sha256").
    fn algorithm(&self) -> String;
}

/// Detached signature with everything needed to check it, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedDigest {
    pub algorithm: String,
    pub digest: String,
    pub signature: String,
    pub public_key: String,
}

/// RSA PKCS#1 v1.5 signer over a fixed digest algorithm.
///
/// Messages are hashed here and the digest goes through
/// [`sign_with_rsa_private_key`].
#[derive(Debug, Clone)]
pub struct RsaDigestSigner {
    key: RsaKey,
    digest: DigestAlgorithm,
}

impl RsaDigestSigner {
    pub fn new(key: RsaKey, digest: DigestAlgorithm) -> Result<Self> {
        if key.is_empty() {
            return Err(SignVerifyError::EmptyKey);
        }
        Ok(Self { key, digest })
    }

    pub fn key(&self) -> &RsaKey {
        &self.key
    }

    pub fn digest_algorithm(&self) -> DigestAlgorithm {
        self.digest
    }

    /// Hash `data` and check `signature` against it.
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        let digest = self.digest.digest(data);
        verify_with_rsa_public_key(self.digest.name(), &digest, signature, &self.key)
    }

    /// Sign `data` and bundle the result with the digest and public key.
    pub fn sign_detached(&self, data: &[u8]) -> Result<SignedDigest> {
        let digest = self.digest.digest(data);
        let signature = sign_with_rsa_private_key(self.digest.name(), &digest, &self.key)?;
        Ok(SignedDigest {
            algorithm: self.algorithm(),
            digest: hex::encode(&digest),
            signature: hex::encode(&signature),
            public_key: hex::encode(self.public_key_bytes()?),
        })
    }
}

impl MessageSigner for RsaDigestSigner {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let digest = self.digest.digest(data);
        sign_with_rsa_private_key(self.digest.name(), &digest, &self.key)
    }

    fn public_key_bytes(&self) -> Result<Vec<u8>> {
        self.key.public_key_der()
    }

    fn algorithm(&self) -> String {
        format!("rsa-pkcs1v15-{}", self.digest.name().to_ascii_lowercase())
    }
}
