use crate::digest::DigestAlgorithm;
use crate::error::{Result, SignVerifyError};
use crate::error_queue::{self, DrainOnDrop};
use crate::key::RsaKey;
use crate::native;

fn resolve_digest(digest_type: &str) -> Result<DigestAlgorithm> {
    let algorithm = DigestAlgorithm::from_name(digest_type)
        .ok_or_else(|| SignVerifyError::UnknownAlgorithm(digest_type.to_string()))?;
    tracing::trace!(%algorithm, "resolved digest name");
    Ok(algorithm)
}

/// Signs an already computed digest with the private half of `key`.
///
/// `digest_type` names the hash that produced `digest_data` (for example
/// `"SHA256"`); it selects the DigestInfo prefix of the PKCS#1 v1.5 encoding.
/// The returned signature is never longer than `key.size_in_bytes()`.
pub fn sign_with_rsa_private_key(digest_type: &str, digest_data: &[u8], key: &RsaKey) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(SignVerifyError::EmptyKey);
    }
    let private_key = key.native_private().ok_or(SignVerifyError::KeyCapability)?;
    let algorithm = resolve_digest(digest_type)?;

    let mut signature = vec![0u8; key.size_in_bytes()];
    let Some(signature_length) = native::rsa_sign(algorithm, digest_data, &mut signature, private_key) else {
        let diagnostics = error_queue::error_string();
        tracing::warn!(%algorithm, %diagnostics, "RSA signing failed");
        return Err(SignVerifyError::Signing(format!(
            "cannot sign message digest with the specified private RSA key: {diagnostics}"
        )));
    };

    signature.truncate(signature_length);
    tracing::debug!(%algorithm, signature_length, "signed digest");
    Ok(signature)
}

/// Checks `signature_data` against an already computed digest.
///
/// A signature that does not match is `Ok(false)`, not an error. Whatever
/// the reason for a `false` result, the thread's library error queue is
/// empty when this returns.
pub fn verify_with_rsa_public_key(
    digest_type: &str,
    digest_data: &[u8],
    signature_data: &[u8],
    key: &RsaKey,
) -> Result<bool> {
    let public_key = key.native_public().ok_or(SignVerifyError::EmptyKey)?;
    let algorithm = resolve_digest(digest_type)?;

    // The primitive reports a bad signature and an internal failure the same
    // way, and may leave entries behind in both cases.
    let drain = DrainOnDrop::arm();
    let valid = native::rsa_verify(algorithm, digest_data, signature_data, public_key);
    if valid {
        drain.disarm();
    }

    tracing::debug!(%algorithm, valid, "verified digest signature");
    Ok(valid)
}
