//! RSA PKCS#1 v1.5 primitives over the RustCrypto `rsa` crate.
//!
//! These follow the conventions of a C cryptography library: the return
//! value only says whether the call succeeded, and the reason for a failure
//! is recorded on the thread-local [`error_queue`](crate::error_queue).

use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::digest::DigestAlgorithm;
use crate::error_queue::{self, LibraryError};

const LIBRARY: &str = "rsa";

/// Signs a precomputed digest into `signature`.
///
/// Returns the number of bytes written, or `None` after recording the
/// failure on the error queue. `signature` is left untouched on failure.
pub(crate) fn rsa_sign(
    algorithm: DigestAlgorithm,
    digest: &[u8],
    signature: &mut [u8],
    key: &RsaPrivateKey,
) -> Option<usize> {
    let produced = match key.sign(algorithm.pkcs1v15(), digest) {
        Ok(produced) => produced,
        Err(e) => {
            error_queue::push_error(LibraryError::new(LIBRARY, "rsa_sign", e.to_string()));
            return None;
        }
    };

    if produced.len() > signature.len() {
        error_queue::push_error(LibraryError::new(
            LIBRARY,
            "rsa_sign",
            format!(
                "signature buffer too small: need {}, have {}",
                produced.len(),
                signature.len()
            ),
        ));
        return None;
    }

    signature[..produced.len()].copy_from_slice(&produced);
    Some(produced.len())
}

/// Verifies `signature` over a precomputed digest.
///
/// `false` covers both a signature that does not match and a failure inside
/// the library; either way an entry may be left on the error queue.
pub(crate) fn rsa_verify(
    algorithm: DigestAlgorithm,
    digest: &[u8],
    signature: &[u8],
    key: &RsaPublicKey,
) -> bool {
    match key.verify(algorithm.pkcs1v15(), digest, signature) {
        Ok(()) => true,
        Err(e) => {
            error_queue::push_error(LibraryError::new(LIBRARY, "rsa_verify", e.to_string()));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::key::RsaKey;

    fn test_key() -> &'static RsaKey {
        static KEY: OnceLock<RsaKey> = OnceLock::new();
        KEY.get_or_init(|| RsaKey::from_seed("native-test-seed", 1024).unwrap())
    }

    #[test]
    fn sign_writes_modulus_sized_signature() {
        let key = test_key();
        let digest = DigestAlgorithm::Sha256.digest(b"payload");
        let mut buffer = vec![0u8; key.size_in_bytes() + 8];

        let written = rsa_sign(DigestAlgorithm::Sha256, &digest, &mut buffer, key.native_private().unwrap());

        assert_eq!(written, Some(key.size_in_bytes()));
        assert!(buffer[key.size_in_bytes()..].iter().all(|b| *b == 0));
    }

    #[test]
    fn sign_records_wrong_digest_length() {
        error_queue::clear_error();
        let key = test_key();
        let mut buffer = vec![0u8; key.size_in_bytes()];

        let written = rsa_sign(DigestAlgorithm::Sha256, b"short", &mut buffer, key.native_private().unwrap());

        assert_eq!(written, None);
        let recorded = error_queue::get_error().unwrap();
        assert_eq!(recorded.function, "rsa_sign");
        assert!(buffer.iter().all(|b| *b == 0));
        error_queue::clear_error();
    }

    #[test]
    fn sign_records_short_buffer() {
        error_queue::clear_error();
        let key = test_key();
        let digest = DigestAlgorithm::Sha256.digest(b"payload");
        let mut buffer = vec![0u8; 16];

        assert_eq!(rsa_sign(DigestAlgorithm::Sha256, &digest, &mut buffer, key.native_private().unwrap()), None);
        assert!(error_queue::get_error().unwrap().reason.contains("buffer too small"));
        error_queue::clear_error();
    }

    #[test]
    fn verify_mismatch_leaves_entry_on_queue() {
        error_queue::clear_error();
        let key = test_key();
        let digest = DigestAlgorithm::Sha256.digest(b"payload");
        let signature = vec![1u8; key.size_in_bytes()];

        assert!(!rsa_verify(DigestAlgorithm::Sha256, &digest, &signature, key.native_public().unwrap()));
        assert_eq!(error_queue::get_error().unwrap().function, "rsa_verify");
        error_queue::clear_error();
    }
}
