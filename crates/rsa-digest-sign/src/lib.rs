pub mod digest;
pub mod error;
pub mod error_queue;
pub mod key;
mod native;
pub mod operations;
pub mod signer;

pub use digest::DigestAlgorithm;
pub use error::{Result, SignVerifyError};
pub use key::RsaKey;
pub use operations::{sign_with_rsa_private_key, verify_with_rsa_public_key};
pub use signer::{MessageSigner, RsaDigestSigner, SignedDigest};
