/// Errors surfaced by the sign/verify operations and key handling.
///
/// A verification mismatch is not an error: verify returns `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum SignVerifyError {
    #[error("RSA key is empty")]
    EmptyKey,

    #[error("RSA key does not have private components")]
    KeyCapability,

    #[error("unknown digest name: {0}")]
    UnknownAlgorithm(String),

    #[error("{0}")]
    Signing(String),

    #[error("cannot generate RSA key: {0}")]
    KeyGeneration(String),

    #[error("cannot import RSA key: {0}")]
    KeyImport(String),

    #[error("cannot export RSA key: {0}")]
    KeyExport(String),
}

pub type Result<T, E = SignVerifyError> = std::result::Result<T, E>;
