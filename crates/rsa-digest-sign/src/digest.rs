use std::fmt;
use std::str::FromStr;

use md5::Md5;
use ripemd::Ripemd160;
use rsa::Pkcs1v15Sign;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::error::SignVerifyError;

/// Digest algorithms that can be named in a sign or verify call.
///
/// Resolved per call from the caller-supplied name and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Md5,
    Ripemd160,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

const ALL: [DigestAlgorithm; 13] = [
    DigestAlgorithm::Md5,
    DigestAlgorithm::Ripemd160,
    DigestAlgorithm::Sha1,
    DigestAlgorithm::Sha224,
    DigestAlgorithm::Sha256,
    DigestAlgorithm::Sha384,
    DigestAlgorithm::Sha512,
    DigestAlgorithm::Sha512_224,
    DigestAlgorithm::Sha512_256,
    DigestAlgorithm::Sha3_224,
    DigestAlgorithm::Sha3_256,
    DigestAlgorithm::Sha3_384,
    DigestAlgorithm::Sha3_512,
];

impl DigestAlgorithm {
    /// Every supported algorithm, in canonical order.
    pub fn all() -> &'static [DigestAlgorithm] {
        &ALL
    }

    /// Looks an algorithm up by name.
    ///
    /// Matching is case-insensitive and accepts the common spellings of each
    /// name: `SHA256`, `SHA-256`, `SHA2-256` and `sha256` all resolve to
    /// [`DigestAlgorithm::Sha256`]. The `RSA-` prefixed signature names
    /// (`RSA-SHA256`, `RSA-MD5`) name the same digests. Returns `None` for
    /// anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        let normalized = upper.strip_prefix("RSA-").unwrap_or(upper.as_str());
        let algorithm = match normalized {
            "MD5" => Self::Md5,
            "RIPEMD160" | "RIPEMD-160" | "RIPEMD" | "RMD160" => Self::Ripemd160,
            "SHA1" | "SHA-1" => Self::Sha1,
            "SHA224" | "SHA-224" | "SHA2-224" => Self::Sha224,
            "SHA256" | "SHA-256" | "SHA2-256" => Self::Sha256,
            "SHA384" | "SHA-384" | "SHA2-384" => Self::Sha384,
            "SHA512" | "SHA-512" | "SHA2-512" => Self::Sha512,
            "SHA512-224" | "SHA-512/224" | "SHA2-512/224" => Self::Sha512_224,
            "SHA512-256" | "SHA-512/256" | "SHA2-512/256" => Self::Sha512_256,
            "SHA3-224" => Self::Sha3_224,
            "SHA3-256" => Self::Sha3_256,
            "SHA3-384" => Self::Sha3_384,
            "SHA3-512" => Self::Sha3_512,
            _ => return None,
        };
        Some(algorithm)
    }

    /// Canonical name, as accepted by [`DigestAlgorithm::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Ripemd160 => "RIPEMD160",
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha512_224 => "SHA512-224",
            Self::Sha512_256 => "SHA512-256",
            Self::Sha3_224 => "SHA3-224",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
        }
    }

    /// Digest length in bytes.
    pub fn output_size(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Ripemd160 | Self::Sha1 => 20,
            Self::Sha224 | Self::Sha512_224 | Self::Sha3_224 => 28,
            Self::Sha256 | Self::Sha512_256 | Self::Sha3_256 => 32,
            Self::Sha384 | Self::Sha3_384 => 48,
            Self::Sha512 | Self::Sha3_512 => 64,
        }
    }

    /// Hashes `data` with this algorithm.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Md5 => Md5::digest(data).to_vec(),
            Self::Ripemd160 => Ripemd160::digest(data).to_vec(),
            Self::Sha1 => Sha1::digest(data).to_vec(),
            Self::Sha224 => Sha224::digest(data).to_vec(),
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
            Self::Sha512_224 => Sha512_224::digest(data).to_vec(),
            Self::Sha512_256 => Sha512_256::digest(data).to_vec(),
            Self::Sha3_224 => Sha3_224::digest(data).to_vec(),
            Self::Sha3_256 => Sha3_256::digest(data).to_vec(),
            Self::Sha3_384 => Sha3_384::digest(data).to_vec(),
            Self::Sha3_512 => Sha3_512::digest(data).to_vec(),
        }
    }

    /// PKCS#1 v1.5 padding carrying this algorithm's DigestInfo prefix.
    pub(crate) fn pkcs1v15(&self) -> Pkcs1v15Sign {
        match self {
            Self::Md5 => Pkcs1v15Sign::new::<Md5>(),
            Self::Ripemd160 => Pkcs1v15Sign::new::<Ripemd160>(),
            Self::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
            Self::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
            Self::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            Self::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
            Self::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
            Self::Sha512_224 => Pkcs1v15Sign::new::<Sha512_224>(),
            Self::Sha512_256 => Pkcs1v15Sign::new::<Sha512_256>(),
            Self::Sha3_224 => Pkcs1v15Sign::new::<Sha3_224>(),
            Self::Sha3_256 => Pkcs1v15Sign::new::<Sha3_256>(),
            Self::Sha3_384 => Pkcs1v15Sign::new::<Sha3_384>(),
            Self::Sha3_512 => Pkcs1v15Sign::new::<Sha3_512>(),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = SignVerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| SignVerifyError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_aliases_case_insensitively() {
        for name in ["SHA256", "sha256", "SHA-256", "sha2-256", " Sha256 "] {
            assert_eq!(DigestAlgorithm::from_name(name), Some(DigestAlgorithm::Sha256), "{name}");
        }
        assert_eq!(DigestAlgorithm::from_name("sha512-224"), Some(DigestAlgorithm::Sha512_224));
        assert_eq!(DigestAlgorithm::from_name("SHA3-384"), Some(DigestAlgorithm::Sha3_384));
        assert_eq!(DigestAlgorithm::from_name("md5"), Some(DigestAlgorithm::Md5));
        assert_eq!(DigestAlgorithm::from_name("RIPEMD-160"), Some(DigestAlgorithm::Ripemd160));
        assert_eq!(DigestAlgorithm::from_name("rmd160"), Some(DigestAlgorithm::Ripemd160));
    }

    #[test]
    fn rsa_prefixed_names_resolve_to_the_digest() {
        assert_eq!(DigestAlgorithm::from_name("RSA-SHA256"), Some(DigestAlgorithm::Sha256));
        assert_eq!(DigestAlgorithm::from_name("rsa-md5"), Some(DigestAlgorithm::Md5));
        assert_eq!(DigestAlgorithm::from_name("RSA-RIPEMD160"), Some(DigestAlgorithm::Ripemd160));
        assert_eq!(DigestAlgorithm::from_name("RSA-"), None);
        assert_eq!(DigestAlgorithm::from_name("RSA"), None);
    }

    #[test]
    fn md5_and_ripemd160_known_answers() {
        assert_eq!(hex::encode(DigestAlgorithm::Md5.digest(b"abc")), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            hex::encode(DigestAlgorithm::Ripemd160.digest(b"abc")),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        for name in ["", "MD4", "SHA257", "sha3256", "whirlpool", "RSA-MD4"] {
            assert_eq!(DigestAlgorithm::from_name(name), None, "{name}");
        }
    }

    #[test]
    fn canonical_names_round_trip() {
        for algorithm in DigestAlgorithm::all() {
            assert_eq!(DigestAlgorithm::from_name(algorithm.name()), Some(*algorithm));
            assert_eq!(algorithm.to_string().parse::<DigestAlgorithm>().unwrap(), *algorithm);
        }
    }

    #[test]
    fn output_size_matches_digest_length() {
        for algorithm in DigestAlgorithm::all() {
            assert_eq!(algorithm.digest(b"abc").len(), algorithm.output_size(), "{algorithm}");
        }
    }

    #[test]
    fn sha256_known_answer() {
        let digest = DigestAlgorithm::Sha256.digest(b"hello world");
        assert_eq!(
            hex::encode(digest),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn from_str_reports_unknown_algorithm() {
        let err = "nope".parse::<DigestAlgorithm>().unwrap_err();
        assert!(matches!(err, SignVerifyError::UnknownAlgorithm(ref name) if name == "nope"));
    }
}
