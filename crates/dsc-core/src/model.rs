//! Algorithm-tagged representation of a parsed certificate.
//!
//! Key details live inside the signature scheme variant they belong to, so an RSA
//! exponent can never sit next to an elliptic curve.

/// Digest algorithm used in a certificate signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashAlgorithm {
    /// SHA-1.
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
    /// Digest the parser could not identify.
    Unknown,
}

impl HashAlgorithm {
    /// Identifier used in descriptors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Unknown => "unknown",
        }
    }

    /// Numeric identifier committed in leaf values.
    #[must_use]
    pub const fn field_id(self) -> u64 {
        match self {
            Self::Unknown => 0,
            Self::Sha1 => 1,
            Self::Sha224 => 2,
            Self::Sha256 => 3,
            Self::Sha384 => 4,
            Self::Sha512 => 5,
        }
    }
}

/// Named elliptic curve of an ECDSA public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Curve {
    /// NIST P-192.
    Secp192r1,
    /// NIST P-224.
    Secp224r1,
    /// NIST P-256.
    Secp256r1,
    /// NIST P-384.
    Secp384r1,
    /// NIST P-521.
    Secp521r1,
    /// Brainpool P-192 r1.
    BrainpoolP192r1,
    /// Brainpool P-224 r1.
    BrainpoolP224r1,
    /// Brainpool P-256 r1.
    BrainpoolP256r1,
    /// Brainpool P-320 r1.
    BrainpoolP320r1,
    /// Brainpool P-384 r1.
    BrainpoolP384r1,
    /// Brainpool P-512 r1.
    BrainpoolP512r1,
    /// Explicit parameters or an unrecognised named curve.
    Unknown,
}

impl Curve {
    /// Identifier used in descriptors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Secp192r1 => "secp192r1",
            Self::Secp224r1 => "secp224r1",
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::Secp521r1 => "secp521r1",
            Self::BrainpoolP192r1 => "brainpoolP192r1",
            Self::BrainpoolP224r1 => "brainpoolP224r1",
            Self::BrainpoolP256r1 => "brainpoolP256r1",
            Self::BrainpoolP320r1 => "brainpoolP320r1",
            Self::BrainpoolP384r1 => "brainpoolP384r1",
            Self::BrainpoolP512r1 => "brainpoolP512r1",
            Self::Unknown => "unknown",
        }
    }

    /// Numeric identifier committed in leaf values.
    #[must_use]
    pub const fn field_id(self) -> u64 {
        match self {
            Self::Unknown => 0,
            Self::Secp192r1 => 1,
            Self::Secp224r1 => 2,
            Self::Secp256r1 => 3,
            Self::Secp384r1 => 4,
            Self::Secp521r1 => 5,
            Self::BrainpoolP192r1 => 6,
            Self::BrainpoolP224r1 => 7,
            Self::BrainpoolP256r1 => 8,
            Self::BrainpoolP320r1 => 9,
            Self::BrainpoolP384r1 => 10,
            Self::BrainpoolP512r1 => 11,
        }
    }

    /// Field size in bits, `None` for [`Curve::Unknown`].
    #[must_use]
    pub const fn bits(self) -> Option<u32> {
        match self {
            Self::Secp192r1 | Self::BrainpoolP192r1 => Some(192),
            Self::Secp224r1 | Self::BrainpoolP224r1 => Some(224),
            Self::Secp256r1 | Self::BrainpoolP256r1 => Some(256),
            Self::BrainpoolP320r1 => Some(320),
            Self::Secp384r1 | Self::BrainpoolP384r1 => Some(384),
            Self::BrainpoolP512r1 => Some(512),
            Self::Secp521r1 => Some(521),
            Self::Unknown => None,
        }
    }
}

/// RSA public key details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RsaKey {
    /// Modulus length in bits.
    pub bits: u32,
    /// Public exponent.
    pub exponent: u64,
}

/// ECDSA public key details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EcKey {
    /// Curve field size in bits.
    pub bits: u32,
    /// Named curve.
    pub curve: Curve,
}

/// Signature algorithm family together with the key details valid for it.
///
/// `None` key details mean the public key could not be decoded for this family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// PKCS#1 v1.5 RSA.
    Rsa(Option<RsaKey>),
    /// RSASSA-PSS.
    RsaPss {
        /// Public key details.
        key: Option<RsaKey>,
        /// Salt length from the PSS parameters.
        salt_length: u32,
    },
    /// ECDSA.
    Ecdsa(Option<EcKey>),
    /// Any other algorithm (e.g. `dsa`, `ed25519`).
    Unsupported(String),
}

impl SignatureScheme {
    /// Identifier used in descriptors and logs.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Rsa(_) => "rsa",
            Self::RsaPss { .. } => "rsa-pss",
            Self::Ecdsa(_) => "ecdsa",
            Self::Unsupported(name) => name.as_str(),
        }
    }

    /// Numeric identifier committed in leaf values, `None` for unsupported algorithms.
    #[must_use]
    pub const fn field_id(&self) -> Option<u64> {
        match self {
            Self::Rsa(_) => Some(1),
            Self::RsaPss { .. } => Some(2),
            Self::Ecdsa(_) => Some(3),
            Self::Unsupported(_) => None,
        }
    }

    /// Key length in bits when key details are present.
    #[must_use]
    pub const fn key_bits(&self) -> Option<u32> {
        match self {
            Self::Rsa(Some(key)) | Self::RsaPss { key: Some(key), .. } => Some(key.bits),
            Self::Ecdsa(Some(key)) => Some(key.bits),
            Self::Rsa(None)
            | Self::RsaPss { key: None, .. }
            | Self::Ecdsa(None)
            | Self::Unsupported(_) => None,
        }
    }

    /// PSS salt length, only for [`SignatureScheme::RsaPss`].
    #[must_use]
    pub const fn salt_length(&self) -> Option<u32> {
        match self {
            Self::RsaPss { salt_length, .. } => Some(*salt_length),
            Self::Rsa(_) | Self::Ecdsa(_) | Self::Unsupported(_) => None,
        }
    }

    /// Whether this scheme belongs to the RSA family.
    #[must_use]
    pub const fn is_rsa_family(&self) -> bool {
        matches!(self, Self::Rsa(_) | Self::RsaPss { .. })
    }
}

/// A parsed Document Signer Certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRecord {
    /// Issuing authority.
    pub issuer: String,
    /// Digest used in the certificate signature.
    pub hash_algorithm: HashAlgorithm,
    /// Signature algorithm and public key details.
    pub scheme: SignatureScheme,
    /// Byte length of the signed payload.
    pub tbs_length: usize,
}

/// Algorithmic metadata of the certificate's issuer (CSCA).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerMetadata {
    /// Digest used in the issuer's own signature.
    pub hash_algorithm: HashAlgorithm,
    /// The issuer's signature algorithm and key.
    pub scheme: SignatureScheme,
}

impl IssuerMetadata {
    /// Salt length when the issuer signs with RSA-PSS.
    #[must_use]
    pub const fn salt_length(&self) -> Option<u32> {
        self.scheme.salt_length()
    }
}

impl From<&CertificateRecord> for IssuerMetadata {
    fn from(record: &CertificateRecord) -> Self {
        Self {
            hash_algorithm: record.hash_algorithm,
            scheme: record.scheme.clone(),
        }
    }
}
