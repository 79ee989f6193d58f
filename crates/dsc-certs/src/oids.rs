//! Object identifier tables.

use dsc_core::model::{Curve, HashAlgorithm};

/// Signature algorithm family named by a signature OID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignatureFamily {
    Rsa,
    RsaPss,
    Ecdsa,
}

/// Outcome of looking up a signature algorithm OID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SignatureOid {
    /// Supported family with the digest the OID implies (`Unknown` for PSS, whose digest
    /// lives in the parameters).
    Known(SignatureFamily, HashAlgorithm),
    /// Anything else, by name when the OID is recognised.
    Other(String),
}

/// SPKI algorithm of PKCS#1 RSA keys.
pub(crate) const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
/// SPKI algorithm of RSA keys restricted to PSS; also the PSS signature OID.
pub(crate) const RSASSA_PSS: &str = "1.2.840.113549.1.1.10";
/// SPKI algorithm of elliptic curve keys.
pub(crate) const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";

pub(crate) fn signature_algorithm(oid: &str) -> SignatureOid {
    use HashAlgorithm::{Sha1, Sha224, Sha256, Sha384, Sha512, Unknown};
    use SignatureFamily::{Ecdsa, Rsa, RsaPss};

    let known = |family, hash| SignatureOid::Known(family, hash);
    match oid {
        "1.2.840.113549.1.1.5" | "1.3.14.3.2.29" => known(Rsa, Sha1),
        "1.2.840.113549.1.1.14" => known(Rsa, Sha224),
        "1.2.840.113549.1.1.11" => known(Rsa, Sha256),
        "1.2.840.113549.1.1.12" => known(Rsa, Sha384),
        "1.2.840.113549.1.1.13" => known(Rsa, Sha512),
        RSASSA_PSS => known(RsaPss, Unknown),
        "1.2.840.10045.4.1" => known(Ecdsa, Sha1),
        "1.2.840.10045.4.3.1" => known(Ecdsa, Sha224),
        "1.2.840.10045.4.3.2" => known(Ecdsa, Sha256),
        "1.2.840.10045.4.3.3" => known(Ecdsa, Sha384),
        "1.2.840.10045.4.3.4" => known(Ecdsa, Sha512),
        "1.2.840.10040.4.3" | "2.16.840.1.101.3.4.3.1" | "2.16.840.1.101.3.4.3.2" => {
            SignatureOid::Other("dsa".to_owned())
        }
        "1.3.101.112" => SignatureOid::Other("ed25519".to_owned()),
        "1.3.101.113" => SignatureOid::Other("ed448".to_owned()),
        other => SignatureOid::Other(other.to_owned()),
    }
}

pub(crate) fn hash_algorithm(oid: &str) -> HashAlgorithm {
    match oid {
        "1.3.14.3.2.26" => HashAlgorithm::Sha1,
        "2.16.840.1.101.3.4.2.4" => HashAlgorithm::Sha224,
        "2.16.840.1.101.3.4.2.1" => HashAlgorithm::Sha256,
        "2.16.840.1.101.3.4.2.2" => HashAlgorithm::Sha384,
        "2.16.840.1.101.3.4.2.3" => HashAlgorithm::Sha512,
        _ => HashAlgorithm::Unknown,
    }
}

pub(crate) fn named_curve(oid: &str) -> Curve {
    match oid {
        "1.2.840.10045.3.1.1" => Curve::Secp192r1,
        "1.3.132.0.33" => Curve::Secp224r1,
        "1.2.840.10045.3.1.7" => Curve::Secp256r1,
        "1.3.132.0.34" => Curve::Secp384r1,
        "1.3.132.0.35" => Curve::Secp521r1,
        "1.3.36.3.3.2.8.1.1.3" => Curve::BrainpoolP192r1,
        "1.3.36.3.3.2.8.1.1.5" => Curve::BrainpoolP224r1,
        "1.3.36.3.3.2.8.1.1.7" => Curve::BrainpoolP256r1,
        "1.3.36.3.3.2.8.1.1.9" => Curve::BrainpoolP320r1,
        "1.3.36.3.3.2.8.1.1.11" => Curve::BrainpoolP384r1,
        "1.3.36.3.3.2.8.1.1.13" => Curve::BrainpoolP512r1,
        _ => Curve::Unknown,
    }
}
