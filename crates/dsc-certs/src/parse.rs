//! X.509 field extraction.
//!
//! Only the fields that feed the leaf value and the audit descriptors are read. No
//! signature, validity period or chain is checked.

use dsc_core::model::{
    CertificateRecord, Curve, EcKey, HashAlgorithm, IssuerMetadata, RsaKey, SignatureScheme,
};
use sha2::{Digest as _, Sha256};
use thiserror::Error;
use x509_parser::extensions::ParsedExtension;
use x509_parser::pem::parse_x509_pem;
use x509_parser::prelude::{
    FromDer as _, SubjectPublicKeyInfo, X509Certificate, parse_x509_certificate,
};
use x509_parser::public_key::{ECPoint, RSAPublicKey};
use x509_parser::signature_algorithm::SignatureAlgorithm;

use crate::oids::{self, SignatureFamily, SignatureOid};

/// Errors raised when a certificate cannot be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input looks like PEM but the armor is broken.
    #[error("Invalid PEM: {0}")]
    Pem(String),

    /// The DER body is not an X.509 certificate.
    #[error("Invalid X.509 certificate: {0}")]
    Der(String),
}

/// A certificate reduced to the fields the tree build needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCertificate {
    /// Algorithmic metadata.
    pub record: CertificateRecord,
    /// Subject distinguished name.
    pub subject: String,
    /// Subject key identifier extension.
    pub subject_key_id: Option<Vec<u8>>,
    /// Key identifier of the authority key identifier extension.
    pub authority_key_id: Option<Vec<u8>>,
    /// Hex encoded SHA-256 of the DER encoding.
    pub fingerprint: String,
}

impl ParsedCertificate {
    /// This certificate seen as the issuer of another one.
    #[must_use]
    pub fn issuer_metadata(&self) -> IssuerMetadata {
        IssuerMetadata::from(&self.record)
    }
}

/// Parse a PEM or DER encoded certificate.
///
/// # Errors
/// Returns a [`ParseError`] if the bytes are not a decodable certificate.
pub fn parse_certificate(bytes: &[u8]) -> Result<ParsedCertificate, ParseError> {
    if bytes.trim_ascii_start().starts_with(b"-----BEGIN") {
        let (_, pem) = parse_x509_pem(bytes).map_err(|e| ParseError::Pem(e.to_string()))?;
        parse_der(&pem.contents)
    } else {
        parse_der(bytes)
    }
}

fn parse_der(der: &[u8]) -> Result<ParsedCertificate, ParseError> {
    let (_, cert) = parse_x509_certificate(der).map_err(|e| ParseError::Der(e.to_string()))?;

    let (subject_key_id, authority_key_id) = key_identifiers(&cert);
    Ok(ParsedCertificate {
        record: CertificateRecord {
            issuer: cert.issuer().to_string(),
            hash_algorithm: signature_hash(&cert),
            scheme: signature_scheme(&cert),
            tbs_length: cert.tbs_certificate.as_ref().len(),
        },
        subject: cert.subject().to_string(),
        subject_key_id,
        authority_key_id,
        fingerprint: hex::encode(Sha256::digest(der)),
    })
}

fn signature_hash(cert: &X509Certificate<'_>) -> HashAlgorithm {
    let oid = cert.signature_algorithm.algorithm.to_id_string();
    match oids::signature_algorithm(&oid) {
        SignatureOid::Known(SignatureFamily::RsaPss, _) => pss_parameters(cert)
            .map_or(HashAlgorithm::Unknown, |(hash, _)| hash),
        SignatureOid::Known(_, hash) => hash,
        SignatureOid::Other(_) => HashAlgorithm::Unknown,
    }
}

fn signature_scheme(cert: &X509Certificate<'_>) -> SignatureScheme {
    let oid = cert.signature_algorithm.algorithm.to_id_string();
    let family = match oids::signature_algorithm(&oid) {
        SignatureOid::Known(family, _) => family,
        SignatureOid::Other(name) => return SignatureScheme::Unsupported(name),
    };

    let key = public_key(cert);
    match family {
        SignatureFamily::Rsa => SignatureScheme::Rsa(key.rsa),
        SignatureFamily::RsaPss => SignatureScheme::RsaPss {
            key: key.rsa,
            // Absent parameters mean the RFC 4055 default salt.
            salt_length: pss_parameters(cert).map_or(20, |(_, salt)| salt),
        },
        SignatureFamily::Ecdsa => SignatureScheme::Ecdsa(key.ec),
    }
}

/// Digest and salt length of RSASSA-PSS signature parameters.
fn pss_parameters(cert: &X509Certificate<'_>) -> Option<(HashAlgorithm, u32)> {
    if let Ok(SignatureAlgorithm::RSASSA_PSS(params)) =
        SignatureAlgorithm::try_from(&cert.signature_algorithm)
    {
        let hash = oids::hash_algorithm(&params.hash_algorithm_oid().to_id_string());
        Some((hash, params.salt_length()))
    } else {
        None
    }
}

#[derive(Default)]
struct DecodedKey {
    rsa: Option<RsaKey>,
    ec: Option<EcKey>,
}

/// Key details read from the SPKI by its algorithm OID.
///
/// An `id-RSASSA-PSS` key carries the same PKCS#1 `RSAPublicKey` as `rsaEncryption`.
fn public_key(cert: &X509Certificate<'_>) -> DecodedKey {
    let spki = cert.public_key();
    let key_bytes: &[u8] = &spki.subject_public_key.data;
    match spki.algorithm.algorithm.to_id_string().as_str() {
        oids::RSA_ENCRYPTION | oids::RSASSA_PSS => DecodedKey {
            rsa: RSAPublicKey::from_der(key_bytes)
                .ok()
                .and_then(|(_, key)| rsa_key(&key)),
            ..DecodedKey::default()
        },
        oids::EC_PUBLIC_KEY => DecodedKey {
            ec: ec_key(spki, key_bytes),
            ..DecodedKey::default()
        },
        _ => DecodedKey::default(),
    }
}

fn ec_key(spki: &SubjectPublicKeyInfo<'_>, point: &[u8]) -> Option<EcKey> {
    let curve = spki
        .algorithm
        .parameters
        .as_ref()
        .and_then(|params| params.as_oid().ok())
        .map_or(Curve::Unknown, |oid| oids::named_curve(&oid.to_id_string()));
    let bits = curve
        .bits()
        .or_else(|| u32::try_from(ECPoint::from(point).key_size()).ok())
        .filter(|bits| *bits > 0)?;
    Some(EcKey { bits, curve })
}

fn rsa_key(key: &RSAPublicKey<'_>) -> Option<RsaKey> {
    let modulus = strip_leading_zeros(key.modulus);
    let first = modulus.first()?;
    let bits = u32::try_from(modulus.len())
        .ok()?
        .checked_mul(8)?
        .checked_sub(first.leading_zeros())?;

    let exponent = strip_leading_zeros(key.exponent);
    if exponent.is_empty() || exponent.len() > 8 {
        return None;
    }
    let mut buf = [0_u8; 8];
    buf.get_mut(8_usize.saturating_sub(exponent.len())..)?
        .copy_from_slice(exponent);

    Some(RsaKey {
        bits,
        exponent: u64::from_be_bytes(buf),
    })
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes.get(start..).unwrap_or_default()
}

fn key_identifiers(cert: &X509Certificate<'_>) -> (Option<Vec<u8>>, Option<Vec<u8>>) {
    let mut subject = None;
    let mut authority = None;
    for extension in cert.extensions() {
        if let ParsedExtension::SubjectKeyIdentifier(id) = extension.parsed_extension() {
            subject = Some(id.0.to_vec());
        } else if let ParsedExtension::AuthorityKeyIdentifier(aki) = extension.parsed_extension()
        {
            authority = aki.key_identifier.as_ref().map(|id| id.0.to_vec());
        }
    }
    (subject, authority)
}
