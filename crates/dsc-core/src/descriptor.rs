//! Diagnostic descriptors used to bucket certificates for audit.
//!
//! Descriptors are bookkeeping only. They are computed next to the leaf value but
//! never decide whether a certificate is committed.

use crate::model::{CertificateRecord, IssuerMetadata, SignatureScheme};

/// Marker for an algorithm or curve the parser did not recognise.
pub const UNKNOWN_MARKER: &str = "unknown";

/// Marker for a field that is absent.
pub const UNDEFINED_MARKER: &str = "undefined";

/// Descriptor strings for one certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptors {
    /// Issuer descriptor, `None` when no issuer metadata was found.
    pub csca: Option<String>,
    /// Descriptor built from the certificate's own fields.
    pub dsc: String,
    /// Descriptor that takes the RSA-PSS issuer salt into account.
    pub dsc_extrapolated: String,
}

impl Descriptors {
    /// Compute the descriptors of a certificate and its optional issuer.
    #[must_use]
    pub fn describe(record: &CertificateRecord, issuer: Option<&IssuerMetadata>) -> Self {
        let hash = record.hash_algorithm.name();
        let dsc = scheme_descriptor(hash, &record.scheme);

        let dsc_extrapolated = match (&record.scheme, issuer.and_then(IssuerMetadata::salt_length))
        {
            (scheme, Some(salt)) if scheme.is_rsa_family() => {
                let (exponent, bits) = rsa_fields(scheme);
                format!("{hash}_rsa-pss_{exponent}_{salt}_{bits}")
            }
            _ => dsc.clone(),
        };

        Self {
            csca: issuer.map(issuer_descriptor),
            dsc,
            dsc_extrapolated,
        }
    }

    /// Whether the certificate's own descriptor has a missing-field marker.
    #[must_use]
    pub fn dsc_incomplete(&self) -> bool {
        is_incomplete(&self.dsc)
    }

    /// Whether the issuer descriptor has a missing-field marker.
    #[must_use]
    pub fn csca_incomplete(&self) -> bool {
        self.csca.as_deref().is_some_and(is_incomplete)
    }
}

fn is_incomplete(descriptor: &str) -> bool {
    descriptor.contains(UNKNOWN_MARKER) || descriptor.contains(UNDEFINED_MARKER)
}

fn scheme_descriptor(hash: &str, scheme: &SignatureScheme) -> String {
    let sig = scheme.name();
    match scheme {
        SignatureScheme::Ecdsa(key) => {
            let curve = key.map_or(UNDEFINED_MARKER, |key| key.curve.name());
            format!("{hash}_{sig}_{curve}")
        }
        SignatureScheme::Rsa(_)
        | SignatureScheme::RsaPss { .. }
        | SignatureScheme::Unsupported(_) => {
            let (exponent, bits) = rsa_fields(scheme);
            format!("{hash}_{sig}_{exponent}_{bits}")
        }
    }
}

fn issuer_descriptor(issuer: &IssuerMetadata) -> String {
    let hash = issuer.hash_algorithm.name();
    match &issuer.scheme {
        SignatureScheme::RsaPss { salt_length, .. } => {
            let sig = issuer.scheme.name();
            let (exponent, bits) = rsa_fields(&issuer.scheme);
            format!("{hash}_{sig}_{exponent}_{salt_length}_{bits}")
        }
        scheme @ (SignatureScheme::Rsa(_)
        | SignatureScheme::Ecdsa(_)
        | SignatureScheme::Unsupported(_)) => scheme_descriptor(hash, scheme),
    }
}

fn rsa_fields(scheme: &SignatureScheme) -> (String, String) {
    match scheme {
        SignatureScheme::Rsa(Some(key)) | SignatureScheme::RsaPss { key: Some(key), .. } => {
            (key.exponent.to_string(), key.bits.to_string())
        }
        SignatureScheme::Rsa(None)
        | SignatureScheme::RsaPss { key: None, .. }
        | SignatureScheme::Ecdsa(_)
        | SignatureScheme::Unsupported(_) => {
            (UNDEFINED_MARKER.to_owned(), UNDEFINED_MARKER.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::leaf_value;
    use crate::model::{Curve, EcKey, HashAlgorithm, RsaKey};

    const KEY: RsaKey = RsaKey {
        bits: 2048,
        exponent: 65_537,
    };

    fn record(hash_algorithm: HashAlgorithm, scheme: SignatureScheme) -> CertificateRecord {
        CertificateRecord {
            issuer: "CN=CSCA".to_owned(),
            hash_algorithm,
            scheme,
            tbs_length: 900,
        }
    }

    fn pss_issuer() -> IssuerMetadata {
        IssuerMetadata {
            hash_algorithm: HashAlgorithm::Sha512,
            scheme: SignatureScheme::RsaPss {
                key: Some(RsaKey {
                    bits: 4096,
                    exponent: 3,
                }),
                salt_length: 64,
            },
        }
    }

    #[test]
    fn ecdsa_descriptor() {
        let dsc = record(
            HashAlgorithm::Sha384,
            SignatureScheme::Ecdsa(Some(EcKey {
                bits: 384,
                curve: Curve::BrainpoolP384r1,
            })),
        );
        let descriptors = Descriptors::describe(&dsc, Some(&pss_issuer()));
        assert_eq!(descriptors.dsc, "sha384_ecdsa_brainpoolP384r1");
        assert_eq!(descriptors.dsc_extrapolated, descriptors.dsc);
        assert!(!descriptors.dsc_incomplete());
    }

    #[test]
    fn rsa_descriptor_without_issuer() {
        let dsc = record(HashAlgorithm::Sha256, SignatureScheme::Rsa(Some(KEY)));
        let descriptors = Descriptors::describe(&dsc, None);
        assert_eq!(descriptors.csca, None);
        assert_eq!(descriptors.dsc, "sha256_rsa_65537_2048");
        assert_eq!(descriptors.dsc_extrapolated, "sha256_rsa_65537_2048");
    }

    #[test]
    fn rsa_descriptor_extrapolates_pss_issuer_salt() {
        let dsc = record(HashAlgorithm::Sha256, SignatureScheme::Rsa(Some(KEY)));
        let descriptors = Descriptors::describe(&dsc, Some(&pss_issuer()));
        assert_eq!(descriptors.dsc, "sha256_rsa_65537_2048");
        assert_eq!(descriptors.dsc_extrapolated, "sha256_rsa-pss_65537_64_2048");
        assert_eq!(
            descriptors.csca.as_deref(),
            Some("sha512_rsa-pss_3_64_4096")
        );
    }

    #[test]
    fn issuer_descriptors_per_family() {
        let ec_issuer = IssuerMetadata {
            hash_algorithm: HashAlgorithm::Sha256,
            scheme: SignatureScheme::Ecdsa(Some(EcKey {
                bits: 256,
                curve: Curve::Secp256r1,
            })),
        };
        let rsa_issuer = IssuerMetadata {
            hash_algorithm: HashAlgorithm::Sha1,
            scheme: SignatureScheme::Rsa(Some(KEY)),
        };
        let dsc = record(HashAlgorithm::Sha256, SignatureScheme::Rsa(Some(KEY)));

        let descriptors = Descriptors::describe(&dsc, Some(&ec_issuer));
        assert_eq!(descriptors.csca.as_deref(), Some("sha256_ecdsa_secp256r1"));
        assert_eq!(descriptors.dsc_extrapolated, descriptors.dsc);

        let descriptors = Descriptors::describe(&dsc, Some(&rsa_issuer));
        assert_eq!(descriptors.csca.as_deref(), Some("sha1_rsa_65537_2048"));
    }

    #[test]
    fn missing_fields_are_flagged_but_not_excluded() {
        let dsc = record(
            HashAlgorithm::Unknown,
            SignatureScheme::Ecdsa(Some(EcKey {
                bits: 256,
                curve: Curve::Unknown,
            })),
        );
        let descriptors = Descriptors::describe(&dsc, None);
        assert!(descriptors.dsc_incomplete());
        assert!(!descriptors.csca_incomplete());
        assert!(leaf_value(&dsc, None).is_ok());
    }

    #[test]
    fn absent_key_is_undefined() {
        let dsc = record(HashAlgorithm::Sha256, SignatureScheme::Rsa(None));
        let issuer = IssuerMetadata::from(&dsc);
        let descriptors = Descriptors::describe(&dsc, Some(&issuer));
        assert_eq!(descriptors.dsc, "sha256_rsa_undefined_undefined");
        assert!(descriptors.dsc_incomplete());
        assert!(descriptors.csca_incomplete());
    }
}
