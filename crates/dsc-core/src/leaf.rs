//! Leaf value derivation for the DSC tree.
//!
//! A leaf commits to the algorithmic metadata of a certificate, never to its key
//! material. The inputs are folded left to right with [`poseidon2`], the same
//! compression used for tree nodes:
//!
//! ```text
//! algorithm -> hash -> curve | exponent -> [issuer salt length] -> bits
//! ```
//!
//! The order is part of the output format; changing it requires bumping
//! [`LEAF_FORMAT_VERSION`].

use thiserror::Error;

use crate::base::{FieldElement, poseidon2};
use crate::model::{CertificateRecord, IssuerMetadata, SignatureScheme};

/// Largest accepted public key size.
pub const MAX_KEY_BITS: u32 = 4096;

/// Version of the leaf input layout.
pub const LEAF_FORMAT_VERSION: u8 = 1;

/// Why a certificate does not produce a leaf.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// Signature algorithm outside `rsa`, `rsa-pss`, `ecdsa`.
    #[error("Unsupported signature algorithm {0}")]
    UnsupportedAlgorithm(String),

    /// No usable public key details.
    #[error("No public key details")]
    MissingKeyDetails,

    /// Key exceeds [`MAX_KEY_BITS`].
    #[error("Key length {bits} bits exceeds {MAX_KEY_BITS} bits")]
    KeyTooLarge {
        /// Key size found in the certificate.
        bits: u32,
    },
}

/// The ordered integers a leaf commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafInputs {
    /// Signature algorithm identifier.
    pub algorithm: u64,
    /// Hash algorithm identifier.
    pub hash: u64,
    /// Curve identifier for ECDSA, public exponent for RSA.
    pub curve_or_exponent: u64,
    /// Issuer salt length, present only for RSA-PSS issuers.
    pub issuer_salt_length: Option<u64>,
    /// Key size in bits.
    pub bits: u64,
}

impl LeafInputs {
    /// Extract leaf inputs, enforcing eligibility.
    ///
    /// # Errors
    /// Returns an [`Exclusion`] when the algorithm is unsupported, key details are
    /// missing or the key is larger than [`MAX_KEY_BITS`].
    pub fn from_record(
        record: &CertificateRecord,
        issuer: Option<&IssuerMetadata>,
    ) -> Result<Self, Exclusion> {
        let (algorithm, curve_or_exponent, bits) = match &record.scheme {
            SignatureScheme::Unsupported(name) => {
                return Err(Exclusion::UnsupportedAlgorithm(name.clone()));
            }
            SignatureScheme::Rsa(key) | SignatureScheme::RsaPss { key, .. } => {
                let key = key.ok_or(Exclusion::MissingKeyDetails)?;
                (record.scheme.field_id(), key.exponent, key.bits)
            }
            SignatureScheme::Ecdsa(key) => {
                let key = key.ok_or(Exclusion::MissingKeyDetails)?;
                (record.scheme.field_id(), key.curve.field_id(), key.bits)
            }
        };
        let algorithm = algorithm
            .ok_or_else(|| Exclusion::UnsupportedAlgorithm(record.scheme.name().to_owned()))?;

        if bits > MAX_KEY_BITS {
            return Err(Exclusion::KeyTooLarge { bits });
        }

        Ok(Self {
            algorithm,
            hash: record.hash_algorithm.field_id(),
            curve_or_exponent,
            issuer_salt_length: issuer.and_then(IssuerMetadata::salt_length).map(u64::from),
            bits: u64::from(bits),
        })
    }

    /// Inputs as field elements, in commitment order.
    #[must_use]
    pub fn to_field_elements(&self) -> Vec<FieldElement> {
        let mut elements = vec![
            FieldElement::from(self.algorithm),
            FieldElement::from(self.hash),
            FieldElement::from(self.curve_or_exponent),
        ];
        if let Some(salt) = self.issuer_salt_length {
            elements.push(FieldElement::from(salt));
        }
        elements.push(FieldElement::from(self.bits));
        elements
    }

    /// Fold the inputs into a single leaf value.
    #[must_use]
    pub fn digest(&self) -> FieldElement {
        let seed = FieldElement::from(self.algorithm);
        self.to_field_elements()
            .iter()
            .skip(1)
            .fold(seed, |acc, input| poseidon2(&acc, input))
    }
}

/// Compute the leaf value of a certificate.
///
/// # Errors
/// Returns an [`Exclusion`] when the certificate is not eligible for the tree.
pub fn leaf_value(
    record: &CertificateRecord,
    issuer: Option<&IssuerMetadata>,
) -> Result<FieldElement, Exclusion> {
    LeafInputs::from_record(record, issuer).map(|inputs| inputs.digest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Curve, EcKey, HashAlgorithm, RsaKey};

    fn rsa(bits: u32) -> CertificateRecord {
        CertificateRecord {
            issuer: "C=NL, O=Kingdom of the Netherlands, CN=CSCA NL".to_owned(),
            hash_algorithm: HashAlgorithm::Sha256,
            scheme: SignatureScheme::Rsa(Some(RsaKey {
                bits,
                exponent: 65_537,
            })),
            tbs_length: 1_024,
        }
    }

    fn ecdsa() -> CertificateRecord {
        CertificateRecord {
            issuer: "C=DE, O=bund, CN=csca-germany".to_owned(),
            hash_algorithm: HashAlgorithm::Sha384,
            scheme: SignatureScheme::Ecdsa(Some(EcKey {
                bits: 384,
                curve: Curve::Secp384r1,
            })),
            tbs_length: 700,
        }
    }

    fn pss_issuer(salt_length: u32) -> IssuerMetadata {
        IssuerMetadata {
            hash_algorithm: HashAlgorithm::Sha256,
            scheme: SignatureScheme::RsaPss {
                key: Some(RsaKey {
                    bits: 4096,
                    exponent: 65_537,
                }),
                salt_length,
            },
        }
    }

    #[test]
    fn key_size_boundary() {
        assert!(leaf_value(&rsa(4096), None).is_ok());
        assert_eq!(
            leaf_value(&rsa(4097), None),
            Err(Exclusion::KeyTooLarge { bits: 4097 })
        );
    }

    #[test]
    fn unsupported_algorithm_is_excluded() {
        let mut record = rsa(2048);
        record.scheme = SignatureScheme::Unsupported("dsa".to_owned());
        assert_eq!(
            leaf_value(&record, None),
            Err(Exclusion::UnsupportedAlgorithm("dsa".to_owned()))
        );
    }

    #[test]
    fn missing_key_details_are_excluded() {
        let mut record = ecdsa();
        record.scheme = SignatureScheme::Ecdsa(None);
        assert_eq!(leaf_value(&record, None), Err(Exclusion::MissingKeyDetails));

        record.scheme = SignatureScheme::RsaPss {
            key: None,
            salt_length: 32,
        };
        assert_eq!(leaf_value(&record, None), Err(Exclusion::MissingKeyDetails));
    }

    #[test]
    fn inputs_follow_commitment_order() {
        let inputs = LeafInputs::from_record(&rsa(2048), None).expect("eligible");
        assert_eq!(
            inputs.to_field_elements(),
            vec![
                FieldElement::from(1_u64),
                FieldElement::from(3_u64),
                FieldElement::from(65_537_u64),
                FieldElement::from(2048_u64),
            ]
        );

        let issuer = pss_issuer(32);
        let inputs = LeafInputs::from_record(&ecdsa(), Some(&issuer)).expect("eligible");
        assert_eq!(
            inputs.to_field_elements(),
            vec![
                FieldElement::from(3_u64),
                FieldElement::from(4_u64),
                FieldElement::from(Curve::Secp384r1.field_id()),
                FieldElement::from(32_u64),
                FieldElement::from(384_u64),
            ]
        );
    }

    #[test]
    fn digest_is_a_left_fold_of_poseidon2() {
        let leaf = leaf_value(&rsa(2048), None).expect("eligible");
        let expected = poseidon2(
            &poseidon2(
                &poseidon2(&FieldElement::from(1_u64), &FieldElement::from(3_u64)),
                &FieldElement::from(65_537_u64),
            ),
            &FieldElement::from(2048_u64),
        );
        assert_eq!(leaf, expected);
    }

    #[test]
    fn deterministic_and_independent_of_issuer_name() {
        let mut other = rsa(2048);
        other.issuer = "C=FR, CN=CSCA-FRANCE".to_owned();
        other.tbs_length = 9;
        assert_eq!(leaf_value(&rsa(2048), None), leaf_value(&rsa(2048), None));
        assert_eq!(leaf_value(&rsa(2048), None), leaf_value(&other, None));
    }

    #[test]
    fn pss_issuer_salt_changes_the_leaf() {
        let plain_issuer = IssuerMetadata::from(&rsa(4096));
        let without = leaf_value(&rsa(2048), Some(&plain_issuer)).expect("eligible");
        let salt_32 = leaf_value(&rsa(2048), Some(&pss_issuer(32))).expect("eligible");
        let salt_64 = leaf_value(&rsa(2048), Some(&pss_issuer(64))).expect("eligible");

        assert_eq!(without, leaf_value(&rsa(2048), None).expect("eligible"));
        assert_ne!(without, salt_32);
        assert_ne!(salt_32, salt_64);
    }

    #[test]
    fn algorithm_identity_is_committed() {
        let mut pss = rsa(2048);
        pss.scheme = SignatureScheme::RsaPss {
            key: Some(RsaKey {
                bits: 2048,
                exponent: 65_537,
            }),
            salt_length: 32,
        };
        assert_ne!(leaf_value(&pss, None), leaf_value(&rsa(2048), None));
    }
}
