//! Issuer (CSCA) lookup.

use std::collections::HashMap;
use std::path::Path;

use dsc_core::model::IssuerMetadata;
use tracing::{info, instrument, warn};

use crate::parse::{ParsedCertificate, parse_certificate};
use crate::source::{CertificateSet, SourceError, read_certificate_set};

/// Known issuer certificates, indexed by key identifier and subject name.
#[derive(Debug, Clone, Default)]
pub struct CscaStore {
    by_key_id: HashMap<Vec<u8>, IssuerMetadata>,
    by_subject: HashMap<String, IssuerMetadata>,
    len: usize,
}

impl CscaStore {
    /// Load every certificate of `dir`.
    ///
    /// Files that do not parse are logged and skipped; they cannot resolve any issuer.
    ///
    /// # Errors
    /// Returns a [`SourceError`] if the directory or one of its files cannot be read.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub async fn load(dir: &Path) -> Result<Self, SourceError> {
        let set = CertificateSet::Masterlist(dir.to_path_buf());
        let mut store = Self::default();
        for raw in read_certificate_set(&set).await? {
            match parse_certificate(&raw.bytes) {
                Ok(parsed) => store.insert(&parsed),
                Err(e) => warn!(identifier = %raw.identifier, "Skipping CSCA: {e}"),
            }
        }
        info!(count = store.len(), "Loaded CSCA certificates");
        Ok(store)
    }

    /// Register an issuer certificate.
    ///
    /// On duplicate keys the first certificate registered wins.
    pub fn insert(&mut self, csca: &ParsedCertificate) {
        let metadata = csca.issuer_metadata();
        if let Some(key_id) = &csca.subject_key_id {
            self.by_key_id
                .entry(key_id.clone())
                .or_insert_with(|| metadata.clone());
        }
        self.by_subject
            .entry(csca.subject.clone())
            .or_insert(metadata);
        self.len = self.len.saturating_add(1);
    }

    /// Issuer metadata of `dsc`.
    ///
    /// Matches the authority key identifier first, then the issuer name.
    #[must_use]
    pub fn resolve(&self, dsc: &ParsedCertificate) -> Option<&IssuerMetadata> {
        dsc.authority_key_id
            .as_ref()
            .and_then(|key_id| self.by_key_id.get(key_id))
            .or_else(|| self.by_subject.get(&dsc.record.issuer))
    }

    /// Number of registered certificates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no certificate is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use dsc_core::model::{CertificateRecord, HashAlgorithm, RsaKey, SignatureScheme};

    use super::*;

    fn certificate(
        subject: &str,
        issuer: &str,
        scheme: SignatureScheme,
        subject_key_id: Option<&[u8]>,
        authority_key_id: Option<&[u8]>,
    ) -> ParsedCertificate {
        ParsedCertificate {
            record: CertificateRecord {
                issuer: issuer.to_owned(),
                hash_algorithm: HashAlgorithm::Sha256,
                scheme,
                tbs_length: 1_000,
            },
            subject: subject.to_owned(),
            subject_key_id: subject_key_id.map(<[u8]>::to_vec),
            authority_key_id: authority_key_id.map(<[u8]>::to_vec),
            fingerprint: String::new(),
        }
    }

    fn pss(salt_length: u32) -> SignatureScheme {
        SignatureScheme::RsaPss {
            key: Some(RsaKey {
                bits: 4096,
                exponent: 65_537,
            }),
            salt_length,
        }
    }

    #[test]
    fn resolves_by_key_identifier_before_name() {
        let mut store = CscaStore::default();
        store.insert(&certificate("CN=CSCA A", "CN=CSCA A", pss(32), Some(b"a"), None));
        store.insert(&certificate("CN=CSCA B", "CN=CSCA B", pss(64), Some(b"b"), None));

        let dsc = certificate("CN=DSC", "CN=CSCA A", SignatureScheme::Rsa(None), None, Some(b"b"));
        let issuer = store.resolve(&dsc).expect("issuer found");
        assert_eq!(issuer.salt_length(), Some(64));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn falls_back_to_issuer_name() {
        let mut store = CscaStore::default();
        store.insert(&certificate("CN=CSCA A", "CN=CSCA A", pss(32), None, None));

        let dsc = certificate("CN=DSC", "CN=CSCA A", SignatureScheme::Rsa(None), None, Some(b"x"));
        assert_eq!(
            store.resolve(&dsc).and_then(IssuerMetadata::salt_length),
            Some(32)
        );

        let orphan = certificate("CN=DSC", "CN=Other", SignatureScheme::Rsa(None), None, None);
        assert!(store.resolve(&orphan).is_none());
    }

    #[test]
    fn first_registration_wins() {
        let mut store = CscaStore::default();
        store.insert(&certificate("CN=CSCA", "CN=CSCA", pss(32), Some(b"k"), None));
        store.insert(&certificate("CN=CSCA", "CN=CSCA", pss(48), Some(b"k"), None));

        let dsc = certificate("CN=DSC", "CN=CSCA", SignatureScheme::Rsa(None), None, Some(b"k"));
        assert_eq!(
            store.resolve(&dsc).and_then(IssuerMetadata::salt_length),
            Some(32)
        );
    }
}
