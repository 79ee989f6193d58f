//! Build statistics.

use std::collections::BTreeMap;

use dsc_core::base::FieldElement;
use dsc_core::descriptor::Descriptors;
use dsc_core::leaf::Exclusion;
use dsc_core::model::CertificateRecord;
use dsc_core::schema::summary::{BuildSummary, ExcludedCertificate};

/// Diagnostics accumulated over one build.
///
/// Owned by the build driver and fed in leaf order, so every list is deterministic.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    unparseable: Vec<ExcludedCertificate>,
    excluded: Vec<ExcludedCertificate>,
    incomplete_csca_descriptors: Vec<String>,
    incomplete_dsc_descriptors: Vec<String>,
    csca_descriptors: BTreeMap<String, usize>,
    dsc_descriptors: BTreeMap<String, usize>,
    dsc_descriptors_extrapolated: BTreeMap<String, usize>,
    max_tbs_length: usize,
    max_key_bits: u32,
    oversized_keys: BTreeMap<String, u32>,
}

impl BuildStats {
    /// Record an input the parser rejected.
    pub fn record_unparseable(&mut self, identifier: &str, reason: impl ToString) {
        self.unparseable.push(ExcludedCertificate {
            identifier: identifier.to_owned(),
            reason: reason.to_string(),
        });
    }

    /// Record the size maxima of a parsed certificate, eligible or not.
    pub fn observe(&mut self, record: &CertificateRecord) {
        self.max_tbs_length = self.max_tbs_length.max(record.tbs_length);
        if let Some(bits) = record.scheme.key_bits() {
            self.max_key_bits = self.max_key_bits.max(bits);
        }
    }

    /// Record a parsed certificate that produced no leaf.
    pub fn record_excluded(
        &mut self,
        identifier: &str,
        record: &CertificateRecord,
        exclusion: &Exclusion,
    ) {
        if let Exclusion::KeyTooLarge { bits } = exclusion {
            self.oversized_keys.insert(record.issuer.clone(), *bits);
        }
        self.excluded.push(ExcludedCertificate {
            identifier: identifier.to_owned(),
            reason: exclusion.to_string(),
        });
    }

    /// Tally the descriptors of a committed certificate.
    pub fn record_descriptors(&mut self, identifier: &str, descriptors: &Descriptors) {
        if let Some(csca) = &descriptors.csca {
            tally(&mut self.csca_descriptors, csca);
        }
        if descriptors.csca_incomplete() {
            self.incomplete_csca_descriptors.push(identifier.to_owned());
        }
        tally(&mut self.dsc_descriptors, &descriptors.dsc);
        if descriptors.dsc_incomplete() {
            self.incomplete_dsc_descriptors.push(identifier.to_owned());
        }
        tally(
            &mut self.dsc_descriptors_extrapolated,
            &descriptors.dsc_extrapolated,
        );
    }

    /// Finish into the summary of a build that committed `leaf_count` leaves out of
    /// `inputs` certificates.
    #[must_use]
    pub fn into_summary(
        self,
        root: Option<FieldElement>,
        leaf_count: usize,
        inputs: usize,
    ) -> BuildSummary {
        BuildSummary {
            root,
            leaf_count,
            inputs,
            unparseable: self.unparseable,
            excluded: self.excluded,
            incomplete_csca_descriptors: self.incomplete_csca_descriptors,
            incomplete_dsc_descriptors: self.incomplete_dsc_descriptors,
            csca_descriptors: self.csca_descriptors,
            dsc_descriptors: self.dsc_descriptors,
            dsc_descriptors_extrapolated: self.dsc_descriptors_extrapolated,
            max_tbs_length: self.max_tbs_length,
            max_key_bits: self.max_key_bits,
            oversized_keys: self.oversized_keys,
        }
    }
}

fn tally(counts: &mut BTreeMap<String, usize>, key: &str) {
    let count = counts.entry(key.to_owned()).or_default();
    *count = count.saturating_add(1);
}
