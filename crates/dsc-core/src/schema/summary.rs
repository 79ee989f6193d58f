use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::base::FieldElement;

/// A certificate left out of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExcludedCertificate {
    /// Input identifier (path relative to the input set).
    pub identifier: String,
    /// Human readable reason.
    pub reason: String,
}

/// Outcome of a tree build, written for manual audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BuildSummary {
    /// Tree root, absent when no certificate was eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub root: Option<FieldElement>,
    /// Number of committed leaves.
    pub leaf_count: usize,
    /// Number of inputs read from the certificate set.
    pub inputs: usize,
    /// Inputs the parser rejected.
    pub unparseable: Vec<ExcludedCertificate>,
    /// Parsed certificates that are not eligible.
    pub excluded: Vec<ExcludedCertificate>,
    /// Certificates whose issuer descriptor has a missing-field marker.
    pub incomplete_csca_descriptors: Vec<String>,
    /// Certificates whose own descriptor has a missing-field marker.
    pub incomplete_dsc_descriptors: Vec<String>,
    /// Issuer descriptor tallies.
    pub csca_descriptors: BTreeMap<String, usize>,
    /// Certificate descriptor tallies.
    pub dsc_descriptors: BTreeMap<String, usize>,
    /// Extrapolated certificate descriptor tallies.
    pub dsc_descriptors_extrapolated: BTreeMap<String, usize>,
    /// Largest signed payload seen, in bytes.
    pub max_tbs_length: usize,
    /// Largest public key seen, in bits.
    pub max_key_bits: u32,
    /// Issuers with keys above the accepted size, and the key size.
    pub oversized_keys: BTreeMap<String, u32>,
}
