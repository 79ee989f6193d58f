//! CLI-independent configuration types.

use std::path::PathBuf;

use dsc_certs::CertificateSet;

/// Canonical order in which eligible certificates are inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeafOrder {
    /// SHA-256 fingerprint of the DER, ties broken by identifier.
    #[default]
    Fingerprint,
    /// Identifier within the input set.
    Identifier,
}

/// Configuration of a tree build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Certificates to commit to.
    pub certificates: CertificateSet,
    /// Directory of issuer certificates, used for RSA-PSS salt lookup.
    pub csca_dir: Option<PathBuf>,
    /// Primary output of the serialized tree.
    pub tree_out: PathBuf,
    /// Byte-identical copies of the primary output.
    pub publish: Vec<PathBuf>,
    /// Optional JSON summary output.
    pub summary_out: Option<PathBuf>,
    /// Leaf order.
    pub order: LeafOrder,
}
