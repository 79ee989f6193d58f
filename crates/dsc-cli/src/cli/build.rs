//! Build command arguments.

use std::path::PathBuf;

use clap::ArgGroup;
use dsc_certs::CertificateSet;
use dsc_sdk::common::{BuildConfig, LeafOrder};
use eyre::eyre;

use super::constants::{
    DEFAULT_ORDER, DEFAULT_TREE_FILE, DSC_TREE_CSCA_DIR, DSC_TREE_MASTERLIST_DIR,
    DSC_TREE_MOCK_DIR, DSC_TREE_ORDER, DSC_TREE_OUT, DSC_TREE_PUBLISH, DSC_TREE_SUMMARY_OUT,
};
use super::parse_leaf_order;

/// Arguments for `build`.
#[derive(Debug, clap::Args)]
#[command(group(ArgGroup::new("input").required(true).args(["masterlist", "mock"])))]
pub struct BuildArgs {
    /// Production masterlist directory; every regular file is a certificate.
    #[arg(long, env = DSC_TREE_MASTERLIST_DIR)]
    pub masterlist: Option<PathBuf>,
    /// Development mock directory; `<name>/mock_dsc.pem` in each subdirectory.
    #[arg(long, env = DSC_TREE_MOCK_DIR)]
    pub mock: Option<PathBuf>,
    /// Directory of issuer (CSCA) certificates used to resolve RSA-PSS salts.
    #[arg(long, env = DSC_TREE_CSCA_DIR)]
    pub csca_dir: Option<PathBuf>,
    /// Serialized tree output file.
    #[arg(long, env = DSC_TREE_OUT, default_value = DEFAULT_TREE_FILE)]
    pub tree_out: PathBuf,
    /// Additional copy of the serialized tree. Can be repeated.
    #[arg(long, env = DSC_TREE_PUBLISH, value_delimiter = ',')]
    pub publish: Vec<PathBuf>,
    /// Optional build summary output file.
    #[arg(long, env = DSC_TREE_SUMMARY_OUT)]
    pub summary_out: Option<PathBuf>,
    /// Leaf order: `fingerprint` or `identifier`.
    #[arg(
        long,
        env = DSC_TREE_ORDER,
        default_value = DEFAULT_ORDER,
        value_parser = parse_leaf_order
    )]
    pub order: LeafOrder,
}

impl TryFrom<BuildArgs> for BuildConfig {
    type Error = eyre::Report;

    fn try_from(args: BuildArgs) -> Result<Self, Self::Error> {
        let certificates = match (args.masterlist, args.mock) {
            (Some(dir), None) => CertificateSet::Masterlist(dir),
            (None, Some(dir)) => CertificateSet::Mock(dir),
            (Some(_), Some(_)) | (None, None) => {
                return Err(eyre!("Exactly one of --masterlist or --mock is required"));
            }
        };
        Ok(Self {
            certificates,
            csca_dir: args.csca_dir,
            tree_out: args.tree_out,
            publish: args.publish,
            summary_out: args.summary_out,
            order: args.order,
        })
    }
}
