//! Arguments of the commands that read a serialized tree.

use std::path::PathBuf;

use super::constants::{DEFAULT_TREE_FILE, DSC_TREE_IN, DSC_TREE_PROOF_OUT};

/// Arguments for `proof`.
#[derive(Debug, clap::Args)]
pub struct ProofArgs {
    /// Serialized tree input file.
    #[arg(long, env = DSC_TREE_IN, default_value = DEFAULT_TREE_FILE)]
    pub tree: PathBuf,
    /// Leaf index.
    #[arg(long)]
    pub index: usize,
    /// Proof output file. Printed to stdout when omitted.
    #[arg(long, env = DSC_TREE_PROOF_OUT)]
    pub out: Option<PathBuf>,
}

/// Arguments for `verify`.
#[derive(Debug, clap::Args)]
pub struct VerifyArgs {
    /// Serialized tree input file.
    #[arg(long, env = DSC_TREE_IN, default_value = DEFAULT_TREE_FILE)]
    pub tree: PathBuf,
}
