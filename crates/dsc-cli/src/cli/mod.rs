//! Command-line interface for the `dsc-tree` CLI application.

mod build;
pub mod constants;
mod tree;

use clap::Parser;
use dsc_sdk::common::LeafOrder;
use eyre::{Result, eyre};

pub use self::build::BuildArgs;
pub use self::tree::{ProofArgs, VerifyArgs};

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "dsc-tree")]
#[command(about = "Document Signer Certificate Merkle tree tools")]
pub struct Cli {
    /// CLI top-level command.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Build the DSC tree from a certificate set.
    Build {
        /// Build arguments.
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Extract the inclusion proof of a leaf.
    Proof {
        /// Proof arguments.
        #[command(flatten)]
        args: ProofArgs,
    },
    /// Recompute a serialized tree and check every node.
    Verify {
        /// Verify arguments.
        #[command(flatten)]
        args: VerifyArgs,
    },
    /// Print the JSON schemas of the serialized tree and the build summary.
    Schema,
}

pub fn parse_leaf_order(s: &str) -> Result<LeafOrder> {
    match s {
        "fingerprint" => Ok(LeafOrder::Fingerprint),
        "identifier" => Ok(LeafOrder::Identifier),
        other => Err(eyre!(
            "Invalid leaf order: {other}. Expected 'fingerprint' or 'identifier'."
        )),
    }
}
