//! Application command implementations.
//!
//! This module contains the core logic for each CLI subcommand.

mod build_tree;
mod proof;
mod tree_file;
mod verify;

pub use build_tree::build_dsc_tree;
pub use proof::tree_proof;
pub use verify::verify_tree;

/// Generates and prints the JSON schemas of the serialized tree and the build summary.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
pub fn tree_schema() -> eyre::Result<()> {
    let schema = schemars::schema_for!(dsc_core::schema::tree::SerializedTree);
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("Serialized DSC Tree JSON Schema:\n{schema_str}");

    let schema = schemars::schema_for!(dsc_core::schema::summary::BuildSummary);
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("Build Summary JSON Schema:\n{schema_str}");
    Ok(())
}
