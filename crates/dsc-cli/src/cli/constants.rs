//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Build inputs
pub const DSC_TREE_MASTERLIST_DIR: &str = "DSC_TREE_MASTERLIST_DIR";
pub const DSC_TREE_MOCK_DIR: &str = "DSC_TREE_MOCK_DIR";
pub const DSC_TREE_CSCA_DIR: &str = "DSC_TREE_CSCA_DIR";
pub const DSC_TREE_ORDER: &str = "DSC_TREE_ORDER";

// Build outputs
pub const DSC_TREE_OUT: &str = "DSC_TREE_OUT";
pub const DSC_TREE_PUBLISH: &str = "DSC_TREE_PUBLISH";
pub const DSC_TREE_SUMMARY_OUT: &str = "DSC_TREE_SUMMARY_OUT";

// Proof and verification
pub const DSC_TREE_IN: &str = "DSC_TREE_IN";
pub const DSC_TREE_PROOF_OUT: &str = "DSC_TREE_PROOF_OUT";

// -------------------------
// Default values
// -------------------------

// File paths
pub const DEFAULT_TREE_FILE: &str = "outputs/serialized_dsc_tree.json";

// Parsed values
pub const DEFAULT_ORDER: &str = "fingerprint";
