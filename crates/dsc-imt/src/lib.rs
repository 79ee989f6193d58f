//! Lean incremental Merkle tree.
//!
//! Leaves are appended in order. A node without a right sibling is carried up
//! unchanged instead of being paired with a zero value, so the tree never needs to
//! know its final size.

mod error;
mod node;
mod proof;
mod serialize;
mod tree;

pub use error::TreeError;
pub use node::Hashable;
pub use proof::MerkleProof;
pub use tree::LeanMerkleTree;

/// The DSC tree: Poseidon nodes over BN254.
pub type DscTree = LeanMerkleTree<dsc_core::base::FieldElement>;
