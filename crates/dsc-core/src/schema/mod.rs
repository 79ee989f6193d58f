//! Serialized schema/data contracts.

/// Build summary schema types.
pub mod summary;
/// Serialized tree schema types.
pub mod tree;
