//! DSC tree base primitives, certificate model and schemas.

/// Field elements and the Poseidon compression shared by leaves and tree nodes.
pub mod base;
/// Diagnostic descriptors for certificates and their issuers.
pub mod descriptor;
/// Leaf value derivation.
pub mod leaf;
/// Algorithm-tagged certificate records.
pub mod model;
/// Serialized/public schema models used across the workspace.
pub mod schema;
