//! Foundational primitive types.

mod field;
mod poseidon;

pub use field::{FieldElement, FieldElementError};
pub use poseidon::poseidon2;
