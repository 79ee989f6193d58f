//! Node hashing.

use dsc_core::base::{FieldElement, poseidon2};

/// A node that can be combined with a sibling.
///
/// The same function combines every level; the lean tree has no empty leaves and
/// so no empty roots.
pub trait Hashable: Clone + PartialEq {
    /// Combine a left and a right child into their parent.
    fn combine(lhs: &Self, rhs: &Self) -> Self;
}

impl Hashable for FieldElement {
    /// Poseidon hash of the two children.
    fn combine(lhs: &Self, rhs: &Self) -> Self {
        poseidon2(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_is_poseidon2() {
        let a = FieldElement::from(1_u64);
        let b = FieldElement::from(2_u64);
        assert_eq!(FieldElement::combine(&a, &b), poseidon2(&a, &b));
        assert_ne!(FieldElement::combine(&a, &b), FieldElement::combine(&b, &a));
    }
}
