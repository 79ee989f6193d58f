//! Inclusion proofs for the lean tree.

use serde::{Deserialize, Serialize};

use crate::node::Hashable;

/// Inclusion proof of a leaf in a [`crate::LeanMerkleTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof<N> {
    /// Root the proof was generated against.
    pub root: N,
    /// Proven leaf.
    pub leaf: N,
    /// Position of the leaf in the tree.
    pub leaf_index: usize,
    /// Bit `i` is set when the running node is the right child at sibling `i`.
    pub path_indices: usize,
    /// Siblings from the leaf upward, skipping levels where the node was carried.
    pub siblings: Vec<N>,
}

impl<N: Hashable> MerkleProof<N> {
    /// Recompute the root from the leaf and siblings.
    #[must_use]
    pub fn compute_root(&self) -> N {
        self.siblings
            .iter()
            .enumerate()
            .fold(self.leaf.clone(), |node, (i, sibling)| {
                let is_right = self
                    .path_indices
                    .checked_shr(u32::try_from(i).unwrap_or(u32::MAX))
                    .is_some_and(|bits| bits & 1 == 1);
                if is_right {
                    N::combine(sibling, &node)
                } else {
                    N::combine(&node, sibling)
                }
            })
    }

    /// Whether the proof reproduces its root.
    #[must_use]
    pub fn verify(&self) -> bool {
        self.compute_root() == self.root
    }
}

#[cfg(test)]
mod tests {
    use dsc_core::base::FieldElement;

    use super::*;
    use crate::LeanMerkleTree;

    #[test]
    fn proof_serializes_as_decimal_strings() {
        let tree = LeanMerkleTree::from_leaves([1_u64, 2, 3].map(FieldElement::from));
        let proof = tree.generate_proof(2).expect("leaf exists");

        let json = serde_json::to_value(&proof).expect("serialize");
        assert_eq!(json["leaf"], "3");
        assert_eq!(json["leaf_index"], 2);
        assert_eq!(json["path_indices"], 1);

        let decoded: MerkleProof<FieldElement> = serde_json::from_value(json).expect("deserialize");
        assert!(decoded.verify());
    }

    #[test]
    fn swapped_direction_fails() {
        let tree = LeanMerkleTree::from_leaves([1_u64, 2, 3, 4].map(FieldElement::from));
        let mut proof = tree.generate_proof(1).expect("leaf exists");
        proof.path_indices ^= 1;
        assert!(!proof.verify());
    }
}
