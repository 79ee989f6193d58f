//! Append-only lean incremental Merkle tree.

#![allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "Layer index math is bounded by the layer invariants maintained on every insert"
)]

use crate::error::TreeError;
use crate::node::Hashable;
use crate::proof::MerkleProof;

/// A lean incremental Merkle tree.
///
/// Layer 0 holds the leaves in insertion order; layer `k` holds `ceil(len(k-1) / 2)`
/// nodes where a pair is combined and an unpaired trailing node is copied as is. The
/// top layer holds the root once the tree has at least one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeanMerkleTree<N> {
    /// Always at least one layer; layer 0 may be empty.
    layers: Vec<Vec<N>>,
}

impl<N: Hashable> LeanMerkleTree<N> {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: vec![Vec::new()],
        }
    }

    /// Build a tree by inserting `leaves` in iteration order.
    #[must_use]
    pub fn from_leaves(leaves: impl IntoIterator<Item = N>) -> Self {
        let mut tree = Self::new();
        tree.insert_many(leaves);
        tree
    }

    /// Number of leaves.
    #[must_use]
    pub fn size(&self) -> usize {
        self.layers[0].len()
    }

    /// Whether the tree has no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of layers above the leaves.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// The root, `None` for an empty tree.
    ///
    /// With a single leaf the root is that leaf.
    #[must_use]
    pub fn root(&self) -> Option<&N> {
        self.layers[self.depth()].first()
    }

    /// Leaves in insertion order.
    #[must_use]
    pub fn leaves(&self) -> &[N] {
        &self.layers[0]
    }

    /// All layers, leaves first.
    #[must_use]
    pub fn layers(&self) -> &[Vec<N>] {
        &self.layers
    }

    /// Index of the first occurrence of `leaf`.
    #[must_use]
    pub fn index_of(&self, leaf: &N) -> Option<usize> {
        self.leaves().iter().position(|candidate| candidate == leaf)
    }

    /// Whether `leaf` has been inserted.
    #[must_use]
    pub fn contains(&self, leaf: &N) -> bool {
        self.index_of(leaf).is_some()
    }

    /// Append a leaf at index [`Self::size`] and update its path to the root.
    pub fn insert(&mut self, leaf: N) {
        let mut index = self.size();
        let depth = required_depth(index + 1);
        while self.depth() < depth {
            self.layers.push(Vec::new());
        }

        let mut node = leaf;
        for level in 0..depth {
            let layer = &mut self.layers[level];
            if index < layer.len() {
                layer[index] = node.clone();
            } else {
                layer.push(node.clone());
            }

            if index & 1 == 1 {
                node = N::combine(&layer[index - 1], &node);
            }
            index >>= 1;
        }

        self.layers[depth] = vec![node];
    }

    /// Append leaves in iteration order.
    pub fn insert_many(&mut self, leaves: impl IntoIterator<Item = N>) {
        for leaf in leaves {
            self.insert(leaf);
        }
    }

    /// Copy of all layers, leaves first; `[[]]` for an empty tree.
    #[must_use]
    pub fn export(&self) -> Vec<Vec<N>> {
        self.layers.clone()
    }

    /// Rebuild a tree from exported layers without hashing.
    ///
    /// Only the shape is validated: layer widths, depth, and carried nodes.
    ///
    /// # Errors
    /// Returns an error if the layers cannot belong to a lean tree.
    pub fn import(mut layers: Vec<Vec<N>>) -> Result<Self, TreeError> {
        if layers.is_empty() {
            layers.push(Vec::new());
        }

        let size = layers[0].len();
        let expected_depth = required_depth(size);
        let found_depth = layers.len() - 1;
        if expected_depth != found_depth {
            return Err(TreeError::Depth {
                expected: expected_depth,
                found: found_depth,
            });
        }

        for (layer, pair) in layers.windows(2).enumerate() {
            let (below, above) = (&pair[0], &pair[1]);
            let expected = below.len().div_ceil(2);
            if above.len() != expected {
                return Err(TreeError::LayerWidth {
                    layer: layer + 1,
                    expected,
                    found: above.len(),
                });
            }
            if below.len() % 2 == 1 && below.last() != above.last() {
                return Err(TreeError::CarriedNodeMismatch { layer });
            }
        }

        Ok(Self { layers })
    }

    /// Inclusion proof for the leaf at `index`.
    ///
    /// Levels where the node has no sibling contribute nothing; the proof's path
    /// indices pack one bit per included sibling, `1` meaning the node is the right child.
    ///
    /// # Errors
    /// Returns [`TreeError::IndexOutOfRange`] if there is no such leaf.
    pub fn generate_proof(&self, index: usize) -> Result<MerkleProof<N>, TreeError> {
        let out_of_range = || TreeError::IndexOutOfRange {
            index,
            size: self.size(),
        };
        let leaf = self.leaves().get(index).cloned().ok_or_else(out_of_range)?;
        let root = self.root().cloned().ok_or_else(out_of_range)?;

        let mut siblings = Vec::with_capacity(self.depth());
        let mut path_indices = 0_usize;
        let mut position = index;
        for layer in &self.layers[..self.depth()] {
            let is_right = position & 1 == 1;
            let sibling = if is_right {
                layer.get(position - 1)
            } else {
                layer.get(position + 1)
            };
            if let Some(sibling) = sibling {
                if is_right {
                    path_indices |= 1 << siblings.len();
                }
                siblings.push(sibling.clone());
            }
            position >>= 1;
        }

        Ok(MerkleProof {
            root,
            leaf,
            leaf_index: index,
            path_indices,
            siblings,
        })
    }
}

impl<N: Hashable> Default for LeanMerkleTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest depth whose capacity `2^depth` fits `size` leaves.
const fn required_depth(size: usize) -> usize {
    let mut depth = 0;
    while (1_usize << depth) < size {
        depth += 1;
    }
    depth
}
