//! Tree errors.

use thiserror::Error;

/// Errors that can occur when working with the tree.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The leaf index does not exist.
    #[error("Leaf index {index} is out of range for a tree of {size} leaves")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of leaves.
        size: usize,
    },

    /// A layer does not have `ceil(previous / 2)` nodes.
    #[error("Layer {layer} has {found} nodes, expected {expected}")]
    LayerWidth {
        /// Layer number, 0 being the leaves.
        layer: usize,
        /// Width implied by the previous layer.
        expected: usize,
        /// Width found.
        found: usize,
    },

    /// The number of layers does not match the leaf count.
    #[error("Tree has depth {found}, expected {expected} for its leaf count")]
    Depth {
        /// Depth implied by the leaf count.
        expected: usize,
        /// Depth found.
        found: usize,
    },

    /// An unpaired node was not carried up unchanged.
    #[error("Unpaired node of layer {layer} is not carried up unchanged")]
    CarriedNodeMismatch {
        /// Layer holding the unpaired node.
        layer: usize,
    },
}
