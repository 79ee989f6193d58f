//! Conversion between the tree and its serialized form.

use dsc_core::base::FieldElement;
use dsc_core::schema::tree::SerializedTree;

use crate::error::TreeError;
use crate::tree::LeanMerkleTree;

impl From<&LeanMerkleTree<FieldElement>> for SerializedTree {
    fn from(tree: &LeanMerkleTree<FieldElement>) -> Self {
        Self::new(tree.export())
    }
}

impl TryFrom<SerializedTree> for LeanMerkleTree<FieldElement> {
    type Error = TreeError;

    fn try_from(serialized: SerializedTree) -> Result<Self, Self::Error> {
        Self::import(serialized.into_layers())
    }
}
