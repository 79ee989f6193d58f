use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::base::FieldElement;

/// Serialized DSC tree.
///
/// A JSON array of layers, leaves first and the single-element root last. Every node
/// is a decimal string so large field elements keep full precision. The leaf count is
/// the length of the first layer. An empty tree is `[[]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SerializedTree {
    #[schemars(with = "Vec<Vec<String>>")]
    layers: Vec<Vec<FieldElement>>,
}

impl SerializedTree {
    /// Wrap exported layers.
    #[must_use]
    pub const fn new(layers: Vec<Vec<FieldElement>>) -> Self {
        Self { layers }
    }

    /// Stored layers, leaves first.
    #[must_use]
    pub fn layers(&self) -> &[Vec<FieldElement>] {
        &self.layers
    }

    /// Consume into the stored layers.
    #[must_use]
    pub fn into_layers(self) -> Vec<Vec<FieldElement>> {
        self.layers
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    /// Root stored in the top layer, `None` for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<FieldElement> {
        match self.layers.last().map(Vec::as_slice) {
            Some([root]) => Some(*root),
            _ => None,
        }
    }
}

impl Default for SerializedTree {
    fn default() -> Self {
        Self::new(vec![Vec::new()])
    }
}
