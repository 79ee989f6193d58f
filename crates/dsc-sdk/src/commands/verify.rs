use std::path::PathBuf;

use dsc_core::base::FieldElement;
use dsc_imt::DscTree;
use eyre::bail;
use tracing::{info, instrument};

use super::tree_file::read_tree;

/// Recompute every layer of a serialized tree from its leaves and compare.
///
/// Returns the verified root, `None` for an empty tree.
///
/// # Errors
/// Returns an error if the tree cannot be loaded or any stored node differs from the
/// recomputed one.
#[instrument(skip_all, fields(tree = %tree_in.display()))]
pub async fn verify_tree(tree_in: PathBuf) -> eyre::Result<Option<FieldElement>> {
    let stored = read_tree(&tree_in).await?;
    let recomputed = DscTree::from_leaves(stored.leaves().iter().copied());

    for (layer, (stored_layer, recomputed_layer)) in
        stored.layers().iter().zip(recomputed.layers()).enumerate()
    {
        if let Some(position) = stored_layer
            .iter()
            .zip(recomputed_layer)
            .position(|(a, b)| a != b)
        {
            bail!("Layer {layer} differs from the recomputed tree at node {position}");
        }
    }

    let root = recomputed.root().copied();
    match &root {
        Some(root) => info!(root = %root, leaves = stored.size(), "Tree verified"),
        None => info!("Tree verified (empty)"),
    }
    Ok(root)
}
