//! Reading and writing serialized trees.

use std::path::{Path, PathBuf};

use dsc_core::schema::tree::SerializedTree;
use dsc_imt::DscTree;
use eyre::Context as _;
use tracing::info;

/// Load a serialized tree, checking its shape but not its hashes.
pub(crate) async fn read_tree(path: &Path) -> eyre::Result<DscTree> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read tree {}", path.display()))?;
    let serialized: SerializedTree = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse tree {}", path.display()))?;
    DscTree::try_from(serialized)
        .with_context(|| format!("Malformed tree {}", path.display()))
}

/// Write the tree to `primary`, then copy the written file to every publish path.
pub(crate) async fn write_tree(
    tree: &DscTree,
    primary: &Path,
    publish: &[PathBuf],
) -> eyre::Result<()> {
    let json = serde_json::to_string(&SerializedTree::from(tree))?;
    create_parent(primary).await?;
    tokio::fs::write(primary, json)
        .await
        .with_context(|| format!("Failed to write tree {}", primary.display()))?;
    info!(file = ?primary, "Exported tree");

    for copy in publish {
        create_parent(copy).await?;
        tokio::fs::copy(primary, copy)
            .await
            .with_context(|| format!("Failed to publish tree to {}", copy.display()))?;
        info!(file = ?copy, "Published tree");
    }
    Ok(())
}

pub(crate) async fn create_parent(path: &Path) -> eyre::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}
