use std::path::PathBuf;

use dsc_core::base::FieldElement;
use dsc_imt::MerkleProof;
use eyre::{Context as _, ensure};
use tracing::{info, instrument};

use super::tree_file::{create_parent, read_tree};

/// Extract the inclusion proof of the leaf at `index` from a serialized tree.
///
/// The proof is checked against the stored root before it is written to `proof_out`,
/// or printed when no output file is given.
///
/// # Errors
/// Returns an error if the tree cannot be loaded, the index is out of range, the proof
/// does not reproduce the stored root or the output cannot be written.
#[instrument(skip_all, fields(tree = %tree_in.display(), index = index))]
pub async fn tree_proof(
    tree_in: PathBuf,
    index: usize,
    proof_out: Option<PathBuf>,
) -> eyre::Result<MerkleProof<FieldElement>> {
    let tree = read_tree(&tree_in).await?;
    let proof = tree.generate_proof(index)?;
    ensure!(
        proof.verify(),
        "Proof of leaf {index} does not reproduce the stored root"
    );

    let json = serde_json::to_string_pretty(&proof)?;
    match proof_out {
        Some(path) => {
            create_parent(&path).await?;
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write proof {}", path.display()))?;
            info!(file = ?path, siblings = proof.siblings.len(), "Exported proof");
        }
        None => print_proof(&json),
    }
    Ok(proof)
}

#[allow(clippy::print_stdout, reason = "Prints the proof to stdout")]
fn print_proof(json: &str) {
    println!("{json}");
}
