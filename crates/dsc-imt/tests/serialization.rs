#![allow(missing_docs)]

use dsc_core::base::FieldElement;
use dsc_core::schema::tree::SerializedTree;
use dsc_imt::{DscTree, TreeError};
use rand::Rng;

fn random_tree(size: usize) -> DscTree {
    let mut rng = rand::rng();
    DscTree::from_leaves((0..size).map(|_| FieldElement::from(rng.random::<u64>())))
}

#[test]
fn tree_survives_json() {
    for size in [0, 1, 2, 3, 7, 33] {
        let tree = random_tree(size);
        let json = serde_json::to_string(&SerializedTree::from(&tree)).expect("serialize");

        let decoded: SerializedTree = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.leaf_count(), size);
        assert_eq!(decoded.root().as_ref(), tree.root());

        let restored = DscTree::try_from(decoded).expect("valid tree");
        assert_eq!(restored, tree);
    }
}

#[test]
fn restored_tree_keeps_growing() {
    let mut tree = random_tree(5);
    let mut restored =
        DscTree::try_from(SerializedTree::from(&tree)).expect("valid tree");

    let leaf = FieldElement::from(42_u64);
    tree.insert(leaf);
    restored.insert(leaf);
    assert_eq!(restored.root(), tree.root());
}

#[test]
fn layer_count_mismatch_is_rejected() {
    let json = r#"[["1","2","3"],["4","3"]]"#;
    let decoded: SerializedTree = serde_json::from_str(json).expect("deserialize");
    assert_eq!(
        DscTree::try_from(decoded),
        Err(TreeError::Depth {
            expected: 2,
            found: 1
        })
    );
}

#[test]
fn out_of_field_values_are_rejected() {
    let json = r#"[["21888242871839275222246405745257275088548364400416034343698204186575808495617"]]"#;
    assert!(serde_json::from_str::<SerializedTree>(json).is_err());
}
