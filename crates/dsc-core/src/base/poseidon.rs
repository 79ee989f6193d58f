//! Circom-compatible Poseidon compression over BN254.
//!
//! The same two-to-one function combines tree nodes and folds leaf inputs, so a
//! circuit only needs one Poseidon instance (`t = 3`) to check both.

use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher as _};

use super::FieldElement;

/// Poseidon hash of two field elements, `poseidon2([lhs, rhs])` in circomlib terms.
///
/// # Panics
/// Never in practice: circom parameters for two inputs are compiled into
/// `light-poseidon` and the input slice always has the configured width.
#[must_use]
#[allow(
    clippy::expect_used,
    reason = "Width-2 circom parameters are static; both calls are infallible for this arity"
)]
pub fn poseidon2(lhs: &FieldElement, rhs: &FieldElement) -> FieldElement {
    let mut hasher =
        Poseidon::<Fr>::new_circom(2).expect("circom parameters exist for two inputs");
    let digest = hasher
        .hash(&[lhs.inner(), rhs.inner()])
        .expect("input count matches the hasher width");
    FieldElement::from(digest)
}
