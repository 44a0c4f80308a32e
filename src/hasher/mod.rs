//! Hash capabilities consumed by the SMT engine.
//!
//! The engine is parameterised by a [`SmtHasher`] rather than a concrete
//! hash so that circuit backends can swap primitives without touching the
//! proof algebra. Three bindings over the BN254 scalar field are provided:
//! Poseidon (circom parameterisation), Poseidon2, and Pedersen.

mod pedersen;
mod poseidon;
mod poseidon2;

pub use pedersen::{pedersen_smt, PedersenBn254};
pub use poseidon::{poseidon_smt, PoseidonBn254};
pub use poseidon2::{poseidon2_smt, Poseidon2Bn254};

use ark_ff::PrimeField;

/// Hash functions used in Sparse Merkle Tree operations.
pub trait SmtHasher<F: PrimeField> {
    /// 3-to-1 leaf hash over `(key, value)` with the occupancy tag.
    ///
    /// Contract: returns the field zero when `empty` is set, so that empty
    /// leaves collapse to the same constant as empty subtrees.
    fn hash_leaf(&self, empty: bool, key: F, value: F) -> F;

    /// 2-to-1 branch hash over the child hashes.
    fn hash_branch(&self, left: F, right: F) -> F;
}
