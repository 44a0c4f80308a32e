//! Sparse Merkle Tree verification and transition primitives over BN254.
//!
//! This crate provides:
//! - `SmtProof`: the compact proof record exchanged with external provers
//! - `Smt`: root computation, inclusion/exclusion verification, and
//!   insert/update/delete transitions derived by rewriting proofs in place
//! - Hasher bindings over the BN254 scalar field: Poseidon (circom
//!   parameterisation), Poseidon2, and Pedersen over Baby Jubjub
//!
//! The tree itself is never materialised: a proof carries the resolved
//! leaf and the sibling hashes along its path, and every operation,
//! state transitions included, is a pure computation over that record.
//! The algorithms are branch-free over fixed-size arrays so that a circuit
//! backend can translate them directly.

pub mod bits;
pub mod hasher;
pub mod smt;

pub use hasher::{
    pedersen_smt, poseidon2_smt, poseidon_smt, PedersenBn254, PoseidonBn254, Poseidon2Bn254,
    SmtHasher,
};
pub use smt::{Operation, Smt, SmtProof};

use ark_bn254::Fr;

/// The concrete field of all provided bindings.
pub type ConstraintF = Fr;
