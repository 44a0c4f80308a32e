//! Pedersen binding over the BN254 scalar field.
//!
//! The Pedersen CRH runs on Baby Jubjub, whose base field is the BN254
//! scalar field, so the x-coordinate of the digest point is directly a
//! tree hash. Generators are derived once from a fixed seed; parameter
//! ceremonies are out of scope.

use ark_bn254::Fr;
use ark_crypto_primitives::crh::{pedersen, CRHScheme};
use ark_ed_on_bn254::EdwardsProjective;
use ark_ff::{BigInteger, One, PrimeField, Zero};
use ark_std::rand::rngs::StdRng;
use ark_std::rand::SeedableRng;

use crate::smt::Smt;

use super::SmtHasher;

/// "PEDERSEN" in hex; seeds the generator derivation.
const GENERATOR_SEED: u64 = 0x504544455253454e;

/// Window layout sized for the 3-element leaf input (96 bytes) with room
/// for the CRH's internal padding.
#[derive(Clone)]
pub struct PedersenWindow;

impl pedersen::Window for PedersenWindow {
    const WINDOW_SIZE: usize = 4;
    const NUM_WINDOWS: usize = 256;
}

type PedersenCrh = pedersen::CRH<EdwardsProjective, PedersenWindow>;

/// Pedersen hasher over Baby Jubjub.
#[derive(Clone)]
pub struct PedersenBn254 {
    parameters: pedersen::Parameters<EdwardsProjective>,
}

impl PedersenBn254 {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(GENERATOR_SEED);
        let parameters =
            PedersenCrh::setup(&mut rng).expect("generator derivation is deterministic");
        Self { parameters }
    }

    /// Hash the little-endian concatenation of the inputs and project the
    /// digest point to its x-coordinate.
    fn hash_elements(&self, inputs: &[Fr]) -> Fr {
        let mut bytes = Vec::with_capacity(inputs.len() * 32);
        for input in inputs {
            bytes.extend_from_slice(&input.into_bigint().to_bytes_le());
        }
        let point = PedersenCrh::evaluate(&self.parameters, bytes.as_slice())
            .expect("input length fits the window capacity");
        point.x
    }
}

impl Default for PedersenBn254 {
    fn default() -> Self {
        Self::new()
    }
}

impl SmtHasher<Fr> for PedersenBn254 {
    fn hash_leaf(&self, empty: bool, key: Fr, value: Fr) -> Fr {
        if empty {
            return Fr::zero();
        }
        self.hash_elements(&[key, value, Fr::one()])
    }

    fn hash_branch(&self, left: Fr, right: Fr) -> Fr {
        self.hash_elements(&[left, right])
    }
}

/// An SMT descriptor over the Pedersen binding.
pub fn pedersen_smt<const D: usize>() -> Smt<Fr, PedersenBn254, D> {
    Smt::new(PedersenBn254::new())
}
