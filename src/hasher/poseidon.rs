//! Poseidon binding over the BN254 scalar field.
//!
//! Uses the circom parameterisation so that roots match proofs produced by
//! circomlib-based provers.

use ark_bn254::Fr;
use ark_ff::{One, Zero};
use light_poseidon::{Poseidon, PoseidonHasher};

use crate::smt::Smt;

use super::SmtHasher;

/// circom-parameterised Poseidon hasher.
#[derive(Clone, Copy, Debug, Default)]
pub struct PoseidonBn254;

/// Hash a fixed-width input. The sponge is parameterised by arity, so it is
/// rebuilt per call.
fn poseidon(inputs: &[Fr]) -> Fr {
    let mut sponge =
        Poseidon::<Fr>::new_circom(inputs.len()).expect("circom parameters cover widths 2 and 3");
    sponge
        .hash(inputs)
        .expect("input arity matches the sponge width")
}

impl SmtHasher<Fr> for PoseidonBn254 {
    fn hash_leaf(&self, empty: bool, key: Fr, value: Fr) -> Fr {
        if empty {
            return Fr::zero();
        }
        poseidon(&[key, value, Fr::one()])
    }

    fn hash_branch(&self, left: Fr, right: Fr) -> Fr {
        poseidon(&[left, right])
    }
}

/// An SMT descriptor over the Poseidon binding.
pub fn poseidon_smt<const D: usize>() -> Smt<Fr, PoseidonBn254, D> {
    Smt::new(PoseidonBn254)
}
