//! Poseidon2 binding over the BN254 scalar field.
//!
//! Wraps the reference Poseidon2 permutation (width 3) in a padding-free
//! sponge with rate 2. Field values cross the arkworks boundary as 32-byte
//! little-endian strings; both moduli are the same prime, so the mapping is
//! exact.

use ark_bn254::Fr;
use ark_ff::{One, PrimeField, Zero};
use zkhash::fields::bn256::FpBN256;
use zkhash::poseidon2::poseidon2::Poseidon2;
use zkhash::poseidon2::poseidon2_instance_bn256::POSEIDON2_BN256_PARAMS;

use crate::smt::Smt;

use super::SmtHasher;

/// Sponge width of the BN256 Poseidon2 instance.
const WIDTH: usize = 3;

/// Absorption rate; one lane is reserved as capacity.
const RATE: usize = 2;

/// Poseidon2 hasher over the fixed BN256 instance.
#[derive(Clone)]
pub struct Poseidon2Bn254 {
    permutation: Poseidon2<FpBN256>,
}

impl Poseidon2Bn254 {
    pub fn new() -> Self {
        Self {
            permutation: Poseidon2::new(&POSEIDON2_BN256_PARAMS),
        }
    }

    /// Padding-free sponge over fixed-length input: absorb `RATE` lanes,
    /// permute, repeat; squeeze the first lane.
    fn sponge(&self, inputs: &[Fr]) -> Fr {
        let mut state = vec![FpBN256::zero(); WIDTH];
        for chunk in inputs.chunks(RATE) {
            for (lane, input) in state.iter_mut().zip(chunk) {
                *lane += to_zkhash(*input);
            }
            state = self.permutation.permutation(&state);
        }
        from_zkhash(state[0])
    }
}

impl Default for Poseidon2Bn254 {
    fn default() -> Self {
        Self::new()
    }
}

impl SmtHasher<Fr> for Poseidon2Bn254 {
    fn hash_leaf(&self, empty: bool, key: Fr, value: Fr) -> Fr {
        if empty {
            return Fr::zero();
        }
        self.sponge(&[key, value, Fr::one()])
    }

    fn hash_branch(&self, left: Fr, right: Fr) -> Fr {
        self.sponge(&[left, right])
    }
}

fn to_zkhash(value: Fr) -> FpBN256 {
    FpBN256::from_bigint(value.into_bigint()).expect("canonical representative of the shared modulus")
}

fn from_zkhash(value: FpBN256) -> Fr {
    Fr::from_bigint(value.into_bigint()).expect("canonical representative of the shared modulus")
}

/// An SMT descriptor over the Poseidon2 binding.
pub fn poseidon2_smt<const D: usize>() -> Smt<Fr, Poseidon2Bn254, D> {
    Smt::new(Poseidon2Bn254::new())
}
