//! Bit decomposition and fixed-size array helpers.
//!
//! Everything here is shape-preserving over `[T; N]` arrays so that the
//! engine's loops stay statically bounded for a compile-time tree depth.

use ark_ff::{BigInteger, PrimeField};

/// Decompose a field element into its `D` least-significant bits,
/// little-endian (`bits[0]` is the least significant).
///
/// Elements wider than `D` bits are truncated; narrower ones are
/// zero-extended.
pub fn key_to_bits<F: PrimeField, const D: usize>(key: F) -> [bool; D] {
    let le = key.into_bigint().to_bits_le();
    core::array::from_fn(|i| le.get(i).copied().unwrap_or(false))
}

/// Right fold over a fixed-size array: applies `f(xs[N-1-i], acc)` for
/// `i = 0..N`, so the last element is consumed first.
pub fn foldr<T, A, const N: usize>(xs: &[T; N], init: A, mut f: impl FnMut(&T, A) -> A) -> A {
    xs.iter().rev().fold(init, |acc, x| f(x, acc))
}

/// Pair two fixed-size arrays element-wise.
pub fn zip<A: Copy, B: Copy, const N: usize>(a: [A; N], b: [B; N]) -> [(A, B); N] {
    core::array::from_fn(|i| (a[i], b[i]))
}

/// Pair three fixed-size arrays element-wise.
pub fn zip3<A: Copy, B: Copy, C: Copy, const N: usize>(
    a: [A; N],
    b: [B; N],
    c: [C; N],
) -> [(A, B, C); N] {
    core::array::from_fn(|i| (a[i], b[i], c[i]))
}
