//! Compact proof record for SMT verification.
//!
//! A proof carries everything needed to recompute a root without the tree:
//! the resolved leaf and the sibling hashes along its path.

use ark_ff::PrimeField;

/// A compact Sparse Merkle Tree proof.
///
/// `siblings[i]` is the sibling hash at depth `i`, with depth 0 at the
/// root; the node at depth `i` branches on bit `i` of the key
/// (little-endian). Empty subtrees are represented by the field zero and
/// are never hashed, so a proof for a leaf sitting at depth `d` carries
/// non-default siblings only at indices below `d`.
///
/// When `empty_leaf` is set the path resolves to an empty position and
/// `value` is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtProof<F: PrimeField, const D: usize> {
    empty_leaf: bool,
    key: F,
    value: F,
    siblings: [F; D],
}

impl<F: PrimeField, const D: usize> SmtProof<F, D> {
    /// Create a proof from its parts.
    pub fn new(empty_leaf: bool, key: F, value: F, siblings: [F; D]) -> Self {
        Self {
            empty_leaf,
            key,
            value,
            siblings,
        }
    }

    /// Whether the path resolves to an empty leaf.
    pub fn is_empty_leaf(&self) -> bool {
        self.empty_leaf
    }

    /// The key whose path this proof walks.
    pub fn key(&self) -> F {
        self.key
    }

    /// The value at the resolved leaf (meaningless when the leaf is empty).
    pub fn value(&self) -> F {
        self.value
    }

    /// Sibling hashes along the path, root level first.
    pub fn siblings(&self) -> &[F; D] {
        &self.siblings
    }
}
