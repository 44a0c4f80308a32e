//! Proof verification and transition engine.
//!
//! The engine never materialises a tree. It recomputes roots from compact
//! proofs, checks inclusion and exclusion, and derives the proof of the
//! post-operation tree by rewriting sibling entries in a copy of the input
//! proof. All violations of proof structure are fatal; only the final root
//! comparison is reported as a `bool`.

use ark_ff::PrimeField;

use crate::bits::{foldr, key_to_bits, zip, zip3};
use crate::hasher::SmtHasher;

use super::proof::SmtProof;

/// Tree transition kinds accepted by [`Smt::process`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Update,
    Delete,
}

impl Operation {
    pub fn is_insertion(self) -> bool {
        self == Operation::Insert
    }

    pub fn is_update(self) -> bool {
        self == Operation::Update
    }

    pub fn is_deletion(self) -> bool {
        self == Operation::Delete
    }
}

/// Sparse Merkle Tree descriptor: a hasher plus the default value standing
/// in for every empty subtree.
///
/// The tree has `2^D` leaf positions addressed by the low `D` bits of the
/// key, consumed little-endian from the root. Occupied leaves hash to
/// `hash_leaf(false, key, value)`; empty leaves and empty subtrees are the
/// field zero and are never fed to the branch hasher.
///
/// The descriptor is immutable once constructed.
pub struct Smt<F: PrimeField, H: SmtHasher<F>, const D: usize> {
    hasher: H,
    default_value: F,
}

impl<F: PrimeField, H: SmtHasher<F>, const D: usize> Smt<F, H, D> {
    /// Create a descriptor around a hasher. The default value is the field
    /// zero, the canonical empty-subtree hash.
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            default_value: F::zero(),
        }
    }

    /// The hash standing in for every empty subtree.
    pub fn default_value(&self) -> F {
        self.default_value
    }

    /// Access the underlying hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// The proof of the empty tree. Its computed root is zero.
    pub fn empty_proof(&self) -> SmtProof<F, D> {
        SmtProof::new(true, F::zero(), F::zero(), [self.default_value; D])
    }

    /// Mark the levels at which a branch hash is actually computed.
    ///
    /// A level is active iff some sibling at the same depth or deeper is
    /// non-default: the resolved leaf hangs one level below the deepest
    /// non-default sibling, and no hashing happens past it. Active levels
    /// always form a prefix from the root; once a level is inactive every
    /// deeper level is inactive too.
    pub fn bitmap(&self, proof: &SmtProof<F, D>) -> [bool; D] {
        let mut levels = [false; D];
        let mut active = false;
        for i in (0..D).rev() {
            active = active || proof.siblings()[i] != self.default_value;
            levels[i] = active;
        }
        levels
    }

    /// Recompute the root implied by a proof.
    ///
    /// Folds the sibling array leaf-to-root: inactive levels pass the
    /// running hash through unchanged, active levels combine it with the
    /// sibling on the side selected by the key bit. Skipping inactive
    /// levels is what keeps empty subtrees at the constant zero;
    /// `hash_branch(0, 0)` is not zero in general.
    pub fn compute_root(&self, proof: &SmtProof<F, D>) -> F {
        let leaf = self
            .hasher
            .hash_leaf(proof.is_empty_leaf(), proof.key(), proof.value());
        let bits = key_to_bits::<F, D>(proof.key());
        let levels = self.bitmap(proof);

        foldr(
            &zip3(*proof.siblings(), bits, levels),
            leaf,
            |&(sibling, bit, active), acc| {
                if !active {
                    acc
                } else if bit {
                    // Path is the right child at this level.
                    self.hasher.hash_branch(sibling, acc)
                } else {
                    self.hasher.hash_branch(acc, sibling)
                }
            },
        )
    }

    /// Verify that `(proof.key, proof.value)` is in the tree with the given
    /// root.
    pub fn verify(&self, proof: &SmtProof<F, D>, root: F) -> bool {
        assert!(
            !proof.is_empty_leaf(),
            "inclusion proof must resolve to an occupied leaf"
        );
        self.compute_root(proof) == root
    }

    /// Verify that `excluded_key` is absent from the tree with the given
    /// root.
    ///
    /// Two witness shapes are accepted: the proof path ends in an empty
    /// leaf (direct exclusion), or it ends in an occupied leaf whose key
    /// differs from `excluded_key` (indirect exclusion). Either way the
    /// subtree on the excluded side at the first path divergence must be
    /// empty.
    pub fn verify_exclusion(&self, proof: &SmtProof<F, D>, excluded_key: F, root: F) -> bool {
        self.check_divergence(proof, excluded_key);
        self.compute_root(proof) == root
    }

    /// Walk both key paths from the root. At the first level where they
    /// part, the excluded key drops into the proof's sibling subtree, so
    /// that sibling must be the empty hash. An occupied leaf whose key
    /// equals the excluded key is a membership witness, not an exclusion.
    fn check_divergence(&self, proof: &SmtProof<F, D>, excluded_key: F) {
        let bits = key_to_bits::<F, D>(proof.key());
        let excluded_bits = key_to_bits::<F, D>(excluded_key);

        let mut diverged = false;
        for (i, &(bit, excluded_bit)) in zip(bits, excluded_bits).iter().enumerate() {
            if !diverged && bit != excluded_bit {
                assert!(
                    proof.siblings()[i] == self.default_value,
                    "subtree on the excluded side must be empty where the paths part"
                );
                diverged = true;
            }
        }
        assert!(
            diverged || proof.is_empty_leaf(),
            "occupied leaf under the excluded key witnesses inclusion, not exclusion"
        );
    }

    /// Validate an operation against the current root and derive the proof
    /// of the post-operation tree.
    ///
    /// - `Insert` takes an exclusion proof for `op_key`; the displaced leaf
    ///   (if any) becomes the sibling of the new one.
    /// - `Update` takes an inclusion proof for `op_key`; siblings are
    ///   untouched because the leaf keeps its position.
    /// - `Delete` takes an inclusion proof of a remaining leaf with the
    ///   deletion target sitting among its siblings, or, for the last
    ///   leaf, the inclusion proof of the target itself.
    ///
    /// The caller obtains the new root with [`Self::compute_root`] on the
    /// returned proof. Precondition violations are fatal.
    pub fn process(
        &self,
        proof: &SmtProof<F, D>,
        op: Operation,
        op_key: F,
        op_value: F,
        root: F,
    ) -> SmtProof<F, D> {
        match op {
            Operation::Insert => assert!(
                self.verify_exclusion(proof, op_key, root),
                "insertion requires an exclusion proof for the new key under the current root"
            ),
            Operation::Update => {
                assert!(
                    proof.key() == op_key,
                    "update proof must carry the updated key"
                );
                assert!(
                    self.verify(proof, root),
                    "update requires an inclusion proof under the current root"
                );
            }
            Operation::Delete => assert!(
                self.verify(proof, root),
                "deletion requires an inclusion proof under the current root"
            ),
        }

        if op.is_update() {
            // The leaf keeps its position; only the value changes.
            return SmtProof::new(false, op_key, op_value, *proof.siblings());
        }

        let bits = key_to_bits::<F, D>(proof.key());
        let op_bits = key_to_bits::<F, D>(op_key);
        let mut siblings = *proof.siblings();
        let mut diverged = false;

        for (i, &(bit, op_bit)) in zip(bits, op_bits).iter().enumerate() {
            if !diverged && bit != op_bit {
                diverged = true;
                match op {
                    Operation::Insert => {
                        // The displaced leaf becomes the sibling of the new
                        // one at the level where their paths part.
                        siblings[i] = self.hasher.hash_leaf(
                            proof.is_empty_leaf(),
                            proof.key(),
                            proof.value(),
                        );
                    }
                    Operation::Delete => {
                        assert!(
                            siblings[i] == self.hasher.hash_leaf(false, op_key, op_value),
                            "deletion target must sit as the sibling where the paths part"
                        );
                        siblings[i] = self.default_value;
                    }
                    Operation::Update => unreachable!("update never rewrites siblings"),
                }
            } else if diverged && op.is_insertion() {
                // The exclusion proof must resolve no deeper than the level
                // where the new leaf lands.
                assert!(
                    siblings[i] == self.default_value,
                    "insertion proof carries an occupied sibling below the divergence level"
                );
            }
        }

        match op {
            Operation::Insert => SmtProof::new(false, op_key, op_value, siblings),
            Operation::Delete if diverged => {
                SmtProof::new(false, proof.key(), proof.value(), siblings)
            }
            Operation::Delete => {
                // No differing bit: the proof is for the deletion target
                // itself, which must be the only leaf in the tree.
                assert!(
                    self.bitmap(proof).iter().all(|&active| !active),
                    "deleting the last leaf requires a singleton tree"
                );
                self.empty_proof()
            }
            Operation::Update => unreachable!("update returns early"),
        }
    }

    /// Insert `(key, value)` and return the new root.
    pub fn insert_and_compute_root(
        &self,
        proof: &SmtProof<F, D>,
        key: F,
        value: F,
        root: F,
    ) -> F {
        self.compute_root(&self.process(proof, Operation::Insert, key, value, root))
    }

    /// Replace the value at `key` and return the new root.
    pub fn update_and_compute_root(
        &self,
        proof: &SmtProof<F, D>,
        key: F,
        new_value: F,
        root: F,
    ) -> F {
        self.compute_root(&self.process(proof, Operation::Update, key, new_value, root))
    }

    /// Delete `(key, value)` and return the new root.
    pub fn delete_and_compute_root(
        &self,
        proof: &SmtProof<F, D>,
        key: F,
        value: F,
        root: F,
    ) -> F {
        self.compute_root(&self.process(proof, Operation::Delete, key, value, root))
    }

    /// Verify a deletion by replaying it as the inverse insertion.
    ///
    /// `proof` is an exclusion proof for `key` under `new_root`; inserting
    /// `(key, value)` back must restore `old_root`. This proves the
    /// deletion without access to the pre-image tree.
    pub fn verify_deletion(
        &self,
        proof: &SmtProof<F, D>,
        key: F,
        value: F,
        new_root: F,
        old_root: F,
    ) {
        assert!(
            self.insert_and_compute_root(proof, key, value, new_root) == old_root,
            "replaying the deletion as an insertion must restore the previous root"
        );
    }
}
