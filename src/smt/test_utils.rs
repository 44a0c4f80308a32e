//! In-memory reference tree used to cross-check the proof algebra.
//!
//! Materialises the compressed-leaf placement the proofs describe: a leaf
//! is pushed down only as far as needed to distinguish it from its closest
//! neighbour, and empty subtrees hash to the default value. Tree
//! materialisation is not part of the library surface, so this type only
//! exists for tests.

use ark_ff::PrimeField;

use crate::bits::key_to_bits;
use crate::hasher::SmtHasher;

use super::engine::Smt;
use super::proof::SmtProof;

enum Node<F: PrimeField> {
    Empty,
    Leaf { key: F, value: F },
    Branch { left: Box<Node<F>>, right: Box<Node<F>> },
}

pub struct RefTree<F: PrimeField, const D: usize> {
    root: Node<F>,
}

impl<F: PrimeField, const D: usize> RefTree<F, D> {
    pub fn new() -> Self {
        Self { root: Node::Empty }
    }

    pub fn from_entries(entries: &[(F, F)]) -> Self {
        let mut tree = Self::new();
        for &(key, value) in entries {
            tree.insert(key, value);
        }
        tree
    }

    pub fn insert(&mut self, key: F, value: F) {
        let root = std::mem::replace(&mut self.root, Node::Empty);
        self.root = self.insert_at(root, key, value, 0);
    }

    fn insert_at(&self, node: Node<F>, key: F, value: F, depth: usize) -> Node<F> {
        match node {
            Node::Empty => Node::Leaf { key, value },
            Node::Leaf { key: existing, .. } if existing == key => Node::Leaf { key, value },
            Node::Leaf {
                key: existing,
                value: existing_value,
            } => self.split((existing, existing_value), (key, value), depth),
            Node::Branch { left, right } => {
                let bits = key_to_bits::<F, D>(key);
                if bits[depth] {
                    Node::Branch {
                        left,
                        right: Box::new(self.insert_at(*right, key, value, depth + 1)),
                    }
                } else {
                    Node::Branch {
                        left: Box::new(self.insert_at(*left, key, value, depth + 1)),
                        right,
                    }
                }
            }
        }
    }

    /// Push two leaves down single-child branches until their paths part.
    fn split(&self, existing: (F, F), incoming: (F, F), depth: usize) -> Node<F> {
        assert!(depth < D, "keys must differ within the tree depth");
        let existing_bits = key_to_bits::<F, D>(existing.0);
        let incoming_bits = key_to_bits::<F, D>(incoming.0);

        if existing_bits[depth] == incoming_bits[depth] {
            let child = Box::new(self.split(existing, incoming, depth + 1));
            let empty = Box::new(Node::Empty);
            if incoming_bits[depth] {
                Node::Branch {
                    left: empty,
                    right: child,
                }
            } else {
                Node::Branch {
                    left: child,
                    right: empty,
                }
            }
        } else {
            let old = Box::new(Node::Leaf {
                key: existing.0,
                value: existing.1,
            });
            let new = Box::new(Node::Leaf {
                key: incoming.0,
                value: incoming.1,
            });
            if incoming_bits[depth] {
                Node::Branch {
                    left: old,
                    right: new,
                }
            } else {
                Node::Branch {
                    left: new,
                    right: old,
                }
            }
        }
    }

    pub fn root_hash<H: SmtHasher<F>>(&self, smt: &Smt<F, H, D>) -> F {
        Self::node_hash(&self.root, smt)
    }

    fn node_hash<H: SmtHasher<F>>(node: &Node<F>, smt: &Smt<F, H, D>) -> F {
        match node {
            Node::Empty => smt.default_value(),
            Node::Leaf { key, value } => smt.hasher().hash_leaf(false, *key, *value),
            Node::Branch { left, right } => smt
                .hasher()
                .hash_branch(Self::node_hash(left, smt), Self::node_hash(right, smt)),
        }
    }

    /// Proof for `key`: inclusion when present, exclusion (direct or
    /// indirect) when absent.
    pub fn proof<H: SmtHasher<F>>(&self, key: F, smt: &Smt<F, H, D>) -> SmtProof<F, D> {
        let bits = key_to_bits::<F, D>(key);
        let mut siblings = [smt.default_value(); D];
        let mut node = &self.root;
        let mut depth = 0;

        loop {
            match node {
                Node::Empty => return SmtProof::new(true, key, F::zero(), siblings),
                Node::Leaf {
                    key: leaf_key,
                    value,
                } => return SmtProof::new(false, *leaf_key, *value, siblings),
                Node::Branch { left, right } => {
                    let (child, sibling) = if bits[depth] {
                        (right, left)
                    } else {
                        (left, right)
                    };
                    siblings[depth] = Self::node_hash(sibling, smt);
                    node = child;
                    depth += 1;
                }
            }
        }
    }

    /// Inclusion proof of a leaf adjacent to `key`, the witness shape
    /// `Operation::Delete` consumes. For a singleton tree this is the
    /// target's own proof.
    pub fn deletion_witness<H: SmtHasher<F>>(&self, key: F, smt: &Smt<F, H, D>) -> SmtProof<F, D> {
        let bits = key_to_bits::<F, D>(key);
        let mut node = &self.root;
        let mut depth = 0;
        let mut adjacent: Option<&Node<F>> = None;

        loop {
            match node {
                Node::Leaf { key: leaf_key, .. } if *leaf_key == key => break,
                Node::Branch { left, right } => {
                    let (child, sibling) = if bits[depth] {
                        (right, left)
                    } else {
                        (left, right)
                    };
                    adjacent = Some(sibling);
                    node = child;
                    depth += 1;
                }
                _ => panic!("deletion target is not in the tree"),
            }
        }

        match adjacent {
            None => self.proof(key, smt),
            Some(subtree) => {
                let witness_key =
                    Self::any_leaf_key(subtree).expect("occupied leaf always has an occupied neighbour in an insert-built tree");
                self.proof(witness_key, smt)
            }
        }
    }

    fn any_leaf_key(node: &Node<F>) -> Option<F> {
        match node {
            Node::Empty => None,
            Node::Leaf { key, .. } => Some(*key),
            Node::Branch { left, right } => {
                Self::any_leaf_key(left).or_else(|| Self::any_leaf_key(right))
            }
        }
    }
}
