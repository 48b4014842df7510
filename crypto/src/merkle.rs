//! Merkle set commitments over member addresses.
//!
//! An onboarding batch commits to its approved address set as a single
//! Blake2b Merkle root. Each candidate later proves membership individually
//! with a sibling path, so the batch proposer never has to enumerate
//! addresses on-chain.
//!
//! Leaf and interior hashes use distinct domain prefixes to rule out
//! second-preimage tricks between levels. Odd nodes are promoted unchanged.

use crate::hash::blake2b_256_multi;
use serde::{Deserialize, Serialize};
use weft_types::{Digest32, MemberAddress};

const LEAF_PREFIX: &[u8] = &[0x00];
const NODE_PREFIX: &[u8] = &[0x01];

/// Which side a sibling hash sits on when recombining along a proof path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A compact commitment to a set of approved addresses.
///
/// Single-identity onboarding categories (verifier, governor candidate)
/// commit to exactly one address; everything else commits to a Merkle root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetCommitment {
    /// Exactly one approved address, decodable without a proof.
    Single(MemberAddress),
    /// A Merkle root over the approved address set.
    Tree(Digest32),
}

impl SetCommitment {
    /// The single committed address, if this is a single-identity commitment.
    pub fn as_single(&self) -> Option<&MemberAddress> {
        match self {
            Self::Single(addr) => Some(addr),
            Self::Tree(_) => None,
        }
    }

    /// Whether `address` is a member of this commitment, given `proof` for
    /// the tree case. Single commitments ignore the proof entirely.
    pub fn verify_membership(&self, address: &MemberAddress, proof: &MembershipProof) -> bool {
        match self {
            Self::Single(committed) => committed == address,
            Self::Tree(root) => proof.verify(address, root),
        }
    }
}

fn leaf_hash(address: &MemberAddress) -> Digest32 {
    Digest32::new(blake2b_256_multi(&[LEAF_PREFIX, address.as_str().as_bytes()]))
}

fn node_hash(left: &Digest32, right: &Digest32) -> Digest32 {
    Digest32::new(blake2b_256_multi(&[
        NODE_PREFIX,
        left.as_bytes(),
        right.as_bytes(),
    ]))
}

/// A Merkle tree over a set of member addresses.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    root: Digest32,
    /// All levels bottom-up; `levels[0]` is the leaf row.
    levels: Vec<Vec<Digest32>>,
    addresses: Vec<MemberAddress>,
}

impl MerkleTree {
    /// Build a tree over the given addresses.
    ///
    /// An empty set yields the zero root, which no proof can satisfy.
    pub fn new(addresses: &[MemberAddress]) -> Self {
        if addresses.is_empty() {
            return Self {
                root: Digest32::ZERO,
                levels: Vec::new(),
                addresses: Vec::new(),
            };
        }

        let leaves: Vec<Digest32> = addresses.iter().map(leaf_hash).collect();
        let mut levels = vec![leaves];

        while levels.last().expect("at least one level").len() > 1 {
            let current = levels.last().expect("at least one level");
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for chunk in current.chunks(2) {
                match chunk {
                    [left, right] => next.push(node_hash(left, right)),
                    // Odd node promotes unchanged.
                    [single] => next.push(*single),
                    _ => unreachable!("chunks(2) yields 1 or 2 items"),
                }
            }
            levels.push(next);
        }

        let root = levels.last().expect("at least one level")[0];
        Self {
            root,
            levels,
            addresses: addresses.to_vec(),
        }
    }

    /// The root digest committing to the whole set.
    pub fn root(&self) -> Digest32 {
        self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.addresses.len()
    }

    /// Generate a membership proof for the address at `index`.
    pub fn prove(&self, index: usize) -> Option<MembershipProof> {
        if index >= self.addresses.len() {
            return None;
        }

        let mut path = Vec::new();
        let mut idx = index;
        // Walk every level below the root, collecting the sibling (if any).
        for level in &self.levels[..self.levels.len().saturating_sub(1)] {
            let sibling_idx = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
            if sibling_idx < level.len() {
                let side = if idx % 2 == 0 { Side::Right } else { Side::Left };
                path.push((level[sibling_idx], side));
            }
            idx /= 2;
        }

        Some(MembershipProof { path })
    }

    /// Generate a proof for a specific address.
    pub fn prove_address(&self, address: &MemberAddress) -> Option<MembershipProof> {
        let index = self.addresses.iter().position(|a| a == address)?;
        self.prove(index)
    }
}

/// A sibling path proving one address belongs to a committed set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof {
    /// Sibling digests from leaf level upward, each tagged with its side.
    pub path: Vec<(Digest32, Side)>,
}

impl MembershipProof {
    /// An empty proof — valid only for a single-leaf tree.
    pub fn empty() -> Self {
        Self { path: Vec::new() }
    }

    /// Verify that `address` hashes up this path to `root`.
    pub fn verify(&self, address: &MemberAddress, root: &Digest32) -> bool {
        let mut acc = leaf_hash(address);
        for (sibling, side) in &self.path {
            acc = match side {
                Side::Left => node_hash(sibling, &acc),
                Side::Right => node_hash(&acc, sibling),
            };
        }
        acc == *root
    }
}
