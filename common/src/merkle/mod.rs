//! Fixed-depth keccak Merkle trees used for exit accounting.
//!
//! Nodes are `keccak256(left ‖ right)` (ordered, not commutative) and empty
//! subtrees hash to the zero-hash ladder `Z[0] = 0`, `Z[i + 1] = H(Z[i], Z[i])`.

mod exit_tree;
mod sparse;

pub use exit_tree::*;
pub use sparse::*;

use alloy_primitives::{keccak256, B256};
use thiserror::Error;

/// Depth of every exit tree (local exit trees and the rollup exit tree).
pub const TREE_DEPTH: usize = 32;

/// Sibling path from a leaf to the root, bottom-up.
pub type SmtProof = [B256; TREE_DEPTH];

/// Hashes two sibling nodes.
pub fn hash_pair(left: &B256, right: &B256) -> B256 {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(left.as_slice());
    data[32..].copy_from_slice(right.as_slice());
    keccak256(data)
}

/// Root of an empty subtree at every height, `zero_hashes()[0]` being the
/// empty leaf.
pub fn zero_hashes() -> [B256; TREE_DEPTH + 1] {
    let mut zeros = [B256::ZERO; TREE_DEPTH + 1];
    for height in 0..TREE_DEPTH {
        zeros[height + 1] = hash_pair(&zeros[height], &zeros[height]);
    }
    zeros
}

/// Folds `leaf` up `proof` at position `index` and returns the resulting root.
pub fn calculate_root(leaf: &B256, proof: &SmtProof, index: u32) -> B256 {
    let mut node = *leaf;
    for (height, sibling) in proof.iter().enumerate() {
        node = if (index >> height) & 1 == 1 {
            hash_pair(sibling, &node)
        } else {
            hash_pair(&node, sibling)
        };
    }
    node
}

/// Checks that `leaf` sits at `index` under `root`.
pub fn verify_merkle_proof(leaf: &B256, proof: &SmtProof, index: u32, root: &B256) -> bool {
    calculate_root(leaf, proof, index) == *root
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MerkleError {
    #[error("Merkle tree is full")]
    MerkleTreeFull,
}
