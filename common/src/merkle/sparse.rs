use std::collections::BTreeMap;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use super::{hash_pair, zero_hashes, SmtProof, TREE_DEPTH};

/// Depth-32 tree holding leaves by index, absent leaves being zero.
///
/// Produces the same roots as [`super::ExitTree`] for the same leaves, and in
/// addition the sibling proofs relayers hand to claimers. Also backs the
/// rollup exit tree, whose leaves are keyed by network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseMerkleTree {
    leaves: BTreeMap<u32, B256>,
}

impl SparseMerkleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree whose leaf `i` is `leaves[i]`.
    pub fn from_leaves(leaves: impl IntoIterator<Item = B256>) -> Self {
        let mut tree = Self::new();
        for (index, leaf) in leaves.into_iter().enumerate() {
            tree.set(index as u32, leaf);
        }
        tree
    }

    pub fn set(&mut self, index: u32, leaf: B256) {
        if leaf == B256::ZERO {
            self.leaves.remove(&index);
        } else {
            self.leaves.insert(index, leaf);
        }
    }

    pub fn get(&self, index: u32) -> B256 {
        self.leaves.get(&index).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn root(&self) -> B256 {
        let zeros = zero_hashes();
        let top = self.levels().pop().unwrap_or_default();
        top.get(&0).copied().unwrap_or(zeros[TREE_DEPTH])
    }

    /// Sibling path for the leaf at `index`.
    pub fn proof(&self, index: u32) -> SmtProof {
        let zeros = zero_hashes();
        let levels = self.levels();

        let mut proof = [B256::ZERO; TREE_DEPTH];
        let mut position = index as u64;
        for (height, sibling) in proof.iter_mut().enumerate() {
            *sibling = levels[height]
                .get(&(position ^ 1))
                .copied()
                .unwrap_or(zeros[height]);
            position >>= 1;
        }
        proof
    }

    // Non-empty nodes of every level, leaves first and the root level last.
    fn levels(&self) -> Vec<BTreeMap<u64, B256>> {
        let zeros = zero_hashes();

        let mut levels = Vec::with_capacity(TREE_DEPTH + 1);
        let mut current: BTreeMap<u64, B256> = self
            .leaves
            .iter()
            .map(|(index, leaf)| (*index as u64, *leaf))
            .collect();

        for height in 0..TREE_DEPTH {
            let mut parents = BTreeMap::new();
            for position in current.keys() {
                let parent = position >> 1;
                if parents.contains_key(&parent) {
                    continue;
                }
                let left = current
                    .get(&(parent << 1))
                    .copied()
                    .unwrap_or(zeros[height]);
                let right = current
                    .get(&((parent << 1) | 1))
                    .copied()
                    .unwrap_or(zeros[height]);
                parents.insert(parent, hash_pair(&left, &right));
            }
            levels.push(current);
            current = parents;
        }
        levels.push(current);
        levels
    }
}
