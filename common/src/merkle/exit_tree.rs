use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use super::{hash_pair, zero_hashes, MerkleError, TREE_DEPTH};

/// Largest number of leaves an exit tree accepts.
pub const MAX_DEPOSIT_COUNT: u32 = u32::MAX;

/// Append-only incremental Merkle accumulator.
///
/// Only the left frontier (`branch`) is stored: `branch[h]` holds the root of
/// the last complete left subtree at height `h`, which is all that is needed
/// to recompute the root after each append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitTree {
    branch: [B256; TREE_DEPTH],
    deposit_count: u32,
}

impl Default for ExitTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitTree {
    pub fn new() -> Self {
        Self {
            branch: [B256::ZERO; TREE_DEPTH],
            deposit_count: 0,
        }
    }

    /// Number of leaves appended so far, which is also the index the next
    /// leaf will receive.
    pub fn deposit_count(&self) -> u32 {
        self.deposit_count
    }

    /// Appends `leaf` and returns its index together with the new root.
    pub fn append_leaf(&mut self, leaf: B256) -> Result<(u32, B256), MerkleError> {
        if self.deposit_count >= MAX_DEPOSIT_COUNT {
            return Err(MerkleError::MerkleTreeFull);
        }

        let leaf_index = self.deposit_count;
        self.deposit_count += 1;

        let size = self.deposit_count as u64;
        let mut node = leaf;
        for height in 0..TREE_DEPTH {
            if (size >> height) & 1 == 1 {
                self.branch[height] = node;
                break;
            }
            node = hash_pair(&self.branch[height], &node);
        }

        Ok((leaf_index, self.root()))
    }

    /// Current root of the tree.
    pub fn root(&self) -> B256 {
        let zeros = zero_hashes();
        let size = self.deposit_count as u64;

        let mut node = B256::ZERO;
        for height in 0..TREE_DEPTH {
            node = if (size >> height) & 1 == 1 {
                hash_pair(&self.branch[height], &node)
            } else {
                hash_pair(&node, &zeros[height])
            };
        }
        node
    }
}
