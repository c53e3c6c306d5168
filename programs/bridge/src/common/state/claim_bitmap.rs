use std::collections::BTreeMap;

use alloy_primitives::U256;
use common::NetworkId;

use crate::{common::BridgeError, constants::MAX_LEAFS_PER_NETWORK};

/// One bit per `(leaf_index, source_network)`, packed in 256-bit words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimBitmap {
    words: BTreeMap<u64, U256>,
}

impl ClaimBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, leaf_index: u32, source_network: NetworkId) -> bool {
        let (word, mask) = bitmap_position(leaf_index, source_network);
        let bits = self.words.get(&word).copied().unwrap_or_default();
        bits & mask == mask
    }

    /// Marks the leaf as claimed, failing if it already was.
    pub fn set_and_check_claimed(
        &mut self,
        leaf_index: u32,
        source_network: NetworkId,
    ) -> Result<(), BridgeError> {
        let (word, mask) = bitmap_position(leaf_index, source_network);
        let bits = self.words.entry(word).or_default();
        if *bits & mask == mask {
            return Err(BridgeError::AlreadyClaimed {
                leaf_index,
                source_network,
            });
        }
        *bits ^= mask;
        Ok(())
    }

    /// Clears a claimed leaf, failing if it was not claimed.
    pub fn unset_claimed(
        &mut self,
        leaf_index: u32,
        source_network: NetworkId,
    ) -> Result<(), BridgeError> {
        let (word, mask) = bitmap_position(leaf_index, source_network);
        let bits = self.words.get(&word).copied().unwrap_or_default();
        if bits & mask != mask {
            return Err(BridgeError::ClaimNotSet {
                leaf_index,
                source_network,
            });
        }

        let remaining = bits ^ mask;
        if remaining.is_zero() {
            self.words.remove(&word);
        } else {
            self.words.insert(word, remaining);
        }
        Ok(())
    }
}

/// Word key and bit mask of a leaf.
fn bitmap_position(leaf_index: u32, source_network: NetworkId) -> (u64, U256) {
    let global_index = u64::from(leaf_index) + u64::from(source_network) * MAX_LEAFS_PER_NETWORK;
    let word = global_index >> 8;
    let bit = (global_index & 0xff) as usize;
    (word, U256::from(1) << bit)
}
