use alloy_primitives::U256;
use common::{NetworkId, MAINNET_NETWORK_ID};

use crate::{common::BridgeError, constants::GLOBAL_INDEX_MAINNET_FLAG};

/// Position of a deposit across every network, as encoded in claims.
///
/// Mainnet deposits are `2^64 | leaf_index`. Rollup deposits are
/// `rollup_index << 32 | leaf_index`, the rollup index being the network id
/// minus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlobalIndex {
    pub leaf_index: u32,
    pub source_network: NetworkId,
}

impl GlobalIndex {
    pub fn new(leaf_index: u32, source_network: NetworkId) -> Self {
        Self {
            leaf_index,
            source_network,
        }
    }

    pub fn mainnet(leaf_index: u32) -> Self {
        Self::new(leaf_index, MAINNET_NETWORK_ID)
    }

    /// `None` when `rollup_index` has no network id, i.e. `u32::MAX`.
    pub fn rollup(rollup_index: u32, leaf_index: u32) -> Option<Self> {
        Some(Self::new(leaf_index, rollup_index.checked_add(1)?))
    }

    /// Leaf position of the source network in the rollup exit tree.
    pub fn rollup_index(&self) -> Option<u32> {
        self.source_network.checked_sub(1)
    }

    pub fn is_mainnet(&self) -> bool {
        self.source_network == MAINNET_NETWORK_ID
    }

    pub fn encode(&self) -> U256 {
        let leaf = U256::from(self.leaf_index);
        match self.rollup_index() {
            None => GLOBAL_INDEX_MAINNET_FLAG | leaf,
            Some(rollup_index) => (U256::from(rollup_index) << 32) | leaf,
        }
    }

    /// Rejects every encoding [`GlobalIndex::encode`] cannot produce.
    pub fn decode(global_index: U256) -> Result<Self, BridgeError> {
        let low = global_index.as_limbs()[0];
        let leaf_index = low as u32;

        let decoded = if (global_index & GLOBAL_INDEX_MAINNET_FLAG).is_zero() {
            let rollup_index = (low >> 32) as u32;
            let source_network = rollup_index
                .checked_add(1)
                .ok_or(BridgeError::InvalidGlobalIndex(global_index))?;
            Self::new(leaf_index, source_network)
        } else {
            Self::mainnet(leaf_index)
        };

        if decoded.encode() != global_index {
            return Err(BridgeError::InvalidGlobalIndex(global_index));
        }
        Ok(decoded)
    }
}
