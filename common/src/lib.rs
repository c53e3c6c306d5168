//! Primitives shared by every bridge program: Merkle accounting, deterministic
//! address derivation, token metadata encoding and the in-process execution
//! host the programs run against.

pub mod create2;
pub mod merkle;
pub mod metadata;
pub mod solidity;
pub mod world;

use serde::{Deserialize, Serialize};

/// Identifier of a chain participating in the bridge.
pub type NetworkId = u32;

/// Network id reserved for the aggregating L1.
pub const MAINNET_NETWORK_ID: NetworkId = 0;

/// Kind of a deposit leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LeafType {
    Asset = 0,
    Message = 1,
}

impl LeafType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for LeafType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LeafType::Asset),
            1 => Ok(LeafType::Message),
            other => Err(other),
        }
    }
}
