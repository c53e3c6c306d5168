mod asset;
mod global_index;
mod message;
mod verify;

pub use asset::*;
pub use global_index::*;
pub use message::*;

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use common::{merkle::SmtProof, LeafType, NetworkId};
use serde::{Deserialize, Serialize};

use crate::deposit::DepositLeaf;

/// Everything a claimant supplies to prove and execute a deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimArgs {
    /// Proof of the leaf under its local exit root.
    pub smt_proof_local_exit_root: SmtProof,
    /// Proof of the local exit root under the rollup exit root; unused for
    /// mainnet deposits.
    pub smt_proof_rollup_exit_root: SmtProof,
    pub global_index: U256,
    pub mainnet_exit_root: B256,
    pub rollup_exit_root: B256,
    pub origin_network: NetworkId,
    pub origin_address: Address,
    pub destination_network: NetworkId,
    pub destination_address: Address,
    pub amount: U256,
    pub metadata: Bytes,
}

impl ClaimArgs {
    pub fn leaf(&self, leaf_type: LeafType) -> DepositLeaf {
        DepositLeaf {
            leaf_type,
            origin_network: self.origin_network,
            origin_address: self.origin_address,
            destination_network: self.destination_network,
            destination_address: self.destination_address,
            amount: self.amount,
            metadata_hash: keccak256(&self.metadata),
        }
    }
}
