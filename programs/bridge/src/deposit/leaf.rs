use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use common::{LeafType, NetworkId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    common::{events::BridgeEvent, BridgeError, Context},
    Bridge,
};

/// Canonical fields of a deposit, hashed into the local exit tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositLeaf {
    pub leaf_type: LeafType,
    pub origin_network: NetworkId,
    pub origin_address: Address,
    pub destination_network: NetworkId,
    pub destination_address: Address,
    pub amount: U256,
    pub metadata_hash: B256,
}

impl DepositLeaf {
    /// `keccak256(abi.encodePacked(uint8, uint32, address, uint32, address,
    /// uint256, bytes32))` over the leaf fields, in declaration order.
    pub fn hash(&self) -> B256 {
        let mut packed = Vec::with_capacity(113);
        packed.push(self.leaf_type.as_u8());
        packed.extend_from_slice(&self.origin_network.to_be_bytes());
        packed.extend_from_slice(self.origin_address.as_slice());
        packed.extend_from_slice(&self.destination_network.to_be_bytes());
        packed.extend_from_slice(self.destination_address.as_slice());
        packed.extend_from_slice(&self.amount.to_be_bytes::<32>());
        packed.extend_from_slice(self.metadata_hash.as_slice());
        keccak256(packed)
    }

    /// Rebuilds the leaf announced by a [`BridgeEvent`]. Returns `None` for an
    /// unknown leaf type.
    pub fn from_event(event: &BridgeEvent) -> Option<Self> {
        Some(Self {
            leaf_type: LeafType::try_from(event.leafType).ok()?,
            origin_network: event.originNetwork,
            origin_address: event.originAddress,
            destination_network: event.destinationNetwork,
            destination_address: event.destinationAddress,
            amount: event.amount,
            metadata_hash: keccak256(&event.metadata),
        })
    }
}

impl Bridge {
    /// Emits the deposit event, appends the leaf and optionally pushes the
    /// new local exit root. Returns the leaf index.
    pub(crate) fn add_leaf(
        &mut self,
        ctx: &mut Context<'_>,
        leaf: DepositLeaf,
        metadata: Bytes,
        force_update_global_exit_root: bool,
    ) -> Result<u32, BridgeError> {
        let deposit_count = self.exit_tree.deposit_count();
        ctx.world.emit_event(
            self.address(),
            &BridgeEvent {
                leafType: leaf.leaf_type.as_u8(),
                originNetwork: leaf.origin_network,
                originAddress: leaf.origin_address,
                destinationNetwork: leaf.destination_network,
                destinationAddress: leaf.destination_address,
                amount: leaf.amount,
                metadata,
                depositCount: deposit_count,
            },
        );

        let (leaf_index, root) = self.exit_tree.append_leaf(leaf.hash())?;
        info!(
            leaf_index,
            leaf_type = ?leaf.leaf_type,
            destination_network = leaf.destination_network,
            amount = %leaf.amount,
            %root,
            "deposit appended"
        );

        if force_update_global_exit_root {
            self.push_local_exit_root(ctx)?;
        }
        Ok(leaf_index)
    }

    /// Pushes the current local exit root to the global exit root manager.
    pub(crate) fn push_local_exit_root(
        &self,
        ctx: &mut Context<'_>,
    ) -> Result<(), BridgeError> {
        ctx.global_exit_root
            .update_exit_root(ctx.world, self.address(), self.exit_tree.root())?;
        Ok(())
    }
}
