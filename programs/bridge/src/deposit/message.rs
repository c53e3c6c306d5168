use alloy_primitives::{keccak256, Address, Bytes, U256};
use common::{LeafType, NetworkId};

use crate::{
    common::{BridgeError, Context},
    deposit::DepositLeaf,
    Bridge,
};

/// Bridges a message, and the attached ether, to `destination_address`.
/// Returns the leaf index of the deposit.
pub fn bridge_message_handler(
    bridge: &mut Bridge,
    mut ctx: Context<'_>,
    destination_network: NetworkId,
    destination_address: Address,
    force_update_global_exit_root: bool,
    metadata: Bytes,
) -> Result<u32, BridgeError> {
    bridge.check_not_emergency_state()?;
    if bridge.weth_token.is_some() {
        return Err(BridgeError::NativeTokenIsEther);
    }
    bridge.check_destination_network(destination_network)?;

    ctx.collect_value(bridge.address())?;
    let amount = ctx.value;
    bridge_message_internal(
        bridge,
        ctx,
        destination_network,
        destination_address,
        amount,
        force_update_global_exit_root,
        metadata,
    )
}

/// Bridges a message carrying `amount_weth` of WETH, on chains whose gas
/// token is not ether.
pub fn bridge_message_weth_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
    destination_network: NetworkId,
    destination_address: Address,
    amount_weth: U256,
    force_update_global_exit_root: bool,
    metadata: Bytes,
) -> Result<u32, BridgeError> {
    bridge.check_not_emergency_state()?;
    let Some(weth) = bridge.weth_token else {
        return Err(BridgeError::NativeTokenIsNotEther);
    };
    bridge.check_destination_network(destination_network)?;

    ctx.world
        .token_burn(weth, bridge.address(), ctx.sender, amount_weth)?;
    bridge_message_internal(
        bridge,
        ctx,
        destination_network,
        destination_address,
        amount_weth,
        force_update_global_exit_root,
        metadata,
    )
}

fn bridge_message_internal(
    bridge: &mut Bridge,
    mut ctx: Context<'_>,
    destination_network: NetworkId,
    destination_address: Address,
    amount: U256,
    force_update_global_exit_root: bool,
    metadata: Bytes,
) -> Result<u32, BridgeError> {
    let leaf = DepositLeaf {
        leaf_type: LeafType::Message,
        origin_network: bridge.network_id(),
        origin_address: ctx.sender,
        destination_network,
        destination_address,
        amount,
        metadata_hash: keccak256(&metadata),
    };
    bridge.add_leaf(&mut ctx, leaf, metadata, force_update_global_exit_root)
}
