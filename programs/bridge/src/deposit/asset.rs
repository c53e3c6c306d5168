use alloy_primitives::{keccak256, Address, Bytes, U256};
use common::{LeafType, NetworkId, MAINNET_NETWORK_ID};
use tracing::debug;

use crate::{
    common::{BridgeError, Context},
    deposit::{apply_permit, DepositLeaf},
    Bridge,
};

/// Bridges `amount` of `token` (zero for the native gas token) to
/// `destination_address` on `destination_network`. Returns the leaf index of
/// the deposit.
#[allow(clippy::too_many_arguments)]
pub fn bridge_asset_handler(
    bridge: &mut Bridge,
    mut ctx: Context<'_>,
    destination_network: NetworkId,
    destination_address: Address,
    amount: U256,
    token: Address,
    force_update_global_exit_root: bool,
    permit_data: &[u8],
) -> Result<u32, BridgeError> {
    bridge.check_not_emergency_state()?;
    bridge.check_destination_network(destination_network)?;

    let bridge_address = bridge.address();
    let (origin_network, origin_address, leaf_amount, metadata) = if token.is_zero() {
        if ctx.value != amount {
            return Err(BridgeError::AmountDoesNotMatchMsgValue);
        }
        ctx.collect_value(bridge_address)?;
        (
            bridge.config.gas_token_network,
            bridge.config.gas_token_address,
            amount,
            bridge.config.gas_token_metadata.clone(),
        )
    } else {
        if !ctx.value.is_zero() {
            return Err(BridgeError::MsgValueNotZero);
        }

        if bridge.weth_token == Some(token) {
            ctx.world
                .token_burn(token, bridge_address, ctx.sender, amount)?;
            (MAINNET_NETWORK_ID, Address::ZERO, amount, Bytes::new())
        } else if let Some(info) = bridge.tokens.token_info(token).copied() {
            bridge.bridge_wrapped_asset(ctx.world, token, ctx.sender, amount)?;
            (
                info.origin_network,
                info.origin_token_address,
                amount,
                ctx.world.token_metadata(token)?.abi_encode(),
            )
        } else {
            if !permit_data.is_empty() {
                apply_permit(
                    ctx.world,
                    token,
                    ctx.sender,
                    bridge_address,
                    amount,
                    permit_data,
                )?;
            }

            let balance_before = ctx.world.token_balance(token, bridge_address);
            ctx.world
                .token_transfer_from(token, bridge_address, ctx.sender, bridge_address, amount)?;
            let balance_after = ctx.world.token_balance(token, bridge_address);
            debug!(%token, locked = %(balance_after - balance_before), "token locked");

            (
                bridge.network_id(),
                token,
                balance_after - balance_before,
                ctx.world.token_metadata(token)?.abi_encode(),
            )
        }
    };

    let leaf = DepositLeaf {
        leaf_type: LeafType::Asset,
        origin_network,
        origin_address,
        destination_network,
        destination_address,
        amount: leaf_amount,
        metadata_hash: keccak256(&metadata),
    };
    bridge.add_leaf(&mut ctx, leaf, metadata, force_update_global_exit_root)
}
