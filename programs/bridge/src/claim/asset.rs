use alloy_primitives::{Address, Bytes, U256};
use common::{metadata::TokenMetadata, world::Call, LeafType};
use tracing::info;

use crate::{
    claim::ClaimArgs,
    common::{
        deploy_wrapped_token,
        events::{ClaimEvent, NewWrappedToken},
        BridgeError, Context, TokenInformation,
    },
    Bridge,
};

/// Verifies an asset deposit and pays it out on this network.
pub fn claim_asset_handler(
    bridge: &mut Bridge,
    mut ctx: Context<'_>,
    args: ClaimArgs,
) -> Result<(), BridgeError> {
    let index = bridge.verify_leaf(ctx.global_exit_root, &args, LeafType::Asset)?;

    let paid = pay_out(bridge, &mut ctx, &args);
    if paid.is_err() {
        bridge
            .claims
            .unset_claimed(index.leaf_index, index.source_network)?;
    }
    paid?;

    ctx.world.emit_event(
        bridge.address(),
        &ClaimEvent {
            globalIndex: args.global_index,
            originNetwork: args.origin_network,
            originAddress: args.origin_address,
            destinationAddress: args.destination_address,
            amount: args.amount,
        },
    );
    info!(
        leaf_index = index.leaf_index,
        source_network = index.source_network,
        destination = %args.destination_address,
        amount = %args.amount,
        "asset claimed"
    );
    Ok(())
}

fn pay_out(bridge: &mut Bridge, ctx: &mut Context<'_>, args: &ClaimArgs) -> Result<(), BridgeError> {
    let bridge_address = bridge.address();
    let config = &bridge.config;

    let is_ether = args.origin_address.is_zero();
    let is_gas_token = !config.gas_token_address.is_zero()
        && args.origin_address == config.gas_token_address
        && args.origin_network == config.gas_token_network;

    if is_ether {
        if let Some(weth) = bridge.weth_token {
            ctx.world
                .token_mint(weth, bridge_address, args.destination_address, args.amount)?;
            return Ok(());
        }
    }
    if is_ether || is_gas_token {
        return send_native(bridge, ctx, args.destination_address, args.amount);
    }

    if args.origin_network == bridge.network_id() {
        ctx.world.token_transfer(
            args.origin_address,
            bridge_address,
            args.destination_address,
            args.amount,
        )?;
        return Ok(());
    }

    let info = TokenInformation::new(args.origin_network, args.origin_address);
    let wrapped = match bridge.tokens.wrapped_address(&info) {
        Some(wrapped) => wrapped,
        None => deploy_for_claim(bridge, ctx, info, &args.metadata)?,
    };
    bridge.claim_wrapped_asset(ctx.world, wrapped, args.destination_address, args.amount)
}

fn send_native(
    bridge: &Bridge,
    ctx: &mut Context<'_>,
    to: Address,
    amount: U256,
) -> Result<(), BridgeError> {
    ctx.world
        .call(
            bridge,
            Call {
                from: bridge.address(),
                to,
                value: amount,
                input: Bytes::new(),
            },
        )
        .map_err(BridgeError::EtherTransferFailed)?;
    Ok(())
}

/// Deploys the wrapped token of `info` on its first claim.
fn deploy_for_claim(
    bridge: &mut Bridge,
    ctx: &mut Context<'_>,
    info: TokenInformation,
    metadata: &Bytes,
) -> Result<Address, BridgeError> {
    let token_metadata = TokenMetadata::abi_decode(metadata)?;
    let wrapped = deploy_wrapped_token(ctx.world, bridge.address(), info.hash(), token_metadata)?;
    bridge.tokens.register(info, wrapped);

    ctx.world.emit_event(
        bridge.address(),
        &NewWrappedToken {
            originNetwork: info.origin_network,
            originTokenAddress: info.origin_token_address,
            wrappedTokenAddress: wrapped,
            metadata: metadata.clone(),
        },
    );
    info!(
        origin_network = info.origin_network,
        origin_token = %info.origin_token_address,
        %wrapped,
        "wrapped token created"
    );
    Ok(wrapped)
}
