use alloy_sol_types::SolCall;
use common::{solidity::IBridgeMessageReceiver, world::Call, LeafType};
use tracing::{info, warn};

use crate::{
    claim::ClaimArgs,
    common::{events::ClaimEvent, BridgeError, Context},
    Bridge,
};

/// Verifies a message deposit and delivers it with
/// `onMessageReceived(originAddress, originNetwork, metadata)`.
///
/// A reverting receiver fails the claim with [`BridgeError::MessageFailed`]
/// and leaves the leaf unclaimed, so the message can be retried.
pub fn claim_message_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
    args: ClaimArgs,
) -> Result<(), BridgeError> {
    let index = bridge.verify_leaf(ctx.global_exit_root, &args, LeafType::Message)?;
    let bridge_address = bridge.address();

    let input = IBridgeMessageReceiver::onMessageReceivedCall {
        originAddress: args.origin_address,
        originNetwork: args.origin_network,
        data: args.metadata.clone(),
    }
    .abi_encode();

    let mut call = Call {
        from: bridge_address,
        to: args.destination_address,
        value: args.amount,
        input: input.into(),
    };
    if let Some(weth) = bridge.weth_token {
        ctx.world
            .token_mint(weth, bridge_address, args.destination_address, args.amount)?;
        call.value = Default::default();
    }

    if let Err(revert) = ctx.world.call(&*bridge, call) {
        warn!(
            leaf_index = index.leaf_index,
            source_network = index.source_network,
            %revert,
            "message delivery failed"
        );
        if let Some(weth) = bridge.weth_token {
            ctx.world
                .token_burn(weth, bridge_address, args.destination_address, args.amount)?;
        }
        bridge
            .claims
            .unset_claimed(index.leaf_index, index.source_network)?;
        return Err(BridgeError::MessageFailed(revert));
    }

    ctx.world.emit_event(
        bridge_address,
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
        "message claimed"
    );
    Ok(())
}
