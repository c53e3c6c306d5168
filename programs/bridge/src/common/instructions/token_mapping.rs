use alloy_primitives::{Address, U256};
use common::NetworkId;
use tracing::info;

use crate::{
    common::{
        events::{MigrateLegacyToken, RemoveLegacySovereignTokenAddress, SetSovereignTokenAddress},
        BridgeError, Context, Role, TokenInformation,
    },
    Bridge,
};

/// Points `(origin_network, origin_token)` at a token deployed outside the
/// bridge. The previous wrapped token keeps its reverse entry.
/// Only the bridge manager can call this function
pub fn set_sovereign_token_address_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
    origin_network: NetworkId,
    origin_token: Address,
    sovereign_token: Address,
    is_not_mintable: bool,
) -> Result<(), BridgeError> {
    bridge.roles.check(Role::BridgeManager, ctx.sender)?;
    set_sovereign_token_address(
        bridge,
        ctx,
        origin_network,
        origin_token,
        sovereign_token,
        is_not_mintable,
    )
}

/// Batch form of [`set_sovereign_token_address_handler`]. All-or-nothing.
pub fn set_multiple_sovereign_token_address_handler(
    bridge: &mut Bridge,
    mut ctx: Context<'_>,
    origin_networks: &[NetworkId],
    origin_tokens: &[Address],
    sovereign_tokens: &[Address],
    is_not_mintable: &[bool],
) -> Result<(), BridgeError> {
    bridge.roles.check(Role::BridgeManager, ctx.sender)?;

    let len = origin_networks.len();
    if origin_tokens.len() != len || sovereign_tokens.len() != len || is_not_mintable.len() != len
    {
        return Err(BridgeError::InputArraysLengthMismatch);
    }

    let mut staged = bridge.tokens.clone();
    for i in 0..len {
        check_remap(bridge, origin_networks[i], origin_tokens[i], sovereign_tokens[i])?;
        staged.remap(
            TokenInformation::new(origin_networks[i], origin_tokens[i]),
            sovereign_tokens[i],
            is_not_mintable[i],
        )?;
    }
    bridge.tokens = staged;

    for i in 0..len {
        emit_set_sovereign(
            bridge,
            &mut ctx,
            origin_networks[i],
            origin_tokens[i],
            sovereign_tokens[i],
            is_not_mintable[i],
        );
    }
    Ok(())
}

/// Drops the reverse entry of a sovereign token that has been replaced.
/// Only the bridge manager can call this function
pub fn remove_legacy_sovereign_token_address_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
    legacy_token: Address,
) -> Result<(), BridgeError> {
    bridge.roles.check(Role::BridgeManager, ctx.sender)?;
    bridge.tokens.remove_legacy(legacy_token)?;

    ctx.world.emit_event(
        bridge.address(),
        &RemoveLegacySovereignTokenAddress {
            sovereignTokenAddress: legacy_token,
        },
    );
    info!(%legacy_token, "legacy sovereign token removed");
    Ok(())
}

/// Swaps `amount` of the caller's legacy wrapped token for the token the
/// origin is currently mapped to. Supply moves one-for-one; if the payout
/// fails the legacy tokens are left untouched.
pub fn migrate_legacy_token_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
    legacy_token: Address,
    amount: U256,
) -> Result<(), BridgeError> {
    let (_, current_token) = bridge.tokens.current_for(legacy_token)?;
    if current_token == legacy_token {
        return Err(BridgeError::TokenAlreadyUpdated(legacy_token));
    }

    let holder = ctx.sender;
    ctx.world.atomically(|world| {
        bridge.bridge_wrapped_asset(world, legacy_token, holder, amount)?;
        bridge.claim_wrapped_asset(world, current_token, holder, amount)
    })?;

    ctx.world.emit_event(
        bridge.address(),
        &MigrateLegacyToken {
            sender: ctx.sender,
            legacyTokenAddress: legacy_token,
            updatedTokenAddress: current_token,
            amount,
        },
    );
    info!(
        holder = %ctx.sender,
        %legacy_token,
        %current_token,
        %amount,
        "legacy token migrated"
    );
    Ok(())
}

fn set_sovereign_token_address(
    bridge: &mut Bridge,
    mut ctx: Context<'_>,
    origin_network: NetworkId,
    origin_token: Address,
    sovereign_token: Address,
    is_not_mintable: bool,
) -> Result<(), BridgeError> {
    check_remap(bridge, origin_network, origin_token, sovereign_token)?;
    bridge.tokens.remap(
        TokenInformation::new(origin_network, origin_token),
        sovereign_token,
        is_not_mintable,
    )?;
    emit_set_sovereign(
        bridge,
        &mut ctx,
        origin_network,
        origin_token,
        sovereign_token,
        is_not_mintable,
    );
    Ok(())
}

fn check_remap(
    bridge: &Bridge,
    origin_network: NetworkId,
    origin_token: Address,
    sovereign_token: Address,
) -> Result<(), BridgeError> {
    if origin_network == bridge.network_id() {
        return Err(BridgeError::OriginNetworkInvalid(origin_network));
    }
    if origin_token.is_zero() || sovereign_token.is_zero() {
        return Err(BridgeError::InvalidZeroAddress);
    }
    Ok(())
}

fn emit_set_sovereign(
    bridge: &Bridge,
    ctx: &mut Context<'_>,
    origin_network: NetworkId,
    origin_token: Address,
    sovereign_token: Address,
    is_not_mintable: bool,
) {
    ctx.world.emit_event(
        bridge.address(),
        &SetSovereignTokenAddress {
            originNetwork: origin_network,
            originTokenAddress: origin_token,
            sovereignTokenAddress: sovereign_token,
            isNotMintable: is_not_mintable,
        },
    );
    info!(
        origin_network,
        %origin_token,
        %sovereign_token,
        is_not_mintable,
        "sovereign token mapped"
    );
}
