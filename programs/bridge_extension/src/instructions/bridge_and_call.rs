use alloy_primitives::{Address, Bytes, U256};
use bridge::{Bridge, BridgeError, Context};
use common::{NetworkId, MAINNET_NETWORK_ID};
use tracing::info;

use crate::{BridgeExtension, DependencyDescriptor, ExtensionError, JumpPoint};

/// Deposits made by one bridge-and-call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeAndCallDeposit {
    /// Leaf index of the asset deposit, named by the message as its dependency.
    pub depends_on_index: u32,
    /// Leaf index of the message deposit.
    pub message_index: u32,
    /// Where the asset is claimed to on the destination network.
    pub jump_point: Address,
}

#[allow(clippy::too_many_arguments)]
pub fn bridge_and_call_handler(
    extension: &BridgeExtension,
    bridge: &mut Bridge,
    mut ctx: Context<'_>,
    token: Address,
    amount: U256,
    destination_network: NetworkId,
    call_address: Address,
    fallback_address: Address,
    call_data: Bytes,
    force_update_global_exit_root: bool,
) -> Result<BridgeAndCallDeposit, ExtensionError> {
    if call_address.is_zero() || fallback_address.is_zero() {
        return Err(ExtensionError::InvalidAddress);
    }
    if destination_network == bridge.network_id() {
        return Err(ExtensionError::InvalidDestinationNetwork);
    }

    let this = extension.address();
    let (asset_original_network, asset_original_address) = if token.is_zero() {
        if ctx.value != amount {
            return Err(ExtensionError::AmountDoesNotMatchMsgValue);
        }
        ctx.collect_value(this)?;
        (
            bridge.config().gas_token_network,
            bridge.config().gas_token_address,
        )
    } else {
        if !ctx.value.is_zero() {
            return Err(BridgeError::MsgValueNotZero.into());
        }
        ctx.world
            .token_transfer_from(token, this, ctx.sender, this, amount)?;

        if bridge.weth_token() == Some(token) {
            (MAINNET_NETWORK_ID, Address::ZERO)
        } else {
            // Local tokens and non-mintable wrapped tokens are pulled by the bridge.
            ctx.world
                .token_approve(token, this, bridge.address(), amount)?;
            match bridge.wrapped_token_to_token_info(token) {
                Some(info) => (info.origin_network, info.origin_token_address),
                None => (bridge.network_id(), token),
            }
        }
    };

    let depends_on_index = bridge.deposit_count();
    let descriptor = DependencyDescriptor {
        depends_on_index,
        call_address,
        fallback_address,
        asset_original_network,
        asset_original_address,
        call_data,
    };
    let jump_point = JumpPoint::new(bridge.address(), &descriptor).address(
        this,
        depends_on_index,
        bridge.network_id(),
    );

    let asset_value = if token.is_zero() { amount } else { U256::ZERO };
    let asset_index = bridge.bridge_asset(
        ctx.reborrow(this, asset_value),
        destination_network,
        jump_point,
        amount,
        token,
        false,
        &[],
    )?;
    if asset_index != depends_on_index {
        return Err(ExtensionError::DepositOrderMismatch {
            expected: depends_on_index,
            actual: asset_index,
        });
    }

    // Gas token chains only bridge messages through WETH; an empty WETH
    // message carries nothing either way.
    let message_ctx = ctx.reborrow(this, U256::ZERO);
    let metadata = descriptor.abi_encode();
    let message_index = if bridge.weth_token().is_some() {
        bridge.bridge_message_weth(
            message_ctx,
            destination_network,
            this,
            U256::ZERO,
            force_update_global_exit_root,
            metadata,
        )?
    } else {
        bridge.bridge_message(
            message_ctx,
            destination_network,
            this,
            force_update_global_exit_root,
            metadata,
        )?
    };

    info!(
        depends_on_index,
        message_index,
        %jump_point,
        destination_network,
        "bridge and call"
    );
    Ok(BridgeAndCallDeposit {
        depends_on_index,
        message_index,
        jump_point,
    })
}
