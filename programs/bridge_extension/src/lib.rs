//! Bridge-and-call: one user action that bridges an asset and a call to run
//! with it on the destination network.
//!
//! The extension deposits the asset to a JumpPoint address derived from the
//! call, then a message addressed to its own counterpart on the destination.
//! Claiming that message deploys the JumpPoint, which runs the call once the
//! asset deposit has been claimed.

pub mod constants;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod instructions;
pub mod jump_point;

#[cfg(test)]
mod test_utils;

pub use descriptor::*;
pub use error::*;
pub use instructions::*;
pub use jump_point::*;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use bridge::{Bridge, Context};
use common::{
    solidity::IBridgeMessageReceiver,
    world::{CallContext, Contract, Revert, World, WorldError},
    NetworkId,
};

/// The extension deployed next to a bridge. It is deployed at the same
/// address on every network, as is the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeExtension {
    address: Address,
    bridge: Address,
}

impl BridgeExtension {
    pub fn new(address: Address, bridge: Address) -> Self {
        Self { address, bridge }
    }

    /// Deploys the extension for `bridge` at `address` on `world`.
    pub fn deploy(world: &mut World, address: Address, bridge: Address) -> Result<Self, WorldError> {
        let extension = Self::new(address, bridge);
        world.deploy_contract(address, Box::new(extension))?;
        Ok(extension)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn bridge(&self) -> Address {
        self.bridge
    }

    /// Bridges `amount` of `token` (zero for the gas token) and a call to run
    /// with it on `destination_network`.
    ///
    /// The asset deposit is made first and the message deposit right after,
    /// so the message's descriptor can name the asset leaf. A failure leaves
    /// partial effects behind; callers run this inside a transaction.
    ///
    /// # Arguments
    /// * `bridge`                        - The bridge on the calling network
    /// * `ctx`                           - The calling context; its value must match a native amount
    /// * `token`                         - Token to bridge, zero for the gas token
    /// * `amount`                        - Amount handed to the call target
    /// * `destination_network`           - Network the call runs on
    /// * `call_address`                  - Contract invoked with `call_data`
    /// * `fallback_address`              - Receives the asset if the call fails
    /// * `call_data`                     - Input of the call
    /// * `force_update_global_exit_root` - Push the new local exit root right away
    #[allow(clippy::too_many_arguments)]
    pub fn bridge_and_call(
        &self,
        bridge: &mut Bridge,
        ctx: Context<'_>,
        token: Address,
        amount: U256,
        destination_network: NetworkId,
        call_address: Address,
        fallback_address: Address,
        call_data: Bytes,
        force_update_global_exit_root: bool,
    ) -> Result<BridgeAndCallDeposit, ExtensionError> {
        bridge_and_call_handler(
            self,
            bridge,
            ctx,
            token,
            amount,
            destination_network,
            call_address,
            fallback_address,
            call_data,
            force_update_global_exit_root,
        )
    }

    /// Address of the JumpPoint that will serve `descriptor`, a dependency
    /// created on `origin_network`.
    pub fn jump_point_address(
        &self,
        descriptor: &DependencyDescriptor,
        origin_network: NetworkId,
    ) -> Address {
        JumpPoint::new(self.bridge, descriptor).address(
            self.address,
            descriptor.depends_on_index,
            origin_network,
        )
    }
}

impl Contract for BridgeExtension {
    fn call(&mut self, cx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Revert> {
        let message = IBridgeMessageReceiver::onMessageReceivedCall::abi_decode(input, true)
            .map_err(|_| Revert::reason("unknown function"))?;
        on_message_received_handler(
            self,
            cx,
            message.originAddress,
            message.originNetwork,
            &message.data,
        )
        .map_err(|error| error.to_revert())?;
        Ok(Bytes::new())
    }
}
