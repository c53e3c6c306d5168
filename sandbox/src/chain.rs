use alloy_primitives::{Address, Bytes, U256};
use bridge::{Bridge, ClaimArgs, Context};
use bridge_extension::{BridgeAndCallDeposit, BridgeExtension};
use common::{world::World, NetworkId};
use global_exit_root::GlobalExitRootManager;
use tracing::debug;

use crate::{
    config::{NetworkConfig, SandboxConfig},
    SandboxError,
};

/// One network of the sandbox: its world and the bridge contracts on it.
#[derive(Debug, Clone)]
pub struct Chain {
    pub name: String,
    pub world: World,
    pub global_exit_root: GlobalExitRootManager,
    pub bridge: Bridge,
    pub extension: BridgeExtension,
}

impl Chain {
    /// Deploys the bridge, its global exit root manager and the extension.
    pub fn new(config: &SandboxConfig, network: &NetworkConfig) -> Result<Self, SandboxError> {
        let mut world = World::new(config.timestamp);
        if !network.bridge_float.is_zero() {
            world.set_balance(config.contracts.bridge, network.bridge_float);
        }

        let bridge = Bridge::new(config.bridge_config(network), &mut world)?;
        let extension = BridgeExtension::deploy(
            &mut world,
            config.contracts.bridge_extension,
            config.contracts.bridge,
        )?;
        debug!(network_id = network.network_id, name = %network.name, "chain started");

        Ok(Self {
            name: network.name.clone(),
            world,
            global_exit_root: GlobalExitRootManager::new(config.global_exit_root_config(network)),
            bridge,
            extension,
        })
    }

    pub fn network_id(&self) -> NetworkId {
        self.bridge.network_id()
    }

    /// Splits the chain into the bridge and a context for `sender`.
    pub fn split(&mut self, sender: Address, value: U256) -> (&mut Bridge, Context<'_>) {
        (
            &mut self.bridge,
            Context::new(&mut self.world, &mut self.global_exit_root, sender, value),
        )
    }

    /// Runs `f` as one transaction: if it fails, the whole chain is restored
    /// to its state before the call.
    pub fn transact<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let checkpoint = (
            self.world.clone(),
            self.global_exit_root.clone(),
            self.bridge.clone(),
        );
        let result = f(self);
        if result.is_err() {
            (self.world, self.global_exit_root, self.bridge) = checkpoint;
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    pub fn bridge_asset(
        &mut self,
        sender: Address,
        value: U256,
        destination_network: NetworkId,
        destination_address: Address,
        amount: U256,
        token: Address,
        force_update_global_exit_root: bool,
    ) -> Result<u32, SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, value);
            Ok(bridge.bridge_asset(
                ctx,
                destination_network,
                destination_address,
                amount,
                token,
                force_update_global_exit_root,
                &[],
            )?)
        })
    }

    pub fn bridge_message(
        &mut self,
        sender: Address,
        value: U256,
        destination_network: NetworkId,
        destination_address: Address,
        force_update_global_exit_root: bool,
        metadata: Bytes,
    ) -> Result<u32, SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, value);
            Ok(bridge.bridge_message(
                ctx,
                destination_network,
                destination_address,
                force_update_global_exit_root,
                metadata,
            )?)
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn bridge_and_call(
        &mut self,
        sender: Address,
        value: U256,
        token: Address,
        amount: U256,
        destination_network: NetworkId,
        call_address: Address,
        fallback_address: Address,
        call_data: Bytes,
        force_update_global_exit_root: bool,
    ) -> Result<BridgeAndCallDeposit, SandboxError> {
        self.transact(|chain| {
            let extension = chain.extension;
            let (bridge, ctx) = chain.split(sender, value);
            Ok(extension.bridge_and_call(
                bridge,
                ctx,
                token,
                amount,
                destination_network,
                call_address,
                fallback_address,
                call_data,
                force_update_global_exit_root,
            )?)
        })
    }

    pub fn claim_asset(&mut self, sender: Address, args: ClaimArgs) -> Result<(), SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, U256::ZERO);
            Ok(bridge.claim_asset(ctx, args)?)
        })
    }

    pub fn claim_message(&mut self, sender: Address, args: ClaimArgs) -> Result<(), SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, U256::ZERO);
            Ok(bridge.claim_message(ctx, args)?)
        })
    }

    /// Pushes the bridge's local exit root to the global exit root manager.
    pub fn update_global_exit_root(&mut self, sender: Address) -> Result<(), SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, U256::ZERO);
            Ok(bridge.update_global_exit_root(ctx)?)
        })
    }

    // Administration

    pub fn set_sovereign_token_address(
        &mut self,
        sender: Address,
        origin_network: NetworkId,
        origin_token: Address,
        sovereign_token: Address,
        is_not_mintable: bool,
    ) -> Result<(), SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, U256::ZERO);
            Ok(bridge.set_sovereign_token_address(
                ctx,
                origin_network,
                origin_token,
                sovereign_token,
                is_not_mintable,
            )?)
        })
    }

    pub fn remove_legacy_sovereign_token_address(
        &mut self,
        sender: Address,
        legacy_token: Address,
    ) -> Result<(), SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, U256::ZERO);
            Ok(bridge.remove_legacy_sovereign_token_address(ctx, legacy_token)?)
        })
    }

    pub fn migrate_legacy_token(
        &mut self,
        sender: Address,
        legacy_token: Address,
        amount: U256,
    ) -> Result<(), SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, U256::ZERO);
            Ok(bridge.migrate_legacy_token(ctx, legacy_token, amount)?)
        })
    }

    pub fn unset_claimed(
        &mut self,
        sender: Address,
        leaf_index: u32,
        source_network: NetworkId,
    ) -> Result<(), SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, U256::ZERO);
            Ok(bridge.unset_claimed(ctx, leaf_index, source_network)?)
        })
    }

    pub fn activate_emergency_state(&mut self, sender: Address) -> Result<(), SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, U256::ZERO);
            Ok(bridge.activate_emergency_state(ctx)?)
        })
    }

    pub fn deactivate_emergency_state(&mut self, sender: Address) -> Result<(), SandboxError> {
        self.transact(|chain| {
            let (bridge, ctx) = chain.split(sender, U256::ZERO);
            Ok(bridge.deactivate_emergency_state(ctx)?)
        })
    }
}
