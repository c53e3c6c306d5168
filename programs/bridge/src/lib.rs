//! The unified bridge: deposits append leaves to the local exit tree, claims
//! prove leaves of other networks against a global exit root and pay them
//! out exactly once.

pub mod claim;
pub mod common;
pub mod constants;
pub mod deposit;

#[cfg(test)]
mod test_utils;

pub use crate::common::*;
pub use claim::*;
pub use deposit::*;

use ::common::{
    merkle::ExitTree,
    metadata::TokenMetadata,
    world::{BridgeQuery, World},
    NetworkId,
};
use alloy_primitives::{Address, Bytes, B256, U256};

/// State of one bridge instance.
#[derive(Debug, Clone)]
pub struct Bridge {
    pub(crate) config: BridgeConfig,
    pub(crate) roles: Roles,
    pub(crate) exit_tree: ExitTree,
    pub(crate) claims: ClaimBitmap,
    pub(crate) tokens: TokenRegistry,
    pub(crate) weth_token: Option<Address>,
    pub(crate) emergency_state: bool,
}

impl Bridge {
    // Common

    /// Creates the bridge described by `config` on `world`.
    /// On chains whose gas token is not ether this also deploys the WETH token.
    ///
    /// # Arguments
    /// * `config` - Deployment parameters, validated before anything is deployed
    /// * `world`  - The chain the bridge lives on
    pub fn new(config: BridgeConfig, world: &mut World) -> Result<Self, BridgeError> {
        initialize_handler(config, world)
    }

    /// Transfers one of the bridge capabilities to a new holder.
    ///
    /// # Arguments
    /// * `ctx`        - The calling context; the sender must hold `role`
    /// * `role`       - The capability being handed over
    /// * `new_holder` - The account receiving it
    pub fn transfer_role(
        &mut self,
        ctx: Context<'_>,
        role: Role,
        new_holder: Address,
    ) -> Result<(), BridgeError> {
        transfer_role_handler(self, ctx, role, new_holder)
    }

    /// Halts deposits and claims until the guardian deactivates it.
    pub fn activate_emergency_state(&mut self, ctx: Context<'_>) -> Result<(), BridgeError> {
        activate_emergency_state_handler(self, ctx)
    }

    pub fn deactivate_emergency_state(&mut self, ctx: Context<'_>) -> Result<(), BridgeError> {
        deactivate_emergency_state_handler(self, ctx)
    }

    // Deposits

    /// Bridges an asset to another network.
    /// The native gas token is bridged with `token == Address::ZERO` and an
    /// attached value equal to `amount`. Tokens are burned when the bridge
    /// minted them and locked otherwise.
    ///
    /// # Arguments
    /// * `ctx`                           - The calling context; its value must match the native amount
    /// * `destination_network`           - Network the asset is claimable on
    /// * `destination_address`           - Recipient on the destination network
    /// * `amount`                        - Amount of `token` to bridge
    /// * `token`                         - Token address, zero for the gas token
    /// * `force_update_global_exit_root` - Push the new local exit root right away
    /// * `permit_data`                   - Optional ABI-encoded `permit` call for the bridge
    #[allow(clippy::too_many_arguments)]
    pub fn bridge_asset(
        &mut self,
        ctx: Context<'_>,
        destination_network: NetworkId,
        destination_address: Address,
        amount: U256,
        token: Address,
        force_update_global_exit_root: bool,
        permit_data: &[u8],
    ) -> Result<u32, BridgeError> {
        bridge_asset_handler(
            self,
            ctx,
            destination_network,
            destination_address,
            amount,
            token,
            force_update_global_exit_root,
            permit_data,
        )
    }

    /// Bridges a message to a contract on another network.
    /// The attached value travels with the message and is delivered with the
    /// `onMessageReceived` call on the destination.
    ///
    /// # Arguments
    /// * `ctx`                           - The calling context
    /// * `destination_network`           - Network the message is claimable on
    /// * `destination_address`           - Receiving contract
    /// * `force_update_global_exit_root` - Push the new local exit root right away
    /// * `metadata`                      - Payload handed to the receiver
    pub fn bridge_message(
        &mut self,
        ctx: Context<'_>,
        destination_network: NetworkId,
        destination_address: Address,
        force_update_global_exit_root: bool,
        metadata: Bytes,
    ) -> Result<u32, BridgeError> {
        bridge_message_handler(
            self,
            ctx,
            destination_network,
            destination_address,
            force_update_global_exit_root,
            metadata,
        )
    }

    /// Bridges a message carrying WETH, on chains whose gas token is not ether.
    pub fn bridge_message_weth(
        &mut self,
        ctx: Context<'_>,
        destination_network: NetworkId,
        destination_address: Address,
        amount_weth: U256,
        force_update_global_exit_root: bool,
        metadata: Bytes,
    ) -> Result<u32, BridgeError> {
        bridge_message_weth_handler(
            self,
            ctx,
            destination_network,
            destination_address,
            amount_weth,
            force_update_global_exit_root,
            metadata,
        )
    }

    /// Pushes the current local exit root to the global exit root manager.
    pub fn update_global_exit_root(&self, mut ctx: Context<'_>) -> Result<(), BridgeError> {
        self.check_not_emergency_state()?;
        self.push_local_exit_root(&mut ctx)
    }

    // Claims

    /// Claims an asset deposit made on another network.
    /// The deposit must be proven under a global exit root known to this
    /// network's manager, and each deposit can only be claimed once.
    ///
    /// # Arguments
    /// * `ctx`  - The calling context; anyone may claim on behalf of the recipient
    /// * `args` - Leaf fields, proofs and the exit roots they verify against
    pub fn claim_asset(&mut self, ctx: Context<'_>, args: ClaimArgs) -> Result<(), BridgeError> {
        claim_asset_handler(self, ctx, args)
    }

    /// Claims a message deposit made on another network.
    /// Fails with [`BridgeError::MessageFailed`] when the receiver reverts, in
    /// which case the message stays claimable.
    ///
    /// # Arguments
    /// * `ctx`  - The calling context
    /// * `args` - Leaf fields, proofs and the exit roots they verify against
    pub fn claim_message(&mut self, ctx: Context<'_>, args: ClaimArgs) -> Result<(), BridgeError> {
        claim_message_handler(self, ctx, args)
    }

    // Token mapping

    /// Maps an origin token to a token deployed outside the bridge.
    ///
    /// # Arguments
    /// * `ctx`             - The calling context; the sender must be the bridge manager
    /// * `origin_network`  - Network the token is native to, never this network
    /// * `origin_token`    - Token address on its origin network
    /// * `sovereign_token` - Local token representing it from now on
    /// * `is_not_mintable` - Whether the bridge pays out of a float instead of minting
    pub fn set_sovereign_token_address(
        &mut self,
        ctx: Context<'_>,
        origin_network: NetworkId,
        origin_token: Address,
        sovereign_token: Address,
        is_not_mintable: bool,
    ) -> Result<(), BridgeError> {
        set_sovereign_token_address_handler(
            self,
            ctx,
            origin_network,
            origin_token,
            sovereign_token,
            is_not_mintable,
        )
    }

    pub fn set_multiple_sovereign_token_address(
        &mut self,
        ctx: Context<'_>,
        origin_networks: &[NetworkId],
        origin_tokens: &[Address],
        sovereign_tokens: &[Address],
        is_not_mintable: &[bool],
    ) -> Result<(), BridgeError> {
        set_multiple_sovereign_token_address_handler(
            self,
            ctx,
            origin_networks,
            origin_tokens,
            sovereign_tokens,
            is_not_mintable,
        )
    }

    pub fn remove_legacy_sovereign_token_address(
        &mut self,
        ctx: Context<'_>,
        legacy_token: Address,
    ) -> Result<(), BridgeError> {
        remove_legacy_sovereign_token_address_handler(self, ctx, legacy_token)
    }

    /// Swaps the sender's legacy wrapped tokens for the currently mapped token.
    ///
    /// # Arguments
    /// * `ctx`          - The calling context; the sender is the holder
    /// * `legacy_token` - A wrapped token that is no longer the current mapping
    /// * `amount`       - Amount to migrate
    pub fn migrate_legacy_token(
        &mut self,
        ctx: Context<'_>,
        legacy_token: Address,
        amount: U256,
    ) -> Result<(), BridgeError> {
        migrate_legacy_token_handler(self, ctx, legacy_token, amount)
    }

    // Sovereign claims

    /// Makes a claimed deposit claimable again.
    pub fn unset_claimed(
        &mut self,
        ctx: Context<'_>,
        leaf_index: u32,
        source_network: NetworkId,
    ) -> Result<(), BridgeError> {
        let global_index = GlobalIndex::new(leaf_index, source_network).encode();
        unset_multiple_claims_handler(self, ctx, &[global_index])
    }

    pub fn unset_multiple_claims(
        &mut self,
        ctx: Context<'_>,
        global_indexes: &[U256],
    ) -> Result<(), BridgeError> {
        unset_multiple_claims_handler(self, ctx, global_indexes)
    }

    pub fn set_multiple_claims(
        &mut self,
        ctx: Context<'_>,
        global_indexes: &[U256],
    ) -> Result<(), BridgeError> {
        set_multiple_claims_handler(self, ctx, global_indexes)
    }

    // Queries

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn address(&self) -> Address {
        self.config.address
    }

    pub fn network_id(&self) -> NetworkId {
        self.config.network_id
    }

    pub fn deposit_count(&self) -> u32 {
        self.exit_tree.deposit_count()
    }

    /// Local exit root.
    pub fn get_root(&self) -> B256 {
        self.exit_tree.root()
    }

    pub fn weth_token(&self) -> Option<Address> {
        self.weth_token
    }

    pub fn is_emergency_state(&self) -> bool {
        self.emergency_state
    }

    pub fn is_claimed(&self, leaf_index: u32, source_network: NetworkId) -> bool {
        self.claims.is_claimed(leaf_index, source_network)
    }

    pub fn get_token_wrapped_address(
        &self,
        origin_network: NetworkId,
        origin_token: Address,
    ) -> Option<Address> {
        self.tokens
            .wrapped_address(&TokenInformation::new(origin_network, origin_token))
    }

    pub fn wrapped_token_to_token_info(&self, wrapped: Address) -> Option<&TokenInformation> {
        self.tokens.token_info(wrapped)
    }

    pub fn is_wrapped_token_mintable(&self, wrapped: Address) -> bool {
        self.tokens.is_mintable(wrapped)
    }

    /// Address the wrapped token of `(origin_network, origin_token)` is, or
    /// will be, deployed at.
    pub fn precalculated_wrapper_address(
        &self,
        origin_network: NetworkId,
        origin_token: Address,
        metadata: &TokenMetadata,
    ) -> Address {
        let salt = TokenInformation::new(origin_network, origin_token).hash();
        precalculated_wrapper_address(self.address(), salt, metadata)
    }

    pub(crate) fn check_not_emergency_state(&self) -> Result<(), BridgeError> {
        if self.emergency_state {
            return Err(BridgeError::BridgePaused);
        }
        Ok(())
    }

    pub(crate) fn check_destination_network(
        &self,
        destination_network: NetworkId,
    ) -> Result<(), BridgeError> {
        if destination_network == self.network_id() {
            return Err(BridgeError::DestinationNetworkInvalid(destination_network));
        }
        Ok(())
    }
}

impl BridgeQuery for Bridge {
    fn address(&self) -> Address {
        self.config.address
    }

    fn network_id(&self) -> NetworkId {
        self.config.network_id
    }

    fn deposit_count(&self) -> u32 {
        self.exit_tree.deposit_count()
    }

    fn gas_token_network(&self) -> NetworkId {
        self.config.gas_token_network
    }

    fn gas_token_address(&self) -> Address {
        self.config.gas_token_address
    }

    fn weth_token(&self) -> Option<Address> {
        self.weth_token
    }

    fn is_claimed(&self, leaf_index: u32, source_network: NetworkId) -> bool {
        self.claims.is_claimed(leaf_index, source_network)
    }

    fn get_token_wrapped_address(
        &self,
        origin_network: NetworkId,
        origin_token: Address,
    ) -> Option<Address> {
        self.tokens
            .wrapped_address(&TokenInformation::new(origin_network, origin_token))
    }
}
