use alloy_primitives::{Address, B256, U256};
use common::{
    create2::{derive_address, init_code_hash},
    metadata::TokenMetadata,
    world::World,
};
use tracing::debug;

use crate::{common::BridgeError, constants::WRAPPED_TOKEN_CREATION_CODE, Bridge};

/// Address the bridge deploys a wrapped token to, before it exists.
pub fn precalculated_wrapper_address(
    bridge: Address,
    salt: B256,
    metadata: &TokenMetadata,
) -> Address {
    derive_address(
        bridge,
        salt,
        init_code_hash(WRAPPED_TOKEN_CREATION_CODE, &metadata.abi_encode()),
    )
}

/// Deploys a token minted and burned by the bridge.
pub fn deploy_wrapped_token(
    world: &mut World,
    bridge: Address,
    salt: B256,
    metadata: TokenMetadata,
) -> Result<Address, BridgeError> {
    let address = precalculated_wrapper_address(bridge, salt, &metadata);
    debug!(%address, symbol = %metadata.symbol, "deploying wrapped token");
    world.deploy_token(address, metadata, Some(bridge))?;
    Ok(address)
}

impl Bridge {
    /// Takes `amount` of a wrapped token from `from`: burned, or moved into
    /// the bridge's float when the token is not mintable.
    pub(crate) fn bridge_wrapped_asset(
        &self,
        world: &mut World,
        token: Address,
        from: Address,
        amount: U256,
    ) -> Result<(), BridgeError> {
        let bridge = self.address();
        if self.tokens.is_mintable(token) {
            world.token_burn(token, bridge, from, amount)?;
        } else {
            world.token_transfer_from(token, bridge, from, bridge, amount)?;
        }
        Ok(())
    }

    /// Gives `amount` of a wrapped token to `to`: minted, or paid out of the
    /// bridge's float when the token is not mintable.
    pub(crate) fn claim_wrapped_asset(
        &self,
        world: &mut World,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), BridgeError> {
        let bridge = self.address();
        if self.tokens.is_mintable(token) {
            world.token_mint(token, bridge, to, amount)?;
        } else {
            world.token_transfer(token, bridge, to, amount)?;
        }
        Ok(())
    }
}
