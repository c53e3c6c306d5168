use alloy_primitives::B256;
use common::{merkle::ExitTree, metadata::TokenMetadata, world::World};
use tracing::info;

use crate::{
    common::{deploy_wrapped_token, BridgeConfig, BridgeError, ClaimBitmap, Roles, TokenRegistry},
    Bridge,
};

/// Builds a bridge instance and deploys its WETH token on chains whose gas
/// token is not ether.
pub fn initialize_handler(config: BridgeConfig, world: &mut World) -> Result<Bridge, BridgeError> {
    config.validate()?;

    let weth_token = if config.is_ether_chain() {
        None
    } else {
        Some(deploy_wrapped_token(
            world,
            config.address,
            B256::ZERO,
            TokenMetadata::wrapped_ether(),
        )?)
    };

    info!(
        network_id = config.network_id,
        bridge = %config.address,
        policy = ?config.claim_policy,
        "bridge initialized"
    );

    Ok(Bridge {
        roles: Roles::from_config(&config),
        config,
        exit_tree: ExitTree::new(),
        claims: ClaimBitmap::new(),
        tokens: TokenRegistry::new(),
        weth_token,
        emergency_state: false,
    })
}
