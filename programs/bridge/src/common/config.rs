use alloy_primitives::{Address, Bytes};
use common::{NetworkId, MAINNET_NETWORK_ID};
use serde::{Deserialize, Serialize};

use crate::common::BridgeError;

/// Which administrative surface the bridge exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPolicy {
    #[default]
    Standard,
    /// Sovereign chains may unset and set claims by global index.
    Sovereign,
}

/// Deployment parameters of a bridge instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Address of the bridge; identical on every network.
    pub address: Address,
    pub network_id: NetworkId,
    /// Native currency of the chain; zero for ether.
    #[serde(default)]
    pub gas_token_address: Address,
    #[serde(default)]
    pub gas_token_network: NetworkId,
    /// `abi.encode(name, symbol, decimals)` of the gas token, empty for ether.
    #[serde(default)]
    pub gas_token_metadata: Bytes,
    #[serde(default)]
    pub claim_policy: ClaimPolicy,
    pub bridge_manager: Address,
    pub emergency_guardian: Address,
    #[serde(default)]
    pub global_exit_root_remover: Option<Address>,
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.gas_token_address.is_zero() && self.gas_token_network != MAINNET_NETWORK_ID {
            return Err(BridgeError::GasTokenNetworkMustBeZeroOnEther);
        }
        if self.claim_policy == ClaimPolicy::Sovereign && self.global_exit_root_remover.is_none()
        {
            return Err(BridgeError::InvalidZeroAddress);
        }
        Ok(())
    }

    /// Whether the chain's native currency is ether.
    pub fn is_ether_chain(&self) -> bool {
        self.gas_token_address.is_zero()
    }
}
