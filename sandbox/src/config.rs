use std::{collections::BTreeSet, fs, path::Path};

use alloy_primitives::{Address, U256};
use bridge::{BridgeConfig, ClaimPolicy};
use common::{metadata::TokenMetadata, NetworkId, MAINNET_NETWORK_ID};
use global_exit_root::GlobalExitRootConfig;
use serde::{Deserialize, Serialize};

use crate::{constants::*, SandboxError};

/// Layout of a sandbox: shared contract addresses, role holders and one entry
/// per network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxConfig {
    pub timestamp: u64,
    /// Account the relayer claims from.
    pub claim_sponsor: Address,
    pub contracts: ContractAddresses,
    pub roles: RoleAccounts,
    pub networks: Vec<NetworkConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub bridge: Address,
    pub bridge_extension: Address,
    pub global_exit_root: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAccounts {
    pub rollup_manager: Address,
    pub global_exit_root_updater: Address,
    pub bridge_manager: Address,
    pub emergency_guardian: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_id: NetworkId,
    pub name: String,
    #[serde(default)]
    pub claim_policy: ClaimPolicy,
    #[serde(default)]
    pub global_exit_root_remover: Option<Address>,
    /// Native balance of the bridge at genesis.
    #[serde(default)]
    pub bridge_float: U256,
    /// Native currency when it is not ether.
    #[serde(default)]
    pub gas_token: Option<GasTokenConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasTokenConfig {
    pub address: Address,
    pub network: NetworkId,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl SandboxConfig {
    /// Mainnet plus `rollups` ether L2s numbered from 1, with the well-known
    /// development addresses.
    pub fn local(rollups: u32) -> Self {
        let networks = (0..=rollups)
            .map(|network_id| {
                let (name, bridge_float) = if network_id == MAINNET_NETWORK_ID {
                    ("L1".to_string(), U256::ZERO)
                } else {
                    (format!("L2-{network_id}"), U256::from(DEFAULT_BRIDGE_FLOAT))
                };
                NetworkConfig {
                    network_id,
                    name,
                    claim_policy: ClaimPolicy::Standard,
                    global_exit_root_remover: None,
                    bridge_float,
                    gas_token: None,
                }
            })
            .collect();

        Self {
            timestamp: DEFAULT_TIMESTAMP,
            claim_sponsor: CLAIM_SPONSOR,
            contracts: ContractAddresses {
                bridge: BRIDGE_ADDRESS,
                bridge_extension: BRIDGE_EXTENSION_ADDRESS,
                global_exit_root: GLOBAL_EXIT_ROOT_ADDRESS,
            },
            roles: RoleAccounts {
                rollup_manager: ROLLUP_MANAGER,
                global_exit_root_updater: GLOBAL_EXIT_ROOT_UPDATER,
                bridge_manager: BRIDGE_MANAGER,
                emergency_guardian: EMERGENCY_GUARDIAN,
            },
            networks,
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, SandboxError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SandboxError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, SandboxError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SandboxError> {
        let mut seen = BTreeSet::new();
        for network in &self.networks {
            if !seen.insert(network.network_id) {
                return Err(SandboxError::InvalidConfig(format!(
                    "network {} is declared twice",
                    network.network_id
                )));
            }
            if network.network_id == MAINNET_NETWORK_ID && network.gas_token.is_some() {
                return Err(SandboxError::InvalidConfig(
                    "mainnet cannot use a custom gas token".to_string(),
                ));
            }
            if network.claim_policy == ClaimPolicy::Sovereign
                && network.global_exit_root_remover.is_none()
            {
                return Err(SandboxError::InvalidConfig(format!(
                    "sovereign network {} needs a global exit root remover",
                    network.network_id
                )));
            }
        }
        if !seen.contains(&MAINNET_NETWORK_ID) {
            return Err(SandboxError::InvalidConfig(
                "mainnet (network 0) is missing".to_string(),
            ));
        }
        Ok(())
    }

    pub fn network(&self, network_id: NetworkId) -> Result<&NetworkConfig, SandboxError> {
        self.networks
            .iter()
            .find(|network| network.network_id == network_id)
            .ok_or(SandboxError::UnknownNetwork(network_id))
    }

    pub fn bridge_config(&self, network: &NetworkConfig) -> BridgeConfig {
        let (gas_token_address, gas_token_network, gas_token_metadata) = match &network.gas_token
        {
            Some(gas_token) => (
                gas_token.address,
                gas_token.network,
                TokenMetadata::new(&gas_token.name, &gas_token.symbol, gas_token.decimals)
                    .abi_encode(),
            ),
            None => (Address::ZERO, MAINNET_NETWORK_ID, Default::default()),
        };

        BridgeConfig {
            address: self.contracts.bridge,
            network_id: network.network_id,
            gas_token_address,
            gas_token_network,
            gas_token_metadata,
            claim_policy: network.claim_policy,
            bridge_manager: self.roles.bridge_manager,
            emergency_guardian: self.roles.emergency_guardian,
            global_exit_root_remover: network.global_exit_root_remover,
        }
    }

    pub fn global_exit_root_config(&self, network: &NetworkConfig) -> GlobalExitRootConfig {
        if network.network_id == MAINNET_NETWORK_ID {
            GlobalExitRootConfig::mainnet(
                self.contracts.global_exit_root,
                self.contracts.bridge,
                self.roles.rollup_manager,
            )
        } else {
            GlobalExitRootConfig::network(
                self.contracts.global_exit_root,
                self.contracts.bridge,
                self.roles.global_exit_root_updater,
                network.global_exit_root_remover,
            )
        }
    }
}
