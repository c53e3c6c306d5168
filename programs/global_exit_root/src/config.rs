use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Deployment parameters of a [`crate::GlobalExitRootManager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalExitRootConfig {
    /// Address the manager is deployed at; events are emitted from it.
    pub address: Address,
    /// The only caller allowed to push local exit roots.
    pub bridge: Address,
    pub kind: ManagerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ManagerKind {
    /// Aggregates mainnet and rollup exit roots into global exit roots.
    Mainnet { rollup_manager: Address },
    /// Receives global exit roots injected from mainnet.
    Network {
        updater: Address,
        remover: Option<Address>,
    },
}

impl GlobalExitRootConfig {
    pub fn mainnet(address: Address, bridge: Address, rollup_manager: Address) -> Self {
        Self {
            address,
            bridge,
            kind: ManagerKind::Mainnet { rollup_manager },
        }
    }

    pub fn network(
        address: Address,
        bridge: Address,
        updater: Address,
        remover: Option<Address>,
    ) -> Self {
        Self {
            address,
            bridge,
            kind: ManagerKind::Network { updater, remover },
        }
    }
}
