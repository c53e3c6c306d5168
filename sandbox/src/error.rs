use bridge::BridgeError;
use bridge_extension::ExtensionError;
use common::{world::WorldError, NetworkId};
use global_exit_root::GlobalExitRootError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("Invalid sandbox config: {0}")]
    InvalidConfig(String),
    #[error("Network {0} is not part of the sandbox")]
    UnknownNetwork(NetworkId),
    #[error("Deposit {leaf_index} of network {network_id} is not indexed")]
    DepositNotFound {
        network_id: NetworkId,
        leaf_index: u32,
    },
    #[error("Deposit {leaf_index} of network {network_id} is not under a settled exit root")]
    DepositNotSettled {
        network_id: NetworkId,
        leaf_index: u32,
    },
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error(transparent)]
    Extension(#[from] ExtensionError),
    #[error(transparent)]
    GlobalExitRoot(#[from] GlobalExitRootError),
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Failed to write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
