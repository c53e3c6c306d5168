use alloy_primitives::B256;
use common::NetworkId;
use thiserror::Error;

/// Errors returned by the global exit root manager
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlobalExitRootError {
    #[error("Only the bridge can update the local exit root")]
    OnlyAllowedContracts,
    #[error("Only the rollup manager can update rollup exit roots")]
    OnlyRollupManager,
    #[error("Only the global exit root updater can insert roots")]
    OnlyGlobalExitRootUpdater,
    #[error("Only the global exit root remover can remove roots")]
    OnlyGlobalExitRootRemover,
    #[error("Network {0} has no slot in the rollup exit tree")]
    InvalidRollupNetwork(NetworkId),
    #[error("Operation is only available on the mainnet manager")]
    NotAggregator,
    #[error("Operation is only available on network managers")]
    NotNetworkManager,
    #[error("Global exit root {0} is already set")]
    GlobalExitRootAlreadySet(B256),
    #[error("Global exit root {0} not found")]
    GlobalExitRootNotFound(B256),
}
