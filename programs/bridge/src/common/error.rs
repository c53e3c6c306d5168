use alloy_primitives::{Address, B256, U256};
use common::{
    merkle::MerkleError,
    metadata::TokenMetadataError,
    world::{Revert, WorldError},
    NetworkId,
};
use global_exit_root::GlobalExitRootError;
use thiserror::Error;

/// Errors returned by bridge instructions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    // Configuration
    #[error("Gas token network must be zero when the gas token is ether")]
    GasTokenNetworkMustBeZeroOnEther,
    #[error("Address cannot be zero")]
    InvalidZeroAddress,

    // Capabilities and emergency state
    #[error("Bridge is paused")]
    BridgePaused,
    #[error("Bridge is not paused")]
    BridgeNotPaused,
    #[error("Only the bridge manager can call this instruction")]
    OnlyBridgeManager,
    #[error("Only the global exit root remover can call this instruction")]
    OnlyGlobalExitRootRemover,
    #[error("Only the emergency guardian can call this instruction")]
    OnlyEmergencyGuardian,
    #[error("Instruction is only available on sovereign bridges")]
    OnlySovereignPolicy,

    // Deposits
    #[error("Destination network {0} is invalid")]
    DestinationNetworkInvalid(NetworkId),
    #[error("Amount does not match the attached value")]
    AmountDoesNotMatchMsgValue,
    #[error("Attached value must be zero when bridging a token")]
    MsgValueNotZero,
    #[error("Native token is ether, use bridge_message")]
    NativeTokenIsEther,
    #[error("Native token is not ether, use bridge_message_weth")]
    NativeTokenIsNotEther,
    #[error("Permit data has an unknown signature")]
    NotValidSignature,
    #[error("Permit owner is not the depositor")]
    NotValidOwner,
    #[error("Permit spender is not the bridge")]
    NotValidSpender,
    #[error("Permit value does not match the deposited amount")]
    NotValidAmount,

    // Claims
    #[error("Global exit root {0} does not exist")]
    GlobalExitRootInvalid(B256),
    #[error("Invalid global index {0}")]
    InvalidGlobalIndex(U256),
    #[error("Invalid Merkle proof")]
    InvalidProof,
    #[error("Leaf {leaf_index} of network {source_network} is already claimed")]
    AlreadyClaimed {
        leaf_index: u32,
        source_network: NetworkId,
    },
    #[error("Leaf {leaf_index} of network {source_network} is not claimed")]
    ClaimNotSet {
        leaf_index: u32,
        source_network: NetworkId,
    },
    #[error("Message failed: {0}")]
    MessageFailed(Revert),
    #[error("Ether transfer failed: {0}")]
    EtherTransferFailed(Revert),

    // Token mapping
    #[error("Origin network {0} is this network")]
    OriginNetworkInvalid(NetworkId),
    #[error("Token {0} is already mapped")]
    TokenAlreadyMapped(Address),
    #[error("Token {0} is not mapped")]
    TokenNotMapped(Address),
    #[error("Token {0} is still the current mapping")]
    TokenNotRemapped(Address),
    #[error("Token {0} is already the current mapping")]
    TokenAlreadyUpdated(Address),
    #[error("Input arrays have different lengths")]
    InputArraysLengthMismatch,

    #[error(transparent)]
    Merkle(#[from] MerkleError),
    #[error(transparent)]
    World(#[from] WorldError),
    #[error(transparent)]
    GlobalExitRoot(#[from] GlobalExitRootError),
    #[error(transparent)]
    TokenMetadata(#[from] TokenMetadataError),
}
