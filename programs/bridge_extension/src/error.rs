use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolInterface};
use bridge::BridgeError;
use common::world::{Revert, WorldError};
use thiserror::Error;

sol! {
    /// Revert data of the extension, as seen by callers across a call boundary.
    interface IBridgeExtension {
        error SenderMustBeBridge();
        error OriginMustBeBridgeExtension();
        error InvalidDescriptor();
        error UnclaimedAsset();
        error JumpPointAlreadyDeployed(address jumpPoint);
    }
}

use IBridgeExtension::IBridgeExtensionErrors as SolErrors;

/// Errors returned by the bridge extension
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    #[error("Call and fallback addresses cannot be zero")]
    InvalidAddress,
    #[error("Destination network is this network")]
    InvalidDestinationNetwork,
    #[error("Amount does not match the attached value")]
    AmountDoesNotMatchMsgValue,
    #[error("Asset deposit got index {actual}, expected {expected}")]
    DepositOrderMismatch { expected: u32, actual: u32 },
    #[error("Messages are only accepted from the bridge")]
    SenderMustBeBridge,
    #[error("Message does not originate from the bridge extension")]
    OriginMustBeBridgeExtension,
    #[error("Message is not a dependency descriptor")]
    InvalidDescriptor,
    #[error("Asset the call depends on is not claimed yet")]
    UnclaimedAsset,
    #[error("JumpPoint {0} is already deployed")]
    JumpPointAlreadyDeployed(Address),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error(transparent)]
    World(#[from] WorldError),
}

impl ExtensionError {
    pub fn to_revert(&self) -> Revert {
        match self {
            Self::SenderMustBeBridge => {
                Revert::from_error(&IBridgeExtension::SenderMustBeBridge {})
            }
            Self::OriginMustBeBridgeExtension => {
                Revert::from_error(&IBridgeExtension::OriginMustBeBridgeExtension {})
            }
            Self::InvalidDescriptor => Revert::from_error(&IBridgeExtension::InvalidDescriptor {}),
            Self::UnclaimedAsset => Revert::from_error(&IBridgeExtension::UnclaimedAsset {}),
            Self::JumpPointAlreadyDeployed(jump_point) => {
                Revert::from_error(&IBridgeExtension::JumpPointAlreadyDeployed {
                    jumpPoint: *jump_point,
                })
            }
            other => Revert::reason(other.to_string()),
        }
    }

    /// Recovers the extension error carried by revert data, e.g. the payload
    /// of a failed message claim.
    pub fn from_revert(revert: &Revert) -> Option<Self> {
        let error = match SolErrors::abi_decode(revert.data(), true).ok()? {
            SolErrors::SenderMustBeBridge(_) => Self::SenderMustBeBridge,
            SolErrors::OriginMustBeBridgeExtension(_) => Self::OriginMustBeBridgeExtension,
            SolErrors::InvalidDescriptor(_) => Self::InvalidDescriptor,
            SolErrors::UnclaimedAsset(_) => Self::UnclaimedAsset,
            SolErrors::JumpPointAlreadyDeployed(error) => {
                Self::JumpPointAlreadyDeployed(error.jumpPoint)
            }
        };
        Some(error)
    }
}

/// Maximum dependency index a descriptor may carry.
pub(crate) fn checked_leaf_index(depends_on_index: U256) -> Result<u32, ExtensionError> {
    u32::try_from(depends_on_index).map_err(|_| ExtensionError::InvalidDescriptor)
}
