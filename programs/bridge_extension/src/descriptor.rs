use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolValue};
use common::NetworkId;

use crate::error::{checked_leaf_index, ExtensionError};

sol! {
    struct DependencyDescriptorAbi {
        uint256 dependsOnIndex;
        address callAddress;
        address fallbackAddress;
        uint32 assetOriginalNetwork;
        address assetOriginalAddress;
        bytes callData;
    }
}

/// Payload of the message half of a bridge-and-call. It names the asset
/// deposit the call depends on and what the JumpPoint runs once both landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDescriptor {
    /// Leaf index of the asset deposit on the origin network.
    pub depends_on_index: u32,
    pub call_address: Address,
    pub fallback_address: Address,
    pub asset_original_network: NetworkId,
    pub asset_original_address: Address,
    pub call_data: Bytes,
}

impl DependencyDescriptor {
    pub fn abi_encode(&self) -> Bytes {
        DependencyDescriptorAbi {
            dependsOnIndex: U256::from(self.depends_on_index),
            callAddress: self.call_address,
            fallbackAddress: self.fallback_address,
            assetOriginalNetwork: self.asset_original_network,
            assetOriginalAddress: self.asset_original_address,
            callData: self.call_data.clone(),
        }
        .abi_encode_params()
        .into()
    }

    pub fn abi_decode(data: &[u8]) -> Result<Self, ExtensionError> {
        let decoded = DependencyDescriptorAbi::abi_decode_params(data, true)
            .map_err(|_| ExtensionError::InvalidDescriptor)?;
        Ok(Self {
            depends_on_index: checked_leaf_index(decoded.dependsOnIndex)?,
            call_address: decoded.callAddress,
            fallback_address: decoded.fallbackAddress,
            asset_original_network: decoded.assetOriginalNetwork,
            asset_original_address: decoded.assetOriginalAddress,
            call_data: decoded.callData,
        })
    }
}
