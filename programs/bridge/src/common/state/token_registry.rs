use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{keccak256, Address, B256};
use common::NetworkId;
use serde::{Deserialize, Serialize};

use crate::common::BridgeError;

/// Origin of a wrapped token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInformation {
    pub origin_network: NetworkId,
    pub origin_token_address: Address,
}

impl TokenInformation {
    pub fn new(origin_network: NetworkId, origin_token_address: Address) -> Self {
        Self {
            origin_network,
            origin_token_address,
        }
    }

    /// `keccak256(abi.encodePacked(uint32 originNetwork, address originToken))`.
    /// Keys the forward mapping and salts wrapped token deployments.
    pub fn hash(&self) -> B256 {
        let mut packed = [0u8; 24];
        packed[..4].copy_from_slice(&self.origin_network.to_be_bytes());
        packed[4..].copy_from_slice(self.origin_token_address.as_slice());
        keccak256(packed)
    }
}

/// Mapping between origin tokens and the local contracts representing them.
///
/// The forward map follows remappings; the reverse map keeps every wrapped
/// token ever registered so holders of a legacy token can still redeem it.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    wrapped_by_origin: BTreeMap<B256, Address>,
    origin_by_wrapped: BTreeMap<Address, TokenInformation>,
    not_mintable: BTreeSet<Address>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrapped_address(&self, info: &TokenInformation) -> Option<Address> {
        self.wrapped_by_origin.get(&info.hash()).copied()
    }

    pub fn token_info(&self, wrapped: Address) -> Option<&TokenInformation> {
        self.origin_by_wrapped.get(&wrapped)
    }

    /// Whether the bridge mints and burns `wrapped` rather than holding a float.
    pub fn is_mintable(&self, wrapped: Address) -> bool {
        !self.not_mintable.contains(&wrapped)
    }

    /// Records a wrapped token deployed by the bridge itself.
    pub fn register(&mut self, info: TokenInformation, wrapped: Address) {
        self.wrapped_by_origin.insert(info.hash(), wrapped);
        self.origin_by_wrapped.insert(wrapped, info);
    }

    /// Points `info` at an externally deployed token.
    pub fn remap(
        &mut self,
        info: TokenInformation,
        sovereign: Address,
        is_not_mintable: bool,
    ) -> Result<(), BridgeError> {
        if self.origin_by_wrapped.contains_key(&sovereign) {
            return Err(BridgeError::TokenAlreadyMapped(sovereign));
        }

        self.register(info, sovereign);
        if is_not_mintable {
            self.not_mintable.insert(sovereign);
        }
        Ok(())
    }

    /// Current mapping of the origin `legacy` represents, failing if `legacy`
    /// is unknown.
    pub fn current_for(&self, legacy: Address) -> Result<(TokenInformation, Address), BridgeError> {
        let info = *self
            .token_info(legacy)
            .ok_or(BridgeError::TokenNotMapped(legacy))?;
        let current = self
            .wrapped_address(&info)
            .ok_or(BridgeError::TokenNotMapped(legacy))?;
        Ok((info, current))
    }

    /// Drops the reverse entry of a token that is no longer the current mapping.
    pub fn remove_legacy(&mut self, legacy: Address) -> Result<TokenInformation, BridgeError> {
        let (info, current) = self.current_for(legacy)?;
        if current == legacy {
            return Err(BridgeError::TokenNotRemapped(legacy));
        }

        self.origin_by_wrapped.remove(&legacy);
        self.not_mintable.remove(&legacy);
        Ok(info)
    }
}
