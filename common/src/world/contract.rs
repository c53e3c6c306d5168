use std::{any::Any, fmt};

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolError;

use super::{Call, World, WorldError};
use crate::NetworkId;

/// Code deployed at an address of the [`World`].
///
/// `input` is ABI-encoded call data; an empty input is a plain value transfer.
/// Returning `Err` reverts every state change made since the call started.
pub trait Contract: ContractBase + fmt::Debug {
    fn call(&mut self, cx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Revert>;
}

/// Object-safe plumbing implemented for every `Contract + Clone` type.
pub trait ContractBase {
    fn clone_box(&self) -> Box<dyn Contract>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> ContractBase for T
where
    T: Contract + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Clone for Box<dyn Contract> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Read-only view of the bridge deployed on the chain a call executes on.
pub trait BridgeQuery {
    fn address(&self) -> Address;
    fn network_id(&self) -> NetworkId;
    fn deposit_count(&self) -> u32;
    fn gas_token_network(&self) -> NetworkId;
    fn gas_token_address(&self) -> Address;
    fn weth_token(&self) -> Option<Address>;
    fn is_claimed(&self, leaf_index: u32, source_network: NetworkId) -> bool;
    fn get_token_wrapped_address(
        &self,
        origin_network: NetworkId,
        origin_token: Address,
    ) -> Option<Address>;
}

/// Environment handed to a running [`Contract`].
pub struct CallContext<'a> {
    pub world: &'a mut World,
    pub bridge: &'a dyn BridgeQuery,
    /// Address the running code is deployed at.
    pub this: Address,
    pub sender: Address,
    pub value: U256,
}

impl CallContext<'_> {
    /// Performs a nested call from the running contract.
    pub fn call(&mut self, to: Address, value: U256, input: Bytes) -> Result<Bytes, Revert> {
        self.world.call(
            self.bridge,
            Call {
                from: self.this,
                to,
                value,
                input,
            },
        )
    }
}

/// Revert data returned by a failed call: an ABI-encoded Solidity error.
#[derive(Clone, PartialEq, Eq)]
pub struct Revert(Bytes);

impl Revert {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    pub fn from_error<E: SolError>(error: &E) -> Self {
        Self(error.abi_encode().into())
    }

    /// `Error(string)` revert, as produced by `require(cond, reason)`.
    pub fn reason(reason: impl Into<String>) -> Self {
        Self::from_error(&alloy_sol_types::Revert {
            reason: reason.into(),
        })
    }

    pub fn data(&self) -> &Bytes {
        &self.0
    }

    /// Decodes the revert data as the custom error `E`.
    pub fn decode<E: SolError>(&self) -> Option<E> {
        E::abi_decode(&self.0, true).ok()
    }

    pub fn reason_string(&self) -> Option<String> {
        self.decode::<alloy_sol_types::Revert>()
            .map(|revert| revert.reason)
    }

    fn describe(&self) -> String {
        self.reason_string()
            .unwrap_or_else(|| format!("0x{}", hex::encode(&self.0)))
    }
}

impl fmt::Display for Revert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execution reverted: {}", self.describe())
    }
}

impl std::error::Error for Revert {}

impl fmt::Debug for Revert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Revert({})", self.describe())
    }
}

impl From<WorldError> for Revert {
    fn from(error: WorldError) -> Self {
        Self::reason(error.to_string())
    }
}
