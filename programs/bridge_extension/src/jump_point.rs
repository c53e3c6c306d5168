//! The JumpPoint: a one-shot account, derived from the dependency it serves,
//! that receives the bridged asset and hands it to the call target.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolValue};
use common::{
    create2::{derive_address, init_code_hash},
    world::{BridgeQuery, Call, World},
    NetworkId,
};
use tracing::{debug, warn};

use crate::{
    constants::JUMP_POINT_CREATION_CODE,
    descriptor::DependencyDescriptor,
    events::{JumpPointExecuted, JumpPointFallback},
};

sol! {
    struct JumpPointArgs {
        address bridge;
        uint32 assetOriginalNetwork;
        address assetOriginalAddress;
        address callAddress;
        address fallbackAddress;
        bytes callData;
    }
}

/// Constructor arguments of a JumpPoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpPoint {
    pub bridge: Address,
    pub asset_original_network: NetworkId,
    pub asset_original_address: Address,
    pub call_address: Address,
    pub fallback_address: Address,
    pub call_data: Bytes,
}

/// How a JumpPoint run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPointOutcome {
    Executed,
    Fallback,
    /// Neither the call nor the fallback took the funds.
    Stranded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Asset {
    Native,
    Token(Address),
}

impl JumpPoint {
    pub fn new(bridge: Address, descriptor: &DependencyDescriptor) -> Self {
        Self {
            bridge,
            asset_original_network: descriptor.asset_original_network,
            asset_original_address: descriptor.asset_original_address,
            call_address: descriptor.call_address,
            fallback_address: descriptor.fallback_address,
            call_data: descriptor.call_data.clone(),
        }
    }

    pub fn constructor_args(&self) -> Vec<u8> {
        JumpPointArgs {
            bridge: self.bridge,
            assetOriginalNetwork: self.asset_original_network,
            assetOriginalAddress: self.asset_original_address,
            callAddress: self.call_address,
            fallbackAddress: self.fallback_address,
            callData: self.call_data.clone(),
        }
        .abi_encode_params()
    }

    /// `keccak256(abi.encodePacked(uint256 dependsOnIndex, uint32 originNetwork))`.
    pub fn salt(depends_on_index: u32, origin_network: NetworkId) -> B256 {
        let mut packed = [0u8; 36];
        packed[..32].copy_from_slice(&U256::from(depends_on_index).to_be_bytes::<32>());
        packed[32..].copy_from_slice(&origin_network.to_be_bytes());
        keccak256(packed)
    }

    /// Address this JumpPoint is deployed at by the extension `deployer` for
    /// the dependency `depends_on_index` made on `origin_network`.
    pub fn address(
        &self,
        deployer: Address,
        depends_on_index: u32,
        origin_network: NetworkId,
    ) -> Address {
        derive_address(
            deployer,
            Self::salt(depends_on_index, origin_network),
            init_code_hash(JUMP_POINT_CREATION_CODE, &self.constructor_args()),
        )
    }

    /// Hands everything the JumpPoint at `address` holds of the asset to the
    /// call target, or to the fallback address when the call fails.
    /// Never fails: funds nobody accepts stay at `address`.
    pub fn run(
        &self,
        world: &mut World,
        bridge: &dyn BridgeQuery,
        address: Address,
    ) -> JumpPointOutcome {
        let Some(asset) = self.resolve_asset(bridge) else {
            warn!(
                jump_point = %address,
                origin_network = self.asset_original_network,
                origin_address = %self.asset_original_address,
                "asset has no local representation, funds stranded"
            );
            return JumpPointOutcome::Stranded;
        };

        match asset {
            Asset::Native => self.run_native(world, bridge, address),
            Asset::Token(token) => self.run_token(world, bridge, address, token),
        }
    }

    fn resolve_asset(&self, bridge: &dyn BridgeQuery) -> Option<Asset> {
        if self.asset_original_network == bridge.gas_token_network()
            && self.asset_original_address == bridge.gas_token_address()
        {
            Some(Asset::Native)
        } else if self.asset_original_address.is_zero() {
            bridge.weth_token().map(Asset::Token)
        } else if self.asset_original_network == bridge.network_id() {
            Some(Asset::Token(self.asset_original_address))
        } else {
            bridge
                .get_token_wrapped_address(self.asset_original_network, self.asset_original_address)
                .map(Asset::Token)
        }
    }

    fn run_native(
        &self,
        world: &mut World,
        bridge: &dyn BridgeQuery,
        address: Address,
    ) -> JumpPointOutcome {
        let amount = world.balance(address);
        let call = Call {
            from: address,
            to: self.call_address,
            value: amount,
            input: self.call_data.clone(),
        };
        match world.call(bridge, call) {
            Ok(_) => self.executed(world, address, Address::ZERO, amount),
            Err(revert) => {
                debug!(jump_point = %address, %revert, "call failed, using fallback");
                let refund = Call {
                    from: address,
                    to: self.fallback_address,
                    value: amount,
                    input: Bytes::new(),
                };
                let delivered = world.call(bridge, refund).is_ok();
                self.fell_back(world, address, Address::ZERO, amount, delivered)
            }
        }
    }

    fn run_token(
        &self,
        world: &mut World,
        bridge: &dyn BridgeQuery,
        address: Address,
        token: Address,
    ) -> JumpPointOutcome {
        let amount = world.token_balance(token, address);
        if let Err(error) = world.token_approve(token, address, self.call_address, amount) {
            warn!(jump_point = %address, %error, "approval failed, funds stranded");
            return JumpPointOutcome::Stranded;
        }

        let call = Call {
            from: address,
            to: self.call_address,
            value: U256::ZERO,
            input: self.call_data.clone(),
        };
        match world.call(bridge, call) {
            Ok(_) => self.executed(world, address, token, amount),
            Err(revert) => {
                debug!(jump_point = %address, %revert, "call failed, using fallback");
                let delivered = world
                    .token_transfer(token, address, self.fallback_address, amount)
                    .is_ok();
                self.fell_back(world, address, token, amount, delivered)
            }
        }
    }

    fn executed(
        &self,
        world: &mut World,
        address: Address,
        asset: Address,
        amount: U256,
    ) -> JumpPointOutcome {
        world.emit_event(
            address,
            &JumpPointExecuted {
                jumpPoint: address,
                callAddress: self.call_address,
                asset,
                amount,
            },
        );
        JumpPointOutcome::Executed
    }

    fn fell_back(
        &self,
        world: &mut World,
        address: Address,
        asset: Address,
        amount: U256,
        delivered: bool,
    ) -> JumpPointOutcome {
        world.emit_event(
            address,
            &JumpPointFallback {
                jumpPoint: address,
                fallbackAddress: self.fallback_address,
                asset,
                amount,
                delivered,
            },
        );
        if delivered {
            JumpPointOutcome::Fallback
        } else {
            warn!(jump_point = %address, %amount, "fallback failed, funds stranded");
            JumpPointOutcome::Stranded
        }
    }
}
