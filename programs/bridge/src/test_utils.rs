use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use common::{
    merkle::{SparseMerkleTree, TREE_DEPTH},
    metadata::TokenMetadata,
    solidity::IBridgeMessageReceiver,
    world::{CallContext, Contract, Revert, World},
    LeafType, NetworkId, MAINNET_NETWORK_ID,
};
use global_exit_root::{calculate_global_exit_root, GlobalExitRootConfig, GlobalExitRootManager};
use hex_literal::hex;

use crate::{
    claim::{ClaimArgs, GlobalIndex},
    common::{deploy_wrapped_token, BridgeConfig, ClaimPolicy, Context, TokenInformation},
    deposit::DepositLeaf,
    Bridge,
};

pub const TEST_BRIDGE: Address = Address::new(hex!("2a3dd3eb832af982ec71669e178424b10dca2ede"));
pub const TEST_GLOBAL_EXIT_ROOT: Address =
    Address::new(hex!("580bda1e7a0cfae92fa7f6c20a3794f169ce3cfb"));
pub const TEST_ROLLUP_MANAGER: Address =
    Address::new(hex!("5132a183e9f3cb7c848b0aac5ae0c4f0491b7ab2"));
pub const TEST_GER_UPDATER: Address = Address::new(hex!("a41b04e1ac0c9a1b1f6d83c3e8b4ac27b24c2a3f"));
pub const TEST_BRIDGE_MANAGER: Address =
    Address::new(hex!("165bd8ac1a2f6e1fb3e0b0b8c2b3a4d9e7f60011"));
pub const TEST_GUARDIAN: Address = Address::new(hex!("6c4a0b9d7e2f14a8c3b5d6e7f8091a2b3c4d5e6f"));
pub const TEST_REMOVER: Address = Address::new(hex!("7e1f2a3b4c5d6e7f8091a2b3c4d5e6f708192a3b"));
pub const TEST_USER: Address = Address::new(hex!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
pub const TEST_TOKEN: Address = Address::new(hex!("5fbdb2315678afecb367f032d93f642f64180aa3"));

pub const TEST_TIMESTAMP: u64 = 1_700_000_000;

pub fn mock_config(network_id: NetworkId) -> BridgeConfig {
    BridgeConfig {
        address: TEST_BRIDGE,
        network_id,
        gas_token_address: Address::ZERO,
        gas_token_network: MAINNET_NETWORK_ID,
        gas_token_metadata: Bytes::new(),
        claim_policy: ClaimPolicy::Standard,
        bridge_manager: TEST_BRIDGE_MANAGER,
        emergency_guardian: TEST_GUARDIAN,
        global_exit_root_remover: None,
    }
}

/// One chain with a bridge and its global exit root manager.
pub struct TestChain {
    pub world: World,
    pub global_exit_root: GlobalExitRootManager,
    pub bridge: Bridge,
}

pub fn mock_chain_with(config: BridgeConfig) -> TestChain {
    let mut world = World::new(TEST_TIMESTAMP);
    let manager_config = if config.network_id == MAINNET_NETWORK_ID {
        GlobalExitRootConfig::mainnet(TEST_GLOBAL_EXIT_ROOT, config.address, TEST_ROLLUP_MANAGER)
    } else {
        GlobalExitRootConfig::network(
            TEST_GLOBAL_EXIT_ROOT,
            config.address,
            TEST_GER_UPDATER,
            Some(TEST_REMOVER),
        )
    };
    let bridge = Bridge::new(config, &mut world).unwrap();

    TestChain {
        world,
        global_exit_root: GlobalExitRootManager::new(manager_config),
        bridge,
    }
}

pub fn mock_chain(network_id: NetworkId) -> TestChain {
    mock_chain_with(mock_config(network_id))
}

pub fn mock_sovereign_chain(network_id: NetworkId) -> TestChain {
    mock_chain_with(BridgeConfig {
        claim_policy: ClaimPolicy::Sovereign,
        global_exit_root_remover: Some(TEST_REMOVER),
        ..mock_config(network_id)
    })
}

/// Chain whose native currency is a token bridged from mainnet.
pub fn mock_gas_token_chain(network_id: NetworkId) -> TestChain {
    mock_chain_with(BridgeConfig {
        gas_token_address: Address::repeat_byte(0x6a),
        gas_token_network: MAINNET_NETWORK_ID,
        gas_token_metadata: TokenMetadata::new("Gas Token", "GAS", 18).abi_encode(),
        ..mock_config(network_id)
    })
}

/// Deploys a fixed-supply token at [`TEST_TOKEN`] and gives `holder` `amount`.
pub fn mock_token(world: &mut World, holder: Address, amount: U256) -> Address {
    world
        .deploy_token(TEST_TOKEN, TokenMetadata::new("Mock Token", "MOCK", 18), None)
        .unwrap();
    world.token_mut(TEST_TOKEN).unwrap().set_balance(holder, amount);
    TEST_TOKEN
}

pub fn mock_asset_leaf(
    origin_network: NetworkId,
    origin_token: Address,
    destination_network: NetworkId,
    destination_address: Address,
    amount: U256,
    metadata: &Bytes,
) -> DepositLeaf {
    DepositLeaf {
        leaf_type: LeafType::Asset,
        origin_network,
        origin_address: origin_token,
        destination_network,
        destination_address,
        amount,
        metadata_hash: keccak256(metadata),
    }
}

pub fn mock_message_leaf(
    origin_network: NetworkId,
    sender: Address,
    destination_network: NetworkId,
    destination_address: Address,
    amount: U256,
    metadata: &Bytes,
) -> DepositLeaf {
    DepositLeaf {
        leaf_type: LeafType::Message,
        ..mock_asset_leaf(
            origin_network,
            sender,
            destination_network,
            destination_address,
            amount,
            metadata,
        )
    }
}

impl TestChain {
    /// Splits the chain into the bridge and a context for `sender`.
    pub fn split(&mut self, sender: Address, value: U256) -> (&mut Bridge, Context<'_>) {
        (
            &mut self.bridge,
            Context::new(&mut self.world, &mut self.global_exit_root, sender, value),
        )
    }

    /// Deploys the wrapped token of `(origin_network, origin_token)` as a
    /// claim would, and mints `amount` to `holder`.
    pub fn mock_wrapped_token(
        &mut self,
        origin_network: NetworkId,
        origin_token: Address,
        holder: Address,
        amount: U256,
    ) -> Address {
        let info = TokenInformation::new(origin_network, origin_token);
        let wrapped = deploy_wrapped_token(
            &mut self.world,
            self.bridge.address(),
            info.hash(),
            TokenMetadata::new("Wrapped", "WRP", 18),
        )
        .unwrap();
        self.bridge.tokens.register(info, wrapped);
        self.world
            .token_mint(wrapped, self.bridge.address(), holder, amount)
            .unwrap();
        wrapped
    }

    /// Makes `deposits`, appended in order on `source_network`, provable on
    /// this chain and returns the claim of each.
    pub fn mock_deposits(
        &mut self,
        source_network: NetworkId,
        deposits: &[(DepositLeaf, Bytes)],
    ) -> Vec<ClaimArgs> {
        let local = SparseMerkleTree::from_leaves(deposits.iter().map(|(leaf, _)| leaf.hash()));
        let empty_proof = [B256::ZERO; TREE_DEPTH];

        let (mainnet_exit_root, rollup_exit_root, rollup_proof) =
            if source_network == MAINNET_NETWORK_ID {
                (local.root(), B256::ZERO, empty_proof)
            } else if self.bridge.network_id() == MAINNET_NETWORK_ID {
                self.global_exit_root
                    .update_rollup_exit_root(
                        &mut self.world,
                        TEST_ROLLUP_MANAGER,
                        source_network,
                        local.root(),
                    )
                    .unwrap();
                (
                    self.global_exit_root.last_mainnet_exit_root(),
                    self.global_exit_root.last_rollup_exit_root(),
                    self.global_exit_root
                        .rollup_exit_root_proof(source_network)
                        .unwrap(),
                )
            } else {
                let mut rollup = SparseMerkleTree::new();
                rollup.set(source_network - 1, local.root());
                (B256::ZERO, rollup.root(), rollup.proof(source_network - 1))
            };

        let root = calculate_global_exit_root(&mainnet_exit_root, &rollup_exit_root);
        if !self.global_exit_root.contains(&root) {
            self.global_exit_root
                .insert_global_exit_root(&mut self.world, TEST_GER_UPDATER, root)
                .unwrap();
        }

        deposits
            .iter()
            .enumerate()
            .map(|(position, (leaf, metadata))| {
                let leaf_index = position as u32;
                ClaimArgs {
                    smt_proof_local_exit_root: local.proof(leaf_index),
                    smt_proof_rollup_exit_root: rollup_proof,
                    global_index: GlobalIndex::new(leaf_index, source_network).encode(),
                    mainnet_exit_root,
                    rollup_exit_root,
                    origin_network: leaf.origin_network,
                    origin_address: leaf.origin_address,
                    destination_network: leaf.destination_network,
                    destination_address: leaf.destination_address,
                    amount: leaf.amount,
                    metadata: metadata.clone(),
                }
            })
            .collect()
    }
}

/// Message receiver recording every delivery; reverts while `fail` is set.
#[derive(Debug, Clone, Default)]
pub struct MockReceiver {
    pub fail: bool,
    pub received: Vec<(Address, NetworkId, Bytes, U256)>,
}

impl Contract for MockReceiver {
    fn call(&mut self, cx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Revert> {
        let message = IBridgeMessageReceiver::onMessageReceivedCall::abi_decode(input, true)
            .map_err(|_| Revert::reason("unknown function"))?;
        if self.fail {
            return Err(Revert::reason("receiver failed"));
        }
        self.received.push((
            message.originAddress,
            message.originNetwork,
            message.data,
            cx.value,
        ));
        Ok(Bytes::new())
    }
}
