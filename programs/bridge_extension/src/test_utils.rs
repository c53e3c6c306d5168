use alloy_primitives::{Address, Bytes, B256, U256};
use bridge::{
    common::events::BridgeEvent, Bridge, BridgeConfig, ClaimArgs, ClaimPolicy, Context,
    DepositLeaf, GlobalIndex,
};
use common::{
    merkle::{SparseMerkleTree, TREE_DEPTH},
    metadata::TokenMetadata,
    world::{CallContext, Contract, Revert, World},
    LeafType, NetworkId, MAINNET_NETWORK_ID,
};
use global_exit_root::{calculate_global_exit_root, GlobalExitRootConfig, GlobalExitRootManager};
use hex_literal::hex;

use crate::BridgeExtension;

pub const TEST_BRIDGE: Address = Address::new(hex!("2a3dd3eb832af982ec71669e178424b10dca2ede"));
pub const TEST_EXTENSION: Address = Address::new(hex!("64b20eb25aed030fd510ef93b9135278b152f6a6"));
pub const TEST_GLOBAL_EXIT_ROOT: Address =
    Address::new(hex!("580bda1e7a0cfae92fa7f6c20a3794f169ce3cfb"));
pub const TEST_ROLLUP_MANAGER: Address =
    Address::new(hex!("5132a183e9f3cb7c848b0aac5ae0c4f0491b7ab2"));
pub const TEST_GER_UPDATER: Address = Address::new(hex!("a41b04e1ac0c9a1b1f6d83c3e8b4ac27b24c2a3f"));
pub const TEST_BRIDGE_MANAGER: Address =
    Address::new(hex!("165bd8ac1a2f6e1fb3e0b0b8c2b3a4d9e7f60011"));
pub const TEST_GUARDIAN: Address = Address::new(hex!("6c4a0b9d7e2f14a8c3b5d6e7f8091a2b3c4d5e6f"));
pub const TEST_USER: Address = Address::new(hex!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
pub const TEST_TOKEN: Address = Address::new(hex!("5fbdb2315678afecb367f032d93f642f64180aa3"));

pub const TEST_TIMESTAMP: u64 = 1_700_000_000;

/// Ether rollup bridges start with, as in a rollup genesis.
const ROLLUP_BRIDGE_FLOAT: u64 = 1_000_000;

/// One chain with a bridge, its global exit root manager and the extension.
pub struct TestChain {
    pub world: World,
    pub global_exit_root: GlobalExitRootManager,
    pub bridge: Bridge,
    pub extension: BridgeExtension,
}

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

pub fn mock_chain_with(config: BridgeConfig) -> TestChain {
    let mut world = World::new(TEST_TIMESTAMP);
    let manager_config = if config.network_id == MAINNET_NETWORK_ID {
        GlobalExitRootConfig::mainnet(TEST_GLOBAL_EXIT_ROOT, config.address, TEST_ROLLUP_MANAGER)
    } else {
        world.set_balance(config.address, U256::from(ROLLUP_BRIDGE_FLOAT));
        GlobalExitRootConfig::network(TEST_GLOBAL_EXIT_ROOT, config.address, TEST_GER_UPDATER, None)
    };
    let bridge = Bridge::new(config, &mut world).unwrap();
    let extension = BridgeExtension::deploy(&mut world, TEST_EXTENSION, TEST_BRIDGE).unwrap();

    TestChain {
        world,
        global_exit_root: GlobalExitRootManager::new(manager_config),
        bridge,
        extension,
    }
}

pub fn mock_chain(network_id: NetworkId) -> TestChain {
    mock_chain_with(mock_config(network_id))
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

impl TestChain {
    /// Splits the chain into the bridge and a context for `sender`.
    pub fn split(&mut self, sender: Address, value: U256) -> (&mut Bridge, Context<'_>) {
        (
            &mut self.bridge,
            Context::new(&mut self.world, &mut self.global_exit_root, sender, value),
        )
    }

    /// Deploys a fixed-supply token at [`TEST_TOKEN`] and gives `holder` `amount`.
    pub fn mock_token(&mut self, holder: Address, amount: U256) -> Address {
        self.world
            .deploy_token(TEST_TOKEN, TokenMetadata::new("Mock Token", "MOCK", 18), None)
            .unwrap();
        self.world
            .token_mut(TEST_TOKEN)
            .unwrap()
            .set_balance(holder, amount);
        TEST_TOKEN
    }

    /// Claims a deposit of `amount` of `origin_token` from `origin_network` to
    /// `holder`, deploying its wrapped token.
    pub fn mock_wrapped_token(
        &mut self,
        origin_network: NetworkId,
        origin_token: Address,
        holder: Address,
        amount: U256,
    ) -> Address {
        let metadata = TokenMetadata::new("Wrapped", "WRP", 18).abi_encode();
        let leaf = DepositLeaf {
            leaf_type: LeafType::Asset,
            origin_network,
            origin_address: origin_token,
            destination_network: self.bridge.network_id(),
            destination_address: holder,
            amount,
            metadata_hash: alloy_primitives::keccak256(&metadata),
        };
        let claims = self.mock_deposits(origin_network, &[(leaf, metadata)]);
        let (bridge, ctx) = self.split(holder, U256::ZERO);
        bridge.claim_asset(ctx, claims[0].clone()).unwrap();
        self.bridge
            .get_token_wrapped_address(origin_network, origin_token)
            .unwrap()
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

/// Every deposit `from` made towards `to`, with the claim proving it there.
pub fn relay(from: &TestChain, to: &mut TestChain) -> Vec<(DepositLeaf, ClaimArgs)> {
    let deposits: Vec<(DepositLeaf, Bytes)> = from
        .world
        .decoded_logs::<BridgeEvent>(from.bridge.address())
        .into_iter()
        .map(|event| (DepositLeaf::from_event(&event).unwrap(), event.metadata))
        .collect();
    let claims = to.mock_deposits(from.bridge.network_id(), &deposits);

    let destination = to.bridge.network_id();
    deposits
        .into_iter()
        .map(|(leaf, _)| leaf)
        .zip(claims)
        .filter(|(leaf, _)| leaf.destination_network == destination)
        .collect()
}

/// Call target recording every call. Reverts while `fail` is set; pulls its
/// whole allowance of `pull` from the caller.
#[derive(Debug, Clone, Default)]
pub struct MockTarget {
    pub fail: bool,
    pub pull: Option<Address>,
    pub calls: Vec<(Address, U256, Bytes)>,
}

impl MockTarget {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn pulling(token: Address) -> Self {
        Self {
            pull: Some(token),
            ..Default::default()
        }
    }
}

impl Contract for MockTarget {
    fn call(&mut self, cx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Revert> {
        if self.fail {
            return Err(Revert::reason("target failed"));
        }
        if let Some(token) = self.pull {
            let allowance = cx
                .world
                .token(token)
                .map(|ledger| ledger.allowance(cx.sender, cx.this))
                .unwrap_or_default();
            cx.world
                .token_transfer_from(token, cx.this, cx.sender, cx.this, allowance)?;
        }
        self.calls
            .push((cx.sender, cx.value, Bytes::copy_from_slice(input)));
        Ok(Bytes::new())
    }
}
