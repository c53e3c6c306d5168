//! Off-chain view of every bridge: replays `BridgeEvent` logs, rebuilds each
//! network's exit tree and builds the claim of any settled deposit.

use std::collections::BTreeMap;

use alloy_primitives::{Bytes, B256};
use alloy_sol_types::SolEvent;
use bridge::{common::events::BridgeEvent, ClaimArgs, DepositLeaf, GlobalIndex};
use common::{
    merkle::{ExitTree, SparseMerkleTree, TREE_DEPTH},
    NetworkId, MAINNET_NETWORK_ID,
};
use global_exit_root::GlobalExitRootManager;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{Chain, SandboxError};

/// A deposit as announced by its `BridgeEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deposit {
    pub network_id: NetworkId,
    pub deposit_count: u32,
    pub leaf: DepositLeaf,
    pub metadata: Bytes,
}

#[derive(Debug, Clone, Default)]
struct NetworkIndex {
    deposits: Vec<Deposit>,
    /// Position in the chain's log up to which events were read.
    cursor: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Indexer {
    networks: BTreeMap<NetworkId, NetworkIndex>,
}

impl Indexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the deposits `chain` announced since the last call. Returns how
    /// many were found.
    pub fn index(&mut self, chain: &Chain) -> usize {
        let network_id = chain.network_id();
        let bridge = chain.bridge.address();
        let index = self.networks.entry(network_id).or_default();
        let logs = chain.world.logs();

        let before = index.deposits.len();
        for log in logs.iter().skip(index.cursor) {
            if log.address != bridge {
                continue;
            }
            let Ok(event) = BridgeEvent::decode_log_data(&log.data, true) else {
                continue;
            };
            let Some(leaf) = DepositLeaf::from_event(&event) else {
                warn!(network_id, leaf_type = event.leafType, "unknown leaf type");
                continue;
            };
            if event.depositCount as usize != index.deposits.len() {
                warn!(
                    network_id,
                    deposit_count = event.depositCount,
                    expected = index.deposits.len(),
                    "deposit out of sequence"
                );
            }
            index.deposits.push(Deposit {
                network_id,
                deposit_count: event.depositCount,
                leaf,
                metadata: event.metadata,
            });
        }
        index.cursor = logs.len();

        let found = index.deposits.len() - before;
        if found > 0 {
            debug!(network_id, found, "deposits indexed");
        }
        found
    }

    /// Deposits made on `network_id`, in leaf order.
    pub fn deposits(&self, network_id: NetworkId) -> &[Deposit] {
        self.networks
            .get(&network_id)
            .map(|index| index.deposits.as_slice())
            .unwrap_or_default()
    }

    pub fn deposit(&self, network_id: NetworkId, leaf_index: u32) -> Result<&Deposit, SandboxError> {
        self.deposits(network_id)
            .get(leaf_index as usize)
            .ok_or(SandboxError::DepositNotFound {
                network_id,
                leaf_index,
            })
    }

    /// Deposits of every network bound for `destination`.
    pub fn deposits_to(&self, destination: NetworkId) -> impl Iterator<Item = &Deposit> {
        self.networks
            .values()
            .flat_map(|index| index.deposits.iter())
            .filter(move |deposit| deposit.leaf.destination_network == destination)
    }

    /// Builds the claim of deposit `leaf_index` of `network_id` against the
    /// latest global exit root of the `mainnet` manager.
    ///
    /// The deposit must be under the exit root mainnet last recorded for its
    /// network; later deposits outside that root are ignored.
    pub fn claim_args(
        &self,
        network_id: NetworkId,
        leaf_index: u32,
        mainnet: &GlobalExitRootManager,
    ) -> Result<ClaimArgs, SandboxError> {
        let deposit = self.deposit(network_id, leaf_index)?;
        let settled_root = if network_id == MAINNET_NETWORK_ID {
            mainnet.last_mainnet_exit_root()
        } else {
            mainnet.rollup_local_exit_root(network_id)?
        };
        let settled_count = self
            .settled_deposit_count(network_id, settled_root)
            .filter(|count| *count > leaf_index)
            .ok_or(SandboxError::DepositNotSettled {
                network_id,
                leaf_index,
            })?;

        let local_tree = SparseMerkleTree::from_leaves(
            self.deposits(network_id)[..settled_count as usize]
                .iter()
                .map(|deposit| deposit.leaf.hash()),
        );
        let smt_proof_rollup_exit_root = if network_id == MAINNET_NETWORK_ID {
            [B256::ZERO; TREE_DEPTH]
        } else {
            mainnet.rollup_exit_root_proof(network_id)?
        };

        let leaf = &deposit.leaf;
        Ok(ClaimArgs {
            smt_proof_local_exit_root: local_tree.proof(leaf_index),
            smt_proof_rollup_exit_root,
            global_index: GlobalIndex::new(leaf_index, network_id).encode(),
            mainnet_exit_root: mainnet.last_mainnet_exit_root(),
            rollup_exit_root: mainnet.last_rollup_exit_root(),
            origin_network: leaf.origin_network,
            origin_address: leaf.origin_address,
            destination_network: leaf.destination_network,
            destination_address: leaf.destination_address,
            amount: leaf.amount,
            metadata: deposit.metadata.clone(),
        })
    }

    /// Number of deposits of `network_id` whose exit tree has root `root`.
    fn settled_deposit_count(&self, network_id: NetworkId, root: B256) -> Option<u32> {
        let mut tree = ExitTree::new();
        if tree.root() == root {
            return Some(0);
        }
        for deposit in self.deposits(network_id) {
            let (index, new_root) = tree.append_leaf(deposit.leaf.hash()).ok()?;
            if new_root == root {
                return Some(index + 1);
            }
        }
        None
    }
}
