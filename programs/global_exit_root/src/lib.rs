//! Global exit root manager.
//!
//! On the aggregating chain (mainnet) the manager combines the bridge's local
//! exit root with the rollup exit root, a Merkle aggregate over every L2's
//! latest local exit root, and keeps a timestamped history of every global
//! exit root it ever produced. On L2 chains the manager holds the global exit
//! roots injected from mainnet, which claims on that chain verify against.

pub mod config;
pub mod error;
pub mod events;
pub mod state;

pub use config::*;
pub use error::*;
pub use state::*;

use alloy_primitives::{keccak256, Address, B256};
use common::{
    merkle::{SmtProof, SparseMerkleTree},
    world::World,
    NetworkId, MAINNET_NETWORK_ID,
};
use tracing::{debug, info};

use events::{InsertGlobalExitRoot, RemoveGlobalExitRoot, UpdateL1InfoTree};

/// `keccak256(mainnetExitRoot ‖ rollupExitRoot)`.
pub fn calculate_global_exit_root(mainnet_exit_root: &B256, rollup_exit_root: &B256) -> B256 {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(mainnet_exit_root.as_slice());
    data[32..].copy_from_slice(rollup_exit_root.as_slice());
    keccak256(data)
}

#[derive(Debug, Clone)]
pub struct GlobalExitRootManager {
    config: GlobalExitRootConfig,
    last_mainnet_exit_root: B256,
    last_rollup_exit_root: B256,
    /// Local exit root last pushed by this chain's bridge.
    last_local_exit_root: B256,
    rollup_exit_tree: SparseMerkleTree,
    history: GlobalExitRootHistory,
}

impl GlobalExitRootManager {
    pub fn new(config: GlobalExitRootConfig) -> Self {
        Self {
            config,
            last_mainnet_exit_root: B256::ZERO,
            last_rollup_exit_root: B256::ZERO,
            last_local_exit_root: B256::ZERO,
            rollup_exit_tree: SparseMerkleTree::new(),
            history: GlobalExitRootHistory::default(),
        }
    }

    pub fn config(&self) -> &GlobalExitRootConfig {
        &self.config
    }

    pub fn address(&self) -> Address {
        self.config.address
    }

    /// Hook called by the bridge with its new local exit root.
    ///
    /// On mainnet this is [`Self::update_mainnet_exit_root`]; on an L2 the
    /// root is only recorded for the rollup collaborator to pick up.
    pub fn update_exit_root(
        &mut self,
        world: &mut World,
        caller: Address,
        new_root: B256,
    ) -> Result<(), GlobalExitRootError> {
        match self.config.kind {
            ManagerKind::Mainnet { .. } => self.update_mainnet_exit_root(world, caller, new_root),
            ManagerKind::Network { .. } => {
                self.check_bridge(caller)?;
                self.last_local_exit_root = new_root;
                debug!(%new_root, "local exit root recorded");
                Ok(())
            }
        }
    }

    /// Records mainnet's local exit root and appends the resulting global root.
    pub fn update_mainnet_exit_root(
        &mut self,
        world: &mut World,
        caller: Address,
        new_root: B256,
    ) -> Result<(), GlobalExitRootError> {
        if !matches!(self.config.kind, ManagerKind::Mainnet { .. }) {
            return Err(GlobalExitRootError::NotAggregator);
        }
        self.check_bridge(caller)?;

        self.last_mainnet_exit_root = new_root;
        self.last_local_exit_root = new_root;
        self.append_global_exit_root(world);
        Ok(())
    }

    /// Sets the leaf of `network_id` in the rollup exit tree to `local_root`
    /// and appends the resulting global root.
    pub fn update_rollup_exit_root(
        &mut self,
        world: &mut World,
        caller: Address,
        network_id: NetworkId,
        local_root: B256,
    ) -> Result<(), GlobalExitRootError> {
        let ManagerKind::Mainnet { rollup_manager } = self.config.kind else {
            return Err(GlobalExitRootError::NotAggregator);
        };
        if caller != rollup_manager {
            return Err(GlobalExitRootError::OnlyRollupManager);
        }
        let index = rollup_index(network_id)?;

        self.rollup_exit_tree.set(index, local_root);
        self.last_rollup_exit_root = self.rollup_exit_tree.root();
        debug!(
            network_id,
            %local_root,
            rollup_exit_root = %self.last_rollup_exit_root,
            "rollup exit root updated"
        );
        self.append_global_exit_root(world);
        Ok(())
    }

    /// Injects a global exit root produced on mainnet into an L2 manager.
    pub fn insert_global_exit_root(
        &mut self,
        world: &mut World,
        caller: Address,
        root: B256,
    ) -> Result<(), GlobalExitRootError> {
        let ManagerKind::Network { updater, .. } = self.config.kind else {
            return Err(GlobalExitRootError::NotNetworkManager);
        };
        if caller != updater {
            return Err(GlobalExitRootError::OnlyGlobalExitRootUpdater);
        }
        if self.history.contains(&root) {
            return Err(GlobalExitRootError::GlobalExitRootAlreadySet(root));
        }

        self.history.push(GlobalExitRootEntry {
            global_exit_root: root,
            exit_roots: None,
            timestamp: world.timestamp(),
        });
        world.emit_event(
            self.config.address,
            &InsertGlobalExitRoot {
                newGlobalExitRoot: root,
            },
        );
        debug!(%root, "global exit root inserted");
        Ok(())
    }

    /// Invalidates injected global exit roots. All of them must exist,
    /// otherwise nothing is removed.
    pub fn remove_global_exit_roots(
        &mut self,
        world: &mut World,
        caller: Address,
        roots: &[B256],
    ) -> Result<(), GlobalExitRootError> {
        let ManagerKind::Network { remover, .. } = self.config.kind else {
            return Err(GlobalExitRootError::NotNetworkManager);
        };
        if Some(caller) != remover {
            return Err(GlobalExitRootError::OnlyGlobalExitRootRemover);
        }
        if let Some(missing) = roots.iter().find(|root| !self.history.contains(root)) {
            return Err(GlobalExitRootError::GlobalExitRootNotFound(*missing));
        }

        for root in roots {
            self.history.invalidate(root);
            world.emit_event(
                self.config.address,
                &RemoveGlobalExitRoot {
                    removedGlobalExitRoot: *root,
                },
            );
        }
        info!(count = roots.len(), "global exit roots removed");
        Ok(())
    }

    /// Latest global root that is still valid for claims; zero if none.
    pub fn get_last_global_exit_root(&self) -> B256 {
        self.history
            .last()
            .map(|entry| entry.global_exit_root)
            .unwrap_or_default()
    }

    /// Timestamp at which `root` was recorded, if it is a valid global root.
    pub fn global_exit_root_map(&self, root: &B256) -> Option<u64> {
        self.history.timestamp_of(root)
    }

    pub fn contains(&self, root: &B256) -> bool {
        self.history.contains(root)
    }

    pub fn history(&self) -> &[GlobalExitRootEntry] {
        self.history.entries()
    }

    pub fn last_mainnet_exit_root(&self) -> B256 {
        self.last_mainnet_exit_root
    }

    pub fn last_rollup_exit_root(&self) -> B256 {
        self.last_rollup_exit_root
    }

    pub fn last_local_exit_root(&self) -> B256 {
        self.last_local_exit_root
    }

    /// Local exit root last reported for `network_id`.
    pub fn rollup_local_exit_root(&self, network_id: NetworkId) -> Result<B256, GlobalExitRootError> {
        Ok(self.rollup_exit_tree.get(rollup_index(network_id)?))
    }

    /// Proof of `network_id`'s leaf under the current rollup exit root.
    pub fn rollup_exit_root_proof(
        &self,
        network_id: NetworkId,
    ) -> Result<SmtProof, GlobalExitRootError> {
        Ok(self.rollup_exit_tree.proof(rollup_index(network_id)?))
    }

    fn check_bridge(&self, caller: Address) -> Result<(), GlobalExitRootError> {
        if caller != self.config.bridge {
            return Err(GlobalExitRootError::OnlyAllowedContracts);
        }
        Ok(())
    }

    fn append_global_exit_root(&mut self, world: &mut World) {
        let global_exit_root =
            calculate_global_exit_root(&self.last_mainnet_exit_root, &self.last_rollup_exit_root);
        if self.history.contains(&global_exit_root) {
            return;
        }

        self.history.push(GlobalExitRootEntry {
            global_exit_root,
            exit_roots: Some(ExitRoots {
                mainnet_exit_root: self.last_mainnet_exit_root,
                rollup_exit_root: self.last_rollup_exit_root,
            }),
            timestamp: world.timestamp(),
        });
        world.emit_event(
            self.config.address,
            &UpdateL1InfoTree {
                mainnetExitRoot: self.last_mainnet_exit_root,
                rollupExitRoot: self.last_rollup_exit_root,
            },
        );
        info!(
            %global_exit_root,
            count = self.history.len(),
            "global exit root appended"
        );
    }
}

/// Leaf index of an L2 in the rollup exit tree.
pub fn rollup_index(network_id: NetworkId) -> Result<u32, GlobalExitRootError> {
    if network_id == MAINNET_NETWORK_ID {
        return Err(GlobalExitRootError::InvalidRollupNetwork(network_id));
    }
    Ok(network_id - 1)
}
