use std::collections::BTreeMap;

use alloy_primitives::B256;
use bridge::ClaimArgs;
use common::{LeafType, NetworkId, MAINNET_NETWORK_ID};
use tracing::{debug, info, warn};

use crate::{config::SandboxConfig, indexer::Indexer, Chain, SandboxError};

/// Mainnet and its rollups, plus the relayer moving roots and claims between
/// them.
#[derive(Debug, Clone)]
pub struct Sandbox {
    config: SandboxConfig,
    chains: BTreeMap<NetworkId, Chain>,
    indexer: Indexer,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Result<Self, SandboxError> {
        config.validate()?;
        let chains = config
            .networks
            .iter()
            .map(|network| Ok((network.network_id, Chain::new(&config, network)?)))
            .collect::<Result<BTreeMap<_, _>, SandboxError>>()?;
        info!(networks = chains.len(), "sandbox started");

        Ok(Self {
            config,
            chains,
            indexer: Indexer::new(),
        })
    }

    /// Mainnet plus `rollups` ether rollups with the development addresses.
    pub fn local(rollups: u32) -> Result<Self, SandboxError> {
        Self::new(SandboxConfig::local(rollups))
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn indexer(&self) -> &Indexer {
        &self.indexer
    }

    pub fn chain(&self, network_id: NetworkId) -> Result<&Chain, SandboxError> {
        self.chains
            .get(&network_id)
            .ok_or(SandboxError::UnknownNetwork(network_id))
    }

    pub fn chain_mut(&mut self, network_id: NetworkId) -> Result<&mut Chain, SandboxError> {
        self.chains
            .get_mut(&network_id)
            .ok_or(SandboxError::UnknownNetwork(network_id))
    }

    pub fn mainnet(&self) -> Result<&Chain, SandboxError> {
        self.chain(MAINNET_NETWORK_ID)
    }

    /// Settles what happened since the last sync:
    /// - each rollup's current local exit root is verified into mainnet,
    /// - mainnet's latest global exit root is injected into every rollup,
    /// - new deposits of every network are indexed.
    ///
    /// Mainnet deposits are only covered once mainnet's own exit root was
    /// pushed, by a forced update or `update_global_exit_root`.
    pub fn sync(&mut self) -> Result<(), SandboxError> {
        let rollup_roots: Vec<(NetworkId, B256)> = self
            .chains
            .values()
            .filter(|chain| chain.network_id() != MAINNET_NETWORK_ID)
            .filter(|chain| chain.bridge.deposit_count() > 0)
            .map(|chain| (chain.network_id(), chain.bridge.get_root()))
            .collect();

        let rollup_manager = self.config.roles.rollup_manager;
        let mainnet = self.chain_mut(MAINNET_NETWORK_ID)?;
        for (network_id, root) in rollup_roots {
            if mainnet.global_exit_root.rollup_local_exit_root(network_id)? == root {
                continue;
            }
            mainnet.transact(|chain| {
                chain.global_exit_root.update_rollup_exit_root(
                    &mut chain.world,
                    rollup_manager,
                    network_id,
                    root,
                )
            })?;
            debug!(network_id, %root, "rollup exit root settled");
        }
        let global_exit_root = mainnet.global_exit_root.get_last_global_exit_root();

        let updater = self.config.roles.global_exit_root_updater;
        if !global_exit_root.is_zero() {
            for chain in self.chains.values_mut() {
                if chain.network_id() == MAINNET_NETWORK_ID
                    || chain.global_exit_root.contains(&global_exit_root)
                {
                    continue;
                }
                chain.transact(|chain| {
                    chain.global_exit_root.insert_global_exit_root(
                        &mut chain.world,
                        updater,
                        global_exit_root,
                    )
                })?;
                debug!(
                    network_id = chain.network_id(),
                    %global_exit_root,
                    "global exit root injected"
                );
            }
        }

        for chain in self.chains.values() {
            self.indexer.index(chain);
        }
        Ok(())
    }

    /// Claim of deposit `leaf_index` made on `source_network`, proven against
    /// mainnet's latest global exit root.
    pub fn claim_args(
        &self,
        source_network: NetworkId,
        leaf_index: u32,
    ) -> Result<ClaimArgs, SandboxError> {
        self.indexer
            .claim_args(source_network, leaf_index, &self.mainnet()?.global_exit_root)
    }

    /// Claims deposit `leaf_index` of `source_network` on its destination,
    /// paid by the claim sponsor.
    pub fn claim(&mut self, source_network: NetworkId, leaf_index: u32) -> Result<(), SandboxError> {
        let leaf = self.indexer.deposit(source_network, leaf_index)?.leaf;
        let args = self.claim_args(source_network, leaf_index)?;
        let sponsor = self.config.claim_sponsor;

        let destination = self.chain_mut(leaf.destination_network)?;
        match leaf.leaf_type {
            LeafType::Asset => destination.claim_asset(sponsor, args)?,
            LeafType::Message => destination.claim_message(sponsor, args)?,
        }
        info!(
            source_network,
            leaf_index,
            destination_network = leaf.destination_network,
            leaf_type = ?leaf.leaf_type,
            "deposit claimed"
        );
        Ok(())
    }

    /// Claims every settled deposit bound for `destination` that is not
    /// claimed yet, in deposit order. Returns the `(source network, leaf
    /// index)` of each successful claim; failing claims stay pending.
    pub fn claim_all(
        &mut self,
        destination: NetworkId,
    ) -> Result<Vec<(NetworkId, u32)>, SandboxError> {
        let chain = self.chain(destination)?;
        let pending: Vec<(NetworkId, u32)> = self
            .indexer
            .deposits_to(destination)
            .filter(|deposit| {
                !chain
                    .bridge
                    .is_claimed(deposit.deposit_count, deposit.network_id)
            })
            .map(|deposit| (deposit.network_id, deposit.deposit_count))
            .collect();

        let mut claimed = Vec::new();
        for (source_network, leaf_index) in pending {
            match self.claim(source_network, leaf_index) {
                Ok(()) => claimed.push((source_network, leaf_index)),
                Err(SandboxError::DepositNotSettled { .. }) => {}
                Err(error) => warn!(source_network, leaf_index, %error, "claim failed"),
            }
        }
        Ok(claimed)
    }

    /// Deposits made on `network_id` as JSON, as a bridge service lists them.
    pub fn bridges_json(&self, network_id: NetworkId) -> Result<String, SandboxError> {
        self.chain(network_id)?;
        Ok(serde_json::to_string_pretty(self.indexer.deposits(network_id))?)
    }

    /// The claim of a deposit as JSON.
    pub fn claim_proof_json(
        &self,
        source_network: NetworkId,
        leaf_index: u32,
    ) -> Result<String, SandboxError> {
        Ok(serde_json::to_string_pretty(
            &self.claim_args(source_network, leaf_index)?,
        )?)
    }
}
