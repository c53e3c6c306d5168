use common::{
    merkle::{calculate_root, verify_merkle_proof},
    LeafType,
};
use global_exit_root::{calculate_global_exit_root, GlobalExitRootManager};
use tracing::debug;

use crate::{
    claim::{ClaimArgs, GlobalIndex},
    common::BridgeError,
    Bridge,
};

impl Bridge {
    /// Checks that the claimed leaf exists under a known global exit root
    /// and marks it as claimed.
    pub(crate) fn verify_leaf(
        &mut self,
        global_exit_root: &GlobalExitRootManager,
        args: &ClaimArgs,
        leaf_type: LeafType,
    ) -> Result<GlobalIndex, BridgeError> {
        self.check_not_emergency_state()?;
        if args.destination_network != self.network_id() {
            return Err(BridgeError::DestinationNetworkInvalid(
                args.destination_network,
            ));
        }

        let root = calculate_global_exit_root(&args.mainnet_exit_root, &args.rollup_exit_root);
        if !global_exit_root.contains(&root) {
            return Err(BridgeError::GlobalExitRootInvalid(root));
        }

        let index = GlobalIndex::decode(args.global_index)?;
        let leaf = args.leaf(leaf_type).hash();
        let proven = match index.rollup_index() {
            None => verify_merkle_proof(
                &leaf,
                &args.smt_proof_local_exit_root,
                index.leaf_index,
                &args.mainnet_exit_root,
            ),
            Some(rollup_index) => {
                let local_exit_root =
                    calculate_root(&leaf, &args.smt_proof_local_exit_root, index.leaf_index);
                verify_merkle_proof(
                    &local_exit_root,
                    &args.smt_proof_rollup_exit_root,
                    rollup_index,
                    &args.rollup_exit_root,
                )
            }
        };
        if !proven {
            return Err(BridgeError::InvalidProof);
        }

        self.claims
            .set_and_check_claimed(index.leaf_index, index.source_network)?;
        debug!(
            leaf_index = index.leaf_index,
            source_network = index.source_network,
            "leaf verified"
        );
        Ok(index)
    }
}
