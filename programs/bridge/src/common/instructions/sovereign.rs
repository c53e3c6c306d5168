use alloy_primitives::U256;
use tracing::warn;

use crate::{
    claim::GlobalIndex,
    common::{
        events::{SetClaim, UnsetClaim},
        BridgeError, ClaimPolicy, Context, Role,
    },
    Bridge,
};

/// Clears the claimed bit of every leaf named by `global_indexes`, so the
/// deposits can be claimed again. All-or-nothing.
pub fn unset_multiple_claims_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
    global_indexes: &[U256],
) -> Result<(), BridgeError> {
    check_sovereign(bridge, &ctx)?;

    let leaves = decode_all(global_indexes)?;
    let mut claims = bridge.claims.clone();
    for index in &leaves {
        claims.unset_claimed(index.leaf_index, index.source_network)?;
    }
    bridge.claims = claims;

    for index in &leaves {
        ctx.world.emit_event(
            bridge.address(),
            &UnsetClaim {
                leafIndex: index.leaf_index,
                sourceNetwork: index.source_network,
            },
        );
    }
    warn!(count = leaves.len(), "claims unset");
    Ok(())
}

/// Marks the leaves named by `global_indexes` as claimed without executing
/// them. All-or-nothing.
pub fn set_multiple_claims_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
    global_indexes: &[U256],
) -> Result<(), BridgeError> {
    check_sovereign(bridge, &ctx)?;

    let leaves = decode_all(global_indexes)?;
    let mut claims = bridge.claims.clone();
    for index in &leaves {
        claims.set_and_check_claimed(index.leaf_index, index.source_network)?;
    }
    bridge.claims = claims;

    for index in &leaves {
        ctx.world.emit_event(
            bridge.address(),
            &SetClaim {
                leafIndex: index.leaf_index,
                sourceNetwork: index.source_network,
            },
        );
    }
    warn!(count = leaves.len(), "claims set");
    Ok(())
}

fn check_sovereign(bridge: &Bridge, ctx: &Context<'_>) -> Result<(), BridgeError> {
    if bridge.config.claim_policy != ClaimPolicy::Sovereign {
        return Err(BridgeError::OnlySovereignPolicy);
    }
    bridge.roles.check(Role::GlobalExitRootRemover, ctx.sender)
}

fn decode_all(global_indexes: &[U256]) -> Result<Vec<GlobalIndex>, BridgeError> {
    global_indexes
        .iter()
        .map(|index| GlobalIndex::decode(*index))
        .collect()
}
