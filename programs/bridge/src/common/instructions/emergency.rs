use tracing::warn;

use crate::{
    common::{
        events::{EmergencyStateActivated, EmergencyStateDeactivated},
        BridgeError, Context, Role,
    },
    Bridge,
};

/// Halts deposits and claims.
/// Only the emergency guardian can call this function
pub fn activate_emergency_state_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
) -> Result<(), BridgeError> {
    bridge.roles.check(Role::EmergencyGuardian, ctx.sender)?;
    if bridge.emergency_state {
        return Err(BridgeError::BridgePaused);
    }

    bridge.emergency_state = true;
    ctx.world
        .emit_event(bridge.address(), &EmergencyStateActivated {});
    warn!(network_id = bridge.network_id(), "emergency state activated");
    Ok(())
}

/// Resumes deposits and claims.
/// Only the emergency guardian can call this function
pub fn deactivate_emergency_state_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
) -> Result<(), BridgeError> {
    bridge.roles.check(Role::EmergencyGuardian, ctx.sender)?;
    if !bridge.emergency_state {
        return Err(BridgeError::BridgeNotPaused);
    }

    bridge.emergency_state = false;
    ctx.world
        .emit_event(bridge.address(), &EmergencyStateDeactivated {});
    warn!(network_id = bridge.network_id(), "emergency state deactivated");
    Ok(())
}
