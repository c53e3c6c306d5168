use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    common::{events::RoleTransferred, BridgeConfig, BridgeError, Context},
    Bridge,
};

/// Privileged capabilities of a bridge instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Role {
    BridgeManager = 0,
    GlobalExitRootRemover = 1,
    EmergencyGuardian = 2,
}

/// Current holders of each [`Role`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roles {
    pub bridge_manager: Address,
    pub global_exit_root_remover: Option<Address>,
    pub emergency_guardian: Address,
}

impl Roles {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            bridge_manager: config.bridge_manager,
            global_exit_root_remover: config.global_exit_root_remover,
            emergency_guardian: config.emergency_guardian,
        }
    }

    pub fn holder(&self, role: Role) -> Option<Address> {
        match role {
            Role::BridgeManager => Some(self.bridge_manager),
            Role::GlobalExitRootRemover => self.global_exit_root_remover,
            Role::EmergencyGuardian => Some(self.emergency_guardian),
        }
    }

    pub fn check(&self, role: Role, caller: Address) -> Result<(), BridgeError> {
        if self.holder(role) == Some(caller) {
            return Ok(());
        }
        Err(match role {
            Role::BridgeManager => BridgeError::OnlyBridgeManager,
            Role::GlobalExitRootRemover => BridgeError::OnlyGlobalExitRootRemover,
            Role::EmergencyGuardian => BridgeError::OnlyEmergencyGuardian,
        })
    }
}

/// Hands `role` over to `new_holder`.
/// Only the current holder can call this function
pub fn transfer_role_handler(
    bridge: &mut Bridge,
    ctx: Context<'_>,
    role: Role,
    new_holder: Address,
) -> Result<(), BridgeError> {
    bridge.roles.check(role, ctx.sender)?;
    if new_holder.is_zero() {
        return Err(BridgeError::InvalidZeroAddress);
    }

    match role {
        Role::BridgeManager => bridge.roles.bridge_manager = new_holder,
        Role::GlobalExitRootRemover => bridge.roles.global_exit_root_remover = Some(new_holder),
        Role::EmergencyGuardian => bridge.roles.emergency_guardian = new_holder,
    }

    ctx.world.emit_event(
        bridge.address(),
        &RoleTransferred {
            role: role as u8,
            previousHolder: ctx.sender,
            newHolder: new_holder,
        },
    );
    info!(?role, %new_holder, "role transferred");
    Ok(())
}
