use alloy_primitives::{Address, U256};
use common::world::{World, WorldError};
use global_exit_root::GlobalExitRootManager;

/// Chain state a bridge instruction runs against, plus its caller.
///
/// `value` is the native amount attached by `sender`; it stays with the sender
/// until the instruction collects it.
pub struct Context<'a> {
    pub world: &'a mut World,
    pub global_exit_root: &'a mut GlobalExitRootManager,
    pub sender: Address,
    pub value: U256,
}

impl<'a> Context<'a> {
    pub fn new(
        world: &'a mut World,
        global_exit_root: &'a mut GlobalExitRootManager,
        sender: Address,
        value: U256,
    ) -> Self {
        Self {
            world,
            global_exit_root,
            sender,
            value,
        }
    }

    /// Context for a nested call made by `sender` on the same chain.
    pub fn reborrow(&mut self, sender: Address, value: U256) -> Context<'_> {
        Context {
            world: &mut *self.world,
            global_exit_root: &mut *self.global_exit_root,
            sender,
            value,
        }
    }

    /// Moves the attached value from the sender to `to`.
    pub fn collect_value(&mut self, to: Address) -> Result<(), WorldError> {
        if self.value.is_zero() {
            return Ok(());
        }
        self.world.transfer_native(self.sender, to, self.value)
    }
}
