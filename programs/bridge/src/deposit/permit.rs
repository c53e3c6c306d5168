use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use common::{solidity::IERC20Permit, world::World};

use crate::common::BridgeError;

sol! {
    /// Permit variant of DAI-like tokens.
    interface IDaiPermit {
        function permit(
            address holder,
            address spender,
            uint256 nonce,
            uint256 expiry,
            bool allowed,
            uint8 v,
            bytes32 r,
            bytes32 s
        ) external;
    }
}

/// Applies the permit carried by a token deposit. `permit_data` is the full
/// ABI-encoded `permit` call, selector included.
pub fn apply_permit(
    world: &mut World,
    token: Address,
    owner: Address,
    bridge: Address,
    amount: U256,
    permit_data: &[u8],
) -> Result<(), BridgeError> {
    let selector = permit_data
        .get(..4)
        .ok_or(BridgeError::NotValidSignature)?;

    if selector == IERC20Permit::permitCall::SELECTOR {
        let permit = IERC20Permit::permitCall::abi_decode(permit_data, true)
            .map_err(|_| BridgeError::NotValidSignature)?;
        if permit.owner != owner {
            return Err(BridgeError::NotValidOwner);
        }
        if permit.spender != bridge {
            return Err(BridgeError::NotValidSpender);
        }
        if permit.value != amount {
            return Err(BridgeError::NotValidAmount);
        }
        world.token_permit(token, owner, bridge, permit.value, permit.deadline)?;
        return Ok(());
    }

    if selector == IDaiPermit::permitCall::SELECTOR {
        let permit = IDaiPermit::permitCall::abi_decode(permit_data, true)
            .map_err(|_| BridgeError::NotValidSignature)?;
        if permit.holder != owner {
            return Err(BridgeError::NotValidOwner);
        }
        if permit.spender != bridge {
            return Err(BridgeError::NotValidSpender);
        }
        let allowance = if permit.allowed { U256::MAX } else { U256::ZERO };
        // Zero expiry never expires.
        let deadline = if permit.expiry.is_zero() {
            U256::MAX
        } else {
            permit.expiry
        };
        world.token_permit(token, owner, bridge, allowance, deadline)?;
        return Ok(());
    }

    Err(BridgeError::NotValidSignature)
}
