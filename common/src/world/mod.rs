//! In-process model of one EVM-like chain: native balances, ERC-20 ledgers,
//! deployed contracts, an event log and the block timestamp.
//!
//! Contract calls are transactional: [`World::call`] snapshots the whole world
//! and restores it when the callee reverts.

mod contract;
mod token;

pub use contract::*;
pub use token::*;

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, Bytes, Log, LogData, U256};
use alloy_sol_types::{SolEvent, SolInterface, SolValue};
use thiserror::Error;
use tracing::trace;

use crate::{metadata::TokenMetadata, solidity::IERC20};

/// A value transfer and/or code invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct World {
    timestamp: u64,
    balances: BTreeMap<Address, U256>,
    tokens: BTreeMap<Address, TokenLedger>,
    contracts: BTreeMap<Address, Box<dyn Contract>>,
    /// Every address that ever received code, so that a CREATE2 address cannot
    /// be deployed twice.
    deployed: BTreeSet<Address>,
    logs: Vec<Log>,
}

impl World {
    pub fn new(timestamp: u64) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.timestamp += seconds;
    }

    // Native currency

    pub fn balance(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    /// Seeds a native balance (genesis allocations, faucets).
    pub fn set_balance(&mut self, owner: Address, amount: U256) {
        self.balances.insert(owner, amount);
    }

    /// Moves native currency without running any code at `to`.
    pub fn transfer_native(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), WorldError> {
        let from_balance = self.balance(from);
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(WorldError::InsufficientBalance {
                owner: from,
                balance: from_balance,
                needed: amount,
            })?;
        self.balances.insert(from, remaining);
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    // Tokens

    pub fn deploy_token(
        &mut self,
        address: Address,
        metadata: TokenMetadata,
        minter: Option<Address>,
    ) -> Result<(), WorldError> {
        self.mark_deployed(address)?;
        trace!(%address, symbol = %metadata.symbol, "token deployed");
        self.tokens
            .insert(address, TokenLedger::new(address, metadata, minter));
        Ok(())
    }

    pub fn token(&self, address: Address) -> Option<&TokenLedger> {
        self.tokens.get(&address)
    }

    pub fn token_mut(&mut self, address: Address) -> Result<&mut TokenLedger, WorldError> {
        self.tokens
            .get_mut(&address)
            .ok_or(WorldError::UnknownToken(address))
    }

    pub fn is_token(&self, address: Address) -> bool {
        self.tokens.contains_key(&address)
    }

    pub fn token_balance(&self, token: Address, owner: Address) -> U256 {
        self.tokens
            .get(&token)
            .map(|ledger| ledger.balance_of(owner))
            .unwrap_or_default()
    }

    pub fn token_metadata(&self, token: Address) -> Result<&TokenMetadata, WorldError> {
        self.tokens
            .get(&token)
            .map(TokenLedger::metadata)
            .ok_or(WorldError::UnknownToken(token))
    }

    pub fn token_transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), WorldError> {
        self.token_mut(token)?.transfer(from, to, amount)
    }

    pub fn token_transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), WorldError> {
        self.token_mut(token)?
            .transfer_from(spender, from, to, amount)
    }

    pub fn token_approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), WorldError> {
        self.token_mut(token)?.approve(owner, spender, amount);
        Ok(())
    }

    pub fn token_mint(
        &mut self,
        token: Address,
        minter: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), WorldError> {
        self.token_mut(token)?.mint(minter, to, amount)
    }

    pub fn token_burn(
        &mut self,
        token: Address,
        minter: Address,
        from: Address,
        amount: U256,
    ) -> Result<(), WorldError> {
        self.token_mut(token)?.burn(minter, from, amount)
    }

    /// Applies an EIP-2612 permit. Signatures are checked by the transaction
    /// layer, which this model does not include.
    pub fn token_permit(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
    ) -> Result<(), WorldError> {
        if deadline < U256::from(self.timestamp) {
            return Err(WorldError::PermitExpired { token, deadline });
        }
        self.token_approve(token, owner, spender, value)
    }

    // Contracts

    pub fn deploy_contract(
        &mut self,
        address: Address,
        contract: Box<dyn Contract>,
    ) -> Result<(), WorldError> {
        self.mark_deployed(address)?;
        trace!(%address, "contract deployed");
        self.contracts.insert(address, contract);
        Ok(())
    }

    /// Claims `address` for a deployment that leaves no callable code behind.
    pub fn mark_deployed(&mut self, address: Address) -> Result<(), WorldError> {
        if !self.deployed.insert(address) {
            return Err(WorldError::AddressAlreadyDeployed(address));
        }
        Ok(())
    }

    pub fn is_deployed(&self, address: Address) -> bool {
        self.deployed.contains(&address)
    }

    pub fn contract(&self, address: Address) -> Option<&dyn Contract> {
        self.contracts.get(&address).map(|contract| contract.as_ref())
    }

    /// Contract deployed at `address`, if it is a `T`.
    pub fn contract_as<T: Contract + 'static>(&self, address: Address) -> Option<&T> {
        self.contract(address)?.as_any().downcast_ref::<T>()
    }

    pub fn contract_as_mut<T: Contract + 'static>(&mut self, address: Address) -> Option<&mut T> {
        self.contracts
            .get_mut(&address)?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Runs `f` against the world, undoing every change it made if it fails.
    pub fn atomically<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let checkpoint = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = checkpoint;
        }
        result
    }

    /// Executes `call`, reverting every change it made if it fails.
    pub fn call(&mut self, bridge: &dyn BridgeQuery, call: Call) -> Result<Bytes, Revert> {
        let result = self.atomically(|world| world.execute(bridge, call));
        if let Err(revert) = &result {
            trace!(%revert, "call reverted");
        }
        result
    }

    fn execute(&mut self, bridge: &dyn BridgeQuery, call: Call) -> Result<Bytes, Revert> {
        if !call.value.is_zero() {
            self.transfer_native(call.from, call.to, call.value)?;
        }

        if self.tokens.contains_key(&call.to) {
            return self.execute_token_call(&call);
        }

        let Some(mut contract) = self.contracts.remove(&call.to) else {
            return Ok(Bytes::new());
        };

        let result = {
            let mut cx = CallContext {
                world: self,
                bridge,
                this: call.to,
                sender: call.from,
                value: call.value,
            };
            contract.call(&mut cx, &call.input)
        };
        self.contracts.insert(call.to, contract);
        result
    }

    fn execute_token_call(&mut self, call: &Call) -> Result<Bytes, Revert> {
        if !call.value.is_zero() {
            return Err(Revert::reason("token does not accept value"));
        }

        let decoded = IERC20::IERC20Calls::abi_decode(&call.input, true)
            .map_err(|_| Revert::reason("unknown token function"))?;

        let token = call.to;
        let output = match decoded {
            IERC20::IERC20Calls::transfer(IERC20::transferCall { to, amount }) => {
                self.token_transfer(token, call.from, to, amount)?;
                true.abi_encode()
            }
            IERC20::IERC20Calls::transferFrom(IERC20::transferFromCall { from, to, amount }) => {
                self.token_transfer_from(token, call.from, from, to, amount)?;
                true.abi_encode()
            }
            IERC20::IERC20Calls::approve(IERC20::approveCall { spender, amount }) => {
                self.token_approve(token, call.from, spender, amount)?;
                true.abi_encode()
            }
            IERC20::IERC20Calls::balanceOf(IERC20::balanceOfCall { account }) => {
                self.token_balance(token, account).abi_encode()
            }
        };
        Ok(output.into())
    }

    // Events

    pub fn emit_event<E: SolEvent>(&mut self, address: Address, event: &E) {
        self.emit(address, event.encode_log_data());
    }

    pub fn emit(&mut self, address: Address, data: LogData) {
        self.logs.push(Log { address, data });
    }

    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Logs emitted by `address` decoded as `E`, skipping other events.
    pub fn decoded_logs<E: SolEvent>(&self, address: Address) -> Vec<E> {
        self.logs
            .iter()
            .filter(|log| log.address == address)
            .filter_map(|log| E::decode_log_data(&log.data, true).ok())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("Insufficient balance of {owner}: has {balance}, needs {needed}")]
    InsufficientBalance {
        owner: Address,
        balance: U256,
        needed: U256,
    },
    #[error("Insufficient {token} balance of {owner}: has {balance}, needs {needed}")]
    InsufficientTokenBalance {
        token: Address,
        owner: Address,
        balance: U256,
        needed: U256,
    },
    #[error("Insufficient {token} allowance from {owner} to {spender}: has {allowance}, needs {needed}")]
    InsufficientAllowance {
        token: Address,
        owner: Address,
        spender: Address,
        allowance: U256,
        needed: U256,
    },
    #[error("{caller} is not the minter of {token}")]
    OnlyMinter { token: Address, caller: Address },
    #[error("Unknown token {0}")]
    UnknownToken(Address),
    #[error("Address {0} already has code")]
    AddressAlreadyDeployed(Address),
    #[error("Permit for {token} expired at {deadline}")]
    PermitExpired { token: Address, deadline: U256 },
}
