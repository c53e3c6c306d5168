use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};

use super::WorldError;
use crate::metadata::TokenMetadata;

/// ERC-20 ledger of one token contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLedger {
    address: Address,
    metadata: TokenMetadata,
    /// Account allowed to mint and burn, `None` for fixed-supply tokens.
    minter: Option<Address>,
    total_supply: U256,
    balances: BTreeMap<Address, U256>,
    allowances: BTreeMap<(Address, Address), U256>,
}

impl TokenLedger {
    pub fn new(address: Address, metadata: TokenMetadata, minter: Option<Address>) -> Self {
        Self {
            address,
            metadata,
            minter,
            total_supply: U256::ZERO,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn minter(&self) -> Option<Address> {
        self.minter
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), WorldError> {
        let from_balance = self.balance_of(from);
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(WorldError::InsufficientTokenBalance {
                token: self.address,
                owner: from,
                balance: from_balance,
                needed: amount,
            })?;
        self.balances.insert(from, remaining);
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.insert((owner, spender), amount);
    }

    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), WorldError> {
        let allowance = self.allowance(from, spender);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(WorldError::InsufficientAllowance {
                token: self.address,
                owner: from,
                spender,
                allowance,
                needed: amount,
            })?;
        self.transfer(from, to, amount)?;
        if allowance != U256::MAX {
            self.allowances.insert((from, spender), remaining);
        }
        Ok(())
    }

    pub fn mint(&mut self, caller: Address, to: Address, amount: U256) -> Result<(), WorldError> {
        self.check_minter(caller)?;
        self.total_supply += amount;
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    pub fn burn(&mut self, caller: Address, from: Address, amount: U256) -> Result<(), WorldError> {
        self.check_minter(caller)?;
        let from_balance = self.balance_of(from);
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(WorldError::InsufficientTokenBalance {
                token: self.address,
                owner: from,
                balance: from_balance,
                needed: amount,
            })?;
        self.balances.insert(from, remaining);
        self.total_supply -= amount;
        Ok(())
    }

    /// Seeds a balance outside of the mint path (genesis allocations).
    pub fn set_balance(&mut self, owner: Address, amount: U256) {
        let previous = self.balance_of(owner);
        self.total_supply = self.total_supply - previous + amount;
        self.balances.insert(owner, amount);
    }

    fn check_minter(&self, caller: Address) -> Result<(), WorldError> {
        match self.minter {
            Some(minter) if minter == caller => Ok(()),
            _ => Err(WorldError::OnlyMinter {
                token: self.address,
                caller,
            }),
        }
    }
}
