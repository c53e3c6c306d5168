use alloy_primitives::{keccak256, Bytes, B256};
use alloy_sol_types::{sol, SolType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

sol! {
    /// ABI layout of `abi.encode(name, symbol, decimals)`, carried as the
    /// metadata of asset deposits.
    struct EncodedTokenMetadata {
        string name;
        string symbol;
        uint8 decimals;
    }
}

/// Name, symbol and decimals of a token, as bridged alongside asset deposits
/// so that the destination can deploy a matching wrapped token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Metadata of the wrapped ether token deployed on custom gas token chains.
    pub fn wrapped_ether() -> Self {
        Self::new("Wrapped Ether", "WETH", 18)
    }

    pub fn abi_encode(&self) -> Bytes {
        let encoded = EncodedTokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
        };
        <EncodedTokenMetadata as SolType>::abi_encode_params(&encoded).into()
    }

    pub fn abi_decode(data: &[u8]) -> Result<Self, TokenMetadataError> {
        let decoded = <EncodedTokenMetadata as SolType>::abi_decode_params(data, true)
            .map_err(|_| TokenMetadataError::InvalidEncoding)?;

        Ok(Self {
            name: decoded.name,
            symbol: decoded.symbol,
            decimals: decoded.decimals,
        })
    }

    pub fn hash(&self) -> B256 {
        keccak256(self.abi_encode())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenMetadataError {
    #[error("Invalid token metadata encoding")]
    InvalidEncoding,
}
