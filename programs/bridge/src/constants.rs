use alloy_primitives::U256;

/// Leaves one network can append before its claim bitmap range overflows
/// into the next network's.
pub const MAX_LEAFS_PER_NETWORK: u64 = 1 << 32;

/// Bit 64 of a global index, set for deposits made on mainnet.
pub const GLOBAL_INDEX_MAINNET_FLAG: U256 = U256::from_limbs([0, 1, 0, 0]);

/// Creation code of the wrapped token contract. Wrapped token addresses are
/// derived from it, so every bridge instance must use the same value.
pub const WRAPPED_TOKEN_CREATION_CODE: &[u8] = b"agglayer.bridge.TokenWrapped.v2";
