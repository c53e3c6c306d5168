use alloy_primitives::Address;
use hex_literal::hex;

// Contracts, deployed at the same address on every network.
pub const BRIDGE_ADDRESS: Address = Address::new(hex!("2a3dd3eb832af982ec71669e178424b10dca2ede"));
pub const BRIDGE_EXTENSION_ADDRESS: Address =
    Address::new(hex!("64b20eb25aed030fd510ef93b9135278b152f6a6"));
pub const GLOBAL_EXIT_ROOT_ADDRESS: Address =
    Address::new(hex!("580bda1e7a0cfae92fa7f6c20a3794f169ce3cfb"));

// Development accounts.
pub const ROLLUP_MANAGER: Address = Address::new(hex!("90f79bf6eb2c4f870365e785982e1f101e93b906"));
pub const GLOBAL_EXIT_ROOT_UPDATER: Address =
    Address::new(hex!("15d34aaf54267db7d7c367839aaf71a00a2c6a65"));
pub const BRIDGE_MANAGER: Address = Address::new(hex!("9965507d1a55bcc2695c58ba16fb37d819b0a4dc"));
pub const EMERGENCY_GUARDIAN: Address =
    Address::new(hex!("976ea74026e726554db657fa54763abd0c3a0aa9"));
pub const CLAIM_SPONSOR: Address = Address::new(hex!("14dc79964da2c08b23698b3d3cc7ca32193d9955"));

pub const DEFAULT_TIMESTAMP: u64 = 1_700_000_000;

/// Ether an L2 bridge holds at genesis to pay out ether claims: 10^9 ether.
pub const DEFAULT_BRIDGE_FLOAT: u128 = 1_000_000_000 * 1_000_000_000_000_000_000;
