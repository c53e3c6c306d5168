//! CREATE2-style deterministic address derivation.
//!
//! Depositing and claiming sides run the same function, so an address computed
//! on the source chain is the address the destination chain deploys to.

use alloy_primitives::{keccak256, Address, B256};

/// `keccak256(0xff ‖ deployer ‖ salt ‖ init_code_hash)[12..]`.
pub fn derive_address(deployer: Address, salt: B256, init_code_hash: B256) -> Address {
    deployer.create2(salt.0, init_code_hash.0)
}

/// Hash of a creation code followed by its ABI-encoded constructor arguments.
pub fn init_code_hash(creation_code: &[u8], constructor_args: &[u8]) -> B256 {
    let mut init_code = Vec::with_capacity(creation_code.len() + constructor_args.len());
    init_code.extend_from_slice(creation_code);
    init_code.extend_from_slice(constructor_args);
    keccak256(init_code)
}
