use alloy_sol_types::sol;

sol! {
    /// New global exit root appended on mainnet.
    event UpdateL1InfoTree(bytes32 indexed mainnetExitRoot, bytes32 indexed rollupExitRoot);

    event InsertGlobalExitRoot(bytes32 indexed newGlobalExitRoot);

    event RemoveGlobalExitRoot(bytes32 indexed removedGlobalExitRoot);
}
