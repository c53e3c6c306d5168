use alloy_sol_types::sol;

sol! {
    /// Emitted for every deposit; `depositCount` is the leaf index.
    event BridgeEvent(
        uint8 leafType,
        uint32 originNetwork,
        address originAddress,
        uint32 destinationNetwork,
        address destinationAddress,
        uint256 amount,
        bytes metadata,
        uint32 depositCount
    );

    event ClaimEvent(
        uint256 globalIndex,
        uint32 originNetwork,
        address originAddress,
        address destinationAddress,
        uint256 amount
    );

    event NewWrappedToken(
        uint32 originNetwork,
        address originTokenAddress,
        address wrappedTokenAddress,
        bytes metadata
    );

    event SetSovereignTokenAddress(
        uint32 originNetwork,
        address originTokenAddress,
        address sovereignTokenAddress,
        bool isNotMintable
    );

    event RemoveLegacySovereignTokenAddress(address sovereignTokenAddress);

    event MigrateLegacyToken(
        address sender,
        address legacyTokenAddress,
        address updatedTokenAddress,
        uint256 amount
    );

    event SetClaim(uint32 leafIndex, uint32 sourceNetwork);

    event UnsetClaim(uint32 leafIndex, uint32 sourceNetwork);

    event EmergencyStateActivated();

    event EmergencyStateDeactivated();

    event RoleTransferred(uint8 role, address previousHolder, address newHolder);
}
