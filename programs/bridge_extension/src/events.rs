use alloy_sol_types::sol;

sol! {
    /// The JumpPoint handed the asset to the call target and the call succeeded.
    event JumpPointExecuted(
        address indexed jumpPoint,
        address indexed callAddress,
        address asset,
        uint256 amount
    );

    /// The call failed and the asset was sent to the fallback address.
    /// `delivered` is false when the fallback transfer failed as well and the
    /// funds stay at the JumpPoint.
    event JumpPointFallback(
        address indexed jumpPoint,
        address indexed fallbackAddress,
        address asset,
        uint256 amount,
        bool delivered
    );
}
