use alloy_sol_types::sol;

sol! {
    /// Implemented by every contract that accepts bridged messages.
    interface IBridgeMessageReceiver {
        function onMessageReceived(address originAddress, uint32 originNetwork, bytes data) external payable;
    }

    /// EIP-2612 permit, forwarded by depositors as `permitData`.
    interface IERC20Permit {
        function permit(
            address owner,
            address spender,
            uint256 value,
            uint256 deadline,
            uint8 v,
            bytes32 r,
            bytes32 s
        ) external;
    }

    /// ERC-20 entry points reachable through a contract call.
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }
}
