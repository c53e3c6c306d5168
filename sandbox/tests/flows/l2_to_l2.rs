use alloy_primitives::{Address, Bytes, U256};
use bridge_extension::events::JumpPointFallback;
use sandbox::{
    constants::BRIDGE_ADDRESS,
    contracts::{BridgeAndCallReceiver, MessageReceiver, ReceivedTokens},
};

use crate::{
    ether, mock_contract, mock_sandbox, mock_token, wrapped_agg_erc20, ALICE, BOB, RECEIVER,
};

#[test]
fn test_bridge_ether_between_rollups() {
    let mut sandbox = mock_sandbox(2);

    let leaf_index = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_asset(ALICE, ether(3), 2, BOB, ether(3), Address::ZERO, false)
        .unwrap();
    sandbox.sync().unwrap();

    let l1_root = sandbox
        .mainnet()
        .unwrap()
        .global_exit_root
        .get_last_global_exit_root();
    assert!(sandbox
        .chain(2)
        .unwrap()
        .global_exit_root
        .contains(&l1_root));

    sandbox.claim(1, leaf_index).unwrap();
    assert_eq!(sandbox.chain(2).unwrap().world.balance(BOB), ether(3));
    assert!(sandbox.chain(2).unwrap().bridge.is_claimed(leaf_index, 1));
    assert!(!sandbox.mainnet().unwrap().bridge.is_claimed(leaf_index, 1));
}

#[test]
fn test_bridge_token_between_rollups() {
    let mut sandbox = mock_sandbox(2);
    let token = mock_token(&mut sandbox, 1, ether(10));

    let leaf_index = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_asset(ALICE, U256::ZERO, 2, BOB, ether(10), token, false)
        .unwrap();
    sandbox.sync().unwrap();
    sandbox.claim(1, leaf_index).unwrap();

    let wrapped = wrapped_agg_erc20(&sandbox, 2, 1);
    let l2 = sandbox.chain(2).unwrap();
    assert_eq!(l2.world.token_balance(wrapped, BOB), ether(10));
    assert_eq!(
        l2.bridge.wrapped_token_to_token_info(wrapped).unwrap().origin_network,
        1
    );
}

#[test]
fn test_bridge_message_between_rollups() {
    let mut sandbox = mock_sandbox(2);
    mock_contract(&mut sandbox, 2, RECEIVER, MessageReceiver::default());

    let leaf_index = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_message(
            ALICE,
            U256::from(7),
            2,
            RECEIVER,
            false,
            Bytes::from_static(b"ping"),
        )
        .unwrap();
    sandbox.sync().unwrap();
    sandbox.claim(1, leaf_index).unwrap();

    let l2 = sandbox.chain(2).unwrap();
    let receiver = l2.world.contract_as::<MessageReceiver>(RECEIVER).unwrap();
    assert_eq!(receiver.messages.len(), 1);
    assert_eq!(receiver.messages[0].origin_network, 1);
    assert_eq!(receiver.messages[0].value, U256::from(7));
}

#[test]
fn test_bridge_and_call_tokens_between_rollups() {
    let mut sandbox = mock_sandbox(2);
    let token = mock_token(&mut sandbox, 1, ether(10));
    mock_contract(&mut sandbox, 2, RECEIVER, BridgeAndCallReceiver::default());

    let wrapped = wrapped_agg_erc20(&sandbox, 2, 1);
    let message = "L2 to L2 bridge-and-call: 5 tokens";
    let deposit = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_and_call(
            ALICE,
            U256::ZERO,
            token,
            ether(5),
            2,
            RECEIVER,
            ALICE,
            BridgeAndCallReceiver::receive_call(wrapped, ether(5), message),
            false,
        )
        .unwrap();

    let source = sandbox.chain(1).unwrap();
    assert_eq!(source.world.token_balance(token, ALICE), ether(5));
    assert_eq!(source.world.token_balance(token, BRIDGE_ADDRESS), ether(5));

    sandbox.sync().unwrap();
    sandbox.claim(1, deposit.depends_on_index).unwrap();
    sandbox.claim(1, deposit.message_index).unwrap();

    let l2 = sandbox.chain(2).unwrap();
    let receiver = l2
        .world
        .contract_as::<BridgeAndCallReceiver>(RECEIVER)
        .unwrap();
    assert_eq!(
        receiver.received,
        vec![ReceivedTokens {
            from: deposit.jump_point,
            token: wrapped,
            amount: ether(5),
            message: message.to_string(),
        }]
    );
    assert_eq!(l2.world.token_balance(wrapped, RECEIVER), ether(5));
}

#[test]
fn test_bridge_and_call_refunds_fallback_on_failed_call() {
    let mut sandbox = mock_sandbox(2);
    let token = mock_token(&mut sandbox, 1, ether(10));
    mock_contract(&mut sandbox, 2, RECEIVER, BridgeAndCallReceiver::default());

    // Asks for more than the jump point holds, so the pull fails.
    let wrapped = wrapped_agg_erc20(&sandbox, 2, 1);
    let deposit = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_and_call(
            ALICE,
            U256::ZERO,
            token,
            ether(5),
            2,
            RECEIVER,
            BOB,
            BridgeAndCallReceiver::receive_call(wrapped, ether(6), "too much"),
            false,
        )
        .unwrap();
    sandbox.sync().unwrap();
    assert_eq!(sandbox.claim_all(2).unwrap(), vec![(1, 0), (1, 1)]);

    let l2 = sandbox.chain(2).unwrap();
    assert_eq!(l2.world.token_balance(wrapped, BOB), ether(5));
    assert_eq!(l2.world.token_balance(wrapped, RECEIVER), U256::ZERO);
    assert!(l2
        .world
        .contract_as::<BridgeAndCallReceiver>(RECEIVER)
        .unwrap()
        .received
        .is_empty());

    let fallbacks = l2
        .world
        .decoded_logs::<JumpPointFallback>(deposit.jump_point);
    assert_eq!(fallbacks.len(), 1);
    assert_eq!(fallbacks[0].jumpPoint, deposit.jump_point);
    assert_eq!(fallbacks[0].fallbackAddress, BOB);
    assert!(fallbacks[0].delivered);
}
