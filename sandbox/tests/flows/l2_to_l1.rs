use alloy_primitives::{Address, Bytes, U256};
use sandbox::{
    constants::BRIDGE_ADDRESS,
    contracts::{Counter, MessageReceiver, ReceivedMessage},
    Sandbox,
};

use crate::{
    ether, mock_contract, mock_sandbox, mock_token, wrapped_agg_erc20, ALICE, BOB, RECEIVER,
};

/// Locks `amount` of ether in the mainnet bridge with a deposit to network 1.
fn mock_locked_ether(sandbox: &mut Sandbox, amount: U256) {
    sandbox
        .chain_mut(0)
        .unwrap()
        .bridge_asset(ALICE, amount, 1, ALICE, amount, Address::ZERO, true)
        .unwrap();
}

#[test]
fn test_bridge_ether_and_claim() {
    let mut sandbox = mock_sandbox(1);
    mock_locked_ether(&mut sandbox, ether(5));

    let leaf_index = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_asset(ALICE, ether(2), 0, BOB, ether(2), Address::ZERO, true)
        .unwrap();
    sandbox.sync().unwrap();

    let l1 = sandbox.mainnet().unwrap();
    assert_eq!(
        l1.global_exit_root.rollup_local_exit_root(1).unwrap(),
        sandbox.chain(1).unwrap().bridge.get_root()
    );

    sandbox.claim(1, leaf_index).unwrap();
    let l1 = sandbox.mainnet().unwrap();
    assert_eq!(l1.world.balance(BOB), ether(2));
    assert_eq!(l1.world.balance(BRIDGE_ADDRESS), ether(3));
    assert!(l1.bridge.is_claimed(leaf_index, 1));
    assert_eq!(sandbox.chain(1).unwrap().world.balance(ALICE), ether(98));
}

#[test]
fn test_bridge_token_and_claim() {
    let mut sandbox = mock_sandbox(1);
    let token = mock_token(&mut sandbox, 1, ether(10));

    let leaf_index = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_asset(ALICE, U256::ZERO, 0, BOB, ether(7), token, false)
        .unwrap();
    sandbox.sync().unwrap();
    sandbox.claim(1, leaf_index).unwrap();

    let l1 = sandbox.mainnet().unwrap();
    let wrapped = l1.bridge.get_token_wrapped_address(1, token).unwrap();
    assert_eq!(wrapped, wrapped_agg_erc20(&sandbox, 0, 1));
    assert_eq!(l1.world.token_balance(wrapped, BOB), ether(7));

    let l2 = sandbox.chain(1).unwrap();
    assert_eq!(l2.world.token_balance(token, BRIDGE_ADDRESS), ether(7));
    assert_eq!(l2.world.token_balance(token, ALICE), ether(3));
}

#[test]
fn test_wrapped_token_returns_to_origin() {
    let mut sandbox = mock_sandbox(1);
    let token = mock_token(&mut sandbox, 0, ether(10));

    sandbox
        .chain_mut(0)
        .unwrap()
        .bridge_asset(ALICE, U256::ZERO, 1, BOB, ether(10), token, true)
        .unwrap();
    sandbox.sync().unwrap();
    sandbox.claim(0, 0).unwrap();

    let wrapped = wrapped_agg_erc20(&sandbox, 1, 0);
    let leaf_index = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_asset(BOB, U256::ZERO, 0, BOB, ether(4), wrapped, true)
        .unwrap();

    let l2 = sandbox.chain(1).unwrap();
    assert_eq!(l2.world.token_balance(wrapped, BOB), ether(6));
    assert_eq!(
        l2.world.token(wrapped).unwrap().total_supply(),
        ether(6)
    );

    sandbox.sync().unwrap();
    sandbox.claim(1, leaf_index).unwrap();
    let l1 = sandbox.mainnet().unwrap();
    assert_eq!(l1.world.token_balance(token, BOB), ether(4));
    assert_eq!(l1.world.token_balance(token, BRIDGE_ADDRESS), ether(6));
}

#[test]
fn test_bridge_message_and_claim() {
    let mut sandbox = mock_sandbox(1);
    mock_contract(&mut sandbox, 0, RECEIVER, MessageReceiver::default());
    let data = Bytes::from_static(b"hello from L2");

    let leaf_index = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_message(ALICE, U256::ZERO, 0, RECEIVER, false, data.clone())
        .unwrap();
    sandbox.sync().unwrap();
    sandbox.claim(1, leaf_index).unwrap();

    let receiver = sandbox
        .mainnet()
        .unwrap()
        .world
        .contract_as::<MessageReceiver>(RECEIVER)
        .unwrap();
    assert_eq!(
        receiver.messages,
        vec![ReceivedMessage {
            origin_address: ALICE,
            origin_network: 1,
            data,
            value: U256::ZERO,
        }]
    );
}

#[test]
fn test_bridge_and_call_ether_increments_counter() {
    let mut sandbox = mock_sandbox(1);
    mock_locked_ether(&mut sandbox, ether(5));
    mock_contract(&mut sandbox, 0, RECEIVER, Counter::default());

    let deposit = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_and_call(
            ALICE,
            ether(1),
            Address::ZERO,
            ether(1),
            0,
            RECEIVER,
            ALICE,
            Counter::increment_call(),
            false,
        )
        .unwrap();
    sandbox.sync().unwrap();

    assert_eq!(sandbox.claim_all(0).unwrap(), vec![(1, 0), (1, 1)]);
    let l1 = sandbox.mainnet().unwrap();
    assert_eq!(
        l1.world.contract_as::<Counter>(RECEIVER).unwrap().count(),
        U256::from(1)
    );
    assert_eq!(l1.world.balance(RECEIVER), ether(1));
    assert_eq!(l1.world.balance(deposit.jump_point), U256::ZERO);
}
