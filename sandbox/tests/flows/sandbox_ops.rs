use alloy_primitives::{Address, U256};
use bridge::BridgeError;
use sandbox::{
    constants::{BRIDGE_ADDRESS, EMERGENCY_GUARDIAN},
    contracts::{BridgeAndCallReceiver, ReceivedTokens},
    GasTokenConfig, Sandbox, SandboxConfig, SandboxError,
};

use crate::{
    ether, mock_contract, mock_funds, mock_sandbox, mock_token, ALICE, AGG_ERC20, BOB, RECEIVER,
};

#[test]
fn test_sync_is_idempotent() {
    let mut sandbox = mock_sandbox(2);
    sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_asset(ALICE, ether(1), 2, BOB, ether(1), Address::ZERO, false)
        .unwrap();

    sandbox.sync().unwrap();
    let l1_history = sandbox.mainnet().unwrap().global_exit_root.history().len();
    let l2_history = sandbox.chain(2).unwrap().global_exit_root.history().len();
    let indexed = sandbox.indexer().deposits(1).len();

    sandbox.sync().unwrap();
    assert_eq!(
        sandbox.mainnet().unwrap().global_exit_root.history().len(),
        l1_history
    );
    assert_eq!(
        sandbox.chain(2).unwrap().global_exit_root.history().len(),
        l2_history
    );
    assert_eq!(sandbox.indexer().deposits(1).len(), indexed);
    assert_eq!(indexed, 1);
}

#[test]
fn test_unknown_network_and_deposit() {
    let mut sandbox = mock_sandbox(1);
    assert!(matches!(
        sandbox.chain(5),
        Err(SandboxError::UnknownNetwork(5))
    ));
    assert!(matches!(
        sandbox.claim(0, 3),
        Err(SandboxError::DepositNotFound {
            network_id: 0,
            leaf_index: 3
        })
    ));
    assert!(matches!(
        sandbox.chain_mut(1).unwrap().bridge_asset(
            ALICE,
            ether(1),
            1,
            BOB,
            ether(1),
            Address::ZERO,
            false
        ),
        Err(SandboxError::Bridge(BridgeError::DestinationNetworkInvalid(1)))
    ));
}

#[test]
fn test_emergency_state_pauses_deposits_and_claims() {
    let mut sandbox = mock_sandbox(1);
    sandbox
        .chain_mut(0)
        .unwrap()
        .bridge_asset(ALICE, ether(1), 1, BOB, ether(1), Address::ZERO, true)
        .unwrap();
    sandbox.sync().unwrap();

    let l2 = sandbox.chain_mut(1).unwrap();
    assert!(matches!(
        l2.activate_emergency_state(ALICE),
        Err(SandboxError::Bridge(BridgeError::OnlyEmergencyGuardian))
    ));
    l2.activate_emergency_state(EMERGENCY_GUARDIAN).unwrap();

    assert!(matches!(
        sandbox.claim(0, 0),
        Err(SandboxError::Bridge(BridgeError::BridgePaused))
    ));
    assert!(matches!(
        sandbox.chain_mut(1).unwrap().bridge_asset(
            ALICE,
            ether(1),
            0,
            BOB,
            ether(1),
            Address::ZERO,
            false
        ),
        Err(SandboxError::Bridge(BridgeError::BridgePaused))
    ));
    assert!(sandbox.claim_all(1).unwrap().is_empty());
    assert_eq!(sandbox.chain(1).unwrap().world.balance(ALICE), ether(100));

    sandbox
        .chain_mut(1)
        .unwrap()
        .deactivate_emergency_state(EMERGENCY_GUARDIAN)
        .unwrap();

    sandbox.claim(0, 0).unwrap();
    assert_eq!(sandbox.chain(1).unwrap().world.balance(BOB), ether(1));
}

#[test]
fn test_claim_all_skips_unsettled_deposits() {
    let mut sandbox = mock_sandbox(1);
    let l1 = sandbox.chain_mut(0).unwrap();
    l1.bridge_asset(ALICE, ether(1), 1, BOB, ether(1), Address::ZERO, true)
        .unwrap();
    l1.bridge_asset(ALICE, ether(2), 1, BOB, ether(2), Address::ZERO, false)
        .unwrap();
    sandbox.sync().unwrap();

    assert_eq!(sandbox.claim_all(1).unwrap(), vec![(0, 0)]);
    assert_eq!(sandbox.chain(1).unwrap().world.balance(BOB), ether(1));

    sandbox
        .chain_mut(0)
        .unwrap()
        .update_global_exit_root(ALICE)
        .unwrap();
    sandbox.sync().unwrap();
    assert_eq!(sandbox.claim_all(1).unwrap(), vec![(0, 1)]);
    assert_eq!(sandbox.chain(1).unwrap().world.balance(BOB), ether(3));
    assert!(sandbox.claim_all(1).unwrap().is_empty());
}

#[test]
fn test_json_output() {
    let mut sandbox = mock_sandbox(1);
    sandbox
        .chain_mut(0)
        .unwrap()
        .bridge_asset(ALICE, ether(1), 1, BOB, ether(1), Address::ZERO, true)
        .unwrap();
    sandbox.sync().unwrap();

    let bridges: serde_json::Value =
        serde_json::from_str(&sandbox.bridges_json(0).unwrap()).unwrap();
    let deposits = bridges.as_array().unwrap();
    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0]["network_id"], 0);
    assert_eq!(deposits[0]["deposit_count"], 0);
    assert_eq!(deposits[0]["leaf"]["destination_network"], 1);
    assert!(sandbox.bridges_json(1).unwrap().contains("[]"));

    let proof: serde_json::Value =
        serde_json::from_str(&sandbox.claim_proof_json(0, 0).unwrap()).unwrap();
    assert_eq!(
        proof["smt_proof_local_exit_root"].as_array().unwrap().len(),
        32
    );
    assert_eq!(
        proof["mainnet_exit_root"].as_str().unwrap(),
        sandbox
            .mainnet()
            .unwrap()
            .global_exit_root
            .last_mainnet_exit_root()
            .to_string()
    );
}

#[test]
fn test_sandbox_from_toml_file() {
    let config = SandboxConfig::local(2);
    let path = std::env::temp_dir().join(format!("sandbox-{}.toml", std::process::id()));
    std::fs::write(&path, config.to_toml().unwrap()).unwrap();

    let loaded = SandboxConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);

    let sandbox = Sandbox::new(loaded).unwrap();
    assert_eq!(sandbox.chain(2).unwrap().name, "L2-2");
    assert!(matches!(
        SandboxConfig::load(std::env::temp_dir().join("missing-sandbox.toml")),
        Err(SandboxError::Io(_))
    ));
}

/// Mainnet plus network 1, whose native currency is AggERC20 bridged from
/// mainnet.
fn mock_gas_token_sandbox() -> Sandbox {
    let mut config = SandboxConfig::local(1);
    config.networks[1].gas_token = Some(GasTokenConfig {
        address: AGG_ERC20,
        network: 0,
        name: "AggERC20".to_string(),
        symbol: "AGG".to_string(),
        decimals: 18,
    });

    let mut sandbox = Sandbox::new(config).unwrap();
    mock_funds(&mut sandbox, 0, ALICE, ether(100));
    mock_funds(&mut sandbox, 1, ALICE, ether(100));
    mock_token(&mut sandbox, 0, ether(100));
    sandbox
}

#[test]
fn test_gas_token_network_flows() {
    let mut sandbox = mock_gas_token_sandbox();

    // The gas token arrives as native currency, ether as WETH.
    let l1 = sandbox.chain_mut(0).unwrap();
    l1.bridge_asset(ALICE, U256::ZERO, 1, BOB, ether(10), AGG_ERC20, true)
        .unwrap();
    l1.bridge_asset(ALICE, ether(2), 1, BOB, ether(2), Address::ZERO, true)
        .unwrap();
    sandbox.sync().unwrap();
    assert_eq!(sandbox.claim_all(1).unwrap(), vec![(0, 0), (0, 1)]);

    let l2 = sandbox.chain(1).unwrap();
    let weth = l2.bridge.weth_token().unwrap();
    assert_eq!(l2.world.balance(BOB), ether(10));
    assert_eq!(l2.world.token_balance(weth, BOB), ether(2));

    // Native currency sent home with a call runs against the origin token.
    mock_contract(&mut sandbox, 0, RECEIVER, BridgeAndCallReceiver::default());
    let deposit = sandbox
        .chain_mut(1)
        .unwrap()
        .bridge_and_call(
            ALICE,
            ether(4),
            Address::ZERO,
            ether(4),
            0,
            RECEIVER,
            ALICE,
            BridgeAndCallReceiver::receive_call(AGG_ERC20, ether(4), "gas token home"),
            false,
        )
        .unwrap();
    sandbox.sync().unwrap();
    assert_eq!(sandbox.claim_all(0).unwrap(), vec![(1, 0), (1, 1)]);

    let l1 = sandbox.mainnet().unwrap();
    assert_eq!(
        l1.world
            .contract_as::<BridgeAndCallReceiver>(RECEIVER)
            .unwrap()
            .received,
        vec![ReceivedTokens {
            from: deposit.jump_point,
            token: AGG_ERC20,
            amount: ether(4),
            message: "gas token home".to_string(),
        }]
    );
    assert_eq!(l1.world.token_balance(AGG_ERC20, BRIDGE_ADDRESS), ether(6));
}
