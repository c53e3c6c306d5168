//! Demo contracts deployed on sandbox chains to receive messages and calls.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolInterface, SolValue};
use common::{
    solidity::IBridgeMessageReceiver,
    world::{CallContext, Contract, Revert},
    NetworkId,
};

sol! {
    interface ICounter {
        function increment() external;
        function count() external view returns (uint256);
    }

    interface IBridgeAndCallReceiver {
        function receiveTokensWithMessage(address token, uint256 amount, string message) external payable;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Counter {
    count: U256,
}

impl Counter {
    pub fn count(&self) -> U256 {
        self.count
    }

    pub fn increment_call() -> Bytes {
        ICounter::incrementCall {}.abi_encode().into()
    }
}

impl Contract for Counter {
    fn call(&mut self, _cx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Revert> {
        let call = ICounter::ICounterCalls::abi_decode(input, true)
            .map_err(|_| Revert::reason("unknown function"))?;
        match call {
            ICounter::ICounterCalls::increment(_) => {
                self.count += U256::from(1);
                Ok(Bytes::new())
            }
            ICounter::ICounterCalls::count(_) => Ok(self.count.abi_encode().into()),
        }
    }
}

/// A payment received with a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedTokens {
    pub from: Address,
    pub token: Address,
    pub amount: U256,
    pub message: String,
}

/// Takes `amount` of `token` (zero for the native currency, which must be
/// attached) from the caller and keeps the note sent with it.
#[derive(Debug, Clone, Default)]
pub struct BridgeAndCallReceiver {
    pub received: Vec<ReceivedTokens>,
}

impl BridgeAndCallReceiver {
    pub fn receive_call(token: Address, amount: U256, message: impl Into<String>) -> Bytes {
        IBridgeAndCallReceiver::receiveTokensWithMessageCall {
            token,
            amount,
            message: message.into(),
        }
        .abi_encode()
        .into()
    }
}

impl Contract for BridgeAndCallReceiver {
    fn call(&mut self, cx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Revert> {
        let call =
            IBridgeAndCallReceiver::receiveTokensWithMessageCall::abi_decode(input, true)
                .map_err(|_| Revert::reason("unknown function"))?;

        if call.token.is_zero() {
            if cx.value != call.amount {
                return Err(Revert::reason("value does not match amount"));
            }
        } else {
            cx.world
                .token_transfer_from(call.token, cx.this, cx.sender, cx.this, call.amount)?;
        }

        self.received.push(ReceivedTokens {
            from: cx.sender,
            token: call.token,
            amount: call.amount,
            message: call.message,
        });
        Ok(Bytes::new())
    }
}

/// A message delivered by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub origin_address: Address,
    pub origin_network: NetworkId,
    pub data: Bytes,
    pub value: U256,
}

/// Keeps every message the bridge delivers.
#[derive(Debug, Clone, Default)]
pub struct MessageReceiver {
    pub messages: Vec<ReceivedMessage>,
}

impl Contract for MessageReceiver {
    fn call(&mut self, cx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Revert> {
        let message = IBridgeMessageReceiver::onMessageReceivedCall::abi_decode(input, true)
            .map_err(|_| Revert::reason("unknown function"))?;
        if cx.sender != cx.bridge.address() {
            return Err(Revert::reason("only the bridge delivers messages"));
        }

        self.messages.push(ReceivedMessage {
            origin_address: message.originAddress,
            origin_network: message.originNetwork,
            data: message.data,
            value: cx.value,
        });
        Ok(Bytes::new())
    }
}
