// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Mock Execution Engine
//!
//! A stand-in for a contract execution engine. Contracts are plain Rust
//! objects registered under an address; each one receives raw call payloads
//! and answers with raw reply bytes, exactly as a node would. The contracts
//! speak ABI through `ethabi`, so every round trip through this engine checks
//! the codec against an independent implementation.

use abicodec_rust::abi::{AbiValue, TypeDescriptor};
use abicodec_rust::contract::ContractFunction;
use abicodec_rust::numeric::to_hex;
use ethabi::Token;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Selector of the standard `Error(string)` revert payload
pub const ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Contract execution result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    pub return_data: Vec<u8>,
    pub error_message: Option<String>,
    pub is_reverted: bool,
}

impl ExecutionResult {
    pub fn success(return_data: Vec<u8>) -> Self {
        Self {
            success: true,
            return_data,
            error_message: None,
            is_reverted: false,
        }
    }

    /// Revert with an `Error(string)` payload
    pub fn revert(reason: &str) -> Self {
        let mut return_data = ERROR_SELECTOR.to_vec();
        return_data.extend(ethabi::encode(&[Token::String(reason.to_string())]));
        Self {
            success: false,
            return_data,
            error_message: Some(reason.to_string()),
            is_reverted: true,
        }
    }

    /// Failure that never reached a contract
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            return_data: Vec::new(),
            error_message: Some(message.to_string()),
            is_reverted: false,
        }
    }
}

/// Context handed to a contract for one call
pub struct CallContext<'a> {
    pub engine: &'a MockEngine,
    pub caller: [u8; 20],
    pub address: [u8; 20],
    pub call_value: u128,
}

/// A contract living inside the mock engine
pub trait MockContract {
    fn call(&mut self, context: &CallContext<'_>, input: &[u8]) -> ExecutionResult;
}

type ContractRef = Rc<RefCell<dyn MockContract>>;

/// Builder for [`MockEngine`]
#[derive(Default)]
pub struct MockEngineBuilder {
    caller: [u8; 20],
    call_value: u128,
    contracts: HashMap<[u8; 20], ContractRef>,
}

impl MockEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caller address
    pub fn with_caller(mut self, caller: [u8; 20]) -> Self {
        self.caller = caller;
        self
    }

    /// Set the native value attached to calls
    pub fn with_call_value(mut self, value: u128) -> Self {
        self.call_value = value;
        self
    }

    /// Deploy a contract at `address`
    pub fn with_contract<C: MockContract + 'static>(mut self, address: [u8; 20], contract: C) -> Self {
        self.contracts
            .insert(address, Rc::new(RefCell::new(contract)));
        self
    }

    pub fn build(self) -> MockEngine {
        MockEngine {
            caller: self.caller,
            call_value: self.call_value,
            contracts: self.contracts,
        }
    }
}

/// Mock engine dispatching call payloads to registered contracts
pub struct MockEngine {
    caller: [u8; 20],
    call_value: u128,
    contracts: HashMap<[u8; 20], ContractRef>,
}

impl MockEngine {
    /// Create a builder for the engine
    pub fn builder() -> MockEngineBuilder {
        MockEngineBuilder::new()
    }

    pub fn caller(&self) -> [u8; 20] {
        self.caller
    }

    pub fn set_caller(&mut self, caller: [u8; 20]) {
        self.caller = caller;
    }

    pub fn set_call_value(&mut self, value: u128) {
        self.call_value = value;
    }

    /// Send a raw payload from the configured caller
    pub fn call(&self, address: [u8; 20], input: &[u8]) -> ExecutionResult {
        self.call_from(self.caller, address, input)
    }

    /// Send a raw payload on behalf of `caller`
    pub fn call_from(&self, caller: [u8; 20], address: [u8; 20], input: &[u8]) -> ExecutionResult {
        debug!(
            "Mock call to {} with {} bytes of input",
            to_hex(&address),
            input.len()
        );
        let Some(contract) = self.contracts.get(&address) else {
            return ExecutionResult::failure(&format!("no contract at {}", to_hex(&address)));
        };
        let Ok(mut contract) = contract.try_borrow_mut() else {
            return ExecutionResult::revert("reentrant call");
        };
        let context = CallContext {
            engine: self,
            caller,
            address,
            call_value: self.call_value,
        };
        contract.call(&context, input)
    }

    /// Encode, dispatch and decode one call through a resolved function
    pub fn call_function(
        &self,
        address: [u8; 20],
        function: &ContractFunction,
        arguments: &[AbiValue],
    ) -> Result<AbiValue, String> {
        let payload = function
            .encode_call(arguments)
            .map_err(|e| format!("Failed to encode {}: {}", function.signature(), e))?;
        let result = self.call(address, &payload);
        if !result.success {
            let reason = decode_revert_reason(&result.return_data)
                .or(result.error_message)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(format!("{} reverted: {}", function.signature(), reason));
        }
        function
            .decode_return(&result.return_data)
            .map_err(|e| format!("Failed to decode {}: {}", function.signature(), e))
    }
}

/// Message of an `Error(string)` revert payload
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    let (selector, _) = data.split_first_chunk::<4>()?;
    if selector != &ERROR_SELECTOR {
        return None;
    }
    let descriptor = TypeDescriptor::tuple(vec![TypeDescriptor::string()]);
    let value = abicodec_rust::abi::decode(&descriptor, data, 4).ok()?;
    let (reason,): (String,) = value.into_host().ok()?;
    Some(reason)
}

/// Function selector computed by `ethabi`
pub fn ethabi_selector(name: &str, params: &[ethabi::ParamType]) -> [u8; 4] {
    ethabi::short_signature(name, params)
}

/// Address as an `ethabi` token payload
pub fn eth_address(address: [u8; 20]) -> ethabi::Address {
    ethabi::Address::from(address)
}
