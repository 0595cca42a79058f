// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Multicall3 Aggregation
//!
//! [`MockMulticall3`] is an engine-side `aggregate3` implementation written
//! against `ethabi`. [`Multicall3`] is the client side: it batches call
//! payloads into one `aggregate3((address,bool,bytes)[])` call through the
//! codec and splits the `(bool,bytes)[]` reply back into per-call results.

use crate::mock_engine::{ethabi_selector, CallContext, ExecutionResult, MockContract, MockEngine};
use abicodec_rust::abi::{AbiResult, AbiValue, TypeDescriptor};
use abicodec_rust::contract::{ContractFunction, FunctionCache, MethodDeclaration, ReturnType};
use ethabi::{ParamType, Token};
use std::sync::Arc;

fn call_param_type() -> ParamType {
    ParamType::Array(Box::new(ParamType::Tuple(vec![
        ParamType::Address,
        ParamType::Bool,
        ParamType::Bytes,
    ])))
}

/// Engine-side Multicall3
#[derive(Clone, Debug, Default)]
pub struct MockMulticall3;

impl MockMulticall3 {
    fn aggregate3(&self, context: &CallContext<'_>, data: &[u8]) -> Result<Vec<Token>, String> {
        let args = ethabi::decode(&[call_param_type()], data)
            .map_err(|e| format!("invalid arguments: {}", e))?;
        let calls = args
            .into_iter()
            .next()
            .and_then(Token::into_array)
            .ok_or("calls must be an array")?;

        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            let mut fields = call.into_tuple().ok_or("call must be a tuple")?.into_iter();
            let target = fields.next().and_then(Token::into_address).ok_or("bad target")?;
            let allow_failure = fields.next().and_then(Token::into_bool).ok_or("bad flag")?;
            let call_data = fields.next().and_then(Token::into_bytes).ok_or("bad call data")?;

            let result = context
                .engine
                .call_from(context.address, target.0, &call_data);
            if !result.success && !allow_failure {
                return Err("Multicall3: call failed".to_string());
            }
            results.push(Token::Tuple(vec![
                Token::Bool(result.success),
                Token::Bytes(result.return_data),
            ]));
        }
        Ok(vec![Token::Array(results)])
    }
}

impl MockContract for MockMulticall3 {
    fn call(&mut self, context: &CallContext<'_>, input: &[u8]) -> ExecutionResult {
        let Some((selector, data)) = input.split_first_chunk::<4>() else {
            return ExecutionResult::revert("missing selector");
        };
        if *selector != ethabi_selector("aggregate3", &[call_param_type()]) {
            return ExecutionResult::revert(&format!(
                "unknown selector 0x{}",
                hex::encode(selector)
            ));
        }
        match self.aggregate3(context, data) {
            Ok(tokens) => ExecutionResult::success(ethabi::encode(&tokens)),
            Err(reason) => ExecutionResult::revert(&reason),
        }
    }
}

/// One batched call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub target: [u8; 20],
    pub data: Vec<u8>,
}

impl Call {
    /// Call built from a resolved function and its arguments
    pub fn new(target: [u8; 20], function: &ContractFunction, arguments: &[AbiValue]) -> AbiResult<Self> {
        Ok(Self {
            target,
            data: function.encode_call(arguments)?,
        })
    }
}

/// Client for a deployed Multicall3
pub struct Multicall3 {
    address: [u8; 20],
    aggregate3: Arc<ContractFunction>,
}

impl Multicall3 {
    /// `aggregate3(Call[] calls) view returns (Result[])`
    pub fn declaration() -> MethodDeclaration {
        let call = TypeDescriptor::tuple(vec![
            TypeDescriptor::address(),
            TypeDescriptor::bool(),
            TypeDescriptor::bytes(),
        ]);
        let result = TypeDescriptor::tuple(vec![TypeDescriptor::bool(), TypeDescriptor::bytes()]);
        MethodDeclaration::new("Multicall3", "aggregate3")
            .view()
            .argument("calls", TypeDescriptor::dynamic_array(call))
            .returns(ReturnType::Value(TypeDescriptor::dynamic_array(result)))
    }

    pub fn new(address: [u8; 20], cache: &FunctionCache) -> AbiResult<Self> {
        Ok(Self {
            address,
            aggregate3: cache.get_or_resolve(&Self::declaration())?,
        })
    }

    pub fn function(&self) -> &ContractFunction {
        &self.aggregate3
    }

    /// `aggregate3` payload for `calls`, all sharing one failure policy
    pub fn call_payload(&self, allow_failure: bool, calls: &[Call]) -> AbiResult<Vec<u8>> {
        let calls = calls
            .iter()
            .map(|call| {
                AbiValue::tuple(vec![
                    AbiValue::Address(call.target),
                    AbiValue::Bool(allow_failure),
                    AbiValue::Bytes(call.data.clone()),
                ])
            })
            .collect();
        self.aggregate3
            .encode_call(&[AbiValue::dynamic_array(calls)?])
    }

    /// Reply data of each call, `None` where the call failed
    pub fn decode_results(&self, reply: &[u8]) -> AbiResult<Vec<Option<Vec<u8>>>> {
        let results: Vec<(bool, Vec<u8>)> = self.aggregate3.decode_return_as(reply)?;
        Ok(results
            .into_iter()
            .map(|(success, data)| success.then_some(data))
            .collect())
    }

    /// Run `calls` through the engine in one aggregated call
    pub fn execute(
        &self,
        engine: &MockEngine,
        allow_failure: bool,
        calls: &[Call],
    ) -> Result<Vec<Option<Vec<u8>>>, String> {
        let payload = self
            .call_payload(allow_failure, calls)
            .map_err(|e| format!("Failed to encode aggregate3: {}", e))?;
        let result = engine.call(self.address, &payload);
        if !result.success {
            return Err(result
                .error_message
                .unwrap_or_else(|| "aggregate3 failed".to_string()));
        }
        self.decode_results(&result.return_data)
            .map_err(|e| format!("Failed to decode aggregate3: {}", e))
    }
}
