// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Test the public module
//! Contains all the functions and tools shared by all tests.

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod erc20;
pub mod tokens;

pub use abi_example::mock_engine::{ExecutionResult, MockEngine};
pub use abi_example::multicall::{Call, MockMulticall3, Multicall3};
pub use abi_example::token_contract::MockToken;

pub use erc20::*;
pub use tokens::*;

pub const TOKEN_ADDRESS: [u8; 20] = [0x55; 20];
pub const MULTICALL_ADDRESS: [u8; 20] = [0xCA; 20];

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Helper function to create a test address
pub fn random_test_address(byte: u8) -> [u8; 20] {
    let mut addr = [0u8; 20];
    addr[19] = byte; // Set the last byte to distinguish addresses
    addr
}

/// Engine with a token owned by address 1 and a Multicall3
pub fn token_engine(initial_supply: u128) -> MockEngine {
    let owner = random_test_address(1);
    MockEngine::builder()
        .with_caller(owner)
        .with_contract(
            TOKEN_ADDRESS,
            MockToken::new("Test Token", "TST", 18, owner, initial_supply),
        )
        .with_contract(MULTICALL_ADDRESS, MockMulticall3)
        .build()
}
