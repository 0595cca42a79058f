// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Mock ERC-20 Token
//!
//! Supports:
//! - name(), symbol(), decimals(), totalSupply()
//! - balanceOf(address), allowance(address,address)
//! - transfer(address,uint256), approve(address,uint256)
//! - transferFrom(address,address,uint256), mint(address,uint256)
//!
//! Arguments are decoded and replies encoded with `ethabi`.

use crate::mock_engine::{eth_address, ethabi_selector, CallContext, ExecutionResult, MockContract};
use ethabi::{Address, ParamType, Token, Uint};
use std::collections::HashMap;

/// In-memory ERC-20 state
#[derive(Clone, Debug)]
pub struct MockToken {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: Uint,
    balances: HashMap<Address, Uint>,
    allowances: HashMap<(Address, Address), Uint>,
}

impl MockToken {
    /// Token with `initial_supply` base units credited to `owner`
    pub fn new(name: &str, symbol: &str, decimals: u8, owner: [u8; 20], initial_supply: u128) -> Self {
        let mut balances = HashMap::new();
        balances.insert(eth_address(owner), Uint::from(initial_supply));
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            total_supply: Uint::from(initial_supply),
            balances,
            allowances: HashMap::new(),
        }
    }

    pub fn balance_of(&self, owner: [u8; 20]) -> Uint {
        self.balance(&eth_address(owner))
    }

    fn balance(&self, owner: &Address) -> Uint {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: Uint) -> Result<(), &'static str> {
        let from_balance = self
            .balance(&from)
            .checked_sub(amount)
            .ok_or("insufficient balance")?;
        self.balances.insert(from, from_balance);
        let to_balance = self
            .balance(&to)
            .checked_add(amount)
            .ok_or("balance overflow")?;
        self.balances.insert(to, to_balance);
        Ok(())
    }

    fn transfer_from(&mut self, spender: Address, from: Address, to: Address, amount: Uint) -> Result<(), &'static str> {
        let allowance = self
            .allowances
            .get(&(from, spender))
            .copied()
            .unwrap_or_default();
        let remaining = allowance
            .checked_sub(amount)
            .ok_or("insufficient allowance")?;
        self.move_balance(from, to, amount)?;
        self.allowances.insert((from, spender), remaining);
        Ok(())
    }

    fn dispatch(&mut self, caller: Address, selector: [u8; 4], data: &[u8]) -> Result<Vec<Token>, String> {
        use ParamType::{Address as AddressType, Uint as UintType};

        let decode = |types: &[ParamType]| {
            ethabi::decode(types, data).map_err(|e| format!("invalid arguments: {}", e))
        };

        if selector == ethabi_selector("name", &[]) {
            Ok(vec![Token::String(self.name.clone())])
        } else if selector == ethabi_selector("symbol", &[]) {
            Ok(vec![Token::String(self.symbol.clone())])
        } else if selector == ethabi_selector("decimals", &[]) {
            Ok(vec![Token::Uint(Uint::from(self.decimals))])
        } else if selector == ethabi_selector("totalSupply", &[]) {
            Ok(vec![Token::Uint(self.total_supply)])
        } else if selector == ethabi_selector("balanceOf", &[AddressType]) {
            let args = decode(&[AddressType])?;
            let owner = args[0].clone().into_address().ok_or("bad owner")?;
            Ok(vec![Token::Uint(self.balance(&owner))])
        } else if selector == ethabi_selector("allowance", &[AddressType, AddressType]) {
            let args = decode(&[AddressType, AddressType])?;
            let owner = args[0].clone().into_address().ok_or("bad owner")?;
            let spender = args[1].clone().into_address().ok_or("bad spender")?;
            let allowance = self.allowances.get(&(owner, spender)).copied().unwrap_or_default();
            Ok(vec![Token::Uint(allowance)])
        } else if selector == ethabi_selector("transfer", &[AddressType, UintType(256)]) {
            let args = decode(&[AddressType, UintType(256)])?;
            let to = args[0].clone().into_address().ok_or("bad recipient")?;
            let amount = args[1].clone().into_uint().ok_or("bad amount")?;
            self.move_balance(caller, to, amount)?;
            Ok(vec![Token::Bool(true)])
        } else if selector == ethabi_selector("approve", &[AddressType, UintType(256)]) {
            let args = decode(&[AddressType, UintType(256)])?;
            let spender = args[0].clone().into_address().ok_or("bad spender")?;
            let amount = args[1].clone().into_uint().ok_or("bad amount")?;
            self.allowances.insert((caller, spender), amount);
            Ok(vec![Token::Bool(true)])
        } else if selector == ethabi_selector("transferFrom", &[AddressType, AddressType, UintType(256)]) {
            let args = decode(&[AddressType, AddressType, UintType(256)])?;
            let from = args[0].clone().into_address().ok_or("bad sender")?;
            let to = args[1].clone().into_address().ok_or("bad recipient")?;
            let amount = args[2].clone().into_uint().ok_or("bad amount")?;
            self.transfer_from(caller, from, to, amount)?;
            Ok(vec![Token::Bool(true)])
        } else if selector == ethabi_selector("mint", &[AddressType, UintType(256)]) {
            let args = decode(&[AddressType, UintType(256)])?;
            let to = args[0].clone().into_address().ok_or("bad recipient")?;
            let amount = args[1].clone().into_uint().ok_or("bad amount")?;
            self.total_supply = self
                .total_supply
                .checked_add(amount)
                .ok_or("supply overflow")?;
            let balance = self.balance(&to).checked_add(amount).ok_or("balance overflow")?;
            self.balances.insert(to, balance);
            Ok(Vec::new())
        } else {
            Err(format!("unknown selector 0x{}", hex::encode(selector)))
        }
    }
}

impl MockContract for MockToken {
    fn call(&mut self, context: &CallContext<'_>, input: &[u8]) -> ExecutionResult {
        let Some((selector, data)) = input.split_first_chunk::<4>() else {
            return ExecutionResult::revert("missing selector");
        };
        match self.dispatch(eth_address(context.caller), *selector, data) {
            Ok(tokens) => ExecutionResult::success(ethabi::encode(&tokens)),
            Err(reason) => ExecutionResult::revert(&reason),
        }
    }
}
