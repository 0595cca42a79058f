// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use abicodec_rust::abi::TypeDescriptor;
use abicodec_rust::contract::{MethodDeclaration, ReturnType};

const INTERFACE: &str = "ERC20";

fn view(name: &str) -> MethodDeclaration {
    MethodDeclaration::new(INTERFACE, name).view()
}

fn transaction(name: &str) -> MethodDeclaration {
    MethodDeclaration::new(INTERFACE, name).transaction()
}

pub fn name() -> MethodDeclaration {
    view("name").returns(ReturnType::Value(TypeDescriptor::string()))
}

pub fn symbol() -> MethodDeclaration {
    view("symbol").returns(ReturnType::Value(TypeDescriptor::string()))
}

pub fn decimals() -> MethodDeclaration {
    view("decimals").returns(ReturnType::Value(TypeDescriptor::uint(8).unwrap()))
}

pub fn total_supply() -> MethodDeclaration {
    view("totalSupply").returns(ReturnType::Value(TypeDescriptor::uint256()))
}

pub fn balance_of() -> MethodDeclaration {
    view("balanceOf")
        .argument("owner", TypeDescriptor::address())
        .returns(ReturnType::Value(TypeDescriptor::uint256()))
}

pub fn allowance() -> MethodDeclaration {
    view("allowance")
        .argument("owner", TypeDescriptor::address())
        .argument("spender", TypeDescriptor::address())
        .returns(ReturnType::Value(TypeDescriptor::uint256()))
}

pub fn transfer() -> MethodDeclaration {
    transaction("transfer")
        .argument("to", TypeDescriptor::address())
        .argument("value", TypeDescriptor::uint256())
        .cost("weiValue")
        .returns(ReturnType::Value(TypeDescriptor::bool()))
}

pub fn approve() -> MethodDeclaration {
    transaction("approve")
        .argument("spender", TypeDescriptor::address())
        .argument("value", TypeDescriptor::uint256())
        .returns(ReturnType::Value(TypeDescriptor::bool()))
}

pub fn transfer_from() -> MethodDeclaration {
    transaction("transferFrom")
        .argument("from", TypeDescriptor::address())
        .argument("to", TypeDescriptor::address())
        .argument("value", TypeDescriptor::uint256())
        .returns(ReturnType::Value(TypeDescriptor::bool()))
}

pub fn mint() -> MethodDeclaration {
    transaction("mint")
        .argument("to", TypeDescriptor::address())
        .argument("value", TypeDescriptor::uint256())
        .returns(ReturnType::Tuple(vec![]))
}
