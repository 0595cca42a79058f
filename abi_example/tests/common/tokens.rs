// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Conversions from codec types to their `ethabi` counterparts.

#![allow(dead_code)]

use abicodec_rust::abi::utils::{int_word, uint_word};
use abicodec_rust::abi::{AbiValue, TypeDescriptor, TypeKind};
use ethabi::{ParamType, Token, Uint};

/// `ethabi` parameter type of a descriptor
pub fn to_param_type(descriptor: &TypeDescriptor) -> ParamType {
    match descriptor.kind() {
        TypeKind::Bool => ParamType::Bool,
        TypeKind::Address => ParamType::Address,
        TypeKind::Uint => ParamType::Uint(descriptor.width().unwrap()),
        TypeKind::Int => ParamType::Int(descriptor.width().unwrap()),
        TypeKind::FixedBytes => ParamType::FixedBytes(descriptor.width().unwrap()),
        TypeKind::Bytes => ParamType::Bytes,
        TypeKind::String => ParamType::String,
        TypeKind::Array => {
            let element = Box::new(to_param_type(descriptor.element().unwrap()));
            match descriptor.capacity().unwrap() {
                capacity if capacity < 0 => ParamType::Array(element),
                capacity => ParamType::FixedArray(element, capacity as usize),
            }
        }
        TypeKind::Tuple => {
            ParamType::Tuple(descriptor.fields().unwrap().iter().map(to_param_type).collect())
        }
    }
}

/// `ethabi` token of a value
pub fn to_token(value: &AbiValue) -> Token {
    match value {
        AbiValue::Bool(flag) => Token::Bool(*flag),
        AbiValue::Address(address) => Token::Address((*address).into()),
        AbiValue::Uint(number) => {
            Token::Uint(Uint::from_big_endian(&uint_word(number.value()).unwrap()))
        }
        AbiValue::Int(number) => {
            Token::Int(Uint::from_big_endian(&int_word(number.value()).unwrap()))
        }
        AbiValue::FixedBytes(bytes) => Token::FixedBytes(bytes.as_bytes().to_vec()),
        AbiValue::Bytes(bytes) => Token::Bytes(bytes.clone()),
        AbiValue::String(text) => Token::String(text.clone()),
        AbiValue::Array(array) if array.is_dynamic() => {
            Token::Array(array.values().iter().map(to_token).collect())
        }
        AbiValue::Array(array) => Token::FixedArray(array.values().iter().map(to_token).collect()),
        AbiValue::Tuple(fields) => Token::Tuple(fields.iter().map(to_token).collect()),
    }
}

/// Big-endian bytes of an `ethabi` integer
pub fn uint_bytes(value: Uint) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes
}
