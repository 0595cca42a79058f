// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Contract Function Resolution
//!
//! Explicit method declarations are resolved into [`ContractFunction`]s that
//! carry the selector and the parameter and return descriptors, and that
//! build call payloads and decode replies through the codec.
//!
//! # Usage
//!
//! ```rust
//! use abicodec_rust::abi::{AbiValue, TypeDescriptor};
//! use abicodec_rust::contract::{resolve, MethodDeclaration, ReturnType};
//!
//! let balance_of = MethodDeclaration::new("ERC20", "balanceOf")
//!     .view()
//!     .argument("owner", TypeDescriptor::address())
//!     .returns(ReturnType::Value(TypeDescriptor::uint256()));
//! let function = resolve(&balance_of).unwrap();
//! assert_eq!(function.selector().to_string(), "0x70a08231");
//!
//! let payload = function.encode_call(&[AbiValue::Address([0x11; 20])]).unwrap();
//! assert_eq!(payload.len(), 4 + 32);
//!
//! let mut reply = vec![0u8; 32];
//! reply[31] = 42;
//! assert_eq!(function.decode_return_as::<u64>(&reply).unwrap(), 42);
//! ```

pub mod cache;
pub mod declaration;
pub mod function;
pub mod resolver;

pub use cache::FunctionCache;
pub use declaration::{
    CallKind, FunctionAnnotation, MethodDeclaration, ParameterDeclaration, ParameterRole,
    ReturnDeclaration, ReturnType,
};
pub use function::{ContractFunction, HostType, Selector};
pub use resolver::{function_name, parameters_descriptor, resolve, selector, signature};
