// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod abi;
pub mod contract;
pub mod crypto;
pub mod numeric;
pub mod tests;

// Re-export main codec types for convenience
pub use abi::{AbiError, AbiResult, AbiValue, FromAbiValue, TypeDescriptor};
pub use contract::{resolve, ContractFunction, FunctionCache, MethodDeclaration, ReturnType};
