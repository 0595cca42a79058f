// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Function Resolver
//!
//! Turns a [`MethodDeclaration`] into a [`ContractFunction`]. Resolution is
//! pure: the same declaration always yields an identical function, and every
//! problem with the declaration is reported here rather than at call time.
//!
//! # Steps
//!
//! 1. Name: the annotation name when present and non-blank, else the
//!    declared name
//! 2. Parameters: a tuple of the ABI-typed parameters, skipping cost
//!    parameters and parameters with no ABI type
//! 3. Signature `name(T1,T2,...)` and its Keccak-256 selector
//! 4. Return: must be a single-result wrapper with a known inner type
//! 5. Classification: only [`ReturnType::Tuple`] is exposed as a tuple

use crate::abi::descriptor::TypeDescriptor;
use crate::abi::error::{invalid_declaration_error, AbiResult};
use crate::contract::declaration::{MethodDeclaration, ReturnDeclaration, ReturnType};
use crate::contract::function::{ContractFunction, HostType, Selector};
use log::debug;

/// Resolve a declaration into its ABI metadata
pub fn resolve(declaration: &MethodDeclaration) -> AbiResult<ContractFunction> {
    let name = function_name(declaration);
    if name.trim().is_empty() {
        return Err(invalid_declaration_error(
            &format!("{}.{}", declaration.interface(), declaration.name()),
            "function name is blank",
        ));
    }

    let parameters_descriptor = parameters_descriptor(declaration);
    let signature = signature(name, &parameters_descriptor);
    let selector = selector(&signature);

    let return_type = match declaration.return_declaration() {
        ReturnDeclaration::Result(Some(return_type)) => return_type,
        ReturnDeclaration::Result(None) => {
            return Err(invalid_declaration_error(
                &signature,
                "inner return type cannot be determined",
            ))
        }
        ReturnDeclaration::Other(declared) => {
            return Err(invalid_declaration_error(
                &signature,
                &format!("return type {} is not a single-result wrapper", declared),
            ))
        }
    };

    let (return_descriptor, return_host_type) = match return_type {
        ReturnType::Value(descriptor) => (descriptor.clone(), HostType::Value),
        ReturnType::Tuple(fields) => (TypeDescriptor::tuple(fields.clone()), HostType::Tuple),
        ReturnType::Struct { name, fields } => (
            TypeDescriptor::tuple(fields.iter().map(|(_, ty)| ty.clone()).collect()),
            HostType::Struct {
                name: name.clone(),
                fields: fields.iter().map(|(field, _)| field.clone()).collect(),
            },
        ),
    };
    let return_is_tuple = matches!(return_type, ReturnType::Tuple(_));

    debug!(
        "Resolved {}.{} to {} [{}] returning {}",
        declaration.interface(),
        declaration.name(),
        signature,
        selector,
        return_descriptor
    );

    Ok(ContractFunction {
        name: name.to_string(),
        signature,
        selector,
        parameters_descriptor,
        return_descriptor,
        return_host_type,
        return_is_tuple,
        kind: declaration.kind(),
    })
}

/// On-chain name of the declared method
pub fn function_name(declaration: &MethodDeclaration) -> &str {
    declaration
        .annotation()
        .and_then(|annotation| annotation.name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| declaration.name())
}

/// Tuple of the parameters that are encoded into the call payload
pub fn parameters_descriptor(declaration: &MethodDeclaration) -> TypeDescriptor {
    TypeDescriptor::tuple(
        declaration
            .parameters()
            .iter()
            .filter(|parameter| parameter.is_encoded())
            .filter_map(|parameter| parameter.abi_type().cloned())
            .collect(),
    )
}

/// Canonical signature `name(T1,T2,...)`
pub fn signature(name: &str, parameters: &TypeDescriptor) -> String {
    let types: Vec<String> = parameters
        .fields()
        .unwrap_or(&[])
        .iter()
        .map(TypeDescriptor::canonical)
        .collect();
    format!("{}({})", name, types.join(","))
}

pub fn selector(signature: &str) -> Selector {
    Selector::from_signature(signature)
}
