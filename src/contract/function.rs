// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Resolved contract functions.
//!
//! A [`ContractFunction`] holds everything needed to build a call payload
//! and to read its reply: the selector, the parameter tuple descriptor and
//! the return descriptor with its host-side shape.

use crate::abi::codec::{decode, encode_sequence};
use crate::abi::convert::FromAbiValue;
use crate::abi::descriptor::TypeDescriptor;
use crate::abi::error::{conversion_error, decoding_error, encoding_error, AbiResult};
use crate::abi::value::AbiValue;
use crate::contract::declaration::CallKind;
use crate::crypto::selector_of;
use log::trace;
use std::fmt;

/// First four bytes of the signature hash
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selector([u8; 4]);

impl Selector {
    pub fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Selector of a canonical signature such as `balanceOf(address)`
    pub fn from_signature(signature: &str) -> Self {
        Self(selector_of(signature))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Host-side shape of a decoded return
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    Value,
    Tuple,
    Struct { name: String, fields: Vec<String> },
}

/// Immutable ABI metadata for one contract function
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContractFunction {
    pub(crate) name: String,
    pub(crate) signature: String,
    pub(crate) selector: Selector,
    pub(crate) parameters_descriptor: TypeDescriptor,
    pub(crate) return_descriptor: TypeDescriptor,
    pub(crate) return_host_type: HostType,
    pub(crate) return_is_tuple: bool,
    pub(crate) kind: CallKind,
}

impl ContractFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Tuple of the encoded parameter types
    pub fn parameters_descriptor(&self) -> &TypeDescriptor {
        &self.parameters_descriptor
    }

    pub fn return_descriptor(&self) -> &TypeDescriptor {
        &self.return_descriptor
    }

    pub fn return_host_type(&self) -> &HostType {
        &self.return_host_type
    }

    /// Whether the reply is a positional tuple exposed field by field
    pub fn return_is_tuple(&self) -> bool {
        self.return_is_tuple
    }

    pub fn kind(&self) -> CallKind {
        self.kind
    }

    fn parameter_types(&self) -> &[TypeDescriptor] {
        self.parameters_descriptor.fields().unwrap_or(&[])
    }

    /// Call payload: selector followed by the encoded argument tuple
    pub fn encode_call(&self, arguments: &[AbiValue]) -> AbiResult<Vec<u8>> {
        let types = self.parameter_types();
        if types.len() != arguments.len() {
            return Err(encoding_error(
                &self.parameters_descriptor,
                AbiValue::tuple(arguments.to_vec()),
                &format!(
                    "{} expects {} arguments, got {}",
                    self.signature,
                    types.len(),
                    arguments.len()
                ),
            ));
        }

        let items: Vec<(&TypeDescriptor, &AbiValue)> = types.iter().zip(arguments).collect();
        let mut payload = self.selector.as_bytes().to_vec();
        payload.extend(encode_sequence(&items)?);
        trace!("Encoded call {} into {} bytes", self.signature, payload.len());
        Ok(payload)
    }

    /// Arguments of a call payload built for this function
    pub fn decode_arguments(&self, payload: &[u8]) -> AbiResult<Vec<AbiValue>> {
        match payload.split_first_chunk::<4>() {
            Some((selector, _)) if selector == self.selector.as_bytes() => {}
            _ => {
                return Err(decoding_error(
                    &self.parameters_descriptor,
                    0,
                    &format!("payload does not start with selector {}", self.selector),
                ))
            }
        }
        match decode(&self.parameters_descriptor, payload, 4)? {
            AbiValue::Tuple(values) => Ok(values),
            other => Err(conversion_error(other.type_name(), "argument list")),
        }
    }

    /// Decode a reply payload.
    ///
    /// Tuple returns yield the tuple itself; value and struct returns are
    /// read as a one-field tuple and unwrapped.
    pub fn decode_return(&self, payload: &[u8]) -> AbiResult<AbiValue> {
        if self.return_is_tuple {
            return decode(&self.return_descriptor, payload, 0);
        }

        let wrapper = TypeDescriptor::tuple(vec![self.return_descriptor.clone()]);
        match decode(&wrapper, payload, 0)? {
            AbiValue::Tuple(mut values) if values.len() == 1 => Ok(values.remove(0)),
            other => Err(decoding_error(
                &wrapper,
                0,
                &format!("expected a single value, got {}", other.type_name()),
            )),
        }
    }

    /// Decode a reply straight into a host type
    pub fn decode_return_as<T: FromAbiValue>(&self, payload: &[u8]) -> AbiResult<T> {
        T::from_abi_value(self.decode_return(payload)?)
    }

    /// Decode a struct reply into `(field name, value)` pairs in declared order
    pub fn decode_named_return(&self, payload: &[u8]) -> AbiResult<Vec<(String, AbiValue)>> {
        let HostType::Struct { name, fields } = &self.return_host_type else {
            return Err(conversion_error(&self.return_descriptor, "named struct fields"));
        };
        match self.decode_return(payload)? {
            AbiValue::Tuple(values) if values.len() == fields.len() => {
                Ok(fields.iter().cloned().zip(values).collect())
            }
            other => Err(conversion_error(other.type_name(), name)),
        }
    }
}

impl fmt::Display for ContractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.signature, self.selector)
    }
}
