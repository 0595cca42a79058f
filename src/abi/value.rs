// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! ABI Value Model
//!
//! [`AbiValue`] is the closed set of values the codec works with. Sized
//! payloads (`uintN`, `intN`, `bytesN`) and arrays are wrapped in small
//! types whose constructors validate their invariants, so a value that
//! exists is always well formed:
//!
//! - [`UintValue`] / [`IntValue`] always fit their declared bit width
//! - [`FixedBytesValue`] always holds 1 to 32 bytes
//! - a fixed-capacity [`ArrayValue`] always holds exactly `capacity` values
//! - the elements of an [`ArrayValue`] all share one variant
//!
//! Values carry no type descriptor; the descriptor is supplied next to the
//! value when encoding.

use crate::abi::descriptor::{validate_bits, DYNAMIC_CAPACITY};
use crate::abi::error::{invalid_type_error, overflow_error, AbiError, AbiResult};
use num_bigint::{BigInt, BigUint};
use std::fmt;

/// `uintN` payload
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UintValue {
    bits: u16,
    value: BigUint,
}

impl UintValue {
    pub fn new(bits: usize, value: impl Into<BigUint>) -> AbiResult<Self> {
        let bits = validate_bits("uint", bits)?;
        let value = value.into();
        if value.bits() > u64::from(bits) {
            return Err(overflow_error(&value, &format!("uint{}", bits)));
        }
        Ok(Self { bits, value })
    }

    /// `value` must already fit in `bits`
    pub(crate) fn from_parts(bits: u16, value: BigUint) -> Self {
        Self { bits, value }
    }

    pub fn bits(&self) -> usize {
        self.bits as usize
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }
}

/// `intN` payload
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntValue {
    bits: u16,
    value: BigInt,
}

impl IntValue {
    pub fn new(bits: usize, value: impl Into<BigInt>) -> AbiResult<Self> {
        let bits = validate_bits("int", bits)?;
        let value = value.into();
        // two's complement range: -2^(bits-1) ..= 2^(bits-1) - 1
        let limit = BigInt::from(1u8) << (bits as usize - 1);
        if value >= limit || value < -limit {
            return Err(overflow_error(&value, &format!("int{}", bits)));
        }
        Ok(Self { bits, value })
    }

    pub(crate) fn from_parts(bits: u16, value: BigInt) -> Self {
        Self { bits, value }
    }

    pub fn bits(&self) -> usize {
        self.bits as usize
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn into_value(self) -> BigInt {
        self.value
    }
}

/// `bytesN` payload
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixedBytesValue {
    bytes: Vec<u8>,
}

impl FixedBytesValue {
    pub fn new(bytes: impl Into<Vec<u8>>) -> AbiResult<Self> {
        let bytes = bytes.into();
        if !(1..=32).contains(&bytes.len()) {
            return Err(invalid_type_error(
                &format!("bytes{}", bytes.len()),
                "byte width must be between 1 and 32",
            ));
        }
        Ok(Self { bytes })
    }

    /// Byte width, equal to the payload length
    pub fn width(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Array of values tagged with its declared capacity
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayValue {
    /// `None` for dynamic arrays
    length: Option<usize>,
    values: Vec<AbiValue>,
}

impl ArrayValue {
    /// Array with the given capacity; [`DYNAMIC_CAPACITY`] makes it dynamic.
    ///
    /// Fails when a fixed capacity differs from the number of values.
    pub fn new(capacity: i64, values: Vec<AbiValue>) -> AbiResult<Self> {
        match capacity {
            DYNAMIC_CAPACITY => Self::dynamic(values),
            capacity if capacity >= 0 => Self::fixed(capacity as usize, values),
            capacity => Err(AbiError::CapacityMismatch {
                capacity,
                count: values.len(),
            }),
        }
    }

    pub fn dynamic(values: Vec<AbiValue>) -> AbiResult<Self> {
        check_same_variant(&values)?;
        Ok(Self {
            length: None,
            values,
        })
    }

    pub fn fixed(capacity: usize, values: Vec<AbiValue>) -> AbiResult<Self> {
        if capacity != values.len() {
            return Err(AbiError::CapacityMismatch {
                capacity: capacity as i64,
                count: values.len(),
            });
        }
        check_same_variant(&values)?;
        Ok(Self {
            length: Some(capacity),
            values,
        })
    }

    /// Declared capacity, [`DYNAMIC_CAPACITY`] for dynamic arrays
    pub fn capacity(&self) -> i64 {
        self.length.map_or(DYNAMIC_CAPACITY, |length| length as i64)
    }

    pub fn is_dynamic(&self) -> bool {
        self.length.is_none()
    }

    pub fn values(&self) -> &[AbiValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<AbiValue> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Elements must all be of the first element's variant
fn check_same_variant(values: &[AbiValue]) -> AbiResult<()> {
    let Some(first) = values.first() else {
        return Ok(());
    };
    let expected = std::mem::discriminant(first);
    match values
        .iter()
        .position(|value| std::mem::discriminant(value) != expected)
    {
        Some(index) => Err(invalid_type_error(
            &format!("{}[]", first.type_name()),
            &format!(
                "element {} is {}, not {}",
                index,
                values[index].type_name(),
                first.type_name()
            ),
        )),
        None => Ok(()),
    }
}

/// One instance of ABI data
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AbiValue {
    Bool(bool),
    Address([u8; 20]),
    Uint(UintValue),
    Int(IntValue),
    FixedBytes(FixedBytesValue),
    Bytes(Vec<u8>),
    String(String),
    Array(ArrayValue),
    /// Positional fields; structs are tuples in declared field order
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// `uintN` value
    pub fn uint(bits: usize, value: impl Into<BigUint>) -> AbiResult<Self> {
        UintValue::new(bits, value).map(AbiValue::Uint)
    }

    /// `intN` value
    pub fn int(bits: usize, value: impl Into<BigInt>) -> AbiResult<Self> {
        IntValue::new(bits, value).map(AbiValue::Int)
    }

    /// `uint256` value
    pub fn uint256(value: impl Into<BigUint>) -> AbiResult<Self> {
        Self::uint(256, value)
    }

    /// `int256` value
    pub fn int256(value: impl Into<BigInt>) -> AbiResult<Self> {
        Self::int(256, value)
    }

    /// `bytesN` value, width taken from the payload length
    pub fn fixed_bytes(bytes: impl Into<Vec<u8>>) -> AbiResult<Self> {
        FixedBytesValue::new(bytes).map(AbiValue::FixedBytes)
    }

    /// Array value with a declared capacity
    pub fn array(capacity: i64, values: Vec<AbiValue>) -> AbiResult<Self> {
        ArrayValue::new(capacity, values).map(AbiValue::Array)
    }

    /// Dynamic array value
    pub fn dynamic_array(values: Vec<AbiValue>) -> AbiResult<Self> {
        ArrayValue::dynamic(values).map(AbiValue::Array)
    }

    pub fn tuple(values: Vec<AbiValue>) -> Self {
        AbiValue::Tuple(values)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&[u8; 20]> {
        match self {
            AbiValue::Address(address) => Some(address),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<&BigUint> {
        match self {
            AbiValue::Uint(value) => Some(value.value()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            AbiValue::Int(value) => Some(value.value()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Payload of `bytes` or `bytesN`
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbiValue::Bytes(bytes) => Some(bytes),
            AbiValue::FixedBytes(bytes) => Some(bytes.as_bytes()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::Array(array) => Some(array.values()),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    /// Short name of the value's own shape, for diagnostics
    pub fn type_name(&self) -> String {
        match self {
            AbiValue::Bool(_) => "bool".to_string(),
            AbiValue::Address(_) => "address".to_string(),
            AbiValue::Uint(value) => format!("uint{}", value.bits()),
            AbiValue::Int(value) => format!("int{}", value.bits()),
            AbiValue::FixedBytes(value) => format!("bytes{}", value.width()),
            AbiValue::Bytes(_) => "bytes".to_string(),
            AbiValue::String(_) => "string".to_string(),
            AbiValue::Array(array) => {
                // element type of an empty array cannot be observed
                let element = array
                    .values()
                    .first()
                    .map_or_else(|| "unknown".to_string(), AbiValue::type_name);
                match array.capacity() {
                    DYNAMIC_CAPACITY => format!("{}[]", element),
                    capacity => format!("{}[{}]", element, capacity),
                }
            }
            AbiValue::Tuple(fields) => {
                let names: Vec<String> = fields.iter().map(AbiValue::type_name).collect();
                format!("({})", names.join(","))
            }
        }
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Bool(value) => write!(f, "{}", value),
            AbiValue::Address(address) => write!(f, "0x{}", hex::encode(address)),
            AbiValue::Uint(value) => write!(f, "{}", value.value()),
            AbiValue::Int(value) => write!(f, "{}", value.value()),
            AbiValue::FixedBytes(value) => write!(f, "0x{}", hex::encode(value.as_bytes())),
            AbiValue::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            AbiValue::String(value) => write!(f, "{:?}", value),
            AbiValue::Array(array) => write_joined(f, "[", array.values(), "]"),
            AbiValue::Tuple(fields) => write_joined(f, "(", fields, ")"),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    values: &[AbiValue],
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", value)?;
    }
    f.write_str(close)
}
