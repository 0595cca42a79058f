// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Conversions between [`AbiValue`] and host Rust types.
//!
//! Decoded values are materialized through [`FromAbiValue`]. Integer targets
//! go through exact narrowing, so a `uint256` holding 300 converts to `u16`
//! but fails for `u8`. `Vec<u8>` accepts both `bytes` and `uint8[]`.

use crate::abi::error::{conversion_error, overflow_error, AbiResult};
use crate::abi::value::{AbiValue, IntValue, UintValue};
use crate::numeric::narrow;
use num_bigint::{BigInt, BigUint};

/// Host type that can be built from a decoded value
pub trait FromAbiValue: Sized {
    fn from_abi_value(value: AbiValue) -> AbiResult<Self>;
}

impl AbiValue {
    /// Convert into a host type
    pub fn into_host<T: FromAbiValue>(self) -> AbiResult<T> {
        T::from_abi_value(self)
    }
}

impl FromAbiValue for AbiValue {
    fn from_abi_value(value: AbiValue) -> AbiResult<Self> {
        Ok(value)
    }
}

impl FromAbiValue for bool {
    fn from_abi_value(value: AbiValue) -> AbiResult<Self> {
        match value {
            AbiValue::Bool(value) => Ok(value),
            other => Err(conversion_error(other.type_name(), "bool")),
        }
    }
}

impl FromAbiValue for BigInt {
    fn from_abi_value(value: AbiValue) -> AbiResult<Self> {
        match value {
            AbiValue::Uint(value) => Ok(BigInt::from(value.into_value())),
            AbiValue::Int(value) => Ok(value.into_value()),
            other => Err(conversion_error(other.type_name(), "BigInt")),
        }
    }
}

impl FromAbiValue for BigUint {
    fn from_abi_value(value: AbiValue) -> AbiResult<Self> {
        match value {
            AbiValue::Uint(value) => Ok(value.into_value()),
            AbiValue::Int(value) => {
                let value = value.into_value();
                value
                    .to_biguint()
                    .ok_or_else(|| overflow_error(&value, "BigUint"))
            }
            other => Err(conversion_error(other.type_name(), "BigUint")),
        }
    }
}

macro_rules! impl_from_abi_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromAbiValue for $ty {
                fn from_abi_value(value: AbiValue) -> AbiResult<Self> {
                    match value {
                        AbiValue::Uint(_) | AbiValue::Int(_) => {
                            narrow(&BigInt::from_abi_value(value)?)
                        }
                        other => Err(conversion_error(other.type_name(), stringify!($ty))),
                    }
                }
            }
        )*
    };
}

impl_from_abi_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl FromAbiValue for String {
    fn from_abi_value(value: AbiValue) -> AbiResult<Self> {
        match value {
            AbiValue::String(value) => Ok(value),
            other => Err(conversion_error(other.type_name(), "String")),
        }
    }
}

/// `address` when `N == 20`, otherwise `bytesN` of the same width
impl<const N: usize> FromAbiValue for [u8; N] {
    fn from_abi_value(value: AbiValue) -> AbiResult<Self> {
        let target = || format!("[u8; {}]", N);
        let bytes: &[u8] = match &value {
            AbiValue::Address(address) if N == 20 => address,
            AbiValue::FixedBytes(bytes) if bytes.width() == N => bytes.as_bytes(),
            other => return Err(conversion_error(other.type_name(), &target())),
        };
        <[u8; N]>::try_from(bytes).map_err(|_| conversion_error(value.type_name(), &target()))
    }
}

impl<T: FromAbiValue> FromAbiValue for Vec<T> {
    fn from_abi_value(value: AbiValue) -> AbiResult<Self> {
        match value {
            AbiValue::Array(array) => array
                .into_values()
                .into_iter()
                .map(T::from_abi_value)
                .collect(),
            // each byte is offered to T as a uint8
            AbiValue::Bytes(bytes) => bytes
                .into_iter()
                .map(|byte| T::from_abi_value(AbiValue::Uint(UintValue::from_parts(8, byte.into()))))
                .collect(),
            other => Err(conversion_error(other.type_name(), "Vec")),
        }
    }
}

macro_rules! impl_from_abi_tuple {
    ($len:expr => $($name:ident),+) => {
        impl<$($name: FromAbiValue),+> FromAbiValue for ($($name,)+) {
            fn from_abi_value(value: AbiValue) -> AbiResult<Self> {
                let target = || format!("tuple of {} fields", $len);
                match value {
                    AbiValue::Tuple(fields) if fields.len() == $len => {
                        let mut fields = fields.into_iter();
                        Ok(($(
                            <$name>::from_abi_value(
                                fields.next().ok_or_else(|| conversion_error("tuple", &target()))?,
                            )?,
                        )+))
                    }
                    other => Err(conversion_error(other.type_name(), &target())),
                }
            }
        }
    };
}

impl_from_abi_tuple!(1 => A);
impl_from_abi_tuple!(2 => A, B);
impl_from_abi_tuple!(3 => A, B, C);
impl_from_abi_tuple!(4 => A, B, C, D);

// ============================================================================
// Host -> value
// ============================================================================

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        AbiValue::Bool(value)
    }
}

macro_rules! impl_abi_value_from_unsigned {
    ($($ty:ty),*) => {
        $(
            /// Builds a `uint256`
            impl From<$ty> for AbiValue {
                fn from(value: $ty) -> Self {
                    AbiValue::Uint(UintValue::from_parts(256, BigUint::from(value)))
                }
            }
        )*
    };
}

macro_rules! impl_abi_value_from_signed {
    ($($ty:ty),*) => {
        $(
            /// Builds an `int256`
            impl From<$ty> for AbiValue {
                fn from(value: $ty) -> Self {
                    AbiValue::Int(IntValue::from_parts(256, BigInt::from(value)))
                }
            }
        )*
    };
}

impl_abi_value_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_abi_value_from_signed!(i8, i16, i32, i64, i128, isize);

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        AbiValue::String(value.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(value: String) -> Self {
        AbiValue::String(value)
    }
}

/// Builds an `address`
impl From<[u8; 20]> for AbiValue {
    fn from(value: [u8; 20]) -> Self {
        AbiValue::Address(value)
    }
}

/// Builds dynamic `bytes`
impl From<Vec<u8>> for AbiValue {
    fn from(value: Vec<u8>) -> Self {
        AbiValue::Bytes(value)
    }
}
