// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Closed set of numeric representations and exact conversions between them.
//!
//! Byte buffers and hex text are read as unsigned big-endian magnitudes.
//! Narrowing to a fixed-width integer fails instead of wrapping, and a
//! decimal with a fractional part is floored when an integer is requested.

use crate::abi::error::{invalid_hex_error, overflow_error, AbiResult};
use crate::numeric::decimal::Decimal;
use crate::numeric::hex;
use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};

/// Supported source representations of a number
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Numeric {
    Int(i128),
    BigInt(BigInt),
    Decimal(Decimal),
    /// Unsigned big-endian magnitude
    Bytes(Vec<u8>),
    /// Unsigned magnitude as hex text, prefix optional
    Hex(String),
}

impl Numeric {
    /// Exact integer value; decimals are floored
    pub fn to_big_int(&self) -> AbiResult<BigInt> {
        match self {
            Numeric::Int(value) => Ok(BigInt::from(*value)),
            Numeric::BigInt(value) => Ok(value.clone()),
            Numeric::Decimal(value) => Ok(value.floor()),
            Numeric::Bytes(bytes) => Ok(BigInt::from(BigUint::from_bytes_be(bytes))),
            Numeric::Hex(text) => Ok(BigInt::from(hex::to_biguint(text)?)),
        }
    }

    /// Non-negative integer value
    pub fn to_big_uint(&self) -> AbiResult<BigUint> {
        let value = self.to_big_int()?;
        value
            .to_biguint()
            .ok_or_else(|| overflow_error(&value, "BigUint"))
    }

    pub fn to_decimal(&self) -> AbiResult<Decimal> {
        match self {
            Numeric::Decimal(value) => Ok(value.clone()),
            Numeric::Int(_) | Numeric::BigInt(_) | Numeric::Bytes(_) | Numeric::Hex(_) => {
                Ok(Decimal::from_integer(self.to_big_int()?))
            }
        }
    }

    /// `0x`-prefixed lowercase hex; negative values have no hex form
    pub fn to_hex(&self) -> AbiResult<String> {
        match self {
            Numeric::Bytes(bytes) => Ok(hex::to_hex(bytes)),
            Numeric::Hex(text) => {
                let digits = hex::strip_prefix(text);
                if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
                    return Err(invalid_hex_error(text, "invalid hex digit"));
                }
                if digits.is_empty() {
                    return Ok(hex::to_hex(&[]));
                }
                Ok(format!("0x{}", digits.to_ascii_lowercase()))
            }
            Numeric::Int(_) | Numeric::BigInt(_) | Numeric::Decimal(_) => {
                Ok(hex::biguint_to_hex(&self.to_big_uint()?))
            }
        }
    }

    /// Big-endian bytes; zero is the empty buffer, matching `to_hex`
    pub fn to_byte_array(&self) -> AbiResult<Vec<u8>> {
        match self {
            Numeric::Bytes(bytes) => Ok(bytes.clone()),
            Numeric::Hex(text) => hex::to_byte_array(text),
            Numeric::Int(_) | Numeric::BigInt(_) | Numeric::Decimal(_) => {
                let value = self.to_big_uint()?;
                if value.is_zero() {
                    return Ok(Vec::new());
                }
                Ok(value.to_bytes_be())
            }
        }
    }

    /// Exact conversion to a fixed-width integer
    pub fn to_exact<T: ExactInteger>(&self) -> AbiResult<T> {
        narrow(&self.to_big_int()?)
    }

    pub fn to_u8(&self) -> AbiResult<u8> {
        self.to_exact()
    }

    pub fn to_u16(&self) -> AbiResult<u16> {
        self.to_exact()
    }

    pub fn to_u32(&self) -> AbiResult<u32> {
        self.to_exact()
    }

    pub fn to_u64(&self) -> AbiResult<u64> {
        self.to_exact()
    }

    pub fn to_u128(&self) -> AbiResult<u128> {
        self.to_exact()
    }

    pub fn to_i8(&self) -> AbiResult<i8> {
        self.to_exact()
    }

    pub fn to_i16(&self) -> AbiResult<i16> {
        self.to_exact()
    }

    pub fn to_i32(&self) -> AbiResult<i32> {
        self.to_exact()
    }

    pub fn to_i64(&self) -> AbiResult<i64> {
        self.to_exact()
    }

    pub fn to_i128(&self) -> AbiResult<i128> {
        self.to_exact()
    }
}

impl From<i128> for Numeric {
    fn from(value: i128) -> Self {
        Numeric::Int(value)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Int(i128::from(value))
    }
}

impl From<u64> for Numeric {
    fn from(value: u64) -> Self {
        Numeric::Int(i128::from(value))
    }
}

impl From<BigInt> for Numeric {
    fn from(value: BigInt) -> Self {
        Numeric::BigInt(value)
    }
}

impl From<BigUint> for Numeric {
    fn from(value: BigUint) -> Self {
        Numeric::BigInt(BigInt::from(value))
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Numeric::Decimal(value)
    }
}

impl From<Vec<u8>> for Numeric {
    fn from(value: Vec<u8>) -> Self {
        Numeric::Bytes(value)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Numeric::Hex(value.to_string())
    }
}

/// Fixed-width integer reachable by exact conversion from [`BigInt`]
pub trait ExactInteger: Sized {
    const NAME: &'static str;

    fn from_big_int(value: &BigInt) -> Option<Self>;
}

macro_rules! impl_exact_integer {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl ExactInteger for $ty {
                const NAME: &'static str = stringify!($ty);

                fn from_big_int(value: &BigInt) -> Option<Self> {
                    value.$method()
                }
            }
        )*
    };
}

impl_exact_integer!(
    u8 => to_u8,
    u16 => to_u16,
    u32 => to_u32,
    u64 => to_u64,
    u128 => to_u128,
    usize => to_usize,
    i8 => to_i8,
    i16 => to_i16,
    i32 => to_i32,
    i64 => to_i64,
    i128 => to_i128,
    isize => to_isize,
);

/// Convert to `T`, failing if the value is out of range
pub fn narrow<T: ExactInteger>(value: &BigInt) -> AbiResult<T> {
    T::from_big_int(value).ok_or_else(|| overflow_error(value, T::NAME))
}
