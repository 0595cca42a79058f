// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Numeric and Hex Support
//!
//! Stateless conversions between byte buffers, hex text, arbitrary-precision
//! integers and fixed-point decimals, used to feed and consume the codec.
//!
//! - **hex**: `0x`-prefixed text <-> bytes
//! - **number**: the closed [`Numeric`] union and exact narrowing
//! - **decimal**: token-unit scaling with floor rounding

pub mod decimal;
pub mod hex;
pub mod number;

pub use decimal::{format_ether, format_units, Decimal, DEFAULT_DECIMALS};
pub use hex::{to_byte_array, to_hex};
pub use number::{narrow, ExactInteger, Numeric};
