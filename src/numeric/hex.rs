// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Hexadecimal text conversions.
//!
//! Input may carry a `0x`/`0X` prefix and use either case; output is always
//! `0x` followed by lowercase digits.
//!
//! The empty buffer renders as `"0x0"`, and `"0x0"` parses back to the empty
//! buffer. A single zero byte still renders as `"0x00"`.

use crate::abi::error::{invalid_hex_error, AbiResult};
use num_bigint::BigUint;
use num_traits::Zero;

const ZERO_WITH_PREFIX: &str = "0x0";
const ZERO: &str = "0";

/// Strip an optional `0x`/`0X` prefix
pub fn strip_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Encode bytes as `0x`-prefixed lowercase hex; empty input gives `"0x0"`
pub fn to_hex(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return ZERO_WITH_PREFIX.to_string();
    }
    format!("0x{}", ::hex::encode(bytes))
}

/// Encode bytes as lowercase hex without prefix; empty input gives `"0"`
pub fn to_hex_unprefixed(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return ZERO.to_string();
    }
    ::hex::encode(bytes)
}

/// Decode hex text into bytes.
///
/// `"0"` (with or without prefix) decodes to an empty buffer. Any other
/// odd-length input is read as if it had one leading zero digit.
pub fn to_byte_array(hex: &str) -> AbiResult<Vec<u8>> {
    let digits = strip_prefix(hex);
    if digits == ZERO {
        return Ok(Vec::new());
    }

    let decoded = if digits.len() % 2 == 1 {
        ::hex::decode(format!("0{}", digits))
    } else {
        ::hex::decode(digits)
    };
    decoded.map_err(|e| invalid_hex_error(hex, &e.to_string()))
}

/// Decode hex text as an unsigned big-endian magnitude
pub fn to_biguint(hex: &str) -> AbiResult<BigUint> {
    let bytes = to_byte_array(hex)?;
    Ok(BigUint::from_bytes_be(&bytes))
}

/// Minimal `0x`-prefixed hex of an unsigned integer; zero gives `"0x0"`
pub fn biguint_to_hex(value: &BigUint) -> String {
    if value.is_zero() {
        return ZERO_WITH_PREFIX.to_string();
    }
    format!("0x{}", value.to_str_radix(16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[]), "0x0");
        assert_eq!(to_hex(&[0x00]), "0x00");
        assert_eq!(to_hex(&[0xAB, 0x01]), "0xab01");
        assert_eq!(to_hex_unprefixed(&[]), "0");
        assert_eq!(to_hex_unprefixed(&[0xFF]), "ff");
    }

    #[test]
    fn test_to_byte_array() {
        assert_eq!(to_byte_array("0xab01").unwrap(), vec![0xab, 0x01]);
        assert_eq!(to_byte_array("0XAB01").unwrap(), vec![0xab, 0x01]);
        assert_eq!(to_byte_array("aB01").unwrap(), vec![0xab, 0x01]);
        assert_eq!(to_byte_array("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(to_byte_array("0x5").unwrap(), vec![0x05]);
        assert_eq!(to_byte_array("0x123").unwrap(), vec![0x01, 0x23]);

        let error = to_byte_array("0xzz").unwrap_err();
        assert_eq!(error.category(), "conversion");
    }

    #[test]
    fn test_empty_buffer_asymmetry() {
        // empty renders as 0x0 and 0x0 parses to empty
        assert_eq!(to_hex(&[]), "0x0");
        assert!(to_byte_array("0x0").unwrap().is_empty());
        assert!(to_byte_array("0").unwrap().is_empty());
        // but a single zero byte keeps both digits
        assert_eq!(to_byte_array("0x00").unwrap(), vec![0]);
    }

    #[test]
    fn test_round_trip() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        assert_eq!(to_byte_array(&to_hex(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_biguint() {
        assert_eq!(to_biguint("0x0100").unwrap(), BigUint::from(256u32));
        assert_eq!(to_biguint("0x0").unwrap(), BigUint::from(0u32));
        assert_eq!(biguint_to_hex(&BigUint::from(0u32)), "0x0");
        assert_eq!(biguint_to_hex(&BigUint::from(255u32)), "0xff");
        assert_eq!(biguint_to_hex(&BigUint::from(4096u32)), "0x1000");
    }
}
