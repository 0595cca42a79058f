// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point decimals for token-unit scaling.
//!
//! A [`Decimal`] is `units / 10^scale`. Values are kept normalized (no
//! trailing fractional zeros), so equality is by value.
//!
//! # Rounding
//!
//! Every conversion that can lose digits rounds toward negative infinity
//! (floor): [`Decimal::to_units`], [`Decimal::floor`] and [`Decimal::div`].
//! `-1.5` therefore becomes `-2` as an integer, never `-1`.

use crate::abi::error::{invalid_number_error, AbiResult};
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};
use std::fmt;
use std::str::FromStr;

/// Decimal places of a native token amount (wei per ether)
pub const DEFAULT_DECIMALS: u32 = 18;

/// Exact decimal number `units / 10^scale`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    units: BigInt,
    scale: u32,
}

fn pow10(exponent: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exponent as usize)
}

/// Quotient rounded toward negative infinity
fn div_floor(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if !remainder.is_zero() && (remainder.sign() == Sign::Minus) != (denominator.sign() == Sign::Minus)
    {
        quotient - 1
    } else {
        quotient
    }
}

impl Decimal {
    /// `units / 10^scale`
    pub fn new(units: impl Into<BigInt>, scale: u32) -> Self {
        let mut units = units.into();
        let mut scale = scale;
        let ten = BigInt::from(10u8);
        while scale > 0 && !units.is_zero() && (&units % &ten).is_zero() {
            units /= &ten;
            scale -= 1;
        }
        if units.is_zero() {
            scale = 0;
        }
        Self { units, scale }
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self::new(value, 0)
    }

    /// Token amount in base units scaled down by `decimals`
    pub fn from_units(units: impl Into<BigInt>, decimals: u32) -> Self {
        Self::new(units, decimals)
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn units(&self) -> &BigInt {
        &self.units
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    pub fn is_negative(&self) -> bool {
        self.units.is_negative()
    }

    /// Base units at `decimals` places, flooring any excess precision
    pub fn to_units(&self, decimals: u32) -> BigInt {
        if decimals >= self.scale {
            &self.units * pow10(decimals - self.scale)
        } else {
            div_floor(&self.units, &pow10(self.scale - decimals))
        }
    }

    /// `unitsE-scale` form, short whatever the scale
    fn scientific(&self) -> String {
        format!("{}E-{}", self.units, self.scale)
    }

    /// Largest integer not greater than this value
    pub fn floor(&self) -> BigInt {
        self.to_units(0)
    }

    pub fn add(&self, other: &Decimal) -> Decimal {
        let scale = self.scale.max(other.scale);
        Decimal::new(self.to_units(scale) + other.to_units(scale), scale)
    }

    pub fn sub(&self, other: &Decimal) -> Decimal {
        let scale = self.scale.max(other.scale);
        Decimal::new(self.to_units(scale) - other.to_units(scale), scale)
    }

    /// Exact product; fails when the combined scale overflows
    pub fn mul(&self, other: &Decimal) -> AbiResult<Decimal> {
        let scale = self
            .scale
            .checked_add(other.scale)
            .ok_or_else(|| invalid_number_error(&self.scientific(), "product scale overflows"))?;
        Ok(Decimal::new(&self.units * &other.units, scale))
    }

    /// Quotient floored to [`DEFAULT_DECIMALS`] places
    pub fn div(&self, other: &Decimal) -> AbiResult<Decimal> {
        if other.units.is_zero() {
            return Err(invalid_number_error(&self.to_string(), "division by zero"));
        }
        let shift = other
            .scale
            .checked_add(DEFAULT_DECIMALS)
            .ok_or_else(|| invalid_number_error(&other.scientific(), "divisor scale overflows"))?;
        let numerator = &self.units * pow10(shift);
        let denominator = &other.units * pow10(self.scale);
        Ok(Decimal::new(
            div_floor(&numerator, &denominator),
            DEFAULT_DECIMALS,
        ))
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::from_integer(value)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::from_integer(value)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_units(&self.units, self.scale))
    }
}

impl FromStr for Decimal {
    type Err = crate::abi::error::AbiError;

    /// Parses plain decimal text such as `-12.5` or `0.000001`
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (negative, body) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.strip_prefix('+').unwrap_or(input)),
        };
        let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));
        let valid = |part: &str| part.bytes().all(|c| c.is_ascii_digit());
        if (integer.is_empty() && fraction.is_empty()) || !valid(integer) || !valid(fraction) {
            return Err(invalid_number_error(input, "expected decimal digits"));
        }

        let digits = format!("{}{}", integer, fraction);
        let magnitude = BigInt::from_str(if digits.is_empty() { "0" } else { &digits })
            .map_err(|e| invalid_number_error(input, &e.to_string()))?;
        let units = if negative { -magnitude } else { magnitude };
        let scale = u32::try_from(fraction.len())
            .map_err(|_| invalid_number_error(input, "too many decimal places"))?;
        Ok(Decimal::new(units, scale))
    }
}

/// Render base units as a decimal string with exactly `decimals` places,
/// e.g. `1500000000000000000` at 18 decimals is `1.500000000000000000`
pub fn format_units(units: &BigInt, decimals: u32) -> String {
    let sign = if units.is_negative() { "-" } else { "" };
    let digits = units.magnitude().to_string();
    if decimals == 0 {
        return format!("{}{}", sign, digits);
    }
    let scale = decimals as usize;
    let padded = format!("{:0>width$}", digits, width = scale + 1);
    let (integer, fraction) = padded.split_at(padded.len() - scale);
    format!("{}{}.{}", sign, integer, fraction)
}

/// [`format_units`] at [`DEFAULT_DECIMALS`]
pub fn format_ether(units: &BigInt) -> String {
    format_units(units, DEFAULT_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(input: &str) -> Decimal {
        input.parse().expect("valid decimal")
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(decimal("1.50").to_string(), "1.5");
        assert_eq!(decimal("-0.001").to_string(), "-0.001");
        assert_eq!(decimal("+42").to_string(), "42");
        assert_eq!(decimal(".5").to_string(), "0.5");
        assert_eq!(decimal("0.000").to_string(), "0");
        assert_eq!(decimal("-0").to_string(), "0");

        for input in ["", "-", ".", "1.2.3", "abc", "1e18", "0x10"] {
            assert!(input.parse::<Decimal>().is_err(), "{} should not parse", input);
        }
    }

    #[test]
    fn test_normalized_equality() {
        assert_eq!(decimal("1.500"), decimal("1.5"));
        assert_eq!(Decimal::new(1500, 3), Decimal::new(15, 1));
        assert_eq!(decimal("1.5").scale(), 1);
    }

    #[test]
    fn test_units_scaling() {
        let amount = Decimal::from_units(1_500_000_000_000_000_000i64, DEFAULT_DECIMALS);
        assert_eq!(amount, decimal("1.5"));
        assert_eq!(
            amount.to_units(DEFAULT_DECIMALS),
            BigInt::from(1_500_000_000_000_000_000i64)
        );
        assert_eq!(decimal("2.5").to_units(6), BigInt::from(2_500_000));
    }

    #[test]
    fn test_floor_rounding() {
        assert_eq!(decimal("1.9").floor(), BigInt::from(1));
        assert_eq!(decimal("-1.1").floor(), BigInt::from(-2));
        assert_eq!(decimal("-1.5").floor(), BigInt::from(-2));
        assert_eq!(decimal("-2").floor(), BigInt::from(-2));
        // excess precision is floored too
        assert_eq!(decimal("0.0000019").to_units(6), BigInt::from(1));
        assert_eq!(decimal("-0.0000019").to_units(6), BigInt::from(-2));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(decimal("1.25").add(&decimal("0.75")), decimal("2"));
        assert_eq!(decimal("1").sub(&decimal("0.001")), decimal("0.999"));
        assert_eq!(decimal("1.5").mul(&decimal("-2.5")).unwrap(), decimal("-3.75"));

        let third = decimal("1").div(&decimal("3")).unwrap();
        assert_eq!(third.to_string(), "0.333333333333333333");
        let negative_third = decimal("-1").div(&decimal("3")).unwrap();
        assert_eq!(negative_third.to_string(), "-0.333333333333333334");

        assert!(decimal("1").div(&Decimal::zero()).is_err());
    }

    #[test]
    fn test_scale_overflow_is_an_error() {
        let tiny = Decimal::new(3, u32::MAX);
        let error = tiny.mul(&decimal("0.7")).unwrap_err();
        assert_eq!(error.category(), "conversion");
        assert!(error.to_string().contains("3E-4294967295"), "{}", error);

        let error = decimal("1").div(&tiny).unwrap_err();
        assert!(error.to_string().contains("scale overflows"), "{}", error);

        // within range the scales simply add
        assert_eq!(tiny.mul(&Decimal::from_integer(2)).unwrap().scale(), u32::MAX);
    }

    #[test]
    fn test_format_units() {
        assert_eq!(
            format_ether(&BigInt::from(1_500_000_000_000_000_000i64)),
            "1.500000000000000000"
        );
        assert_eq!(format_units(&BigInt::from(5), 3), "0.005");
        assert_eq!(format_units(&BigInt::from(-5), 3), "-0.005");
        assert_eq!(format_units(&BigInt::from(1234), 0), "1234");
    }
}
