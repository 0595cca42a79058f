// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! ABI Type Descriptors
//!
//! A [`TypeDescriptor`] describes the shape of one ABI type. Descriptors are
//! immutable: every constructor validates its input, and derived properties
//! such as [`TypeDescriptor::is_dynamic`] are computed from the shape on each
//! call, so they can never disagree with it.
//!
//! The canonical type string (`Display`) is the text fed into the signature
//! hash. It has no whitespace and no field names:
//!
//! ```rust
//! use abicodec_rust::abi::TypeDescriptor;
//!
//! let ty: TypeDescriptor = "(address,uint256[])[2]".parse().unwrap();
//! assert!(ty.is_dynamic());
//! assert_eq!(ty.to_string(), "(address,uint256[])[2]");
//! ```

use crate::abi::error::{invalid_type_error, AbiResult};
use std::fmt;
use std::str::FromStr;

/// Capacity sentinel marking a dynamic-length array
pub const DYNAMIC_CAPACITY: i64 = -1;

/// Kind of an ABI type, without its parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Bool,
    Address,
    Uint,
    Int,
    FixedBytes,
    Bytes,
    String,
    Array,
    Tuple,
}

/// Recursive description of one ABI type
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    shape: Shape,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Shape {
    Bool,
    Address,
    /// Bit width, 8..=256 in steps of 8
    Uint(u16),
    /// Bit width, 8..=256 in steps of 8
    Int(u16),
    /// Byte width, 1..=32
    FixedBytes(u8),
    Bytes,
    String,
    /// `length` is `None` for dynamic arrays
    Array {
        element: Box<TypeDescriptor>,
        length: Option<usize>,
    },
    Tuple(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
    fn from_shape(shape: Shape) -> Self {
        Self { shape }
    }

    pub(crate) fn shape(&self) -> &Shape {
        &self.shape
    }

    /// `bool`
    pub fn bool() -> Self {
        Self::from_shape(Shape::Bool)
    }

    /// `address`
    pub fn address() -> Self {
        Self::from_shape(Shape::Address)
    }

    /// `string`
    pub fn string() -> Self {
        Self::from_shape(Shape::String)
    }

    /// Dynamic `bytes`
    pub fn bytes() -> Self {
        Self::from_shape(Shape::Bytes)
    }

    /// `uintN`, where `bits` is a multiple of 8 in 8..=256
    pub fn uint(bits: usize) -> AbiResult<Self> {
        let bits = validate_bits("uint", bits)?;
        Ok(Self::from_shape(Shape::Uint(bits)))
    }

    /// `intN`, where `bits` is a multiple of 8 in 8..=256
    pub fn int(bits: usize) -> AbiResult<Self> {
        let bits = validate_bits("int", bits)?;
        Ok(Self::from_shape(Shape::Int(bits)))
    }

    /// `uint256`
    pub fn uint256() -> Self {
        Self::from_shape(Shape::Uint(256))
    }

    /// `int256`
    pub fn int256() -> Self {
        Self::from_shape(Shape::Int(256))
    }

    /// `bytesN`, where `len` is in 1..=32
    pub fn fixed_bytes(len: usize) -> AbiResult<Self> {
        if !(1..=32).contains(&len) {
            return Err(invalid_type_error(
                &format!("bytes{}", len),
                "byte width must be between 1 and 32",
            ));
        }
        Ok(Self::from_shape(Shape::FixedBytes(len as u8)))
    }

    /// Array with the given capacity; [`DYNAMIC_CAPACITY`] makes it dynamic
    pub fn array(element: TypeDescriptor, capacity: i64) -> AbiResult<Self> {
        match capacity {
            DYNAMIC_CAPACITY => Ok(Self::dynamic_array(element)),
            capacity if capacity >= 0 => Ok(Self::fixed_array(element, capacity as usize)),
            capacity => Err(invalid_type_error(
                &format!("{}[{}]", element, capacity),
                "array capacity must be non-negative or the dynamic sentinel",
            )),
        }
    }

    /// `T[]`
    pub fn dynamic_array(element: TypeDescriptor) -> Self {
        Self::from_shape(Shape::Array {
            element: Box::new(element),
            length: None,
        })
    }

    /// `T[N]`
    pub fn fixed_array(element: TypeDescriptor, length: usize) -> Self {
        Self::from_shape(Shape::Array {
            element: Box::new(element),
            length: Some(length),
        })
    }

    /// `(T1,T2,...)`; structs are tuples too
    pub fn tuple(fields: Vec<TypeDescriptor>) -> Self {
        Self::from_shape(Shape::Tuple(fields))
    }

    pub fn kind(&self) -> TypeKind {
        match &self.shape {
            Shape::Bool => TypeKind::Bool,
            Shape::Address => TypeKind::Address,
            Shape::Uint(_) => TypeKind::Uint,
            Shape::Int(_) => TypeKind::Int,
            Shape::FixedBytes(_) => TypeKind::FixedBytes,
            Shape::Bytes => TypeKind::Bytes,
            Shape::String => TypeKind::String,
            Shape::Array { .. } => TypeKind::Array,
            Shape::Tuple(_) => TypeKind::Tuple,
        }
    }

    /// Bit width of `uintN`/`intN`, byte width of `bytesN`
    pub fn width(&self) -> Option<usize> {
        match &self.shape {
            Shape::Uint(bits) | Shape::Int(bits) => Some(*bits as usize),
            Shape::FixedBytes(len) => Some(*len as usize),
            _ => None,
        }
    }

    /// Element type of an array
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match &self.shape {
            Shape::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Array capacity, [`DYNAMIC_CAPACITY`] for dynamic arrays
    pub fn capacity(&self) -> Option<i64> {
        match &self.shape {
            Shape::Array { length: None, .. } => Some(DYNAMIC_CAPACITY),
            Shape::Array {
                length: Some(length),
                ..
            } => Some(*length as i64),
            _ => None,
        }
    }

    /// Field types of a tuple
    pub fn fields(&self) -> Option<&[TypeDescriptor]> {
        match &self.shape {
            Shape::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    /// Whether the encoded size depends on the value
    pub fn is_dynamic(&self) -> bool {
        match &self.shape {
            Shape::Bytes | Shape::String => true,
            Shape::Array { length: None, .. } => true,
            Shape::Array { element, .. } => element.is_dynamic(),
            Shape::Tuple(fields) => fields.iter().any(TypeDescriptor::is_dynamic),
            _ => false,
        }
    }

    /// Number of 32-byte words this type occupies in an enclosing head.
    ///
    /// Dynamic types take a single pointer slot.
    pub fn head_words(&self) -> usize {
        if self.is_dynamic() {
            return 1;
        }
        match &self.shape {
            Shape::Array {
                element,
                length: Some(length),
            } => length.saturating_mul(element.head_words()),
            Shape::Tuple(fields) => fields
                .iter()
                .fold(0usize, |words, field| words.saturating_add(field.head_words())),
            _ => 1,
        }
    }

    /// Canonical type string used for signature hashing
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

pub(crate) fn validate_bits(prefix: &str, bits: usize) -> AbiResult<u16> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(invalid_type_error(
            &format!("{}{}", prefix, bits),
            "bit width must be a multiple of 8 between 8 and 256",
        ));
    }
    Ok(bits as u16)
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            Shape::Bool => f.write_str("bool"),
            Shape::Address => f.write_str("address"),
            Shape::Uint(bits) => write!(f, "uint{}", bits),
            Shape::Int(bits) => write!(f, "int{}", bits),
            Shape::FixedBytes(len) => write!(f, "bytes{}", len),
            Shape::Bytes => f.write_str("bytes"),
            Shape::String => f.write_str("string"),
            Shape::Array {
                element,
                length: None,
            } => write!(f, "{}[]", element),
            Shape::Array {
                element,
                length: Some(length),
            } => write!(f, "{}[{}]", element, length),
            Shape::Tuple(fields) => {
                f.write_str("(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", field)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = crate::abi::error::AbiError;

    /// Parses a canonical type string. `uint` and `int` are read as their
    /// 256-bit forms.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeParser { input, pos: 0 };
        let ty = parser.parse_type()?;
        if parser.pos != input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }
}

struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl TypeParser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn error(&self, message: &str) -> crate::abi::error::AbiError {
        invalid_type_error(self.input, &format!("{} at position {}", message, self.pos))
    }

    fn expect(&mut self, byte: u8) -> AbiResult<()> {
        if self.peek() != Some(byte) {
            return Err(self.error(&format!("expected '{}'", byte as char)));
        }
        self.pos += 1;
        Ok(())
    }

    fn parse_type(&mut self) -> AbiResult<TypeDescriptor> {
        let mut ty = if self.peek() == Some(b'(') {
            self.parse_tuple()?
        } else {
            self.parse_elementary()?
        };

        while self.peek() == Some(b'[') {
            self.pos += 1;
            let start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            let input = self.input;
            let digits = &input[start..self.pos];
            self.expect(b']')?;
            ty = if digits.is_empty() {
                TypeDescriptor::dynamic_array(ty)
            } else {
                let length = parse_number(digits).ok_or_else(|| self.error("invalid array length"))?;
                TypeDescriptor::fixed_array(ty, length)
            };
        }

        Ok(ty)
    }

    fn parse_tuple(&mut self) -> AbiResult<TypeDescriptor> {
        self.expect(b'(')?;
        let mut fields = Vec::new();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(TypeDescriptor::tuple(fields));
        }
        loop {
            fields.push(self.parse_type()?);
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(TypeDescriptor::tuple(fields));
                }
                _ => return Err(self.error("expected ',' or ')'")),
            }
        }
    }

    fn parse_elementary(&mut self) -> AbiResult<TypeDescriptor> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        let input = self.input;
        let name = &input[start..self.pos];

        let sized = |digits: &str, default: usize| -> Option<usize> {
            if digits.is_empty() {
                Some(default)
            } else {
                parse_number(digits)
            }
        };

        match name {
            "" => Err(self.error("expected a type")),
            "bool" => Ok(TypeDescriptor::bool()),
            "address" => Ok(TypeDescriptor::address()),
            "string" => Ok(TypeDescriptor::string()),
            "bytes" => Ok(TypeDescriptor::bytes()),
            _ => {
                if let Some(digits) = name.strip_prefix("uint") {
                    let bits = sized(digits, 256).ok_or_else(|| self.error("invalid uint width"))?;
                    TypeDescriptor::uint(bits)
                } else if let Some(digits) = name.strip_prefix("int") {
                    let bits = sized(digits, 256).ok_or_else(|| self.error("invalid int width"))?;
                    TypeDescriptor::int(bits)
                } else if let Some(digits) = name.strip_prefix("bytes") {
                    let len = parse_number(digits).ok_or_else(|| self.error("invalid bytes width"))?;
                    TypeDescriptor::fixed_bytes(len)
                } else {
                    Err(self.error(&format!("unknown type '{}'", name)))
                }
            }
        }
    }
}

/// Decimal digits without a leading zero (except "0" itself)
fn parse_number(digits: &str) -> Option<usize> {
    if digits.is_empty()
        || !digits.bytes().all(|c| c.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> TypeDescriptor {
        input.parse().expect("valid type string")
    }

    #[test]
    fn test_canonical_strings() {
        assert_eq!(TypeDescriptor::uint256().to_string(), "uint256");
        assert_eq!(TypeDescriptor::int(8).unwrap().to_string(), "int8");
        assert_eq!(TypeDescriptor::fixed_bytes(32).unwrap().to_string(), "bytes32");
        assert_eq!(TypeDescriptor::bytes().to_string(), "bytes");

        let nested = TypeDescriptor::tuple(vec![
            TypeDescriptor::address(),
            TypeDescriptor::dynamic_array(TypeDescriptor::fixed_array(TypeDescriptor::bool(), 2)),
            TypeDescriptor::tuple(vec![TypeDescriptor::string()]),
        ]);
        assert_eq!(nested.canonical(), "(address,bool[2][],(string))");
        assert_eq!(TypeDescriptor::tuple(vec![]).canonical(), "()");
    }

    #[test]
    fn test_dynamic_propagation() {
        assert!(!TypeDescriptor::uint256().is_dynamic());
        assert!(!TypeDescriptor::fixed_bytes(4).unwrap().is_dynamic());
        assert!(TypeDescriptor::string().is_dynamic());
        assert!(TypeDescriptor::bytes().is_dynamic());

        assert!(!parse("uint8[3]").is_dynamic());
        assert!(parse("uint8[]").is_dynamic());
        assert!(parse("string[3]").is_dynamic());
        assert!(!parse("(uint256,bool)").is_dynamic());
        assert!(parse("(uint256,(bool,bytes))").is_dynamic());
        assert!(!parse("(uint256,bytes32)[2][3]").is_dynamic());
    }

    #[test]
    fn test_head_words() {
        assert_eq!(TypeDescriptor::address().head_words(), 1);
        assert_eq!(parse("string").head_words(), 1);
        assert_eq!(parse("uint256[3]").head_words(), 3);
        assert_eq!(parse("(uint256,bool,address)").head_words(), 3);
        assert_eq!(parse("(uint256,bool)[2][3]").head_words(), 12);
        // dynamic composites only take a pointer slot
        assert_eq!(parse("(uint256,string)").head_words(), 1);
        assert_eq!(parse("string[4]").head_words(), 1);
        assert_eq!(parse("()").head_words(), 0);
    }

    #[test]
    fn test_width_validation() {
        assert!(TypeDescriptor::uint(8).is_ok());
        assert!(TypeDescriptor::uint(256).is_ok());
        assert!(TypeDescriptor::uint(0).is_err());
        assert!(TypeDescriptor::uint(12).is_err());
        assert!(TypeDescriptor::int(264).is_err());
        assert!(TypeDescriptor::fixed_bytes(0).is_err());
        assert!(TypeDescriptor::fixed_bytes(33).is_err());

        let error = TypeDescriptor::uint(7).unwrap_err();
        assert_eq!(error.category(), "construction");
    }

    #[test]
    fn test_array_capacity() {
        let dynamic = TypeDescriptor::array(TypeDescriptor::bool(), DYNAMIC_CAPACITY).unwrap();
        assert_eq!(dynamic.capacity(), Some(-1));
        assert_eq!(dynamic.to_string(), "bool[]");

        let fixed = TypeDescriptor::array(TypeDescriptor::bool(), 0).unwrap();
        assert_eq!(fixed.capacity(), Some(0));
        assert_eq!(fixed.to_string(), "bool[0]");

        assert!(TypeDescriptor::array(TypeDescriptor::bool(), -2).is_err());
    }

    #[test]
    fn test_accessors() {
        let ty = parse("bytes16[4]");
        assert_eq!(ty.kind(), TypeKind::Array);
        assert_eq!(ty.capacity(), Some(4));
        let element = ty.element().unwrap();
        assert_eq!(element.kind(), TypeKind::FixedBytes);
        assert_eq!(element.width(), Some(16));
        assert!(ty.fields().is_none());

        let tuple = parse("(int128,string)");
        assert_eq!(tuple.fields().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_parse_round_trip() {
        for input in [
            "bool",
            "uint8",
            "int256",
            "bytes1",
            "address[]",
            "(uint256,(string,bytes)[],bool[2])",
            "((address,bool,bytes)[])",
            "uint256[2][]",
        ] {
            assert_eq!(parse(input).to_string(), input);
        }
        assert_eq!(parse("uint"), TypeDescriptor::uint256());
        assert_eq!(parse("int[]").to_string(), "int256[]");
    }

    #[test]
    fn test_parse_errors() {
        for input in [
            "", "uint7", "uint08", "bytes0", "bytes33", "foo", "(uint256", "(uint256,)",
            "uint256[", "uint256[x]", "uint256 ", "(bool)extra",
        ] {
            assert!(input.parse::<TypeDescriptor>().is_err(), "{} should not parse", input);
        }
    }

    #[test]
    fn test_structural_equality() {
        let a = parse("(uint256,string[])");
        let b = TypeDescriptor::tuple(vec![
            TypeDescriptor::uint(256).unwrap(),
            TypeDescriptor::array(TypeDescriptor::string(), DYNAMIC_CAPACITY).unwrap(),
        ]);
        assert_eq!(a, b);
        assert_eq!(a.canonical(), b.canonical());
    }
}
