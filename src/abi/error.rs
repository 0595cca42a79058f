// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Error Handling System for the ABI Codec
//!
//! Every failure in this crate is reported as an [`AbiError`] carrying the
//! descriptor, value or position that caused it. Nothing is retried and
//! nothing is silently downgraded: a truncated payload never produces a
//! partial value.
//!
//! # Error Categories
//!
//! - **Construction** - Invalid widths, capacity mismatches, bad declarations
//! - **Encoding** - A value whose shape does not match its descriptor
//! - **Decoding** - Buffer underflow, bad offsets, truncated data, overflow
//! - **Conversion** - Malformed hex, numbers that do not fit a target width
//!
//! # Usage
//!
//! ```rust
//! use abicodec_rust::abi::error::*;
//!
//! let error = overflow_error("300", "u8");
//! assert_eq!(error.category(), "conversion");
//! ```

use thiserror::Error;

/// Result type for codec operations
pub type AbiResult<T> = Result<T, AbiError>;

/// Errors that can occur while building, encoding or decoding ABI data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// Sized type with an illegal width, or array with an illegal capacity
    #[error("Invalid type '{ty}': {message}")]
    InvalidType { ty: String, message: String },

    /// Fixed array built with a value count different from its capacity
    #[error("Array of capacity {capacity} cannot fit {count} values")]
    CapacityMismatch { capacity: i64, count: usize },

    /// Method declaration that cannot be resolved into a contract function
    #[error("[{method}] Invalid declaration: {message}")]
    InvalidDeclaration { method: String, message: String },

    /// Value does not conform to the descriptor it is encoded with
    #[error("Cannot encode {value} as {descriptor}: {message}")]
    Encoding {
        descriptor: String,
        value: String,
        message: String,
    },

    /// Payload cannot be decoded against the descriptor
    #[error("Cannot decode {descriptor} at offset {offset}: {message}")]
    Decoding {
        descriptor: String,
        offset: usize,
        message: String,
    },

    /// Malformed hexadecimal text
    #[error("Invalid hex '{input}': {message}")]
    InvalidHex { input: String, message: String },

    /// Exact conversion that does not fit the target width
    #[error("Value {value} does not fit in {target}")]
    Overflow { value: String, target: String },

    /// Value of the wrong shape for the requested host type
    #[error("Cannot convert {value} into {target}")]
    Conversion { value: String, target: String },

    /// Malformed numeric text or an operation with no exact result
    #[error("Invalid number '{input}': {message}")]
    InvalidNumber { input: String, message: String },
}

/// Helper function to create an invalid type error
pub fn invalid_type_error(ty: &str, message: &str) -> AbiError {
    AbiError::InvalidType {
        ty: ty.to_string(),
        message: message.to_string(),
    }
}

/// Helper function to create an invalid declaration error
pub fn invalid_declaration_error(method: &str, message: &str) -> AbiError {
    AbiError::InvalidDeclaration {
        method: method.to_string(),
        message: message.to_string(),
    }
}

/// Helper function to create an encoding error
pub fn encoding_error(
    descriptor: impl ToString,
    value: impl ToString,
    message: &str,
) -> AbiError {
    AbiError::Encoding {
        descriptor: descriptor.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

/// Helper function to create a decoding error
pub fn decoding_error(descriptor: impl ToString, offset: usize, message: &str) -> AbiError {
    AbiError::Decoding {
        descriptor: descriptor.to_string(),
        offset,
        message: message.to_string(),
    }
}

/// Helper function to create an invalid hex error
pub fn invalid_hex_error(input: &str, message: &str) -> AbiError {
    AbiError::InvalidHex {
        input: input.to_string(),
        message: message.to_string(),
    }
}

/// Helper function to create an overflow error
pub fn overflow_error(value: impl ToString, target: &str) -> AbiError {
    AbiError::Overflow {
        value: value.to_string(),
        target: target.to_string(),
    }
}

/// Helper function to create a conversion error
pub fn conversion_error(value: impl ToString, target: &str) -> AbiError {
    AbiError::Conversion {
        value: value.to_string(),
        target: target.to_string(),
    }
}

/// Helper function to create an invalid number error
pub fn invalid_number_error(input: &str, message: &str) -> AbiError {
    AbiError::InvalidNumber {
        input: input.to_string(),
        message: message.to_string(),
    }
}

impl AbiError {
    /// Get error category as string
    pub fn category(&self) -> &'static str {
        match self {
            AbiError::InvalidType { .. } => "construction",
            AbiError::CapacityMismatch { .. } => "construction",
            AbiError::InvalidDeclaration { .. } => "construction",
            AbiError::Encoding { .. } => "encoding",
            AbiError::Decoding { .. } => "decoding",
            AbiError::InvalidHex { .. } => "conversion",
            AbiError::Overflow { .. } => "conversion",
            AbiError::Conversion { .. } => "conversion",
            AbiError::InvalidNumber { .. } => "conversion",
        }
    }

    /// Byte offset of a decoding failure, if this is one
    pub fn offset(&self) -> Option<usize> {
        match self {
            AbiError::Decoding { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
