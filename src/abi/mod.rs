// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Contract ABI Value Model and Codec
//!
//! # Module Organization
//!
//! - **descriptor**: [`TypeDescriptor`], the recursive shape of an ABI type
//! - **value**: [`AbiValue`], the closed set of ABI values
//! - **convert**: host Rust types to and from [`AbiValue`]
//! - **codec**: head/tail encoding and strict decoding
//! - **utils**: bounds-checked word reads and word builders
//! - **error**: [`AbiError`] and helper constructors

pub mod codec;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod utils;
pub mod value;

pub use codec::{decode, encode, AbiDecoder, DecoderConfig};
pub use convert::FromAbiValue;
pub use descriptor::{TypeDescriptor, TypeKind, DYNAMIC_CAPACITY};
pub use error::{AbiError, AbiResult};
pub use value::{AbiValue, ArrayValue, FixedBytesValue, IntValue, UintValue};
