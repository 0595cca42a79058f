// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! ABI Codec
//!
//! Converts between [`AbiValue`](crate::abi::AbiValue)s and the canonical
//! Contract ABI byte layout: 32-byte words, a head region with inline static
//! data and offsets to dynamic data, and a tail region holding the dynamic
//! data itself.
//!
//! ```rust
//! use abicodec_rust::abi::{codec, AbiValue, TypeDescriptor};
//!
//! let ty: TypeDescriptor = "(uint256,string)".parse().unwrap();
//! let value = AbiValue::tuple(vec![AbiValue::from(1u64), AbiValue::from("abc")]);
//! let encoded = codec::encode(&ty, &value).unwrap();
//! assert_eq!(encoded.len(), 4 * 32);
//! assert_eq!(codec::decode(&ty, &encoded, 0).unwrap(), value);
//! ```

pub mod decoder;
pub mod encoder;

pub use decoder::{
    decode, AbiDecoder, DecoderConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSION,
    DEFAULT_MAX_SEQUENCE_LENGTH,
};
pub use encoder::{encode, encode_sequence};
