// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! ABI Word Utilities - Bounds-Checked Reads and Word Builders
//!
//! Everything the codec reads goes through [`WordReader`], which validates
//! each range against the buffer before slicing it. A range that does not
//! fit is reported as a decoding error for the descriptor being decoded; no
//! read ever panics or yields zero-filled data.
//!
//! # Usage
//!
//! ```rust
//! use abicodec_rust::abi::utils::{usize_word, WordReader};
//! use abicodec_rust::abi::TypeDescriptor;
//!
//! let word = usize_word(0x40);
//! let reader = WordReader::new(&word);
//! assert_eq!(reader.read_usize(&TypeDescriptor::uint256(), 0).unwrap(), 0x40);
//! ```

use crate::abi::descriptor::TypeDescriptor;
use crate::abi::error::{decoding_error, AbiResult};
use num_bigint::{BigInt, BigUint, Sign};

/// Size of one ABI word in bytes
pub const WORD_SIZE: usize = 32;

// ============================================================================
// Buffer Access
// ============================================================================

/// Bounds-checked reader over an ABI payload
#[derive(Clone, Copy, Debug)]
pub struct WordReader<'a> {
    buffer: &'a [u8],
}

impl<'a> WordReader<'a> {
    /// Create a new reader
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    /// Length of the underlying buffer
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Validate that a range lies entirely inside the buffer
    pub fn validate_range(&self, offset: usize, length: usize) -> bool {
        offset
            .checked_add(length)
            .is_some_and(|end| end <= self.buffer.len())
    }

    /// Read `length` bytes at `offset`
    pub fn read_bytes(
        &self,
        ty: &TypeDescriptor,
        offset: usize,
        length: usize,
    ) -> AbiResult<&'a [u8]> {
        if !self.validate_range(offset, length) {
            return Err(decoding_error(
                ty,
                offset,
                &format!(
                    "read of {} bytes past end of buffer of length {}",
                    length,
                    self.buffer.len()
                ),
            ));
        }
        Ok(&self.buffer[offset..offset + length])
    }

    /// Read one 32-byte word at `offset`
    pub fn read_word(&self, ty: &TypeDescriptor, offset: usize) -> AbiResult<&'a [u8; WORD_SIZE]> {
        let bytes = self.read_bytes(ty, offset, WORD_SIZE)?;
        bytes
            .try_into()
            .map_err(|_| decoding_error(ty, offset, "word slice has wrong length"))
    }

    /// Read a word holding an offset or a length
    pub fn read_usize(&self, ty: &TypeDescriptor, offset: usize) -> AbiResult<usize> {
        let word = self.read_word(ty, offset)?;
        word_to_usize(word).ok_or_else(|| {
            decoding_error(
                ty,
                offset,
                &format!("word 0x{} does not fit in a length", hex::encode(word)),
            )
        })
    }
}

// ============================================================================
// Word Builders
// ============================================================================

/// Big-endian, left zero-padded word holding `value`
pub fn usize_word(value: usize) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    let bytes = (value as u64).to_be_bytes();
    word[WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
    word
}

/// Inverse of [`usize_word`]; `None` when the word exceeds `usize`
pub fn word_to_usize(word: &[u8; WORD_SIZE]) -> Option<usize> {
    let (high, low) = word.split_at(WORD_SIZE - 8);
    if high.iter().any(|&b| b != 0) {
        return None;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(low);
    usize::try_from(u64::from_be_bytes(bytes)).ok()
}

/// Unsigned magnitude, left zero-padded; `None` above 256 bits
pub fn uint_word(value: &BigUint) -> Option<[u8; WORD_SIZE]> {
    let bytes = value.to_bytes_be();
    if bytes.len() > WORD_SIZE {
        return None;
    }
    let mut word = [0u8; WORD_SIZE];
    // to_bytes_be of zero is [0], which still fits
    word[WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
    Some(word)
}

/// Two's complement, sign-extended with 0xFF for negatives
pub fn int_word(value: &BigInt) -> Option<[u8; WORD_SIZE]> {
    let bytes = value.to_signed_bytes_be();
    if bytes.len() > WORD_SIZE {
        return None;
    }
    let fill = if value.sign() == Sign::Minus { 0xFF } else { 0x00 };
    let mut word = [fill; WORD_SIZE];
    word[WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
    Some(word)
}

/// Length rounded up to the next word boundary
pub fn padded_len(length: usize) -> usize {
    length.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// Append `data` followed by zero bytes up to the next word boundary
pub fn write_padded(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
    out.resize(out.len() + (padded_len(data.len()) - data.len()), 0);
}
