// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Strict head/tail decoder.
//!
//! Every word is checked against the descriptor it is read for. The decoder
//! fails rather than truncating or wrapping when a head does not fit in the
//! buffer, when an offset points back into the head or past the end, when a
//! length or count would read past the end, or when a scalar word carries
//! bits its type cannot hold.
//!
//! Offsets may alias, so one tail block can be decoded many times. Each
//! decode therefore draws from a work budget proportional to the payload
//! size: every array element and every word of `bytes`/`string` data costs
//! one unit, and running out is a decoding error.

use crate::abi::descriptor::{Shape, TypeDescriptor};
use crate::abi::error::{decoding_error, AbiResult};
use crate::abi::utils::{padded_len, WordReader, WORD_SIZE};
use crate::abi::value::{AbiValue, ArrayValue, FixedBytesValue, IntValue, UintValue};
use log::{debug, trace};
use num_bigint::{BigInt, BigUint};

/// Default nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Default limit on elements in one decoded array
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 1 << 20;
/// Default work units allowed per word of payload
pub const DEFAULT_MAX_EXPANSION: usize = 8;

/// Limits applied while decoding untrusted payloads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum nesting of arrays and tuples
    pub max_depth: usize,
    /// Maximum element count of a single array
    pub max_sequence_length: usize,
    /// Array elements and data words decoded per payload word, summed over
    /// the whole value
    pub max_expansion: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            max_expansion: DEFAULT_MAX_EXPANSION,
        }
    }
}

/// Decoder over one payload
#[derive(Clone, Copy, Debug)]
pub struct AbiDecoder<'a> {
    reader: WordReader<'a>,
    config: DecoderConfig,
}

impl<'a> AbiDecoder<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_config(buffer, DecoderConfig::default())
    }

    pub fn with_config(buffer: &'a [u8], config: DecoderConfig) -> Self {
        Self {
            reader: WordReader::new(buffer),
            config,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the value whose encoding starts at `base_offset`
    pub fn decode(&self, descriptor: &TypeDescriptor, base_offset: usize) -> AbiResult<AbiValue> {
        debug!(
            "Decoding {} from {} bytes at offset {}",
            descriptor,
            self.reader.len(),
            base_offset
        );
        let mut remaining =
            (self.reader.len() / WORD_SIZE + 1).saturating_mul(self.config.max_expansion);
        self.decode_value(descriptor, base_offset, 0, &mut remaining)
    }

    /// Take `units` from the work budget
    fn charge(
        &self,
        descriptor: &TypeDescriptor,
        offset: usize,
        units: usize,
        remaining: &mut usize,
    ) -> AbiResult<()> {
        match remaining.checked_sub(units) {
            Some(left) => {
                *remaining = left;
                Ok(())
            }
            None => Err(decoding_error(
                descriptor,
                offset,
                &format!(
                    "decoding budget of {} units per word exhausted",
                    self.config.max_expansion
                ),
            )),
        }
    }

    fn decode_value(
        &self,
        descriptor: &TypeDescriptor,
        offset: usize,
        depth: usize,
        remaining: &mut usize,
    ) -> AbiResult<AbiValue> {
        if depth > self.config.max_depth {
            return Err(decoding_error(
                descriptor,
                offset,
                &format!("nesting exceeds limit of {}", self.config.max_depth),
            ));
        }

        match descriptor.shape() {
            Shape::Bool => {
                let word = self.reader.read_word(descriptor, offset)?;
                match (is_zero(&word[..WORD_SIZE - 1]), word[WORD_SIZE - 1]) {
                    (true, 0) => Ok(AbiValue::Bool(false)),
                    (true, 1) => Ok(AbiValue::Bool(true)),
                    _ => Err(decoding_error(descriptor, offset, "bool word is not 0 or 1")),
                }
            }
            Shape::Address => {
                let word = self.reader.read_word(descriptor, offset)?;
                if !is_zero(&word[..WORD_SIZE - 20]) {
                    return Err(decoding_error(
                        descriptor,
                        offset,
                        "address has non-zero high bytes",
                    ));
                }
                let mut address = [0u8; 20];
                address.copy_from_slice(&word[WORD_SIZE - 20..]);
                Ok(AbiValue::Address(address))
            }
            Shape::Uint(bits) => {
                let word = self.reader.read_word(descriptor, offset)?;
                let value = BigUint::from_bytes_be(word);
                if value.bits() > u64::from(*bits) {
                    return Err(decoding_error(
                        descriptor,
                        offset,
                        &format!("value does not fit in {} bits", bits),
                    ));
                }
                Ok(AbiValue::Uint(UintValue::from_parts(*bits, value)))
            }
            Shape::Int(bits) => {
                let word = self.reader.read_word(descriptor, offset)?;
                let value = BigInt::from_signed_bytes_be(word);
                let limit = BigInt::from(1u8) << (*bits as usize - 1);
                if value >= limit || value < -limit {
                    return Err(decoding_error(
                        descriptor,
                        offset,
                        &format!("value is not a sign-extended {}-bit integer", bits),
                    ));
                }
                Ok(AbiValue::Int(IntValue::from_parts(*bits, value)))
            }
            Shape::FixedBytes(width) => {
                let word = self.reader.read_word(descriptor, offset)?;
                let (data, padding) = word.split_at(*width as usize);
                if !is_zero(padding) {
                    return Err(decoding_error(
                        descriptor,
                        offset,
                        "fixed bytes have non-zero padding",
                    ));
                }
                let bytes = FixedBytesValue::new(data.to_vec())
                    .map_err(|e| decoding_error(descriptor, offset, &e.to_string()))?;
                Ok(AbiValue::FixedBytes(bytes))
            }
            Shape::Bytes => Ok(AbiValue::Bytes(
                self.read_dynamic_bytes(descriptor, offset, remaining)?,
            )),
            Shape::String => {
                let bytes = self.read_dynamic_bytes(descriptor, offset, remaining)?;
                String::from_utf8(bytes)
                    .map(AbiValue::String)
                    .map_err(|e| decoding_error(descriptor, offset, &e.to_string()))
            }
            Shape::Array {
                element,
                length: None,
            } => {
                let count = self.reader.read_usize(descriptor, offset)?;
                let start = offset + WORD_SIZE;
                self.check_count(descriptor, element, count, offset, start)?;
                self.charge(descriptor, offset, count, remaining)?;
                let types = vec![element.as_ref(); count];
                let values = self.decode_sequence(descriptor, &types, start, depth, remaining)?;
                let array = ArrayValue::dynamic(values)
                    .map_err(|e| decoding_error(descriptor, offset, &e.to_string()))?;
                Ok(AbiValue::Array(array))
            }
            Shape::Array {
                element,
                length: Some(length),
            } => {
                self.check_count(descriptor, element, *length, offset, offset)?;
                self.charge(descriptor, offset, *length, remaining)?;
                let types = vec![element.as_ref(); *length];
                let values = self.decode_sequence(descriptor, &types, offset, depth, remaining)?;
                let array = ArrayValue::fixed(*length, values)
                    .map_err(|e| decoding_error(descriptor, offset, &e.to_string()))?;
                Ok(AbiValue::Array(array))
            }
            Shape::Tuple(fields) => {
                let types: Vec<&TypeDescriptor> = fields.iter().collect();
                let values = self.decode_sequence(descriptor, &types, offset, depth, remaining)?;
                Ok(AbiValue::Tuple(values))
            }
        }
    }

    /// Length word followed by zero-padded content
    fn read_dynamic_bytes(
        &self,
        descriptor: &TypeDescriptor,
        offset: usize,
        remaining: &mut usize,
    ) -> AbiResult<Vec<u8>> {
        let length = self.reader.read_usize(descriptor, offset)?;
        let start = offset + WORD_SIZE;
        if length > self.reader.len() {
            return Err(decoding_error(
                descriptor,
                offset,
                &format!("length {} exceeds buffer of length {}", length, self.reader.len()),
            ));
        }
        self.charge(descriptor, offset, 1 + padded_len(length) / WORD_SIZE, remaining)?;
        let padded = self.reader.read_bytes(descriptor, start, padded_len(length))?;
        let (data, padding) = padded.split_at(length);
        if !is_zero(padding) {
            return Err(decoding_error(
                descriptor,
                start + length,
                "content has non-zero padding",
            ));
        }
        trace!("Read {} content bytes at offset {}", length, start);
        Ok(data.to_vec())
    }

    /// Reject counts whose heads cannot possibly fit in the remaining buffer
    fn check_count(
        &self,
        descriptor: &TypeDescriptor,
        element: &TypeDescriptor,
        count: usize,
        offset: usize,
        start: usize,
    ) -> AbiResult<()> {
        if count > self.config.max_sequence_length {
            return Err(decoding_error(
                descriptor,
                offset,
                &format!(
                    "{} elements exceed limit of {}",
                    count, self.config.max_sequence_length
                ),
            ));
        }
        let needed = count
            .checked_mul(element.head_words())
            .and_then(|words| words.checked_mul(WORD_SIZE));
        match needed {
            Some(needed) if self.reader.validate_range(start, needed) => Ok(()),
            _ => Err(decoding_error(
                descriptor,
                offset,
                &format!(
                    "{} elements do not fit in buffer of length {}",
                    count,
                    self.reader.len()
                ),
            )),
        }
    }

    /// Decode a head/tail block starting at `base`
    fn decode_sequence(
        &self,
        parent: &TypeDescriptor,
        types: &[&TypeDescriptor],
        base: usize,
        depth: usize,
        remaining: &mut usize,
    ) -> AbiResult<Vec<AbiValue>> {
        let head_size = types
            .iter()
            .try_fold(0usize, |size, ty| {
                ty.head_words()
                    .checked_mul(WORD_SIZE)
                    .and_then(|bytes| size.checked_add(bytes))
            });
        let head_size = match head_size {
            Some(size) if self.reader.validate_range(base, size) => size,
            _ => {
                return Err(decoding_error(
                    parent,
                    base,
                    &format!("buffer of length {} is shorter than head", self.reader.len()),
                ))
            }
        };

        let mut values = Vec::with_capacity(types.len());
        let mut position = base;
        for ty in types {
            if ty.is_dynamic() {
                let relative = self.reader.read_usize(ty, position)?;
                if relative < head_size {
                    return Err(decoding_error(
                        ty,
                        position,
                        &format!("offset {} points into the head", relative),
                    ));
                }
                let target = match base.checked_add(relative) {
                    Some(target) if target <= self.reader.len() => target,
                    _ => {
                        return Err(decoding_error(
                            ty,
                            position,
                            &format!("offset {} points past end of buffer", relative),
                        ))
                    }
                };
                values.push(self.decode_value(ty, target, depth + 1, remaining)?);
                position += WORD_SIZE;
            } else {
                values.push(self.decode_value(ty, position, depth + 1, remaining)?);
                position += ty.head_words() * WORD_SIZE;
            }
        }
        Ok(values)
    }
}

fn is_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

/// Decode with the default configuration
pub fn decode(
    descriptor: &TypeDescriptor,
    buffer: &[u8],
    base_offset: usize,
) -> AbiResult<AbiValue> {
    AbiDecoder::new(buffer).decode(descriptor, base_offset)
}
