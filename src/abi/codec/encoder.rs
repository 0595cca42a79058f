// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Head/tail encoder.
//!
//! A sequence is laid out as a head region followed by a tail region. Each
//! static item is written inline in the head; each dynamic item leaves a
//! 32-byte offset in its head slot, relative to the start of the sequence,
//! and appends its own encoding to the tail. The regions are concatenated
//! only once every item has been visited.

use crate::abi::descriptor::{Shape, TypeDescriptor};
use crate::abi::error::{encoding_error, AbiError, AbiResult};
use crate::abi::utils::{int_word, uint_word, usize_word, write_padded, WORD_SIZE};
use crate::abi::value::AbiValue;
use log::trace;

/// Encode one value against its descriptor.
///
/// A dynamic value yields its tail encoding (length or count prefix plus
/// content); no outer offset word is added.
pub fn encode(descriptor: &TypeDescriptor, value: &AbiValue) -> AbiResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(&mut out, descriptor, value)?;
    trace!("Encoded {} into {} bytes", descriptor, out.len());
    Ok(out)
}

/// Encode a heterogeneous sequence as one head/tail block
pub fn encode_sequence(items: &[(&TypeDescriptor, &AbiValue)]) -> AbiResult<Vec<u8>> {
    let head_size = items.iter().fold(0usize, |size, (descriptor, _)| {
        size.saturating_add(descriptor.head_words().saturating_mul(WORD_SIZE))
    });

    let mut head = Vec::new();
    let mut tail = Vec::new();
    for (descriptor, value) in items {
        if descriptor.is_dynamic() {
            head.extend_from_slice(&usize_word(head_size + tail.len()));
            encode_into(&mut tail, descriptor, value)?;
        } else {
            encode_into(&mut head, descriptor, value)?;
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

fn mismatch(descriptor: &TypeDescriptor, value: &AbiValue) -> AbiError {
    encoding_error(
        descriptor,
        value,
        &format!("value of type {} does not match", value.type_name()),
    )
}

fn encode_into(out: &mut Vec<u8>, descriptor: &TypeDescriptor, value: &AbiValue) -> AbiResult<()> {
    match (descriptor.shape(), value) {
        (Shape::Bool, AbiValue::Bool(flag)) => {
            out.extend_from_slice(&usize_word(usize::from(*flag)));
        }
        (Shape::Address, AbiValue::Address(address)) => {
            out.extend_from_slice(&[0u8; WORD_SIZE - 20]);
            out.extend_from_slice(address);
        }
        (Shape::Uint(bits), AbiValue::Uint(number)) if number.bits() == *bits as usize => {
            let word = uint_word(number.value())
                .ok_or_else(|| encoding_error(descriptor, value, "value exceeds 256 bits"))?;
            out.extend_from_slice(&word);
        }
        (Shape::Int(bits), AbiValue::Int(number)) if number.bits() == *bits as usize => {
            let word = int_word(number.value())
                .ok_or_else(|| encoding_error(descriptor, value, "value exceeds 256 bits"))?;
            out.extend_from_slice(&word);
        }
        (Shape::FixedBytes(width), AbiValue::FixedBytes(bytes))
            if bytes.width() == *width as usize =>
        {
            write_padded(out, bytes.as_bytes());
        }
        (Shape::Bytes, AbiValue::Bytes(bytes)) => {
            out.extend_from_slice(&usize_word(bytes.len()));
            write_padded(out, bytes);
        }
        (Shape::String, AbiValue::String(text)) => {
            out.extend_from_slice(&usize_word(text.len()));
            write_padded(out, text.as_bytes());
        }
        (Shape::Array { element, length }, AbiValue::Array(array)) => {
            match length {
                Some(length) if array.is_dynamic() || array.len() != *length => {
                    return Err(encoding_error(
                        descriptor,
                        value,
                        &format!("expected exactly {} elements, got {}", length, array.len()),
                    ));
                }
                Some(_) => {}
                None if !array.is_dynamic() => {
                    return Err(encoding_error(
                        descriptor,
                        value,
                        "fixed-capacity array given for a dynamic array type",
                    ));
                }
                None => out.extend_from_slice(&usize_word(array.len())),
            }
            let items: Vec<(&TypeDescriptor, &AbiValue)> = array
                .values()
                .iter()
                .map(|item| (element.as_ref(), item))
                .collect();
            out.extend_from_slice(&encode_sequence(&items)?);
        }
        (Shape::Tuple(fields), AbiValue::Tuple(values)) => {
            if fields.len() != values.len() {
                return Err(encoding_error(
                    descriptor,
                    value,
                    &format!("expected {} fields, got {}", fields.len(), values.len()),
                ));
            }
            let items: Vec<(&TypeDescriptor, &AbiValue)> = fields.iter().zip(values).collect();
            out.extend_from_slice(&encode_sequence(&items)?);
        }
        _ => return Err(mismatch(descriptor, value)),
    }
    Ok(())
}
