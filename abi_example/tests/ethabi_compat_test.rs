// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Cross-check against `ethabi`
//!
//! Randomly generated argument lists must encode to the same bytes as
//! `ethabi::encode`, decode from `ethabi` output to the same values, and
//! hash to the same selectors as `ethabi::short_signature`.

mod common;

use abicodec_rust::abi::{decode, encode, AbiValue, TypeDescriptor, TypeKind, DYNAMIC_CAPACITY};
use abicodec_rust::contract::{resolve, MethodDeclaration, ReturnType};
use abicodec_rust::crypto::selector_of;
use common::*;
use num_bigint::{BigInt, BigUint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_descriptor(rng: &mut StdRng, depth: usize) -> TypeDescriptor {
    let choices = if depth >= 2 { 7 } else { 10 };
    match rng.gen_range(0..choices) {
        0 => TypeDescriptor::bool(),
        1 => TypeDescriptor::address(),
        2 => TypeDescriptor::uint(rng.gen_range(1..=32) * 8).unwrap(),
        3 => TypeDescriptor::int(rng.gen_range(1..=32) * 8).unwrap(),
        4 => TypeDescriptor::fixed_bytes(rng.gen_range(1..=32)).unwrap(),
        5 => TypeDescriptor::bytes(),
        6 => TypeDescriptor::string(),
        7 => TypeDescriptor::dynamic_array(random_descriptor(rng, depth + 1)),
        8 => TypeDescriptor::fixed_array(random_descriptor(rng, depth + 1), rng.gen_range(1..=3)),
        _ => {
            let count = rng.gen_range(1..=3);
            TypeDescriptor::tuple((0..count).map(|_| random_descriptor(rng, depth + 1)).collect())
        }
    }
}

fn random_bytes(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

fn random_value(rng: &mut StdRng, descriptor: &TypeDescriptor) -> AbiValue {
    match descriptor.kind() {
        TypeKind::Bool => AbiValue::Bool(rng.gen()),
        TypeKind::Address => AbiValue::Address(rng.gen()),
        TypeKind::Uint => {
            let bits = descriptor.width().unwrap();
            AbiValue::uint(bits, BigUint::from_bytes_be(&random_bytes(rng, bits / 8))).unwrap()
        }
        TypeKind::Int => {
            let bits = descriptor.width().unwrap();
            AbiValue::int(bits, BigInt::from_signed_bytes_be(&random_bytes(rng, bits / 8))).unwrap()
        }
        TypeKind::FixedBytes => {
            AbiValue::fixed_bytes(random_bytes(rng, descriptor.width().unwrap())).unwrap()
        }
        TypeKind::Bytes => {
            let len = rng.gen_range(0..70);
            AbiValue::Bytes(random_bytes(rng, len))
        }
        TypeKind::String => {
            let len = rng.gen_range(0..20);
            AbiValue::String((0..len).map(|_| rng.gen::<char>()).collect())
        }
        TypeKind::Array => {
            let element = descriptor.element().unwrap();
            match descriptor.capacity().unwrap() {
                DYNAMIC_CAPACITY => {
                    let len = rng.gen_range(0..4);
                    AbiValue::dynamic_array((0..len).map(|_| random_value(rng, element)).collect())
                        .unwrap()
                }
                capacity => {
                    let values = (0..capacity).map(|_| random_value(rng, element)).collect();
                    AbiValue::array(capacity, values).unwrap()
                }
            }
        }
        TypeKind::Tuple => AbiValue::tuple(
            descriptor
                .fields()
                .unwrap()
                .iter()
                .map(|field| random_value(rng, field))
                .collect(),
        ),
    }
}

/// Random non-empty argument list as a top-level tuple
fn random_arguments(rng: &mut StdRng) -> (TypeDescriptor, AbiValue) {
    let count = rng.gen_range(1..=4);
    let fields: Vec<TypeDescriptor> = (0..count).map(|_| random_descriptor(rng, 0)).collect();
    let values = fields.iter().map(|field| random_value(rng, field)).collect();
    (TypeDescriptor::tuple(fields), AbiValue::tuple(values))
}

#[test]
fn test_encoding_matches_ethabi() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0xab1);

    for _ in 0..200 {
        let (descriptor, value) = random_arguments(&mut rng);
        let param_types: Vec<_> = descriptor.fields().unwrap().iter().map(to_param_type).collect();
        let tokens: Vec<_> = value.as_tuple().unwrap().iter().map(to_token).collect();

        let ours = encode(&descriptor, &value).unwrap();
        let theirs = ethabi::encode(&tokens);
        assert_eq!(hex::encode(&ours), hex::encode(&theirs), "encoding of {}", descriptor);

        let by_ethabi = ethabi::decode(&param_types, &ours)
            .unwrap_or_else(|e| panic!("ethabi rejected {}: {}", descriptor, e));
        assert_eq!(by_ethabi, tokens, "ethabi decoding of {}", descriptor);

        let by_us = decode(&descriptor, &theirs, 0)
            .unwrap_or_else(|e| panic!("{} failed to decode: {}", descriptor, e));
        assert_eq!(by_us, value, "decoding of {}", descriptor);
    }
}

#[test]
fn test_canonical_names_match_ethabi() {
    let mut rng = StdRng::seed_from_u64(0xab2);

    for _ in 0..200 {
        let descriptor = random_descriptor(&mut rng, 0);
        assert_eq!(descriptor.to_string(), to_param_type(&descriptor).to_string());
    }
}

#[test]
fn test_selectors_match_ethabi() {
    let mut rng = StdRng::seed_from_u64(0xab3);

    for index in 0..100 {
        let count = rng.gen_range(0..=3);
        let types: Vec<TypeDescriptor> = (0..count).map(|_| random_descriptor(&mut rng, 0)).collect();
        let param_types: Vec<_> = types.iter().map(to_param_type).collect();
        let name = format!("method{}", index);

        let declaration = types
            .iter()
            .enumerate()
            .fold(MethodDeclaration::new("Random", &name), |declaration, (i, ty)| {
                declaration.argument(&format!("arg{}", i), ty.clone())
            })
            .returns(ReturnType::Tuple(vec![]));
        let function = resolve(&declaration).unwrap();

        let expected = ethabi::short_signature(&name, &param_types);
        assert_eq!(*function.selector().as_bytes(), expected, "{}", function.signature());
        assert_eq!(selector_of(function.signature()), expected);
    }
}

#[test]
fn test_signed_words_match_ethabi() {
    let descriptor: TypeDescriptor = "(int8,int256,uint8)".parse().unwrap();
    let value = AbiValue::tuple(vec![
        AbiValue::int(8, -1).unwrap(),
        AbiValue::int256(BigInt::from(-(1i64 << 40))).unwrap(),
        AbiValue::uint(8, 255u32).unwrap(),
    ]);
    let ours = encode(&descriptor, &value).unwrap();
    assert_eq!(ours, ethabi::encode(&value.as_tuple().unwrap().iter().map(to_token).collect::<Vec<_>>()));
    assert!(ours[..32].iter().all(|byte| *byte == 0xff));

    // ethabi accepts an int8 word outside the int8 range, the codec does not
    let mut wide = ours.clone();
    wide[31] = 0x7f;
    wide[0] = 0x00;
    assert!(ethabi::decode(&[ethabi::ParamType::Int(8)], &wide[..32]).is_ok());
    assert!(decode(&descriptor, &wide, 0).is_err());
}
