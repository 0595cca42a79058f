// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod mock_engine;
pub mod multicall;
pub mod token_contract;
