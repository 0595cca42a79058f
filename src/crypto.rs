// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Keccak-256 Hashing
//!
//! Ethereum hashes with the original Keccak-256 padding, which differs from
//! the finalized NIST SHA3-256. Function selectors are the first four bytes
//! of the Keccak-256 digest of the canonical signature.

use sha3::{Digest, Keccak256};

/// Keccak-256 digest of `data`
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// First four bytes of the Keccak-256 digest of a canonical signature
pub fn selector_of(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_known_vectors() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            hex::encode(keccak256(b"abc")),
            "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
        assert_eq!(
            hex::encode(keccak256(b"transfer(address,uint256)")),
            "a9059cbb2ab09eb219583f4a59a5d0623ade346d962bcd4e46b11da047c9049b"
        );
    }

    #[test]
    fn test_keccak_is_not_nist_sha3() {
        use sha3::Sha3_256;

        let mut nist = Sha3_256::new();
        nist.update(b"");
        let nist: [u8; 32] = nist.finalize().into();
        assert_eq!(
            hex::encode(nist),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_ne!(nist, keccak256(b""));
    }

    #[test]
    fn test_selectors() {
        assert_eq!(selector_of("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector_of("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }
}
