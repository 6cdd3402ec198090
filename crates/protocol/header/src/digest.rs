//! Header digests.

use alloy_primitives::{B256, keccak256};

/// Computes the identifying digest of a header from its raw encoded bytes.
///
/// The digest is taken over the bytes as submitted, so it can be computed without decoding.
pub fn digest_of(header: &[u8]) -> B256 {
    keccak256(header)
}
