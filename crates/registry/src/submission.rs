//! Signed header submissions and batch receipts.

use crate::ChainId;
use ahu_signer::HeaderSignature;
use alloy_primitives::{Address, B256, Bytes};

/// A raw block header signed by a validator of its chain, optionally rotating the chain's
/// validator set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SignedBlockSubmission {
    /// The RLP-encoded header.
    pub header: Bytes,
    /// The validator's signature over the header digest.
    pub signature: HeaderSignature,
    /// The chain the header belongs to.
    pub chain_id: ChainId,
    /// The digest the submitter claims for `header`.
    pub block_hash: B256,
    /// The new cycle boundary, `0` for no rotation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cycle_end: u64,
    /// The validator set to install with `cycle_end`, empty for no rotation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub validators: Vec<Address>,
}

impl SignedBlockSubmission {
    /// Returns the rotation this submission requests, if it fully specifies one.
    pub fn rotation(&self) -> Option<(&[Address], u64)> {
        (self.cycle_end != 0 && !self.validators.is_empty())
            .then_some((self.validators.as_slice(), self.cycle_end))
    }

    /// Returns true if exactly one of `cycle_end` and `validators` is set.
    pub fn is_partial_rotation(&self) -> bool {
        (self.cycle_end == 0) != self.validators.is_empty()
    }
}

/// A header accepted from a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AcceptedBlock {
    /// The chain the header belongs to.
    pub chain_id: ChainId,
    /// The block number.
    pub number: u64,
    /// The header digest.
    pub digest: B256,
    /// The recovered signer.
    pub signer: Address,
    /// Whether the submission rotated the validator set.
    pub rotated: bool,
}

/// The outcome of a successful batch, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BatchReceipt {
    /// The accepted headers.
    pub accepted: Vec<AcceptedBlock>,
}

impl BatchReceipt {
    /// The number of rotations the batch applied.
    pub fn rotations(&self) -> usize {
        self.accepted.iter().filter(|block| block.rotated).count()
    }
}
