//! Errors for the registry and the ingestion pipeline.

use crate::ChainId;
use ahu_header::DecodeError;
use ahu_signer::VerifyError;
use alloy_primitives::{Address, B256};
use thiserror::Error;

/// A [`Result`] alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// An error raised by the [`crate::BlockHeaderRegistry`].
///
/// Every variant is terminal for the call that raised it. A rejected batch leaves the registry
/// exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The caller does not hold the voting capability.
    #[error("onlyVoting")]
    Unauthorized,
    /// The chain is already registered.
    #[error("chain {0} is already registered")]
    AlreadyRegistered(ChainId),
    /// The submission names a chain that was never registered.
    #[error("chain {0} is not registered")]
    UnknownChain(ChainId),
    /// The claimed block hash does not match the digest of the submitted header.
    #[error("claimed block hash {claimed} does not match header digest {computed}")]
    DigestMismatch {
        /// The hash carried by the submission.
        claimed: B256,
        /// The digest of the raw header bytes.
        computed: B256,
    },
    /// The signature could not be verified.
    #[error(transparent)]
    Verify(#[from] VerifyError),
    /// The recovered signer is not in the chain's current validator set.
    #[error("signer {signer} is not a validator of chain {chain_id}")]
    NotAuthorized {
        /// The chain the header was submitted for.
        chain_id: ChainId,
        /// The recovered signer.
        signer: Address,
    },
    /// The header bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A rotation did not advance the cycle boundary.
    #[error("cycle end {proposed} does not advance past {current} on chain {chain_id}")]
    StaleCycle {
        /// The chain being rotated.
        chain_id: ChainId,
        /// The recorded cycle end.
        current: u64,
        /// The cycle end carried by the submission.
        proposed: u64,
    },
    /// The header was already accepted for this chain.
    #[error("header {digest} was already accepted for chain {chain_id}")]
    DuplicateHeader {
        /// The chain the header belongs to.
        chain_id: ChainId,
        /// The header digest.
        digest: B256,
    },
}

impl RegistryError {
    /// A short, stable name for the error, used as a metric label and in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::AlreadyRegistered(_) => "already_registered",
            Self::UnknownChain(_) => "unknown_chain",
            Self::DigestMismatch { .. } => "digest_mismatch",
            Self::Verify(VerifyError::MalformedSignature(_)) => "malformed_signature",
            Self::Verify(VerifyError::InvalidRecovery) => "invalid_recovery",
            Self::Verify(VerifyError::OutOfRange(_)) => "out_of_range",
            Self::NotAuthorized { .. } => "not_authorized",
            Self::Decode(_) => "decode",
            Self::StaleCycle { .. } => "stale_cycle",
            Self::DuplicateHeader { .. } => "duplicate_header",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahu_signer::Scalar;
    use rstest::rstest;

    #[test]
    fn test_unauthorized_reads_only_voting() {
        assert_eq!(RegistryError::Unauthorized.to_string(), "onlyVoting");
    }

    #[test]
    fn test_nested_errors_are_transparent() {
        let err = RegistryError::from(DecodeError::Truncated);
        assert_eq!(err.to_string(), DecodeError::Truncated.to_string());

        let err = RegistryError::from(VerifyError::InvalidRecovery);
        assert_eq!(err.to_string(), VerifyError::InvalidRecovery.to_string());
    }

    #[rstest]
    #[case::unknown_chain(RegistryError::UnknownChain(1), "unknown_chain")]
    #[case::out_of_range(VerifyError::OutOfRange(Scalar::S).into(), "out_of_range")]
    #[case::stale(RegistryError::StaleCycle { chain_id: 1, current: 5, proposed: 3 }, "stale_cycle")]
    fn test_kind(#[case] err: RegistryError, #[case] kind: &str) {
        assert_eq!(err.kind(), kind);
    }
}
