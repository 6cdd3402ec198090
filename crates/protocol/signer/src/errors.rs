//! Error types for signer recovery.

use derive_more::Display;
use thiserror::Error;

/// One of the two signature scalars.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    /// The `r` scalar.
    #[display("r")]
    R,
    /// The `s` scalar.
    #[display("s")]
    S,
}

/// An error recovering the signer of a digest.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// A raw signature does not have the 65-byte `r || s || v` layout.
    #[error("malformed signature: expected 65 bytes, got {0}")]
    MalformedSignature(usize),
    /// The recovery id is invalid, or no public key can be recovered.
    #[error("invalid signature recovery")]
    InvalidRecovery,
    /// A scalar lies outside its valid range.
    #[error("signature scalar {0} out of range")]
    OutOfRange(Scalar),
}
