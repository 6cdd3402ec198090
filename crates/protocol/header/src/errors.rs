//! Error types for header decoding.

use derive_more::Display;
use thiserror::Error;

/// A named field of the [`crate::BlockHeader`] schema, in encoding order.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    /// The parent block digest.
    #[display("parentHash")]
    ParentHash,
    /// The ommers list digest.
    #[display("uncleHash")]
    UncleHash,
    /// The beneficiary address.
    #[display("coinbase")]
    Coinbase,
    /// The state trie root.
    #[display("root")]
    Root,
    /// The transactions trie root.
    #[display("txHash")]
    TxHash,
    /// The receipts trie root.
    #[display("receiptHash")]
    ReceiptHash,
    /// The logs bloom.
    #[display("bloom")]
    Bloom,
    /// The block difficulty.
    #[display("difficulty")]
    Difficulty,
    /// The block number.
    #[display("number")]
    Number,
    /// The gas limit.
    #[display("gasLimit")]
    GasLimit,
    /// The gas used.
    #[display("gasUsed")]
    GasUsed,
    /// The block timestamp.
    #[display("time")]
    Time,
    /// The extra data.
    #[display("extra")]
    Extra,
    /// The mix digest.
    #[display("mixDigest")]
    MixDigest,
    /// The proof-of-work nonce.
    #[display("nonce")]
    Nonce,
    /// The EIP-1559 base fee.
    #[display("baseFee")]
    BaseFee,
}

/// An error decoding a [`crate::BlockHeader`] or an [`crate::RlpItem`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input ended before the announced payload.
    #[error("input truncated")]
    Truncated,
    /// Bytes remain after the top-level item.
    #[error("{0} trailing bytes after the top-level item")]
    TrailingBytes(usize),
    /// The header list does not carry a supported number of items.
    #[error("header list carries {got} items, expected 15 or 16")]
    WrongItemCount {
        /// The number of items found.
        got: usize,
    },
    /// A field does not have its declared width.
    #[error("field {field} has {got} bytes, expected {expected}")]
    WrongFieldLength {
        /// The offending field.
        field: HeaderField,
        /// The declared width (the maximum width for integers).
        expected: usize,
        /// The width found.
        got: usize,
    },
    /// The encoding is not the unique canonical one.
    #[error("non-canonical encoding: {0}")]
    NotCanonical(&'static str),
    /// The top-level item is a byte string, not a list.
    #[error("expected a list at the top level")]
    ExpectedList,
    /// A field that must be a byte string is a list.
    #[error("field {0} is a list, expected a byte string")]
    UnexpectedList(HeaderField),
    /// Lists are nested deeper than [`crate::MAX_DEPTH`].
    #[error("list nesting exceeds the maximum depth")]
    MaxDepthExceeded,
}

impl From<alloy_rlp::Error> for DecodeError {
    fn from(err: alloy_rlp::Error) -> Self {
        match err {
            alloy_rlp::Error::InputTooShort => Self::Truncated,
            alloy_rlp::Error::LeadingZero => Self::NotCanonical("leading zero in length"),
            alloy_rlp::Error::NonCanonicalSingleByte => {
                Self::NotCanonical("single byte below 0x80 wrapped in a string prefix")
            }
            alloy_rlp::Error::NonCanonicalSize => {
                Self::NotCanonical("long-form length used for a short payload")
            }
            alloy_rlp::Error::Overflow => Self::NotCanonical("length overflows usize"),
            _ => Self::NotCanonical("malformed length prefix"),
        }
    }
}
