//! A generic tree of RLP items.
//!
//! Every header decode goes through this tree first, so the canonical-encoding rules live in
//! one place and the [`crate::BlockHeader`] projection only has to check the schema.

use crate::DecodeError;
use alloc::vec::Vec;
use alloy_primitives::Bytes;
use alloy_rlp::{BufMut, Encodable, Header};

/// The maximum list nesting depth accepted by [`RlpItem::decode`].
pub const MAX_DEPTH: usize = 32;

/// A decoded RLP item: either a byte string or a list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// A byte string. Single bytes below `0x80` are byte strings of length one.
    Bytes(Bytes),
    /// A list of child items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Decodes exactly one item spanning the whole of `buf`.
    pub fn decode_exact(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = buf;
        let item = Self::decode(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(DecodeError::TrailingBytes(cursor.len()));
        }
        Ok(item)
    }

    /// Decodes one item from the front of `buf`, advancing it past the item.
    pub fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        Self::decode_at_depth(buf, 0)
    }

    fn decode_at_depth(buf: &mut &[u8], depth: usize) -> Result<Self, DecodeError> {
        // `Header::decode` leaves a sub-0x80 single byte in place as its own payload.
        let header = Header::decode(buf)?;
        let payload = buf.get(..header.payload_length).ok_or(DecodeError::Truncated)?;
        *buf = &buf[header.payload_length..];

        if !header.list {
            return Ok(Self::Bytes(Bytes::copy_from_slice(payload)));
        }
        if depth >= MAX_DEPTH {
            return Err(DecodeError::MaxDepthExceeded);
        }

        let mut payload = payload;
        let mut items = Vec::new();
        while !payload.is_empty() {
            items.push(Self::decode_at_depth(&mut payload, depth + 1)?);
        }
        Ok(Self::List(items))
    }

    /// Returns the byte string, if this item is one.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes.as_ref()),
            Self::List(_) => None,
        }
    }

    /// Returns the child items, if this item is a list.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::Bytes(_) => None,
            Self::List(items) => Some(items.as_slice()),
        }
    }

    fn payload_length(items: &[Self]) -> usize {
        items.iter().map(Encodable::length).sum()
    }
}

impl Encodable for RlpItem {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Bytes(bytes) => bytes.as_ref().encode(out),
            Self::List(items) => {
                Header { list: true, payload_length: Self::payload_length(items) }.encode(out);
                for item in items {
                    item.encode(out);
                }
            }
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.as_ref().length(),
            Self::List(items) => {
                let payload_length = Self::payload_length(items);
                payload_length + alloy_rlp::length_of_length(payload_length)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{vec, vec::Vec};
    use alloy_primitives::hex;
    use rstest::rstest;

    fn nested_lists(depth: usize) -> Vec<u8> {
        let mut encoded = vec![0xc0];
        for _ in 0..depth {
            let mut wrapped = vec![0xc0 + encoded.len() as u8];
            wrapped.extend_from_slice(&encoded);
            encoded = wrapped;
        }
        encoded
    }

    #[rstest]
    #[case::single_byte(&[0x05], RlpItem::Bytes(Bytes::from_static(&[0x05])))]
    #[case::empty_string(&[0x80], RlpItem::Bytes(Bytes::new()))]
    #[case::short_string(&hex!("83646f67"), RlpItem::Bytes(Bytes::from_static(b"dog")))]
    #[case::empty_list(&[0xc0], RlpItem::List(vec![]))]
    fn test_decode_simple_items(#[case] input: &[u8], #[case] expected: RlpItem) {
        assert_eq!(RlpItem::decode_exact(input).unwrap(), expected);
    }

    #[test]
    fn test_decode_nested_list() {
        // [ "cat", [ "dog" ], 0x01 ]
        let input = hex!("ca83636174c483646f6701");
        let item = RlpItem::decode_exact(&input).unwrap();
        assert_eq!(
            item,
            RlpItem::List(vec![
                RlpItem::Bytes(Bytes::from_static(b"cat")),
                RlpItem::List(vec![RlpItem::Bytes(Bytes::from_static(b"dog"))]),
                RlpItem::Bytes(Bytes::from_static(&[0x01])),
            ])
        );
        assert_eq!(alloy_rlp::encode(&item), input);
    }

    #[test]
    fn test_long_string_round_trip() {
        let payload = [0xabu8; 56];
        let mut input = vec![0xb8, 56];
        input.extend_from_slice(&payload);

        let item = RlpItem::decode_exact(&input).unwrap();
        assert_eq!(item.as_bytes(), Some(&payload[..]));
        assert_eq!(item.length(), input.len());
        assert_eq!(alloy_rlp::encode(&item), input);
    }

    #[rstest]
    #[case::wrapped_single_byte(&[0x81, 0x05])]
    #[case::long_form_for_short_string(&[0xb8, 0x03, 0x61, 0x62, 0x63])]
    #[case::leading_zero_length(&[0xb9, 0x00, 0x38])]
    fn test_rejects_non_canonical(#[case] input: &[u8]) {
        assert!(matches!(RlpItem::decode_exact(input), Err(DecodeError::NotCanonical(_))));
    }

    #[rstest]
    #[case::string(&[0x83, 0x61, 0x62])]
    #[case::list(&[0xc3, 0x01, 0x02])]
    #[case::child_overruns_list(&[0xc2, 0x83, 0x61])]
    #[case::empty(&[])]
    fn test_rejects_truncated(#[case] input: &[u8]) {
        assert_eq!(RlpItem::decode_exact(input), Err(DecodeError::Truncated));
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        assert_eq!(RlpItem::decode_exact(&[0xc0, 0x01, 0x02]), Err(DecodeError::TrailingBytes(2)));
    }

    #[test]
    fn test_depth_limit() {
        // `nested_lists(n)` puts the innermost list at depth `n`.
        assert!(RlpItem::decode_exact(&nested_lists(MAX_DEPTH - 1)).is_ok());
        assert_eq!(
            RlpItem::decode_exact(&nested_lists(MAX_DEPTH)),
            Err(DecodeError::MaxDepthExceeded)
        );
    }
}
