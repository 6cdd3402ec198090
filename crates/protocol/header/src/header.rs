//! The canonical block header record.

use crate::{DecodeError, HeaderField, RlpItem, digest_of};
use alloc::vec::Vec;
use alloy_primitives::{Address, B64, B256, Bloom, Bytes, U256};
use alloy_rlp::{BufMut, Encodable};

/// Number of items in a header that predates the base fee.
pub const LEGACY_ITEM_COUNT: usize = 15;

/// Number of items in a header that carries a base fee.
pub const LONDON_ITEM_COUNT: usize = 16;

/// Number of 32-byte words in a logs bloom.
pub const BLOOM_WORDS: usize = 8;

/// A chain-agnostic block header, in encoding order.
///
/// Integer fields are canonically minimal big-endian on the wire, so a zero value is the empty
/// byte string. `base_fee` is absent on chains that never activated EIP-1559.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BlockHeader {
    /// Digest of the parent block header.
    pub parent_hash: B256,
    /// Digest of the ommers list.
    pub uncle_hash: B256,
    /// Address that received the block reward.
    pub coinbase: Address,
    /// State trie root.
    pub root: B256,
    /// Transactions trie root.
    pub tx_hash: B256,
    /// Receipts trie root.
    pub receipt_hash: B256,
    /// The 256-byte logs bloom.
    pub bloom: Bloom,
    /// Block difficulty.
    pub difficulty: U256,
    /// Block number.
    pub number: u64,
    /// Gas limit.
    pub gas_limit: u64,
    /// Gas used.
    pub gas_used: u64,
    /// Block timestamp.
    pub time: u64,
    /// Extra data.
    pub extra: Bytes,
    /// Mix digest.
    pub mix_digest: B256,
    /// Proof-of-work nonce.
    pub nonce: B64,
    /// EIP-1559 base fee.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub base_fee: Option<u64>,
}

impl BlockHeader {
    /// Decodes a header from its raw RLP encoding.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        match RlpItem::decode_exact(buf)? {
            RlpItem::List(items) => Self::from_items(&items),
            RlpItem::Bytes(_) => Err(DecodeError::ExpectedList),
        }
    }

    /// Projects an already-decoded item list onto the header schema.
    pub fn from_items(items: &[RlpItem]) -> Result<Self, DecodeError> {
        if !matches!(items.len(), LEGACY_ITEM_COUNT | LONDON_ITEM_COUNT) {
            return Err(DecodeError::WrongItemCount { got: items.len() });
        }

        let mut fields = FieldReader { items: items.iter() };
        Ok(Self {
            parent_hash: B256::new(fields.fixed(HeaderField::ParentHash)?),
            uncle_hash: B256::new(fields.fixed(HeaderField::UncleHash)?),
            coinbase: Address::new(fields.fixed(HeaderField::Coinbase)?),
            root: B256::new(fields.fixed(HeaderField::Root)?),
            tx_hash: B256::new(fields.fixed(HeaderField::TxHash)?),
            receipt_hash: B256::new(fields.fixed(HeaderField::ReceiptHash)?),
            bloom: Bloom::new(fields.fixed(HeaderField::Bloom)?),
            difficulty: fields.u256(HeaderField::Difficulty)?,
            number: fields.u64(HeaderField::Number)?,
            gas_limit: fields.u64(HeaderField::GasLimit)?,
            gas_used: fields.u64(HeaderField::GasUsed)?,
            time: fields.u64(HeaderField::Time)?,
            extra: Bytes::copy_from_slice(fields.bytes(HeaderField::Extra)?),
            mix_digest: B256::new(fields.fixed(HeaderField::MixDigest)?),
            nonce: B64::new(fields.fixed(HeaderField::Nonce)?),
            base_fee: if items.len() == LONDON_ITEM_COUNT {
                Some(fields.u64(HeaderField::BaseFee)?)
            } else {
                None
            },
        })
    }

    /// Returns the canonical RLP encoding of the header.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        Encodable::encode(self, &mut out);
        out
    }

    /// Computes the header digest by re-encoding the header.
    ///
    /// For a header obtained from [`Self::decode`], this equals [`digest_of`] of the input bytes.
    pub fn hash_slow(&self) -> B256 {
        digest_of(&self.encode())
    }

    /// Returns true if the header carries a base fee.
    pub const fn is_london(&self) -> bool {
        self.base_fee.is_some()
    }

    /// Returns the logs bloom as its eight 32-byte words.
    pub fn bloom_words(&self) -> [B256; BLOOM_WORDS] {
        let bloom = self.bloom.as_slice();
        core::array::from_fn(|i| B256::from_slice(&bloom[i * 32..(i + 1) * 32]))
    }

    /// Assembles a logs bloom from its eight 32-byte words.
    pub fn bloom_from_words(words: &[B256; BLOOM_WORDS]) -> Bloom {
        let mut bloom = [0u8; 256];
        for (chunk, word) in bloom.chunks_exact_mut(32).zip(words) {
            chunk.copy_from_slice(word.as_slice());
        }
        Bloom::new(bloom)
    }

    fn payload_length(&self) -> usize {
        let mut length = self.parent_hash.length()
            + self.uncle_hash.length()
            + self.coinbase.length()
            + self.root.length()
            + self.tx_hash.length()
            + self.receipt_hash.length()
            + self.bloom.length()
            + self.difficulty.length()
            + self.number.length()
            + self.gas_limit.length()
            + self.gas_used.length()
            + self.time.length()
            + self.extra.length()
            + self.mix_digest.length()
            + self.nonce.length();
        if let Some(base_fee) = self.base_fee {
            length += base_fee.length();
        }
        length
    }
}

impl Encodable for BlockHeader {
    fn encode(&self, out: &mut dyn BufMut) {
        alloy_rlp::Header { list: true, payload_length: self.payload_length() }.encode(out);
        self.parent_hash.encode(out);
        self.uncle_hash.encode(out);
        self.coinbase.encode(out);
        self.root.encode(out);
        self.tx_hash.encode(out);
        self.receipt_hash.encode(out);
        self.bloom.encode(out);
        self.difficulty.encode(out);
        self.number.encode(out);
        self.gas_limit.encode(out);
        self.gas_used.encode(out);
        self.time.encode(out);
        self.extra.encode(out);
        self.mix_digest.encode(out);
        self.nonce.encode(out);
        if let Some(base_fee) = self.base_fee {
            base_fee.encode(out);
        }
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        payload_length + alloy_rlp::length_of_length(payload_length)
    }
}

/// Walks the header item list, checking each field against its schema.
#[derive(Debug)]
struct FieldReader<'a> {
    items: core::slice::Iter<'a, RlpItem>,
}

impl<'a> FieldReader<'a> {
    fn bytes(&mut self, field: HeaderField) -> Result<&'a [u8], DecodeError> {
        let item = self.items.next().ok_or(DecodeError::Truncated)?;
        item.as_bytes().ok_or(DecodeError::UnexpectedList(field))
    }

    fn fixed<const N: usize>(&mut self, field: HeaderField) -> Result<[u8; N], DecodeError> {
        let bytes = self.bytes(field)?;
        bytes.try_into().map_err(|_| DecodeError::WrongFieldLength {
            field,
            expected: N,
            got: bytes.len(),
        })
    }

    fn integer(&mut self, field: HeaderField, width: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self.bytes(field)?;
        if bytes.len() > width {
            return Err(DecodeError::WrongFieldLength { field, expected: width, got: bytes.len() });
        }
        if bytes.first() == Some(&0) {
            return Err(DecodeError::NotCanonical("leading zero in integer"));
        }
        Ok(bytes)
    }

    fn u64(&mut self, field: HeaderField) -> Result<u64, DecodeError> {
        let bytes = self.integer(field, 8)?;
        Ok(bytes.iter().fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)))
    }

    fn u256(&mut self, field: HeaderField) -> Result<U256, DecodeError> {
        let bytes = self.integer(field, 32)?;
        Ok(U256::from_be_slice(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloy_primitives::{address, b256, bytes, hex};
    use proptest::prelude::*;
    use rstest::rstest;

    const BLOCK_400000_RLP: &str = include_str!("../testdata/block_400000.hex");

    fn block_400000() -> BlockHeader {
        BlockHeader {
            parent_hash: b256!("1e77d8f1267348b516ebc4f4da1e2aa59f85f0cbd853949500ffac8bfc38ba14"),
            uncle_hash: b256!("1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347"),
            coinbase: address!("2a65Aca4D5fC5B5C859090a6c34d164135398226"),
            root: b256!("0b5e4386680f43c224c5c037efc0b645c8e1c3f6b30da0eec07272b4e6f8cd89"),
            tx_hash: b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421"),
            receipt_hash: b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421"),
            bloom: Bloom::ZERO,
            difficulty: U256::from(6_022_643_743_806u64),
            number: 400_000,
            gas_limit: 3_141_592,
            gas_used: 0,
            time: 1_445_130_204,
            extra: bytes!("d583010202844765746885676f312e35856c696e7578"),
            mix_digest: b256!("3fbea7af642a4e20cd93a945a1f5e23bd72fc5261153e09102cf718980aeff38"),
            nonce: B64::new(hex!("6af23caae95692ef")),
            base_fee: None,
        }
    }

    fn raw_block_400000() -> Vec<u8> {
        hex::decode(BLOCK_400000_RLP.trim()).unwrap()
    }

    /// Rebuilds the fixture with one item replaced by raw encoded bytes.
    fn with_raw_item(index: usize, raw: &[u8]) -> Vec<u8> {
        let RlpItem::List(mut items) = RlpItem::decode_exact(&raw_block_400000()).unwrap() else {
            panic!("fixture is a list");
        };
        items[index] = RlpItem::decode_exact(raw).unwrap();
        alloy_rlp::encode(RlpItem::List(items))
    }

    #[test]
    fn test_decode_mainnet_block() {
        let raw = raw_block_400000();
        let header = BlockHeader::decode(&raw).unwrap();
        assert_eq!(header, block_400000());
        assert!(!header.is_london());
        assert_eq!(
            digest_of(&raw),
            b256!("5d15649e25d8f3e2c0374946078539d200710afc977cdfc6a977bd23f20fa8e8")
        );
        assert_eq!(header.hash_slow(), digest_of(&raw));
    }

    #[test]
    fn test_encode_mainnet_block() {
        assert_eq!(block_400000().encode(), raw_block_400000());
    }

    #[test]
    fn test_zero_gas_used_is_empty_string() {
        // gasUsed is item 10; the fixture encodes it as 0x80.
        let raw = raw_block_400000();
        let RlpItem::List(items) = RlpItem::decode_exact(&raw).unwrap() else { unreachable!() };
        assert_eq!(items[10], RlpItem::Bytes(Bytes::new()));
        assert_eq!(BlockHeader::decode(&raw).unwrap().gas_used, 0);
    }

    #[test]
    fn test_london_header_round_trip() {
        let header = BlockHeader { base_fee: Some(7), ..block_400000() };
        let raw = header.encode();
        let decoded = BlockHeader::decode(&raw).unwrap();
        assert_eq!(decoded, header);
        assert!(decoded.is_london());
        assert_eq!(decoded.hash_slow(), digest_of(&raw));
    }

    #[test]
    fn test_zero_base_fee_round_trip() {
        let header = BlockHeader { base_fee: Some(0), ..block_400000() };
        assert_eq!(BlockHeader::decode(&header.encode()).unwrap().base_fee, Some(0));
    }

    #[test]
    fn test_rejects_top_level_string() {
        assert_eq!(BlockHeader::decode(&[0x83, 0x61, 0x62, 0x63]), Err(DecodeError::ExpectedList));
    }

    #[rstest]
    #[case::empty(0)]
    #[case::fourteen(14)]
    #[case::seventeen(17)]
    fn test_rejects_wrong_item_count(#[case] count: usize) {
        let raw = alloy_rlp::encode(RlpItem::List(vec![RlpItem::Bytes(Bytes::new()); count]));
        assert_eq!(BlockHeader::decode(&raw), Err(DecodeError::WrongItemCount { got: count }));
    }

    #[test]
    fn test_rejects_short_mix_digest() {
        let raw = with_raw_item(13, &[&[0x9f][..], &[0x11; 31][..]].concat());
        assert_eq!(
            BlockHeader::decode(&raw),
            Err(DecodeError::WrongFieldLength { field: HeaderField::MixDigest, expected: 32, got: 31 })
        );
    }

    #[test]
    fn test_rejects_oversized_number() {
        let raw = with_raw_item(8, &hex!("89010000000000000000"));
        assert_eq!(
            BlockHeader::decode(&raw),
            Err(DecodeError::WrongFieldLength { field: HeaderField::Number, expected: 8, got: 9 })
        );
    }

    #[rstest]
    #[case::zero_byte(&[0x00])]
    #[case::padded(&[0x82, 0x00, 0x01])]
    fn test_rejects_non_minimal_integer(#[case] raw_item: &[u8]) {
        let raw = with_raw_item(10, raw_item);
        assert_eq!(
            BlockHeader::decode(&raw),
            Err(DecodeError::NotCanonical("leading zero in integer"))
        );
    }

    #[test]
    fn test_rejects_list_in_field() {
        let raw = with_raw_item(2, &[0xc0]);
        assert_eq!(BlockHeader::decode(&raw), Err(DecodeError::UnexpectedList(HeaderField::Coinbase)));
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut raw = raw_block_400000();
        raw.push(0x80);
        assert_eq!(BlockHeader::decode(&raw), Err(DecodeError::TrailingBytes(1)));
    }

    #[test]
    fn test_rejects_truncated() {
        let raw = raw_block_400000();
        assert_eq!(BlockHeader::decode(&raw[..raw.len() - 1]), Err(DecodeError::Truncated));
    }

    #[test]
    fn test_bloom_words() {
        let mut header = block_400000();
        let mut bloom = [0u8; 256];
        bloom[0] = 0x01;
        bloom[255] = 0xff;
        header.bloom = Bloom::new(bloom);

        let words = header.bloom_words();
        assert_eq!(words[0][0], 0x01);
        assert_eq!(words[7][31], 0xff);
        assert!(words[1..7].iter().all(|w| w.is_zero()));
        assert_eq!(BlockHeader::bloom_from_words(&words), header.bloom);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(block_400000()).unwrap();
        assert_eq!(json["number"], 400_000);
        assert_eq!(json["gasUsed"], 0);
        assert!(json.get("baseFee").is_none());
    }

    fn arb_header() -> impl Strategy<Value = BlockHeader> {
        let hashes = (any::<[u8; 32]>(), any::<[u8; 32]>(), any::<[u8; 20]>(), any::<[u8; 32]>());
        let roots = (any::<[u8; 32]>(), any::<[u8; 32]>(), prop::collection::vec(any::<u8>(), 256));
        let numbers = (
            any::<[u8; 32]>(),
            any::<u64>(),
            any::<u64>(),
            prop_oneof![Just(0u64), any::<u64>()],
            any::<u64>(),
        );
        let tail = (
            prop::collection::vec(any::<u8>(), 0..64),
            any::<[u8; 32]>(),
            any::<[u8; 8]>(),
            prop::option::of(any::<u64>()),
        );
        (hashes, roots, numbers, tail).prop_map(
            |(
                (parent, uncle, coinbase, root),
                (tx, receipt, bloom),
                (difficulty, number, gas_limit, gas_used, time),
                (extra, mix, nonce, base_fee),
            )| {
                BlockHeader {
                    parent_hash: B256::new(parent),
                    uncle_hash: B256::new(uncle),
                    coinbase: Address::new(coinbase),
                    root: B256::new(root),
                    tx_hash: B256::new(tx),
                    receipt_hash: B256::new(receipt),
                    bloom: Bloom::from_slice(&bloom),
                    difficulty: U256::from_be_bytes(difficulty),
                    number,
                    gas_limit,
                    gas_used,
                    time,
                    extra: Bytes::from(extra),
                    mix_digest: B256::new(mix),
                    nonce: B64::new(nonce),
                    base_fee,
                }
            },
        )
    }

    proptest! {
        #[test]
        fn test_decode_encode_round_trip(header in arb_header()) {
            let raw = header.encode();
            prop_assert_eq!(raw.len(), header.length());
            let decoded = BlockHeader::decode(&raw).unwrap();
            prop_assert_eq!(&decoded, &header);
            prop_assert_eq!(decoded.encode(), raw);
        }
    }
}
