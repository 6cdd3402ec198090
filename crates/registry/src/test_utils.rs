//! Helpers that sign headers and build submissions.

use crate::{ChainId, SignedBlockSubmission};
use ahu_header::{BlockHeader, digest_of};
use ahu_signer::HeaderSignature;
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

/// A validator with a deterministic private key.
#[derive(Debug, Clone)]
pub struct TestValidator {
    signer: PrivateKeySigner,
}

impl TestValidator {
    /// Creates a validator whose private key is `seed` repeated 32 times.
    ///
    /// `seed` must be in `1..=0xfe`; other values are not valid secp256k1 keys.
    pub fn new(seed: u8) -> Self {
        let signer = PrivateKeySigner::from_bytes(&B256::repeat_byte(seed))
            .expect("seed in 1..=0xfe is a valid secp256k1 key");
        Self { signer }
    }

    /// The validator's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs the digest of `header` directly and packs the result into the compact form.
    pub fn sign_compact(&self, header: &[u8]) -> HeaderSignature {
        let signature =
            self.signer.sign_hash_sync(&digest_of(header)).expect("signing a prehash succeeds");
        HeaderSignature::compact_from(&signature)
    }

    /// Signs the digest of `header` as a personal message and returns the raw form.
    pub fn sign_raw(&self, header: &[u8]) -> HeaderSignature {
        let signature = self
            .signer
            .sign_message_sync(digest_of(header).as_slice())
            .expect("signing a message succeeds");
        HeaderSignature::raw_from(&signature)
    }

    /// Builds a compact-signed submission of `header` that does not rotate.
    pub fn submit(&self, chain_id: ChainId, header: &BlockHeader) -> SignedBlockSubmission {
        self.submit_bytes(chain_id, header.encode().into())
    }

    /// Builds a compact-signed submission of arbitrary header bytes with a correct block hash.
    pub fn submit_bytes(&self, chain_id: ChainId, header: Bytes) -> SignedBlockSubmission {
        SignedBlockSubmission {
            signature: self.sign_compact(&header),
            block_hash: digest_of(&header),
            header,
            chain_id,
            cycle_end: 0,
            validators: Vec::new(),
        }
    }

    /// Builds a compact-signed submission of `header` that installs `validators` at
    /// `cycle_end`.
    pub fn submit_rotation(
        &self,
        chain_id: ChainId,
        header: &BlockHeader,
        cycle_end: u64,
        validators: Vec<Address>,
    ) -> SignedBlockSubmission {
        SignedBlockSubmission { cycle_end, validators, ..self.submit(chain_id, header) }
    }
}

/// A minimal pre-London header at height `number`.
pub fn test_header(number: u64) -> BlockHeader {
    BlockHeader {
        parent_hash: B256::with_last_byte(number as u8),
        coinbase: Address::repeat_byte(0xc0),
        difficulty: U256::from(131_072u64),
        number,
        gas_limit: 8_000_000,
        time: 1_700_000_000 + number,
        extra: Bytes::from_static(b"ahu"),
        ..Default::default()
    }
}
