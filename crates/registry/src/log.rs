//! The append-only log of accepted headers.

use crate::{ChainId, RegistryError};
use ahu_header::BlockHeader;
use alloy_primitives::{Address, B256};
use std::collections::BTreeMap;

/// A header accepted by the ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AcceptedHeader {
    /// The chain the header belongs to.
    pub chain_id: ChainId,
    /// The digest of the raw header bytes.
    pub digest: B256,
    /// The decoded header.
    pub header: BlockHeader,
    /// The validator that signed the digest.
    pub signer: Address,
    /// The chain's cycle end when the signer was authorized.
    pub active_cycle_end: u64,
    /// The cycle end carried by the submission, `0` if it did not rotate.
    pub declared_cycle_end: u64,
}

/// Accepted headers in acceptance order, indexed by `(chain, digest)` and `(chain, number)`.
///
/// Entries are never mutated or removed. Serializes as the plain sequence of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<AcceptedHeader>", into = "Vec<AcceptedHeader>")
)]
pub struct AcceptedHeaderLog {
    entries: Vec<AcceptedHeader>,
    by_digest: BTreeMap<(ChainId, B256), usize>,
    by_number: BTreeMap<(ChainId, u64), Vec<usize>>,
}

impl AcceptedHeaderLog {
    /// The number of accepted headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was accepted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in acceptance order.
    pub fn entries(&self) -> &[AcceptedHeader] {
        &self.entries
    }

    /// Returns true if `digest` was accepted for `chain_id`.
    pub fn contains(&self, chain_id: ChainId, digest: &B256) -> bool {
        self.by_digest.contains_key(&(chain_id, *digest))
    }

    /// Looks up an entry by digest.
    pub fn get(&self, chain_id: ChainId, digest: &B256) -> Option<&AcceptedHeader> {
        self.by_digest.get(&(chain_id, *digest)).map(|&index| &self.entries[index])
    }

    /// Every entry accepted for `chain_id` at height `number`, in acceptance order.
    ///
    /// More than one header may share a height, e.g. competing forks signed in different cycles.
    pub fn at_number(&self, chain_id: ChainId, number: u64) -> Vec<&AcceptedHeader> {
        self.by_number
            .get(&(chain_id, number))
            .map(|indices| indices.iter().map(|&index| &self.entries[index]).collect())
            .unwrap_or_default()
    }

    /// The accepted entry of `chain_id` with the highest block number.
    pub fn latest(&self, chain_id: ChainId) -> Option<&AcceptedHeader> {
        self.by_number
            .range((chain_id, 0)..=(chain_id, u64::MAX))
            .next_back()
            .and_then(|(_, indices)| indices.last())
            .map(|&index| &self.entries[index])
    }

    /// Iterates the entries of `chain_id` in acceptance order.
    pub fn for_chain(&self, chain_id: ChainId) -> impl Iterator<Item = &AcceptedHeader> {
        self.entries.iter().filter(move |entry| entry.chain_id == chain_id)
    }

    /// Appends entries whose digests are known to be fresh.
    pub(crate) fn extend(&mut self, entries: impl IntoIterator<Item = AcceptedHeader>) {
        for entry in entries {
            let index = self.entries.len();
            self.by_digest.insert((entry.chain_id, entry.digest), index);
            self.by_number.entry((entry.chain_id, entry.header.number)).or_default().push(index);
            self.entries.push(entry);
        }
    }
}

impl TryFrom<Vec<AcceptedHeader>> for AcceptedHeaderLog {
    type Error = RegistryError;

    /// Rebuilds the indexes, rejecting a digest that appears twice for one chain.
    fn try_from(entries: Vec<AcceptedHeader>) -> Result<Self, Self::Error> {
        let mut log = Self::default();
        for entry in entries {
            if log.contains(entry.chain_id, &entry.digest) {
                return Err(RegistryError::DuplicateHeader {
                    chain_id: entry.chain_id,
                    digest: entry.digest,
                });
            }
            log.extend([entry]);
        }
        Ok(log)
    }
}

impl From<AcceptedHeaderLog> for Vec<AcceptedHeader> {
    fn from(log: AcceptedHeaderLog) -> Self {
        log.entries
    }
}
