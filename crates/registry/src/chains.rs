//! The table of registered chains.

use crate::{ChainId, ValidatorAuthority, ValidatorCycle};
use std::collections::{BTreeMap, btree_map::Entry};

/// A registered source chain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChainEntry {
    /// The chain identifier.
    pub chain_id: ChainId,
    /// An opaque endpoint reference, usually an RPC URL. Never interpreted here.
    pub endpoint: String,
    /// The validator cycle in force.
    pub cycle: ValidatorCycle,
}

/// Registered chains keyed by chain id. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChainRegistry {
    chains: BTreeMap<ChainId, ChainEntry>,
}

impl ChainRegistry {
    /// Returns the entry of `chain_id`.
    pub fn get(&self, chain_id: ChainId) -> Option<&ChainEntry> {
        self.chains.get(&chain_id)
    }

    /// Returns true if `chain_id` is registered.
    pub fn contains(&self, chain_id: ChainId) -> bool {
        self.chains.contains_key(&chain_id)
    }

    /// Iterates the registered chains in chain id order.
    pub fn iter(&self) -> impl Iterator<Item = &ChainEntry> {
        self.chains.values()
    }

    /// The number of registered chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if no chain is registered.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Inserts a new entry and returns it, or returns `None` if the id is taken.
    pub(crate) fn insert(
        &mut self,
        chain_id: ChainId,
        endpoint: String,
        cycle: ValidatorCycle,
    ) -> Option<&ChainEntry> {
        match self.chains.entry(chain_id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => Some(slot.insert(ChainEntry { chain_id, endpoint, cycle })),
        }
    }

    /// Replaces the cycles of already registered chains.
    pub(crate) fn apply_cycles(&mut self, cycles: BTreeMap<ChainId, ValidatorCycle>) {
        for (chain_id, cycle) in cycles {
            if let Some(entry) = self.chains.get_mut(&chain_id) {
                entry.cycle = cycle;
            }
        }
    }
}

impl ValidatorAuthority for ChainRegistry {
    fn cycle(&self, chain_id: ChainId) -> Option<&ValidatorCycle> {
        self.get(chain_id).map(|entry| &entry.cycle)
    }
}
