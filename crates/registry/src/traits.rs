//! Seams to the external governance and validator bootstrap policy.

use crate::{ChainId, ValidatorCycle};
use alloy_primitives::Address;
use std::collections::BTreeMap;

/// Decides whether a caller holds the voting capability that may register chains.
pub trait VotingAuthority {
    /// Returns true if `caller` may register chains.
    fn is_voting(&self, caller: &Address) -> bool;
}

impl<F> VotingAuthority for F
where
    F: Fn(&Address) -> bool,
{
    fn is_voting(&self, caller: &Address) -> bool {
        self(caller)
    }
}

/// A [`VotingAuthority`] held by a single address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedVoter(pub Address);

impl VotingAuthority for FixedVoter {
    fn is_voting(&self, caller: &Address) -> bool {
        self.0 == *caller
    }
}

/// Supplies the validator set a chain starts with when it is registered.
pub trait ValidatorBootstrap {
    /// Returns the initial validators for `chain_id`.
    fn initial_validators(&self, chain_id: ChainId) -> Vec<Address>;
}

impl<F> ValidatorBootstrap for F
where
    F: Fn(ChainId) -> Vec<Address>,
{
    fn initial_validators(&self, chain_id: ChainId) -> Vec<Address> {
        self(chain_id)
    }
}

/// Registers every chain with an empty validator set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBootstrap;

impl ValidatorBootstrap for NoBootstrap {
    fn initial_validators(&self, _: ChainId) -> Vec<Address> {
        Vec::new()
    }
}

/// Seeds chains from a fixed table. Chains missing from the table start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticBootstrap(pub BTreeMap<ChainId, Vec<Address>>);

impl StaticBootstrap {
    /// Adds or replaces the initial set of `chain_id`.
    pub fn with_chain(mut self, chain_id: ChainId, validators: Vec<Address>) -> Self {
        self.0.insert(chain_id, validators);
        self
    }
}

impl FromIterator<(ChainId, Vec<Address>)> for StaticBootstrap {
    fn from_iter<T: IntoIterator<Item = (ChainId, Vec<Address>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl ValidatorBootstrap for StaticBootstrap {
    fn initial_validators(&self, chain_id: ChainId) -> Vec<Address> {
        self.0.get(&chain_id).cloned().unwrap_or_default()
    }
}

/// Answers which validator cycle is in force for a chain.
pub trait ValidatorAuthority {
    /// Returns the current cycle of `chain_id`, or `None` if the chain is not registered.
    fn cycle(&self, chain_id: ChainId) -> Option<&ValidatorCycle>;

    /// Returns true if `signer` is in the current validator set of `chain_id`.
    fn is_authorized(&self, chain_id: ChainId, signer: &Address) -> bool {
        self.cycle(chain_id).is_some_and(|cycle| cycle.contains(signer))
    }
}
