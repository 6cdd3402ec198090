//! The per-chain validator cycle.

use crate::{ChainId, RegistryError, RegistryResult};
use alloy_primitives::Address;

/// The validator set a chain currently accepts signatures from, and the boundary at which that
/// set was installed.
///
/// `cycle_end` is a logical counter, not a timestamp. The only transition is
/// [`ValidatorCycle::rotate`], which swaps both fields together and only ever moves the
/// boundary forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidatorCycle {
    validators: Vec<Address>,
    cycle_end: u64,
}

impl ValidatorCycle {
    /// Creates a cycle with the given set and boundary.
    pub const fn new(validators: Vec<Address>, cycle_end: u64) -> Self {
        Self { validators, cycle_end }
    }

    /// The first cycle of a freshly registered chain.
    pub const fn genesis(validators: Vec<Address>) -> Self {
        Self::new(validators, 0)
    }

    /// The current validator set, in the order it was installed.
    pub fn validators(&self) -> &[Address] {
        &self.validators
    }

    /// The current cycle boundary.
    pub const fn cycle_end(&self) -> u64 {
        self.cycle_end
    }

    /// Returns true if `signer` is in the current set.
    pub fn contains(&self, signer: &Address) -> bool {
        self.validators.contains(signer)
    }

    /// Installs `validators` and advances the boundary to `cycle_end`.
    ///
    /// Fails with [`RegistryError::StaleCycle`] unless `cycle_end` is strictly greater than the
    /// recorded boundary, in which case `self` is unchanged.
    pub fn rotate(
        &mut self,
        chain_id: ChainId,
        validators: Vec<Address>,
        cycle_end: u64,
    ) -> RegistryResult<()> {
        if cycle_end <= self.cycle_end {
            return Err(RegistryError::StaleCycle {
                chain_id,
                current: self.cycle_end,
                proposed: cycle_end,
            });
        }
        self.validators = validators;
        self.cycle_end = cycle_end;
        Ok(())
    }
}
