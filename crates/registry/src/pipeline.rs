//! Staging of a submission batch over the committed registry state.

use crate::{
    AcceptedBlock, AcceptedHeader, AcceptedHeaderLog, ChainId, ChainRegistry, RegistryError,
    RegistryResult, SignedBlockSubmission, ValidatorAuthority, ValidatorCycle,
};
use ahu_header::{BlockHeader, digest_of};
use ahu_signer::recover_signer;
use alloy_primitives::{Address, B256};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, trace, warn};

/// A batch in progress.
///
/// Rotations land in an overlay of per-chain cycles that later submissions of the same batch
/// read through, and accepted headers collect in a pending list. Nothing reaches the committed
/// state until [`StagedBatch::into_parts`] is handed back to the registry.
#[derive(Debug)]
pub(crate) struct StagedBatch<'a> {
    chains: &'a ChainRegistry,
    log: &'a AcceptedHeaderLog,
    cycles: BTreeMap<ChainId, ValidatorCycle>,
    pending: Vec<AcceptedHeader>,
    digests: BTreeSet<(ChainId, B256)>,
}

impl<'a> StagedBatch<'a> {
    pub(crate) const fn new(chains: &'a ChainRegistry, log: &'a AcceptedHeaderLog) -> Self {
        Self {
            chains,
            log,
            cycles: BTreeMap::new(),
            pending: Vec::new(),
            digests: BTreeSet::new(),
        }
    }

    /// Runs one submission through the pipeline against the staged state.
    pub(crate) fn stage(
        &mut self,
        submission: &SignedBlockSubmission,
    ) -> RegistryResult<AcceptedBlock> {
        let chain_id = submission.chain_id;
        let active = self.cycle(chain_id).ok_or(RegistryError::UnknownChain(chain_id))?;
        let active_cycle_end = active.cycle_end();

        let digest = digest_of(&submission.header);
        if digest != submission.block_hash {
            return Err(RegistryError::DigestMismatch {
                claimed: submission.block_hash,
                computed: digest,
            });
        }

        let signer = recover_signer(digest, &submission.signature)?;
        if !self.is_authorized(chain_id, &signer) {
            return Err(RegistryError::NotAuthorized { chain_id, signer });
        }
        trace!(target: "ingest", chain_id, %signer, %digest, "Signer authorized");

        let header = BlockHeader::decode(&submission.header)?;
        let number = header.number;

        if self.log.contains(chain_id, &digest) || !self.digests.insert((chain_id, digest)) {
            return Err(RegistryError::DuplicateHeader { chain_id, digest });
        }
        self.pending.push(AcceptedHeader {
            chain_id,
            digest,
            header,
            signer,
            active_cycle_end,
            declared_cycle_end: submission.cycle_end,
        });
        debug!(target: "ingest", chain_id, number, %signer, %digest, "Header staged");

        let rotated = match submission.rotation() {
            Some((validators, cycle_end)) => {
                self.rotate(chain_id, validators.to_vec(), cycle_end)?;
                true
            }
            None => {
                if submission.is_partial_rotation() {
                    warn!(
                        target: "ingest",
                        chain_id,
                        cycle_end = submission.cycle_end,
                        validators = submission.validators.len(),
                        "Ignoring rotation without both a cycle end and a validator set"
                    );
                }
                false
            }
        };

        Ok(AcceptedBlock { chain_id, number, digest, signer, rotated })
    }

    fn rotate(
        &mut self,
        chain_id: ChainId,
        validators: Vec<Address>,
        cycle_end: u64,
    ) -> RegistryResult<()> {
        let mut cycle =
            self.cycle(chain_id).cloned().ok_or(RegistryError::UnknownChain(chain_id))?;
        let previous = cycle.cycle_end();
        cycle.rotate(chain_id, validators, cycle_end)?;
        info!(
            target: "ingest",
            chain_id,
            previous,
            cycle_end,
            validators = cycle.validators().len(),
            "Validator set rotated"
        );
        self.cycles.insert(chain_id, cycle);
        Ok(())
    }

    /// Releases the staged cycles and the pending log entries.
    pub(crate) fn into_parts(self) -> (BTreeMap<ChainId, ValidatorCycle>, Vec<AcceptedHeader>) {
        (self.cycles, self.pending)
    }
}

impl ValidatorAuthority for StagedBatch<'_> {
    fn cycle(&self, chain_id: ChainId) -> Option<&ValidatorCycle> {
        self.cycles.get(&chain_id).or_else(|| self.chains.cycle(chain_id))
    }
}
