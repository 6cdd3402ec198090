//! The block header registry.

use crate::{
    AcceptedHeader, AcceptedHeaderLog, BatchReceipt, ChainEntry, ChainId, ChainRegistry,
    NoBootstrap, RegistryError, RegistryResult, SignedBlockSubmission, ValidatorAuthority,
    ValidatorBootstrap, ValidatorCycle, VotingAuthority, pipeline::StagedBatch,
};
use ahu_header::BlockHeader;
use alloy_primitives::{Address, B256};
use tracing::{info, warn};

/// The persisted state of a [`BlockHeaderRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryState {
    /// Registered chains and their validator cycles.
    pub chains: ChainRegistry,
    /// Accepted headers.
    pub log: AcceptedHeaderLog,
}

/// Registers source chains and ingests signed headers for them.
///
/// Chain registration is gated by the voting authority `V`. New chains take their first
/// validator set from `B`. Every mutating call either fully applies or leaves the registry
/// untouched.
#[derive(Debug)]
pub struct BlockHeaderRegistry<V, B = NoBootstrap> {
    state: RegistryState,
    voting: V,
    bootstrap: B,
}

impl<V, B> BlockHeaderRegistry<V, B>
where
    V: VotingAuthority,
    B: ValidatorBootstrap,
{
    /// Creates an empty registry.
    pub fn new(voting: V, bootstrap: B) -> Self {
        Self::with_state(RegistryState::default(), voting, bootstrap)
    }

    /// Creates a registry over previously persisted state.
    pub const fn with_state(state: RegistryState, voting: V, bootstrap: B) -> Self {
        Self { state, voting, bootstrap }
    }

    /// The current state.
    pub const fn state(&self) -> &RegistryState {
        &self.state
    }

    /// Consumes the registry, returning its state.
    pub fn into_state(self) -> RegistryState {
        self.state
    }

    /// Registers `chain_id` on behalf of `caller`.
    ///
    /// Fails with [`RegistryError::Unauthorized`] unless `caller` holds the voting capability,
    /// and with [`RegistryError::AlreadyRegistered`] if the chain exists. The new chain starts
    /// at cycle end `0` with the bootstrap validator set.
    pub fn add_blockchain(
        &mut self,
        caller: &Address,
        chain_id: ChainId,
        endpoint: impl Into<String>,
    ) -> RegistryResult<&ChainEntry> {
        if !self.voting.is_voting(caller) {
            warn!(target: "registry", %caller, chain_id, "Registration from a non-voting caller");
            return Err(RegistryError::Unauthorized);
        }
        if self.state.chains.contains(chain_id) {
            return Err(RegistryError::AlreadyRegistered(chain_id));
        }

        let cycle = ValidatorCycle::genesis(self.bootstrap.initial_validators(chain_id));
        let endpoint = endpoint.into();
        info!(
            target: "registry",
            chain_id,
            %endpoint,
            validators = cycle.validators().len(),
            "Chain registered"
        );
        #[cfg(feature = "metrics")]
        crate::Metrics::record_registration();

        self.state
            .chains
            .insert(chain_id, endpoint, cycle)
            .ok_or(RegistryError::AlreadyRegistered(chain_id))
    }

    /// Ingests a batch of signed headers in order.
    ///
    /// Each submission must name a registered chain, carry the digest of its header bytes, be
    /// signed by a member of the chain's current validator set and decode to a header that was
    /// not accepted before. A submission that rotates the validator set affects every later
    /// submission of the same batch. If any submission fails the whole batch is rejected and
    /// nothing is applied.
    pub fn add_signed_blocks(
        &mut self,
        submissions: &[SignedBlockSubmission],
    ) -> RegistryResult<BatchReceipt> {
        let mut batch = StagedBatch::new(&self.state.chains, &self.state.log);
        let mut receipt = BatchReceipt::default();

        for (index, submission) in submissions.iter().enumerate() {
            match batch.stage(submission) {
                Ok(block) => receipt.accepted.push(block),
                Err(err) => {
                    warn!(
                        target: "ingest",
                        index,
                        chain_id = submission.chain_id,
                        reason = err.kind(),
                        %err,
                        "Batch rejected"
                    );
                    #[cfg(feature = "metrics")]
                    crate::Metrics::record_rejection(&err);
                    return Err(err);
                }
            }
        }

        let (cycles, pending) = batch.into_parts();
        self.state.chains.apply_cycles(cycles);
        self.state.log.extend(pending);

        info!(
            target: "ingest",
            accepted = receipt.accepted.len(),
            rotations = receipt.rotations(),
            total = self.state.log.len(),
            "Batch committed"
        );
        #[cfg(feature = "metrics")]
        crate::Metrics::record_batch(&receipt);

        Ok(receipt)
    }

    /// Decodes a raw header without touching the registry.
    pub fn parse_block(&self, header: &[u8]) -> RegistryResult<BlockHeader> {
        Ok(BlockHeader::decode(header)?)
    }

    /// Returns the entry of `chain_id`.
    pub fn chain(&self, chain_id: ChainId) -> Option<&ChainEntry> {
        self.state.chains.get(chain_id)
    }

    /// Iterates the registered chains in chain id order.
    pub fn chains(&self) -> impl Iterator<Item = &ChainEntry> {
        self.state.chains.iter()
    }

    /// The current validator set of `chain_id`.
    pub fn validators(&self, chain_id: ChainId) -> Option<&[Address]> {
        self.state.chains.cycle(chain_id).map(ValidatorCycle::validators)
    }

    /// The current cycle end of `chain_id`.
    pub fn cycle_end(&self, chain_id: ChainId) -> Option<u64> {
        self.state.chains.cycle(chain_id).map(ValidatorCycle::cycle_end)
    }

    /// Returns true if `signer` may currently sign headers of `chain_id`.
    pub fn is_authorized(&self, chain_id: ChainId, signer: &Address) -> bool {
        self.state.chains.is_authorized(chain_id, signer)
    }

    /// Looks up an accepted header by digest.
    pub fn header(&self, chain_id: ChainId, digest: &B256) -> Option<&AcceptedHeader> {
        self.state.log.get(chain_id, digest)
    }

    /// Every accepted header of `chain_id` at height `number`.
    pub fn headers_at(&self, chain_id: ChainId, number: u64) -> Vec<&AcceptedHeader> {
        self.state.log.at_number(chain_id, number)
    }

    /// The accepted header of `chain_id` with the highest number.
    pub fn latest(&self, chain_id: ChainId) -> Option<&AcceptedHeader> {
        self.state.log.latest(chain_id)
    }

    /// The accepted header log.
    pub const fn log(&self) -> &AcceptedHeaderLog {
        &self.state.log
    }
}
