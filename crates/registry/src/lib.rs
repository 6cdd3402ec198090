#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

/// A source chain identifier.
pub type ChainId = u64;

mod errors;
pub use errors::{RegistryError, RegistryResult};

mod cycle;
pub use cycle::ValidatorCycle;

mod traits;
pub use traits::{
    FixedVoter, NoBootstrap, StaticBootstrap, ValidatorAuthority, ValidatorBootstrap,
    VotingAuthority,
};

mod chains;
pub use chains::{ChainEntry, ChainRegistry};

mod log;
pub use log::{AcceptedHeader, AcceptedHeaderLog};

mod submission;
pub use submission::{AcceptedBlock, BatchReceipt, SignedBlockSubmission};

mod pipeline;

mod registry;
pub use registry::{BlockHeaderRegistry, RegistryState};

#[cfg(feature = "metrics")]
mod metrics;
#[cfg(feature = "metrics")]
pub use metrics::Metrics;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
