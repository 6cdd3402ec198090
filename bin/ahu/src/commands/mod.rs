//! Contains subcommands for the ahu binary.

mod register;
pub(crate) use register::RegisterCommand;

mod submit;
pub(crate) use submit::SubmitCommand;

mod parse;
pub(crate) use parse::{DigestCommand, ParseCommand};

mod chains;
pub(crate) use chains::ChainsCommand;

use crate::{config::AhuConfig, state};
use ahu_cli::GlobalArgs;
use ahu_registry::{BlockHeaderRegistry, RegistryState, StaticBootstrap, VotingAuthority};

/// Loads the config and the snapshot named by the global flags into a registry.
fn open_registry(
    args: &GlobalArgs,
) -> anyhow::Result<BlockHeaderRegistry<impl VotingAuthority + use<>, StaticBootstrap>> {
    let config = AhuConfig::load(args.config.as_deref())?;
    let snapshot = state::load(args.state.as_deref())?;
    Ok(BlockHeaderRegistry::with_state(snapshot, config.voting_authority(), config.bootstrap()))
}

/// Persists the registry state to the snapshot named by the global flags.
fn persist(args: &GlobalArgs, state: &RegistryState) -> anyhow::Result<()> {
    state::save(args.state.as_deref(), state)
}
