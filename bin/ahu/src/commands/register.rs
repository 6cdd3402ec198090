//! Register Subcommand

use ahu_cli::GlobalArgs;
use ahu_registry::ChainId;
use alloy_primitives::Address;
use clap::Parser;

/// The `register` Subcommand
///
/// Registers a source chain on behalf of `--caller`. Only the configured voting authority may
/// register chains.
///
/// # Usage
///
/// ```sh
/// ahu register --caller <ADDRESS> --chain-id <ID> --endpoint <URL>
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Registers a source chain as the voting authority")]
pub(crate) struct RegisterCommand {
    /// The address on whose behalf the chain is registered.
    #[arg(long)]
    pub(crate) caller: Address,
    /// The chain identifier.
    #[arg(long)]
    pub(crate) chain_id: ChainId,
    /// The chain's endpoint reference, e.g. an RPC URL.
    #[arg(long)]
    pub(crate) endpoint: String,
}

impl RegisterCommand {
    /// Runs the subcommand.
    pub(crate) fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let mut registry = super::open_registry(args)?;
        let entry = registry.add_blockchain(&self.caller, self.chain_id, self.endpoint)?;
        println!("{}", serde_json::to_string_pretty(entry)?);
        super::persist(args, registry.state())
    }
}
