//! Chains Subcommand

use ahu_cli::GlobalArgs;
use clap::Parser;

/// The `chains` Subcommand
///
/// Lists the registered chains with their current validator cycle.
///
/// # Usage
///
/// ```sh
/// ahu chains [--state <FILE>]
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Lists registered chains and their validator cycles")]
pub(crate) struct ChainsCommand {}

impl ChainsCommand {
    /// Runs the subcommand.
    pub(crate) fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let registry = super::open_registry(args)?;
        for entry in registry.chains() {
            let latest = registry.latest(entry.chain_id).map(|accepted| accepted.header.number);
            println!(
                "{:>10}  {:<32}  cycle_end={:<6} validators={:<3} latest={}",
                entry.chain_id,
                entry.endpoint,
                entry.cycle.cycle_end(),
                entry.cycle.validators().len(),
                latest.map_or_else(|| "-".to_string(), |number| number.to_string()),
            );
        }
        Ok(())
    }
}
