//! Submit Subcommand

use ahu_cli::GlobalArgs;
use ahu_registry::SignedBlockSubmission;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// The `submit` Subcommand
///
/// Ingests a JSON array of signed header submissions as one batch. Either every submission is
/// accepted or none is.
///
/// # Usage
///
/// ```sh
/// ahu submit --batch <FILE>
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Ingests a batch of signed headers")]
pub(crate) struct SubmitCommand {
    /// Path to a JSON array of submissions.
    #[arg(long)]
    pub(crate) batch: PathBuf,
}

impl SubmitCommand {
    /// Runs the subcommand.
    pub(crate) fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let contents = crate::state::read_to_string(&self.batch)?;
        let submissions: Vec<SignedBlockSubmission> = serde_json::from_str(&contents)
            .with_context(|| format!("invalid batch {}", self.batch.display()))?;

        let mut registry = super::open_registry(args)?;
        let receipt = registry.add_signed_blocks(&submissions)?;
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        super::persist(args, registry.state())
    }
}
