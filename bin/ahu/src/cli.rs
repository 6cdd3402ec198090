//! Contains the ahu CLI.

use crate::commands::{ChainsCommand, DigestCommand, ParseCommand, RegisterCommand, SubmitCommand};
use ahu_cli::{GlobalArgs, cli_styles};
use clap::{Parser, Subcommand};

/// Subcommands of the ahu CLI.
#[derive(Subcommand, Clone, Debug)]
pub(crate) enum Commands {
    /// Registers a source chain.
    Register(RegisterCommand),
    /// Ingests a batch of signed headers.
    Submit(SubmitCommand),
    /// Decodes a raw header.
    Parse(ParseCommand),
    /// Prints the digest of a raw header.
    Digest(DigestCommand),
    /// Lists registered chains.
    Chains(ChainsCommand),
}

/// The ahu CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub(crate) struct Cli {
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub(crate) global: GlobalArgs,
    /// The subcommand to run.
    #[command(subcommand)]
    pub(crate) command: Commands,
}

impl Cli {
    /// Runs the CLI.
    pub(crate) fn run(self) -> anyhow::Result<()> {
        self.global.init_tracing()?;

        match self.command {
            Commands::Register(cmd) => cmd.run(&self.global),
            Commands::Submit(cmd) => cmd.run(&self.global),
            Commands::Parse(cmd) => cmd.run(),
            Commands::Digest(cmd) => cmd.run(),
            Commands::Chains(cmd) => cmd.run(&self.global),
        }
    }
}
