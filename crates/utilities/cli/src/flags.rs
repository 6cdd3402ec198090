//! Global arguments for the ahu binaries.

use crate::{CliResult, init_tracing_subscriber};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Global arguments for the CLI.
#[derive(Parser, Default, Clone, Debug)]
pub struct GlobalArgs {
    /// Verbosity level: `-v` info, `-vv` debug, `-vvv` trace. `RUST_LOG` takes precedence.
    #[arg(long = "verbosity", short = 'v', global = true, action = ArgAction::Count)]
    pub v: u8,
    /// Path to the TOML configuration file.
    #[arg(long, global = true, env = "AHU_CONFIG")]
    pub config: Option<PathBuf>,
    /// Path to the JSON registry snapshot. Read before and written after each mutating command.
    #[arg(long, global = true, env = "AHU_STATE")]
    pub state: Option<PathBuf>,
}

impl GlobalArgs {
    /// Installs the tracing subscriber for the configured verbosity.
    pub fn init_tracing(&self) -> CliResult<()> {
        init_tracing_subscriber(self.v, None::<EnvFilter>)?;
        Ok(())
    }
}
