//! Parse and Digest Subcommands

use ahu_header::{BlockHeader, digest_of};
use alloy_primitives::Bytes;
use clap::Parser;

/// The `parse` Subcommand
///
/// Decodes a raw header and prints it as JSON. Never touches the registry.
#[derive(Parser, Debug, Clone)]
#[command(about = "Decodes a raw RLP header and prints it as JSON")]
pub(crate) struct ParseCommand {
    /// The hex-encoded header.
    pub(crate) header: Bytes,
}

impl ParseCommand {
    /// Runs the subcommand.
    pub(crate) fn run(self) -> anyhow::Result<()> {
        let header = BlockHeader::decode(&self.header)?;
        println!("{}", serde_json::to_string_pretty(&header)?);
        Ok(())
    }
}

/// The `digest` Subcommand
///
/// Prints the digest of raw header bytes. The bytes do not need to decode.
#[derive(Parser, Debug, Clone)]
#[command(about = "Prints the digest of raw header bytes")]
pub(crate) struct DigestCommand {
    /// The hex-encoded header.
    pub(crate) header: Bytes,
}

impl DigestCommand {
    /// Runs the subcommand.
    pub(crate) fn run(self) -> anyhow::Result<()> {
        println!("{}", digest_of(&self.header));
        Ok(())
    }
}
