//! The persisted registry snapshot.

use ahu_cli::CliError;
use ahu_registry::RegistryState;
use anyhow::Context;
use std::{io, path::Path};

/// Reads a file, naming the path on failure.
pub(crate) fn read_to_string(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).map_err(|err| CliError::io(path, err).into())
}

/// Loads the snapshot at `path`.
///
/// A missing file, or no path at all, yields an empty registry.
pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<RegistryState> {
    let Some(path) = path else {
        return Ok(RegistryState::default());
    };
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents)
            .with_context(|| format!("invalid registry snapshot {}", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::info!(target: "ahu", path = %path.display(), "Starting from an empty registry");
            Ok(RegistryState::default())
        }
        Err(err) => Err(CliError::io(path, err).into()),
    }
}

/// Writes the snapshot to `path`, if there is one.
///
/// The snapshot is written to a sibling temporary file first and then renamed over `path`.
pub(crate) fn save(path: Option<&Path>, state: &RegistryState) -> anyhow::Result<()> {
    let Some(path) = path else {
        tracing::warn!(target: "ahu", "No --state path given, the change is not persisted");
        return Ok(());
    };
    let contents = serde_json::to_string_pretty(state)?;
    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, contents).map_err(|err| CliError::io(&staging, err))?;
    std::fs::rename(&staging, path).map_err(|err| CliError::io(path, err))?;
    tracing::debug!(
        target: "ahu",
        path = %path.display(),
        chains = state.chains.len(),
        headers = state.log.len(),
        "Registry snapshot written"
    );
    Ok(())
}
