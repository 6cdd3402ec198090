//! The TOML configuration of the binary.

use crate::state::read_to_string;
use ahu_registry::{ChainId, StaticBootstrap, VotingAuthority};
use alloy_primitives::Address;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// The initial validators of one chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BootstrapEntry {
    /// The chain the set applies to.
    pub(crate) chain_id: ChainId,
    /// The validators the chain starts with.
    pub(crate) validators: Vec<Address>,
}

/// The binary configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AhuConfig {
    /// The address holding the voting capability. Without one, nobody may register chains.
    #[serde(default)]
    pub(crate) voting_authority: Option<Address>,
    /// Initial validator sets, applied when the chain is registered.
    #[serde(default)]
    pub(crate) bootstrap: Vec<BootstrapEntry>,
}

impl AhuConfig {
    /// Loads the config at `path`, or the default config if no path is given.
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            tracing::debug!(target: "ahu", "No config file given, using defaults");
            return Ok(Self::default());
        };
        let contents = read_to_string(path)?;
        toml::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    /// The voting capability described by the config.
    pub(crate) fn voting_authority(&self) -> impl VotingAuthority + use<> {
        let authority = self.voting_authority;
        move |caller: &Address| authority == Some(*caller)
    }

    /// The bootstrap table described by the config.
    pub(crate) fn bootstrap(&self) -> StaticBootstrap {
        self.bootstrap
            .iter()
            .map(|entry| (entry.chain_id, entry.validators.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahu_registry::ValidatorBootstrap;
    use alloy_primitives::address;

    const CONFIG: &str = r#"
voting_authority = "0x000000000000000000000000000000000000dEaD"

[[bootstrap]]
chain_id = 1337
validators = ["0x0000000000000000000000000000000000000001"]
"#;

    #[test]
    fn test_parse_config() {
        let config: AhuConfig = toml::from_str(CONFIG).unwrap();
        let voter = address!("000000000000000000000000000000000000dEaD");

        assert_eq!(config.voting_authority, Some(voter));
        assert!(config.voting_authority().is_voting(&voter));
        assert!(!config.voting_authority().is_voting(&Address::ZERO));
        assert_eq!(
            config.bootstrap().initial_validators(1337),
            vec![address!("0000000000000000000000000000000000000001")]
        );
    }

    #[test]
    fn test_default_config_has_no_voter() {
        let config = AhuConfig::load(None).unwrap();
        assert!(!config.voting_authority().is_voting(&Address::ZERO));
        assert!(config.bootstrap().initial_validators(1337).is_empty());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(toml::from_str::<AhuConfig>("voter = \"0x00\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ahu.toml");
        std::fs::write(&path, CONFIG).unwrap();

        let config = AhuConfig::load(Some(&path)).unwrap();
        assert_eq!(config.bootstrap.len(), 1);
    }
}
