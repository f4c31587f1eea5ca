//! # nub-config
//!
//! Layered threshold configuration for the analytics, loaded with figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`NUBBY_*` prefix, `__` as separator)
//! 2. Project-level `.nubby/config.toml`
//! 3. User-level `~/.config/nubby/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `NUBBY_POLARIZATION__MIN_COUNT_2` -> `polarization.min_count_2`,
//! `NUBBY_CONSENSUS__MINIMUM_VOTES` -> `consensus.minimum_votes`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use nub_config::NubConfig;
//!
//! let config = NubConfig::load_with_dotenv().expect("config");
//! assert!(config.consensus.minimum_votes > 0);
//! ```

mod activity;
mod consensus;
mod disagreement;
mod error;
mod nubbiness;
mod polarization;

pub use activity::ActivityThresholds;
pub use consensus::ConsensusThresholds;
pub use disagreement::DisagreementThresholds;
pub use error::ConfigError;
pub use nubbiness::NubbinessThresholds;
pub use polarization::PolarizationThresholds;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NubConfig {
    #[serde(default)]
    pub polarization: PolarizationThresholds,
    #[serde(default)]
    pub consensus: ConsensusThresholds,
    #[serde(default)]
    pub disagreement: DisagreementThresholds,
    #[serde(default)]
    pub activity: ActivityThresholds,
    #[serde(default)]
    pub nubbiness: NubbinessThresholds,
}

impl NubConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate every section.
    ///
    /// Does NOT call `dotenvy`; use [`load_with_dotenv`](Self::load_with_dotenv)
    /// for `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a threshold is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// The `.env` file is searched for in the current directory and its
    /// ancestors. Variables already set in the environment win over it.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load defaults overlaid with a single TOML file, ignoring the user and
    /// project layers. Environment variables still apply.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("NUBBY_").split("__"));
        Self::extract(figment)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".nubby/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("NUBBY_").split("__"))
    }

    /// Check every section's ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.polarization.validate()?;
        self.consensus.validate()?;
        self.disagreement.validate()?;
        self.activity.validate()?;
        self.nubbiness.validate()
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nubby").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = NubConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.consensus.minimum_votes, 4);
        assert_eq!(config.nubbiness.levels.len(), 4);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: NubConfig = NubConfig::figment().extract()?;
            assert_eq!(config, NubConfig::default());
            Ok(())
        });
    }
}
