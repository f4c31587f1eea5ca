//! Cutoffs that bin meeting divisiveness into nubbiness levels.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_levels() -> Vec<f64> {
    vec![0.2, 0.4, 0.6, 0.8]
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NubbinessThresholds {
    /// Four ascending cutoffs separating the five nubbiness levels.
    #[serde(default = "default_levels")]
    pub levels: Vec<f64>,
}

impl Default for NubbinessThresholds {
    fn default() -> Self {
        Self {
            levels: default_levels(),
        }
    }
}

impl NubbinessThresholds {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless there are exactly four
    /// strictly ascending cutoffs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.len() != 4 {
            return Err(ConfigError::invalid(
                "nubbiness.levels",
                format!("expected 4 cutoffs, got {}", self.levels.len()),
            ));
        }
        if self.levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::invalid(
                "nubbiness.levels",
                "cutoffs must be strictly ascending",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let t = NubbinessThresholds::default();
        assert_eq!(t.levels, vec![0.2, 0.4, 0.6, 0.8]);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn unordered_cutoffs_are_invalid() {
        let t = NubbinessThresholds {
            levels: vec![0.2, 0.6, 0.4, 0.8],
        };
        assert!(t.validate().is_err());
    }
}
