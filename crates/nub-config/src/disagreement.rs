//! Distances at which a response stops agreeing with the group.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_non_negative, check_percent};

const fn default_threshold_high() -> f64 {
    1.7
}

const fn default_threshold_low() -> f64 {
    1.0
}

const fn default_zscore_notable() -> f64 {
    0.8
}

const fn default_zscore_other() -> f64 {
    1.2
}

const fn default_unique_disagreement() -> f64 {
    88.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisagreementThresholds {
    /// Distance from the believable choice that significantly disagrees.
    #[serde(default = "default_threshold_high")]
    pub threshold_high: f64,

    /// Distance from the believable choice that disagrees.
    #[serde(default = "default_threshold_low")]
    pub threshold_low: f64,

    /// Out-of-sync z-score that flags a notable participant.
    #[serde(default = "default_zscore_notable")]
    pub zscore_notable: f64,

    /// Out-of-sync z-score that flags any other participant.
    #[serde(default = "default_zscore_other")]
    pub zscore_other: f64,

    /// Share (0-100) of responses below which a response's bucket counts as
    /// a unique choice.
    #[serde(default = "default_unique_disagreement")]
    pub unique_disagreement: f64,
}

impl Default for DisagreementThresholds {
    fn default() -> Self {
        Self {
            threshold_high: default_threshold_high(),
            threshold_low: default_threshold_low(),
            zscore_notable: default_zscore_notable(),
            zscore_other: default_zscore_other(),
            unique_disagreement: default_unique_disagreement(),
        }
    }
}

impl DisagreementThresholds {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for negative distances, a
    /// `unique_disagreement` outside 0-100, or when `threshold_low` exceeds
    /// `threshold_high`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("disagreement.threshold_low", self.threshold_low)?;
        check_non_negative("disagreement.threshold_high", self.threshold_high)?;
        check_percent("disagreement.unique_disagreement", self.unique_disagreement)?;
        if self.threshold_low > self.threshold_high {
            return Err(ConfigError::invalid(
                "disagreement.threshold_low",
                format!(
                    "{} is above threshold_high ({})",
                    self.threshold_low, self.threshold_high
                ),
            ));
        }
        Ok(())
    }
}
