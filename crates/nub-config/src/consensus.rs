//! Quorum rules for a believable choice.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_percent};

const fn default_minimum_votes() -> usize {
    4
}

const fn default_minimum_vote_share() -> f64 {
    50.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConsensusThresholds {
    /// Minimum raw count the winning categorical bucket needs.
    #[serde(default = "default_minimum_votes")]
    pub minimum_votes: usize,

    /// Share (0-100) of total weight the winning bucket must exceed.
    #[serde(default = "default_minimum_vote_share")]
    pub minimum_vote_share: f64,
}

impl Default for ConsensusThresholds {
    fn default() -> Self {
        Self {
            minimum_votes: default_minimum_votes(),
            minimum_vote_share: default_minimum_vote_share(),
        }
    }
}

impl ConsensusThresholds {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the share is not a percentage.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_percent("consensus.minimum_vote_share", self.minimum_vote_share)
    }
}
