//! Participation thresholds: frequent dots, primary participants, quorum.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_non_negative, check_percent};

const fn default_dotted_min_percent_1() -> f64 {
    10.0
}

const fn default_dotted_min_count_1() -> usize {
    0
}

const fn default_dotted_min_percent_2() -> f64 {
    5.0
}

const fn default_dotted_min_count_2() -> usize {
    5
}

const fn default_primary_share() -> f64 {
    20.0
}

const fn default_primary_min_count() -> usize {
    10
}

const fn default_primary_secondary_share() -> f64 {
    10.0
}

const fn default_quorum_share() -> f64 {
    80.0
}

const fn default_quorum_min_responses() -> usize {
    3
}

const fn default_believability_engagement() -> f64 {
    0.75
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActivityThresholds {
    /// A subject is frequently dotted above this share (0-100) of all dots...
    #[serde(default = "default_dotted_min_percent_1")]
    pub dotted_min_percent_1: f64,

    /// ...and above this many dots.
    #[serde(default = "default_dotted_min_count_1")]
    pub dotted_min_count_1: usize,

    /// Or above this smaller share...
    #[serde(default = "default_dotted_min_percent_2")]
    pub dotted_min_percent_2: f64,

    /// ...with more than this many dots.
    #[serde(default = "default_dotted_min_count_2")]
    pub dotted_min_count_2: usize,

    /// Share (0-100) of dots that makes someone a primary participant.
    #[serde(default = "default_primary_share")]
    pub primary_share: f64,

    /// Dot count that, together with `primary_secondary_share`, also does.
    #[serde(default = "default_primary_min_count")]
    pub primary_min_count: usize,

    #[serde(default = "default_primary_secondary_share")]
    pub primary_secondary_share: f64,

    /// Share (0-100) of participants who must answer for a quorum.
    #[serde(default = "default_quorum_share")]
    pub quorum_share: f64,

    /// A quorum also needs more than this many responses.
    #[serde(default = "default_quorum_min_responses")]
    pub quorum_min_responses: usize,

    /// Total respondent believability above which engagement is sufficient.
    #[serde(default = "default_believability_engagement")]
    pub believability_engagement: f64,
}

impl Default for ActivityThresholds {
    fn default() -> Self {
        Self {
            dotted_min_percent_1: default_dotted_min_percent_1(),
            dotted_min_count_1: default_dotted_min_count_1(),
            dotted_min_percent_2: default_dotted_min_percent_2(),
            dotted_min_count_2: default_dotted_min_count_2(),
            primary_share: default_primary_share(),
            primary_min_count: default_primary_min_count(),
            primary_secondary_share: default_primary_secondary_share(),
            quorum_share: default_quorum_share(),
            quorum_min_responses: default_quorum_min_responses(),
            believability_engagement: default_believability_engagement(),
        }
    }
}

impl ActivityThresholds {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for shares outside `[0, 100]` or
    /// a negative believability threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_percent("activity.dotted_min_percent_1", self.dotted_min_percent_1)?;
        check_percent("activity.dotted_min_percent_2", self.dotted_min_percent_2)?;
        check_percent("activity.primary_share", self.primary_share)?;
        check_percent("activity.primary_secondary_share", self.primary_secondary_share)?;
        check_percent("activity.quorum_share", self.quorum_share)?;
        check_non_negative(
            "activity.believability_engagement",
            self.believability_engagement,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let t = ActivityThresholds::default();
        assert!((t.dotted_min_percent_1 - 10.0).abs() < f64::EPSILON);
        assert_eq!(t.dotted_min_count_1, 0);
        assert!((t.dotted_min_percent_2 - 5.0).abs() < f64::EPSILON);
        assert_eq!(t.dotted_min_count_2, 5);
        assert!((t.primary_share - 20.0).abs() < f64::EPSILON);
        assert_eq!(t.primary_min_count, 10);
        assert!((t.quorum_share - 80.0).abs() < f64::EPSILON);
        assert_eq!(t.quorum_min_responses, 3);
        assert!((t.believability_engagement - 0.75).abs() < f64::EPSILON);
    }
}
