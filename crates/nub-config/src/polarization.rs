//! Thresholds deciding whether a subject is polarizing.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_non_negative, check_percent};

const fn default_thresh_on_std_scale() -> f64 {
    1.0
}

const fn default_thresh_on_std_mapped_scale() -> f64 {
    0.5
}

const fn default_thresh_on_poles() -> f64 {
    0.25
}

const fn default_min_count() -> usize {
    2
}

const fn default_min_percent() -> f64 {
    25.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PolarizationThresholds {
    /// Raw standard deviation above which numeric answers are polarizing.
    #[serde(default = "default_thresh_on_std_scale")]
    pub thresh_on_std_scale: f64,

    /// Standard deviation of sentiment buckets (0/1/2) above which numeric
    /// answers are polarizing.
    #[serde(default = "default_thresh_on_std_mapped_scale")]
    pub thresh_on_std_mapped_scale: f64,

    /// Minimum balance between the positive and negative poles.
    #[serde(default = "default_thresh_on_poles")]
    pub thresh_on_poles: f64,

    /// Minimum size of the largest categorical bucket.
    #[serde(default = "default_min_count")]
    pub min_count_1: usize,

    /// Minimum share (0-100) of the largest categorical bucket.
    #[serde(default = "default_min_percent")]
    pub min_percent_1: f64,

    /// Minimum size of the runner-up categorical bucket.
    #[serde(default = "default_min_count")]
    pub min_count_2: usize,

    /// Minimum share (0-100) of the runner-up categorical bucket.
    #[serde(default = "default_min_percent")]
    pub min_percent_2: f64,
}

impl Default for PolarizationThresholds {
    fn default() -> Self {
        Self {
            thresh_on_std_scale: default_thresh_on_std_scale(),
            thresh_on_std_mapped_scale: default_thresh_on_std_mapped_scale(),
            thresh_on_poles: default_thresh_on_poles(),
            min_count_1: default_min_count(),
            min_percent_1: default_min_percent(),
            min_count_2: default_min_count(),
            min_percent_2: default_min_percent(),
        }
    }
}

impl PolarizationThresholds {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for negative deviations or
    /// percentages outside `[0, 100]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("polarization.thresh_on_std_scale", self.thresh_on_std_scale)?;
        check_non_negative(
            "polarization.thresh_on_std_mapped_scale",
            self.thresh_on_std_mapped_scale,
        )?;
        check_non_negative("polarization.thresh_on_poles", self.thresh_on_poles)?;
        check_percent("polarization.min_percent_1", self.min_percent_1)?;
        check_percent("polarization.min_percent_2", self.min_percent_2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let t = PolarizationThresholds::default();
        assert!((t.thresh_on_std_scale - 1.0).abs() < f64::EPSILON);
        assert!((t.thresh_on_std_mapped_scale - 0.5).abs() < f64::EPSILON);
        assert!((t.thresh_on_poles - 0.25).abs() < f64::EPSILON);
        assert_eq!(t.min_count_1, 2);
        assert_eq!(t.min_count_2, 2);
        assert!((t.min_percent_1 - 25.0).abs() < f64::EPSILON);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn rejects_percent_above_hundred() {
        let t = PolarizationThresholds {
            min_percent_2: 140.0,
            ..PolarizationThresholds::default()
        };
        assert!(t.validate().is_err());
    }
}
