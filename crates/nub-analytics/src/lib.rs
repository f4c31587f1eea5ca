//! # nub-analytics
//!
//! Disagreement and polarization analytics over meeting feedback.
//!
//! Everything here is a pure function of a [`nub_core::AssertionSet`] (or a
//! [`nub_core::Meeting`]) plus thresholds from [`nub_config::NubConfig`]:
//! - [`foundation`]: weighted averages, shares, deviations and binning
//! - [`divisiveness`]: how spread and how polarized a subject's answers are
//! - [`believable_choice`]: the group's best estimate of the answer
//! - [`disagreement`]: grading each response against that estimate
//! - [`sentiment`] and [`activity`]: tone and participation signals
//! - [`classification`]: [`NubbyEngine`], which ties the above together per
//!   question and per meeting

pub mod activity;
pub mod believable_choice;
pub mod classification;
pub mod disagreement;
pub mod divisiveness;
pub mod error;
mod extract;
pub mod foundation;
pub mod sentiment;

pub use activity::{
    Combine, combine_results, frequently_dotted_subjects, notable_participants,
    primary_participants, quorum_exists,
};
pub use believable_choice::believable_choice;
pub use classification::NubbyEngine;
pub use disagreement::{disagrees_with, grade_responses, out_of_sync_on_subject, unique_choice};
pub use divisiveness::{
    divisiveness_stat, is_nubby_and_polarizing, is_nubby_subject, is_polarizing, polarizing_stat,
};
pub use error::AnalyticsError;
pub use sentiment::{overall_sentiment, sentiment, sentiment_counts};
