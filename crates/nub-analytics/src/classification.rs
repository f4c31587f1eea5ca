//! Subject and meeting classification.
//!
//! [`NubbyEngine`] carries the thresholds and optional relevance weights so
//! each call only names the data it classifies. Subjects are independent of
//! one another, so a meeting's questions are classified in parallel.

#![allow(clippy::cast_precision_loss)]

use nub_config::NubConfig;
use nub_core::enums::{NubbinessLevel, ValueType};
use nub_core::{
    Assertion, AssertionSet, CoreError, EntityRef, Meeting, MeetingNubbyClassification, Question,
    RelevanceCollection, RelevanceScore,
};
use rayon::prelude::*;

use crate::activity::{notable_participants, quorum_exists, sufficient_believability_engagement};
use crate::believable_choice::believable_choice;
use crate::disagreement::grade_responses;
use crate::divisiveness::{divisiveness_stat, is_nubby_subject, is_polarizing, polarizing_stat};
use crate::error::AnalyticsError;
use crate::foundation::{digitize, z_scores};

/// Classifies subjects and meetings against one threshold configuration.
#[derive(Debug, Clone, Copy)]
pub struct NubbyEngine<'a> {
    config: &'a NubConfig,
    relevance: Option<&'a RelevanceCollection>,
}

impl<'a> NubbyEngine<'a> {
    #[must_use]
    pub const fn new(config: &'a NubConfig) -> Self {
        Self {
            config,
            relevance: None,
        }
    }

    /// Weight sources by relevance instead of each assertion's own weight.
    #[must_use]
    pub const fn with_relevance(mut self, relevance: &'a RelevanceCollection) -> Self {
        self.relevance = Some(relevance);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &'a NubConfig {
        self.config
    }

    /// Classify the assertions made about one subject.
    ///
    /// # Errors
    ///
    /// [`AnalyticsError::UnsupportedValueType`] for `OtherCategorical`, and
    /// [`AnalyticsError::ValueMismatch`] for a non-number on a numeric scale.
    pub fn classify_subject(
        &self,
        subject: &EntityRef,
        meeting: Option<&EntityRef>,
        set: &AssertionSet,
        value_type: ValueType,
    ) -> Result<MeetingNubbyClassification, AnalyticsError> {
        let divisiveness = divisiveness_stat(set, value_type, true)?;
        let polarization = polarizing_stat(set, value_type)?;
        let polarizing = is_polarizing(set, value_type, &self.config.polarization)?;
        let level = NubbinessLevel::from_bin(digitize(
            divisiveness.unwrap_or(0.0),
            &self.config.nubbiness.levels,
        ));
        let choice = believable_choice(set, value_type, &self.config.consensus, self.relevance)?;
        let verdicts = grade_responses(set, &choice, value_type, &self.config.disagreement)?;

        tracing::debug!(
            %subject,
            %value_type,
            responses = set.len(),
            polarizing,
            %level,
            consensus = choice.is_consensus(),
            "classified subject"
        );

        Ok(MeetingNubbyClassification {
            subject: subject.clone(),
            meeting: meeting.cloned(),
            value_type,
            response_count: set.len(),
            polarizing,
            divisiveness,
            polarization,
            level,
            believable_choice: choice,
            verdicts,
        })
    }

    /// Classify one question's responses within `meeting`.
    ///
    /// # Errors
    ///
    /// [`AnalyticsError::Core`] when the question has no type, otherwise as
    /// [`classify_subject`](Self::classify_subject).
    pub fn classify_question(
        &self,
        meeting: &Meeting,
        question: &Question,
    ) -> Result<MeetingNubbyClassification, AnalyticsError> {
        let value_type = question_value_type(question)?;
        self.classify_subject(
            &question.entity_ref(),
            Some(&meeting.entity_ref()),
            &question.responses,
            value_type,
        )
    }

    /// Classify every question of a meeting, in question order.
    ///
    /// # Errors
    ///
    /// The first error any question produced.
    pub fn classify_meeting(
        &self,
        meeting: &Meeting,
    ) -> Result<Vec<MeetingNubbyClassification>, AnalyticsError> {
        meeting
            .questions
            .as_slice()
            .par_iter()
            .map(|question| self.classify_question(meeting, question))
            .collect()
    }

    /// Share (0-1) of the meeting's questions that are nubby; `None` for a
    /// meeting without questions.
    ///
    /// # Errors
    ///
    /// As [`classify_question`](Self::classify_question).
    pub fn nubby_question_share(&self, meeting: &Meeting) -> Result<Option<f64>, AnalyticsError> {
        if meeting.questions.is_empty() {
            return Ok(None);
        }
        let threshold = self.config.polarization.thresh_on_std_mapped_scale;
        let nubby = meeting
            .questions
            .as_slice()
            .par_iter()
            .map(|q| is_nubby_subject(&q.responses, question_value_type(q)?, threshold))
            .collect::<Result<Vec<bool>, AnalyticsError>>()?
            .into_iter()
            .filter(|n| *n)
            .count();
        Ok(Some(nubby as f64 / meeting.questions.len() as f64))
    }

    /// How contested the meeting was overall, from the share of nubby
    /// questions. A meeting without questions is not nubby.
    ///
    /// # Errors
    ///
    /// As [`classify_question`](Self::classify_question).
    pub fn meeting_nubbiness(&self, meeting: &Meeting) -> Result<NubbinessLevel, AnalyticsError> {
        let share = self.nubby_question_share(meeting)?.unwrap_or(0.0);
        let level = NubbinessLevel::from_bin(digitize(share, &self.config.nubbiness.levels));
        tracing::debug!(meeting = %meeting.entity_ref(), share, %level, "meeting nubbiness");
        Ok(level)
    }

    /// A question has a believable consensus when a quorum answered, the
    /// respondents carry enough believability and a believable choice exists.
    ///
    /// Believability comes from the engine's relevance collection, or else
    /// from the participants' `believability`.
    ///
    /// # Errors
    ///
    /// As [`classify_question`](Self::classify_question), plus
    /// [`AnalyticsError::Core`] for a negative participant believability.
    pub fn believable_consensus_exists(
        &self,
        meeting: &Meeting,
        question: &Question,
    ) -> Result<bool, AnalyticsError> {
        let value_type = question_value_type(question)?;
        let activity = &self.config.activity;
        let quorum =
            quorum_exists(&question.responses, meeting.participants.len(), activity) == Some(true);

        let fallback;
        let relevance = match self.relevance {
            Some(relevance) => relevance,
            None => {
                fallback = participant_relevance(meeting)?;
                &fallback
            }
        };
        let believable = sufficient_believability_engagement(
            &question.responses,
            relevance,
            activity.believability_engagement,
        );
        let consensus = believable_choice(
            &question.responses,
            value_type,
            &self.config.consensus,
            self.relevance,
        )?
        .is_consensus();

        tracing::trace!(quorum, believable, consensus, "believable consensus");
        Ok(quorum && believable && consensus)
    }

    /// Judge every participant on whether they were out of sync on
    /// significantly more questions than the others.
    ///
    /// The z-score of each participant's out-of-sync count must exceed
    /// `zscore_notable` for notable participants, `zscore_other` otherwise.
    ///
    /// # Errors
    ///
    /// As [`classify_meeting`](Self::classify_meeting).
    pub fn significantly_out_of_sync(
        &self,
        meeting: &Meeting,
    ) -> Result<Vec<Assertion>, AnalyticsError> {
        let classifications = self.classify_meeting(meeting)?;
        let participants = meeting.participant_refs();

        let out_of_sync: Vec<f64> = participants
            .iter()
            .map(|person| {
                classifications
                    .iter()
                    .filter(|c| {
                        c.verdicts.iter().any(|v| {
                            v.source.as_ref() == Some(person) && v.agreement.is_disagreement()
                        })
                    })
                    .count() as f64
            })
            .collect();
        let z = z_scores(&out_of_sync);
        let notable = notable_participants(meeting, self.relevance, &self.config.activity);
        let thresholds = &self.config.disagreement;

        Ok(participants
            .into_iter()
            .zip(z)
            .map(|(person, score)| {
                let is_notable = notable
                    .iter()
                    .any(|j| j.subject == person && j.value.as_bool() == Some(true));
                let threshold = if is_notable {
                    thresholds.zscore_notable
                } else {
                    thresholds.zscore_other
                };
                Assertion {
                    target: meeting.entity_ref(),
                    ..Assertion::system_judgement(person, score > threshold)
                        .with_attribute("significantly_out_of_sync")
                }
            })
            .collect())
    }
}

fn question_value_type(question: &Question) -> Result<ValueType, AnalyticsError> {
    question.value_type().ok_or_else(|| {
        AnalyticsError::Core(CoreError::Validation(format!(
            "{} has no question type",
            question.entity_ref()
        )))
    })
}

fn participant_relevance(meeting: &Meeting) -> Result<RelevanceCollection, CoreError> {
    RelevanceCollection::from_scores(
        meeting
            .participants
            .iter()
            .filter_map(|p| p.believability.map(|b| RelevanceScore::new(p.entity_ref(), b)))
            .collect(),
    )
}
