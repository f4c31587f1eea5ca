//! Participation signals: engagement, quorum, frequently dotted and primary
//! participants, and the judgements combining them.
//!
//! Every verdict is a System judgement (an assertion with no source) about
//! the subject it concerns, labelled through its `attribute`.

use nub_config::{ActivityThresholds, PolarizationThresholds};
use nub_core::enums::ValueType;
use nub_core::{Assertion, AssertionSet, EntityRef, Meeting, RelevanceCollection};

use crate::divisiveness::numeric_nubby_and_polarizing;
use crate::error::AnalyticsError;
use crate::extract;
use crate::foundation::{counts, percent_of_total};
use crate::sentiment::synthesize;

/// How [`combine_results`] merges verdicts about the same subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// True only when every list holds a true verdict for the subject.
    And,
    /// True when any list holds a true verdict for the subject.
    Or,
}

fn judgement(subject: EntityRef, value: bool, label: &str) -> Assertion {
    Assertion::system_judgement(subject, value).with_attribute(label)
}

/// Number of assertions in the set.
#[must_use]
pub fn engagement(set: &AssertionSet) -> usize {
    set.len()
}

/// Whether enough of the participants answered.
///
/// True when the response share exceeds `quorum_share` and there are more
/// than `quorum_min_responses` responses. `None` with no participants.
#[must_use]
pub fn quorum_exists(
    responses: &AssertionSet,
    participants: usize,
    thresholds: &ActivityThresholds,
) -> Option<bool> {
    let count = engagement(responses);
    percent_of_total(count, participants)
        .map(|share| share > thresholds.quorum_share && count > thresholds.quorum_min_responses)
}

/// Whether respondents' combined relevance exceeds `threshold`.
#[must_use]
pub fn sufficient_believability_engagement(
    responses: &AssertionSet,
    relevance: &RelevanceCollection,
    threshold: f64,
) -> bool {
    let total: f64 = responses
        .iter()
        .map(|r| extract::weight_of(r, Some(relevance)))
        .sum();
    total > threshold
}

/// Judge every dotted subject: frequently dotted when its share of all dots
/// exceeds `dotted_min_percent_1` with more than `dotted_min_count_1` dots,
/// or exceeds `dotted_min_percent_2` with more than `dotted_min_count_2`.
#[must_use]
pub fn frequently_dotted_subjects(
    dots: &AssertionSet,
    thresholds: &ActivityThresholds,
) -> Vec<Assertion> {
    let total = dots.len();
    counts(dots.iter().map(|d| d.subject.clone()))
        .into_iter()
        .map(|(subject, count)| {
            let share = percent_of_total(count, total).unwrap_or(0.0);
            let frequent = (share > thresholds.dotted_min_percent_1
                && count > thresholds.dotted_min_count_1)
                || (share > thresholds.dotted_min_percent_2
                    && count > thresholds.dotted_min_count_2);
            judgement(subject, frequent, "frequently_dotted")
        })
        .collect()
}

/// Judge every dotted subject: primary when its share of all dots exceeds
/// `primary_share`, or it has more than `primary_min_count` dots and a share
/// above `primary_secondary_share`.
#[must_use]
pub fn primary_participants(
    dots: &AssertionSet,
    thresholds: &ActivityThresholds,
) -> Vec<Assertion> {
    let total = dots.len();
    counts(dots.iter().map(|d| d.subject.clone()))
        .into_iter()
        .map(|(subject, count)| {
            let share = percent_of_total(count, total).unwrap_or(0.0);
            let primary = share > thresholds.primary_share
                || (count > thresholds.primary_min_count
                    && share > thresholds.primary_secondary_share);
            judgement(subject, primary, "primary_participant")
        })
        .collect()
}

/// Judge every participant: notable when believable or primary.
///
/// Believable means positive relevance when a relevance collection is given,
/// else positive `believability` on the person record.
#[must_use]
pub fn notable_participants(
    meeting: &Meeting,
    relevance: Option<&RelevanceCollection>,
    thresholds: &ActivityThresholds,
) -> Vec<Assertion> {
    let believable: Vec<Assertion> = meeting
        .participants
        .iter()
        .map(|person| {
            let person_ref = person.entity_ref();
            let believable = relevance.map_or_else(
                || person.believability.is_some_and(|b| b > 0.0),
                |r| r.is_believable(&person_ref),
            );
            judgement(person_ref, believable, "believable")
        })
        .collect();
    let primary: Vec<Assertion> = primary_participants(&meeting.dots, thresholds)
        .into_iter()
        .filter(|j| believable.iter().any(|b| b.subject == j.subject))
        .collect();

    combine_results(&[believable, primary], Combine::Or)
        .into_iter()
        .map(|j| Assertion {
            attribute: Some("notable".to_owned()),
            ..j
        })
        .collect()
}

/// Merge lists of boolean judgements subject by subject, in first-seen
/// subject order.
///
/// A subject missing from a list counts as false for [`Combine::And`] and is
/// ignored for [`Combine::Or`]. Non-boolean values count as false.
#[must_use]
pub fn combine_results(lists: &[Vec<Assertion>], how: Combine) -> Vec<Assertion> {
    let mut subjects: Vec<&EntityRef> = Vec::new();
    for judgement in lists.iter().flatten() {
        if !subjects.contains(&&judgement.subject) {
            subjects.push(&judgement.subject);
        }
    }

    subjects
        .into_iter()
        .map(|subject| {
            let verdict = |list: &Vec<Assertion>| {
                list.iter()
                    .find(|j| j.subject == *subject)
                    .and_then(|j| j.value.as_bool())
                    .unwrap_or(false)
            };
            let value = match how {
                Combine::And => lists.iter().all(verdict),
                Combine::Or => lists.iter().any(verdict),
            };
            Assertion::system_judgement(subject.clone(), value)
        })
        .collect()
}

/// Judge every dotted subject on whether the author-synthesized ratings it
/// received are nubby and polarizing.
///
/// # Errors
///
/// [`AnalyticsError::UnsupportedValueType`] when the dots are not numeric,
/// and [`AnalyticsError::ValueMismatch`] for a non-number dot.
pub fn dots_on_subjects_are_nubby_and_polarizing(
    dots: &AssertionSet,
    thresholds: &PolarizationThresholds,
) -> Result<Vec<Assertion>, AnalyticsError> {
    let Some(first) = dots.iter().next() else {
        return Ok(Vec::new());
    };
    let ValueType::Numeric(range) = extract::supported(first.value_type)? else {
        return Err(AnalyticsError::UnsupportedValueType(first.value_type));
    };

    let syntheses = synthesize(dots)?;
    let mut subjects: Vec<&EntityRef> = Vec::new();
    for s in &syntheses {
        if !subjects.contains(&&s.subject) {
            subjects.push(&s.subject);
        }
    }

    Ok(subjects
        .into_iter()
        .map(|subject| {
            let values: Vec<f64> = syntheses
                .iter()
                .filter(|s| s.subject == *subject)
                .map(|s| s.value)
                .collect();
            let verdict = numeric_nubby_and_polarizing(&values, range, thresholds);
            tracing::trace!(%subject, verdict, ratings = values.len(), "dot polarization");
            judgement(subject.clone(), verdict, "nubby_and_polarizing")
        })
        .collect())
}

/// Subjects that are both frequently dotted and nubby and polarizing.
///
/// # Errors
///
/// As [`dots_on_subjects_are_nubby_and_polarizing`].
pub fn polarizing_participants(
    dots: &AssertionSet,
    activity: &ActivityThresholds,
    polarization: &PolarizationThresholds,
) -> Result<Vec<Assertion>, AnalyticsError> {
    let frequent = frequently_dotted_subjects(dots, activity);
    let polarizing = dots_on_subjects_are_nubby_and_polarizing(dots, polarization)?;
    Ok(combine_results(&[frequent, polarizing], Combine::And)
        .into_iter()
        .map(|j| j.with_attribute("polarizing_participant"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nub_core::{Person, RelevanceScore};
    use pretty_assertions::assert_eq;

    fn dot(author: &str, subject: &str, value: f64) -> Assertion {
        Assertion::dot(
            EntityRef::person(author),
            EntityRef::meeting("m1"),
            EntityRef::person(subject),
            value,
        )
    }

    fn verdicts(judgements: &[Assertion]) -> Vec<(String, bool)> {
        judgements
            .iter()
            .map(|j| (j.subject.id.clone(), j.value.as_bool().unwrap_or(false)))
            .collect()
    }

    fn response_from(person: &str) -> Assertion {
        Assertion::response(
            EntityRef::person(person),
            EntityRef::meeting("m1"),
            EntityRef::question("q1"),
            "Yes",
            ValueType::CategoricalBinary,
        )
    }

    #[test]
    fn quorum_needs_share_and_count() {
        let t = ActivityThresholds::default();
        let four = AssertionSet::from_assertions(
            ["a", "b", "c", "d"].iter().map(|p| response_from(p)).collect(),
        )
        .unwrap();
        assert_eq!(quorum_exists(&four, 4, &t), Some(true));
        assert_eq!(quorum_exists(&four, 5, &t), Some(false));
        assert_eq!(quorum_exists(&four, 0, &t), None);

        let three = four.filter(|r| r.source != Some(EntityRef::person("d")));
        assert_eq!(quorum_exists(&three, 3, &t), Some(false));
    }

    #[test]
    fn believability_engagement_sums_relevance() {
        let responses = AssertionSet::from_assertions(vec![response_from("a"), response_from("b")])
            .unwrap();
        let relevance = RelevanceCollection::from_scores(vec![
            RelevanceScore::new(EntityRef::person("a"), 0.5),
            RelevanceScore::new(EntityRef::person("b"), 0.3),
        ])
        .unwrap();
        assert!(sufficient_believability_engagement(&responses, &relevance, 0.75));
        assert!(!sufficient_believability_engagement(&responses, &relevance, 0.9));
    }

    #[test]
    fn frequently_dotted_counts_dots_received() {
        let mut list = vec![dot("x", "bob", 5.0); 18];
        list.push(dot("x", "adam", 5.0));
        list.push(dot("x", "adam", 5.0));
        let set = AssertionSet::from_assertions(list).unwrap();
        // bob: 90%, adam: 10% (not above 10%, and 2 dots is not above 5).
        assert_eq!(
            verdicts(&frequently_dotted_subjects(&set, &ActivityThresholds::default())),
            vec![("bob".to_owned(), true), ("adam".to_owned(), false)]
        );
    }

    #[test]
    fn primary_by_share_or_volume() {
        let mut list = vec![dot("x", "bob", 5.0); 60];
        list.extend(vec![dot("x", "adam", 5.0); 11]);
        list.extend(vec![dot("x", "charlie", 5.0); 29]);
        let set = AssertionSet::from_assertions(list).unwrap();
        assert_eq!(
            verdicts(&primary_participants(&set, &ActivityThresholds::default())),
            vec![
                ("bob".to_owned(), true),
                ("adam".to_owned(), true),
                ("charlie".to_owned(), true),
            ]
        );

        let mut list = vec![dot("x", "bob", 5.0); 90];
        list.extend(vec![dot("x", "adam", 5.0); 10]);
        let set = AssertionSet::from_assertions(list).unwrap();
        assert_eq!(
            verdicts(&primary_participants(&set, &ActivityThresholds::default())),
            vec![("bob".to_owned(), true), ("adam".to_owned(), false)]
        );
    }

    #[test]
    fn combine_and_or() {
        let a = vec![
            judgement(EntityRef::person("adam"), true, "x"),
            judgement(EntityRef::person("bob"), false, "x"),
        ];
        let b = vec![judgement(EntityRef::person("bob"), true, "y")];
        assert_eq!(
            verdicts(&combine_results(&[a.clone(), b.clone()], Combine::Or)),
            vec![("adam".to_owned(), true), ("bob".to_owned(), true)]
        );
        assert_eq!(
            verdicts(&combine_results(&[a, b], Combine::And)),
            vec![("adam".to_owned(), false), ("bob".to_owned(), false)]
        );
    }

    #[test]
    fn notable_means_believable_or_primary() {
        let mut meeting = Meeting::new("m1");
        meeting
            .add_participant(Person::new("adam").with_believability(0.7))
            .unwrap();
        meeting.add_participant(Person::new("bob")).unwrap();
        meeting.add_participant(Person::new("charlie")).unwrap();
        for _ in 0..5 {
            meeting.add_dot(dot("adam", "bob", 8.0)).unwrap();
        }
        meeting.add_dot(dot("adam", "charlie", 8.0)).unwrap();
        meeting.add_dot(dot("bob", "dana", 8.0)).unwrap();

        let notable = notable_participants(&meeting, None, &ActivityThresholds::default());
        assert_eq!(
            verdicts(&notable),
            vec![
                ("adam".to_owned(), true),
                ("bob".to_owned(), true),
                ("charlie".to_owned(), false),
            ]
        );
        assert!(notable.iter().all(|j| j.attribute.as_deref() == Some("notable")));
    }

    #[test]
    fn polarizing_participant_is_frequent_and_split() {
        let mut list = Vec::new();
        for (author, value) in [("a", 1.0), ("b", 2.0), ("c", 9.0), ("d", 10.0)] {
            list.push(dot(author, "bob", value));
        }
        for author in ["a", "b", "c", "d"] {
            list.push(dot(author, "adam", 8.0));
        }
        let set = AssertionSet::from_assertions(list).unwrap();
        let result = polarizing_participants(
            &set,
            &ActivityThresholds::default(),
            &PolarizationThresholds::default(),
        )
        .unwrap();
        assert_eq!(
            verdicts(&result),
            vec![("bob".to_owned(), true), ("adam".to_owned(), false)]
        );
    }
}
