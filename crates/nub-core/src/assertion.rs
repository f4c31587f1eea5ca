//! Assertions, the observations every analytic is computed from.
//!
//! An assertion reads "`source` asserted `value` about `subject` in the
//! context of `target`". A response is a person's answer (`value`) to a
//! question (`subject`) within a meeting (`target`); a dot is a person's
//! rating of another person (`subject`) within a meeting.

use std::collections::HashMap;
use std::ops::Deref;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collection::{EntityCollection, Kinded, Project, Projection};
use crate::entity_ref::EntityRef;
use crate::enums::{EntityKind, NumericRange, ValueType};
use crate::errors::CoreError;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Assertion
// ---------------------------------------------------------------------------

/// One observation linking a source, a target and a subject to a value.
///
/// `source == None` means the System made the assertion (derived verdicts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Assertion {
    pub kind: EntityKind,
    pub source: Option<EntityRef>,
    pub target: EntityRef,
    pub subject: EntityRef,
    pub value: Value,
    pub value_type: ValueType,
    /// Confidence/believability weight; `None` weighs 1.0 in averages.
    pub weight: Option<f64>,
    /// Attribute the value is about (e.g. the quality a dot rates).
    pub attribute: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Assertion {
    pub fn new(
        kind: EntityKind,
        target: EntityRef,
        subject: EntityRef,
        value: impl Into<Value>,
        value_type: ValueType,
    ) -> Self {
        Self {
            kind,
            source: None,
            target,
            subject,
            value: value.into(),
            value_type,
            weight: None,
            attribute: None,
            description: None,
            created_at: None,
        }
    }

    /// A person's answer to a question asked in a meeting.
    pub fn response(
        person: EntityRef,
        meeting: EntityRef,
        question: EntityRef,
        value: impl Into<Value>,
        value_type: ValueType,
    ) -> Self {
        Self::new(EntityKind::Response, meeting, question, value, value_type).with_source(person)
    }

    /// A 1-to-10 rating one person gave another within a meeting.
    pub fn dot(author: EntityRef, meeting: EntityRef, subject: EntityRef, value: f64) -> Self {
        Self::new(
            EntityKind::Dot,
            meeting,
            subject,
            value,
            ValueType::Numeric(NumericRange::OneToTen),
        )
        .with_source(author)
    }

    /// A boolean verdict the System asserts about `subject`.
    #[must_use]
    pub fn system_judgement(subject: EntityRef, value: bool) -> Self {
        Self::new(
            EntityKind::Judgement,
            EntityRef::system(),
            subject,
            value,
            ValueType::CategoricalBinary,
        )
    }

    #[must_use]
    pub fn with_source(mut self, source: EntityRef) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Whether the System (rather than a person) made this assertion.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.source
            .as_ref()
            .is_none_or(|s| s.kind == EntityKind::System)
    }

    /// The value as a number, if it is one.
    #[must_use]
    pub const fn number(&self) -> Option<f64> {
        self.value.as_number()
    }

    /// Check shape constraints a well-formed assertion satisfies.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the kind is not an assertion
    /// kind, the source is neither a person nor the System, a numeric value
    /// type carries a non-number, or the weight is negative or not finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.kind.is_assertion() {
            return Err(CoreError::Validation(format!(
                "{} is not an assertion kind",
                self.kind
            )));
        }
        if let Some(source) = &self.source {
            if !matches!(source.kind, EntityKind::Person | EntityKind::System) {
                return Err(CoreError::Validation(format!(
                    "assertion source must be a person or the system, got {source}"
                )));
            }
        }
        if let ValueType::Numeric(_) = self.value_type {
            if !self.value.is_number() {
                return Err(CoreError::Validation(format!(
                    "{} value '{}' is not a number",
                    self.value_type, self.value
                )));
            }
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CoreError::Validation(format!(
                    "assertion weight must be finite and non-negative, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

impl Kinded for Assertion {
    fn kind(&self) -> EntityKind {
        self.kind
    }
}

impl Project for Assertion {
    fn project(&self, projection: &Projection) -> Self {
        if projection.kind() != self.kind {
            return self.clone();
        }
        Self {
            kind: self.kind,
            source: projection.attribute("source", &self.source),
            target: self.target.clone(),
            subject: self.subject.clone(),
            value: self.value.clone(),
            value_type: self.value_type,
            weight: projection.attribute("weight", &self.weight),
            attribute: projection.attribute("attribute", &self.attribute),
            description: projection.attribute("description", &self.description),
            created_at: projection.attribute("created_at", &self.created_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Conjunctive filter over assertion fields. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub kind: Option<EntityKind>,
    pub source: Option<EntityRef>,
    pub target: Option<EntityRef>,
    pub subject: Option<EntityRef>,
    pub attribute: Option<String>,
}

impl Criteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn kind(mut self, kind: EntityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn source(mut self, source: EntityRef) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn target(mut self, target: EntityRef) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn subject(mut self, subject: EntityRef) -> Self {
        self.subject = Some(subject);
        self
    }

    #[must_use]
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    #[must_use]
    pub fn matches(&self, assertion: &Assertion) -> bool {
        self.kind.is_none_or(|k| k == assertion.kind)
            && self
                .source
                .as_ref()
                .is_none_or(|s| assertion.source.as_ref() == Some(s))
            && self.target.as_ref().is_none_or(|t| *t == assertion.target)
            && self.subject.as_ref().is_none_or(|s| *s == assertion.subject)
            && self
                .attribute
                .as_deref()
                .is_none_or(|a| assertion.attribute.as_deref() == Some(a))
    }
}

// ---------------------------------------------------------------------------
// AssertionSet
// ---------------------------------------------------------------------------

/// Assertions sharing a `source` and one other endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PairGroup<'a> {
    pub source: Option<&'a EntityRef>,
    pub other: &'a EntityRef,
    pub members: Vec<&'a Assertion>,
}

/// A kind-checked collection of assertions with grouping and filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AssertionSet {
    inner: EntityCollection<Assertion>,
}

impl AssertionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn of_kind(kind: EntityKind) -> Self {
        Self {
            inner: EntityCollection::of_kind(kind),
        }
    }

    /// Build from a batch of assertions of one kind.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for the first malformed assertion, or
    /// [`CoreError::InconsistentTypes`] when kinds are mixed.
    pub fn from_assertions(assertions: Vec<Assertion>) -> Result<Self, CoreError> {
        assertions.iter().try_for_each(Assertion::validate)?;
        Ok(Self {
            inner: EntityCollection::from_members(assertions)?,
        })
    }

    /// Build from a batch of assertions that must all be `kind`.
    ///
    /// # Errors
    ///
    /// As [`from_assertions`](Self::from_assertions).
    pub fn from_assertions_of_kind(
        kind: EntityKind,
        assertions: Vec<Assertion>,
    ) -> Result<Self, CoreError> {
        assertions.iter().try_for_each(Assertion::validate)?;
        Ok(Self {
            inner: EntityCollection::from_members_of_kind(kind, assertions)?,
        })
    }

    /// Validate and append an assertion.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a malformed assertion and
    /// [`CoreError::TypeConsistency`] for a kind mismatch.
    pub fn push(&mut self, assertion: Assertion) -> Result<(), CoreError> {
        assertion.validate()?;
        self.inner.push(assertion)
    }

    /// # Errors
    ///
    /// See [`EntityCollection::check_consistent_types`].
    pub fn check_consistent_types(&self) -> Result<(), CoreError> {
        self.inner.check_consistent_types()
    }

    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        self.inner.kind()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assertion> {
        self.inner.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Assertion] {
        self.inner.as_slice()
    }

    #[must_use]
    pub fn into_assertions(self) -> Vec<Assertion> {
        self.inner.into_members()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.iter().map(|a| &a.value)
    }

    /// A new set holding the assertions that satisfy `predicate`.
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&Assertion) -> bool,
    {
        Self {
            inner: self.inner.filter(predicate),
        }
    }

    /// A new set holding the assertions that match `criteria`.
    #[must_use]
    pub fn matching(&self, criteria: &Criteria) -> Self {
        self.filter(|a| criteria.matches(a))
    }

    /// A new set holding the assertions about `subject`.
    #[must_use]
    pub fn about_subject(&self, subject: &EntityRef) -> Self {
        self.filter(|a| a.subject == *subject)
    }

    /// A new set with every member projected.
    #[must_use]
    pub fn project(&self, projection: &Projection) -> Self {
        Self {
            inner: self.inner.project(projection),
        }
    }

    /// Distinct subjects in first-seen order.
    #[must_use]
    pub fn subjects(&self) -> Vec<EntityRef> {
        let mut seen = Vec::new();
        for a in self {
            if !seen.contains(&a.subject) {
                seen.push(a.subject.clone());
            }
        }
        seen
    }

    /// Distinct sources in first-seen order (`None` is the System).
    #[must_use]
    pub fn sources(&self) -> Vec<Option<EntityRef>> {
        let mut seen = Vec::new();
        for a in self {
            if !seen.contains(&a.source) {
                seen.push(a.source.clone());
            }
        }
        seen
    }

    /// Split into one set per subject, in first-seen subject order.
    #[must_use]
    pub fn group_by_subject(&self) -> Vec<(EntityRef, Self)> {
        self.subjects()
            .into_iter()
            .map(|subject| {
                let set = self.about_subject(&subject);
                (subject, set)
            })
            .collect()
    }

    /// Group by (source, target) pairs, in first-seen pair order.
    #[must_use]
    pub fn group_by_source_and_target(&self) -> Vec<PairGroup<'_>> {
        self.group_pairs(|a| &a.target)
    }

    /// Group by (source, subject) pairs, in first-seen pair order.
    #[must_use]
    pub fn group_by_source_and_subject(&self) -> Vec<PairGroup<'_>> {
        self.group_pairs(|a| &a.subject)
    }

    fn group_pairs<'a, F>(&'a self, other: F) -> Vec<PairGroup<'a>>
    where
        F: Fn(&'a Assertion) -> &'a EntityRef,
    {
        let mut index: HashMap<(Option<&EntityRef>, &EntityRef), usize> = HashMap::new();
        let mut groups: Vec<PairGroup<'a>> = Vec::new();
        for a in self.iter() {
            let key = (a.source.as_ref(), other(a));
            if let Some(&i) = index.get(&key) {
                groups[i].members.push(a);
            } else {
                index.insert(key, groups.len());
                groups.push(PairGroup {
                    source: key.0,
                    other: key.1,
                    members: vec![a],
                });
            }
        }
        groups
    }
}

impl<'a> IntoIterator for &'a AssertionSet {
    type Item = &'a Assertion;
    type IntoIter = std::slice::Iter<'a, Assertion>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

// ---------------------------------------------------------------------------
// ResponseCollection
// ---------------------------------------------------------------------------

/// An [`AssertionSet`] that only accepts responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ResponseCollection(AssertionSet);

impl Default for ResponseCollection {
    fn default() -> Self {
        Self(AssertionSet::of_kind(EntityKind::Response))
    }
}

impl ResponseCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// As [`AssertionSet::from_assertions_of_kind`].
    pub fn from_responses(responses: Vec<Assertion>) -> Result<Self, CoreError> {
        AssertionSet::from_assertions_of_kind(EntityKind::Response, responses).map(Self)
    }

    /// # Errors
    ///
    /// As [`AssertionSet::push`].
    pub fn push(&mut self, response: Assertion) -> Result<(), CoreError> {
        self.0.push(response)
    }

    #[must_use]
    pub fn into_inner(self) -> AssertionSet {
        self.0
    }
}

impl Deref for ResponseCollection {
    type Target = AssertionSet;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::NumericRange;

    const SCALE: ValueType = ValueType::Numeric(NumericRange::OneToTen);

    fn dot(author: &str, subject: &str, value: f64) -> Assertion {
        Assertion::dot(
            EntityRef::person(author),
            EntityRef::meeting("m1"),
            EntityRef::person(subject),
            value,
        )
    }

    #[test]
    fn validate_rejects_non_person_source() {
        let a = dot("adam", "bob", 7.0).with_source(EntityRef::question("q1"));
        assert!(matches!(a.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn validate_rejects_text_on_numeric_scale() {
        let a = Assertion::response(
            EntityRef::person("adam"),
            EntityRef::meeting("m1"),
            EntityRef::question("q1"),
            "seven",
            SCALE,
        );
        assert!(a.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_weight() {
        assert!(dot("adam", "bob", 7.0).with_weight(-1.0).validate().is_err());
        assert!(dot("adam", "bob", 7.0).with_weight(0.0).validate().is_ok());
    }

    #[test]
    fn system_judgement_has_no_source() {
        let j = Assertion::system_judgement(EntityRef::person("bob"), true);
        assert!(j.is_system());
        assert_eq!(j.value.as_bool(), Some(true));
        assert!(j.validate().is_ok());
    }

    #[test]
    fn push_rejects_other_assertion_kinds() {
        let mut responses = ResponseCollection::new();
        let err = responses.push(dot("adam", "bob", 3.0)).unwrap_err();
        assert!(matches!(err, CoreError::TypeConsistency { .. }));
        assert!(responses.is_empty());
    }

    #[test]
    fn groups_by_source_and_subject_in_first_seen_order() {
        let set = AssertionSet::from_assertions(vec![
            dot("adam", "bob", 10.0),
            dot("adam", "bob", 5.0),
            dot("charlie", "bob", 1.0),
            dot("charlie", "adam", 5.0),
        ])
        .unwrap();

        let groups = set.group_by_source_and_subject();
        let summary: Vec<(String, String, Vec<f64>)> = groups
            .iter()
            .map(|g| {
                (
                    g.source.map(|s| s.id.clone()).unwrap_or_default(),
                    g.other.id.clone(),
                    g.members.iter().filter_map(|a| a.number()).collect(),
                )
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("adam".into(), "bob".into(), vec![10.0, 5.0]),
                ("charlie".into(), "bob".into(), vec![1.0]),
                ("charlie".into(), "adam".into(), vec![5.0]),
            ]
        );

        // Every dot shares the meeting as target, so pairs collapse per author.
        assert_eq!(set.group_by_source_and_target().len(), 2);
    }

    #[test]
    fn criteria_filters_conjunctively() {
        let set = AssertionSet::from_assertions(vec![
            dot("adam", "bob", 10.0).with_attribute("clarity"),
            dot("adam", "bob", 5.0).with_attribute("courage"),
            dot("charlie", "bob", 1.0).with_attribute("clarity"),
        ])
        .unwrap();

        let picked = set.matching(
            &Criteria::new()
                .source(EntityRef::person("adam"))
                .attribute("clarity"),
        );
        assert_eq!(picked.len(), 1);
        assert_eq!(picked.kind(), Some(EntityKind::Dot));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn group_by_subject_splits_sets() {
        let set = AssertionSet::from_assertions(vec![
            dot("adam", "bob", 10.0),
            dot("bob", "adam", 4.0),
            dot("charlie", "bob", 1.0),
        ])
        .unwrap();
        let groups = set.group_by_subject();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, EntityRef::person("bob"));
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn projection_drops_unkept_attributes() {
        let a = dot("adam", "bob", 7.0)
            .with_attribute("clarity")
            .with_description("sharp");
        let p = Projection::new(EntityKind::Dot, ["attribute"], Vec::<String>::new()).unwrap();
        let projected = a.project(&p);
        assert_eq!(projected.attribute.as_deref(), Some("clarity"));
        assert_eq!(projected.description, None);
        assert_eq!(projected.source, None);
        assert_eq!(projected.value, a.value);
        assert_eq!(a.description.as_deref(), Some("sharp"));
    }
}
