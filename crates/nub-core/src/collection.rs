//! Homogeneous, kind-checked collections and attribute projections.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::errors::CoreError;

/// Anything that reports its concrete [`EntityKind`].
pub trait Kinded {
    fn kind(&self) -> EntityKind;
}

// ---------------------------------------------------------------------------
// EntityCollection
// ---------------------------------------------------------------------------

/// An ordered sequence of members that all share one kind.
///
/// The kind is either declared up front ([`EntityCollection::of_kind`]) or
/// established by the first successful [`push`](EntityCollection::push).
/// Collections deserialized from untrusted input should be checked with
/// [`check_consistent_types`](EntityCollection::check_consistent_types).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EntityCollection<T> {
    kind: Option<EntityKind>,
    members: Vec<T>,
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self {
            kind: None,
            members: Vec::new(),
        }
    }
}

impl<T: Kinded> EntityCollection<T> {
    /// An empty collection whose kind is set by the first member.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty collection that only accepts members of `kind`.
    #[must_use]
    pub const fn of_kind(kind: EntityKind) -> Self {
        Self {
            kind: Some(kind),
            members: Vec::new(),
        }
    }

    /// Build from a batch of members, rejecting the batch if kinds are mixed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InconsistentTypes`] listing the offending indices.
    pub fn from_members(members: Vec<T>) -> Result<Self, CoreError> {
        let collection = Self {
            kind: members.first().map(Kinded::kind),
            members,
        };
        collection.check_consistent_types()?;
        Ok(collection)
    }

    /// Build from a batch of members that must all be `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InconsistentTypes`] listing the offending indices.
    pub fn from_members_of_kind(kind: EntityKind, members: Vec<T>) -> Result<Self, CoreError> {
        let collection = Self {
            kind: Some(kind),
            members,
        };
        collection.check_consistent_types()?;
        Ok(collection)
    }

    /// Append a member.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TypeConsistency`] if the member's kind differs from
    /// the collection's kind. The collection is left unchanged.
    pub fn push(&mut self, item: T) -> Result<(), CoreError> {
        let found = item.kind();
        match self.expected_kind() {
            Some(expected) if expected != found => {
                return Err(CoreError::TypeConsistency { expected, found });
            }
            Some(_) => {}
            None => self.kind = Some(found),
        }
        self.members.push(item);
        Ok(())
    }

    /// Scan every member against the collection's kind.
    ///
    /// The reference kind is the declared kind, or the first member's kind
    /// when none was declared.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InconsistentTypes`] listing the offending indices.
    pub fn check_consistent_types(&self) -> Result<(), CoreError> {
        let Some(expected) = self.expected_kind() else {
            return Ok(());
        };
        let indices: Vec<usize> = self
            .members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.kind() != expected)
            .map(|(i, _)| i)
            .collect();
        if indices.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InconsistentTypes { expected, indices })
        }
    }

    /// The declared or established kind, if any.
    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        self.expected_kind()
    }

    fn expected_kind(&self) -> Option<EntityKind> {
        self.kind.or_else(|| self.members.first().map(Kinded::kind))
    }
}

impl<T> EntityCollection<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.members.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.members
    }

    #[must_use]
    pub fn into_members(self) -> Vec<T> {
        self.members
    }

    /// A new collection of the members matching `predicate`, same kind.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        Self {
            kind: self.kind,
            members: self.members.iter().filter(|m| predicate(m)).cloned().collect(),
        }
    }
}

impl<T: Project> EntityCollection<T> {
    /// A new collection whose members are projected. The source is untouched.
    #[must_use]
    pub fn project(&self, projection: &Projection) -> Self {
        Self {
            kind: self.kind,
            members: self.members.iter().map(|m| m.project(projection)).collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T> IntoIterator for EntityCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Names the attributes and nested collections a scoped view keeps.
///
/// Ids always survive a projection; everything not named is reset to its
/// empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Projection {
    kind: EntityKind,
    attributes: Vec<String>,
    collections: Vec<String>,
}

impl Projection {
    /// Build a projection for records of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when nothing is kept or a name is not
    /// an allowable attribute/collection of `kind`.
    pub fn new<A, C>(kind: EntityKind, attributes: A, collections: C) -> Result<Self, CoreError>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let attributes: Vec<String> = attributes.into_iter().map(Into::into).collect();
        let collections: Vec<String> = collections.into_iter().map(Into::into).collect();

        if attributes.is_empty() && collections.is_empty() {
            return Err(CoreError::Validation(format!(
                "projection of {kind} must keep at least one attribute or collection"
            )));
        }
        if let Some(bad) = attributes
            .iter()
            .find(|a| !kind.allowable_attributes().contains(&a.as_str()))
        {
            return Err(CoreError::Validation(format!(
                "'{bad}' is not an allowable attribute of {kind}"
            )));
        }
        if let Some(bad) = collections
            .iter()
            .find(|c| !kind.allowable_collections().contains(&c.as_str()))
        {
            return Err(CoreError::Validation(format!(
                "'{bad}' is not an allowable collection of {kind}"
            )));
        }

        Ok(Self {
            kind,
            attributes,
            collections,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    #[must_use]
    pub fn keeps_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }

    #[must_use]
    pub fn keeps_collection(&self, name: &str) -> bool {
        self.collections.iter().any(|c| c == name)
    }

    /// `value` if the attribute is kept, its empty value otherwise.
    pub fn attribute<V: Clone + Default>(&self, name: &str, value: &V) -> V {
        if self.keeps_attribute(name) {
            value.clone()
        } else {
            V::default()
        }
    }

    /// `value` if the collection is kept, an empty collection otherwise.
    pub fn collection<V: Clone + Default>(&self, name: &str, value: &V) -> V {
        if self.keeps_collection(name) {
            value.clone()
        } else {
            V::default()
        }
    }
}

/// Records that support scoped projections.
///
/// A projection built for another kind leaves the record as it is.
pub trait Project: Sized {
    #[must_use]
    fn project(&self, projection: &Projection) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tagged(EntityKind);

    impl Kinded for Tagged {
        fn kind(&self) -> EntityKind {
            self.0
        }
    }

    #[test]
    fn first_push_establishes_kind() {
        let mut c = EntityCollection::new();
        assert_eq!(c.kind(), None);
        c.push(Tagged(EntityKind::Person)).unwrap();
        assert_eq!(c.kind(), Some(EntityKind::Person));
        let err = c.push(Tagged(EntityKind::Team)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::TypeConsistency {
                expected: EntityKind::Person,
                found: EntityKind::Team
            }
        ));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn declared_kind_rejects_first_mismatch() {
        let mut c = EntityCollection::of_kind(EntityKind::Response);
        assert!(c.push(Tagged(EntityKind::Dot)).is_err());
        assert!(c.is_empty());
    }

    #[test]
    fn from_members_lists_offending_indices() {
        let err = EntityCollection::from_members(vec![
            Tagged(EntityKind::Dot),
            Tagged(EntityKind::Dot),
            Tagged(EntityKind::Response),
            Tagged(EntityKind::Dot),
            Tagged(EntityKind::Ranking),
        ])
        .unwrap_err();
        match err {
            CoreError::InconsistentTypes { expected, indices } => {
                assert_eq!(expected, EntityKind::Dot);
                assert_eq!(indices, vec![2, 4]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn filter_keeps_kind() {
        let c = EntityCollection::from_members_of_kind(
            EntityKind::Dot,
            vec![Tagged(EntityKind::Dot), Tagged(EntityKind::Dot)],
        )
        .unwrap();
        let none = c.filter(|_| false);
        assert!(none.is_empty());
        assert_eq!(none.kind(), Some(EntityKind::Dot));
    }

    #[test]
    fn projection_rejects_unknown_names() {
        assert!(Projection::new(EntityKind::Question, ["title"], ["responses"]).is_ok());
        assert!(Projection::new(EntityKind::Question, ["colour"], Vec::<String>::new()).is_err());
        assert!(Projection::new(EntityKind::Question, Vec::<String>::new(), ["dots"]).is_err());
        assert!(
            Projection::new(EntityKind::Question, Vec::<String>::new(), Vec::<String>::new())
                .is_err()
        );
    }
}
