use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// Id of the single `System` aggregate root.
pub const SYSTEM_ID: &str = "system";

/// A typed pointer to an entity: the kind plus the entity's id.
///
/// Assertions hold these instead of whole records so that many assertions can
/// name the same person or question without copying it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn person(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Person, id)
    }

    pub fn question(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Question, id)
    }

    pub fn meeting(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Meeting, id)
    }

    pub fn action(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Action, id)
    }

    #[must_use]
    pub fn system() -> Self {
        Self::new(EntityKind::System, SYSTEM_ID)
    }

    /// Reference to an entity whose id is unset.
    #[must_use]
    pub const fn unset(kind: EntityKind) -> Self {
        Self {
            kind,
            id: String::new(),
        }
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.id.is_empty()
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
