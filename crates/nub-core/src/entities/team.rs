use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Person;
use crate::collection::{EntityCollection, Kinded, Project, Projection};
use crate::entity_ref::EntityRef;
use crate::enums::EntityKind;

/// A named group of people.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub members: EntityCollection<Person>,
}

impl Default for Team {
    fn default() -> Self {
        Self::new("")
    }
}

impl Team {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            members: EntityCollection::of_kind(EntityKind::Person),
        }
    }

    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(EntityKind::Team, self.id.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.name.is_none()
            && self.description.is_none()
            && self.members.is_empty()
    }
}

impl Kinded for Team {
    fn kind(&self) -> EntityKind {
        EntityKind::Team
    }
}

impl Project for Team {
    fn project(&self, projection: &Projection) -> Self {
        if projection.kind() != EntityKind::Team {
            return self.clone();
        }
        Self {
            id: self.id.clone(),
            name: projection.attribute("name", &self.name),
            description: projection.attribute("description", &self.description),
            members: if projection.keeps_collection("members") {
                self.members.clone()
            } else {
                EntityCollection::of_kind(EntityKind::Person)
            },
        }
    }
}
