use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collection::{Kinded, Project, Projection};
use crate::entity_ref::{EntityRef, SYSTEM_ID};
use crate::enums::EntityKind;

/// The aggregate root, and the implicit author of derived judgements.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct System {
    pub id: String,
    pub description: Option<String>,
}

impl System {
    #[must_use]
    pub fn root() -> Self {
        Self {
            id: SYSTEM_ID.to_owned(),
            description: None,
        }
    }

    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(EntityKind::System, self.id.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.description.is_none()
    }
}

impl Kinded for System {
    fn kind(&self) -> EntityKind {
        EntityKind::System
    }
}

impl Project for System {
    fn project(&self, projection: &Projection) -> Self {
        if projection.kind() != EntityKind::System {
            return self.clone();
        }
        Self {
            id: self.id.clone(),
            description: projection.attribute("description", &self.description),
        }
    }
}
