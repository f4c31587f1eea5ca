use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::assertion::Assertion;
use crate::collection::Kinded;
use crate::entity_ref::EntityRef;
use crate::enums::{Agreement, EntityKind, NubbinessLevel, ValueType};
use crate::value::{BelievableChoice, Value};

/// How one response relates to the group's believable choice.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResponseVerdict {
    pub source: Option<EntityRef>,
    pub value: Value,
    pub agreement: Agreement,
}

/// The verdict on one subject (usually a question) within a meeting.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MeetingNubbyClassification {
    pub subject: EntityRef,
    pub meeting: Option<EntityRef>,
    pub value_type: ValueType,
    pub response_count: usize,
    pub polarizing: bool,
    /// Spread of the responses; `None` when there were none.
    pub divisiveness: Option<f64>,
    /// Balance between the two poles, 0.0 when one side is absent.
    pub polarization: f64,
    pub level: NubbinessLevel,
    pub believable_choice: BelievableChoice,
    pub verdicts: Vec<ResponseVerdict>,
}

impl MeetingNubbyClassification {
    /// Sources whose response graded at least `at_least`.
    #[must_use]
    pub fn sources_at(&self, at_least: Agreement) -> Vec<&EntityRef> {
        self.verdicts
            .iter()
            .filter(|v| v.agreement >= at_least)
            .filter_map(|v| v.source.as_ref())
            .collect()
    }

    #[must_use]
    pub fn disagreement_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.agreement.is_disagreement())
            .count()
    }

    /// The polarizing verdict as a System judgement about the subject.
    #[must_use]
    pub fn to_judgement(&self) -> Assertion {
        let judgement = Assertion::system_judgement(self.subject.clone(), self.polarizing)
            .with_attribute("polarizing");
        match &self.meeting {
            Some(meeting) => Assertion {
                target: meeting.clone(),
                ..judgement
            },
            None => judgement,
        }
    }
}

impl Kinded for MeetingNubbyClassification {
    fn kind(&self) -> EntityKind {
        EntityKind::MeetingNubbyClassification
    }
}
