use serde::{Deserialize, Serialize};

use crate::core::{LogCategory, Settlement};
use crate::model::{Building, Feature, ResourceKind, Role};

use super::narrative::{Narrative, StoryStep};

const fn one() -> u32 {
    1
}

/// A single state change applied when a bought upgrade finishes. Upgrades carry
/// an ordered list of these and apply all of them against the settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    RaiseLevel {
        building: Building,
        #[serde(default = "one")]
        amount: u32,
    },
    AddVillagers {
        count: u32,
    },
    Unlock {
        feature: Feature,
    },
    ScaleProduction {
        role: Role,
        factor: f64,
    },
    AdjustProduction {
        role: Role,
        delta: f64,
    },
    BoostMentors {
        delta: f64,
    },
    Grant {
        resource: ResourceKind,
        amount: f64,
    },
    Log {
        #[serde(default)]
        category: LogCategory,
        text: String,
    },
    Story {
        steps: Vec<StoryStep>,
    },
}

impl Effect {
    /// `source` is the id of the upgrade being applied; story sequences
    /// remember it.
    pub fn apply(&self, settlement: &mut Settlement, source: &str) {
        match self {
            Self::RaiseLevel { building, amount } => settlement.raise_level(*building, *amount),
            Self::AddVillagers { count } => settlement.add_villagers(*count),
            Self::Unlock { feature } => {
                settlement.unlock(*feature);
            }
            Self::ScaleProduction { role, factor } => settlement.scale_production(*role, *factor),
            Self::AdjustProduction { role, delta } => settlement.adjust_production(*role, *delta),
            Self::BoostMentors { delta } => settlement.mentor_boost += delta,
            Self::Grant { resource, amount } => settlement.gather(*resource, *amount),
            Self::Log { category, text } => settlement.log_message(*category, text.clone()),
            Self::Story { steps } => settlement
                .stories
                .push(Narrative::new(source, steps.clone())),
        }
    }
}
