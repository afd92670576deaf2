use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Settlement;
use crate::model::{Building, Category, ResourceKind};
use crate::progression::Effect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeDataFile {
    #[serde(default)]
    pub upgrades: Vec<UpgradeRecord>,
}

/// An upgrade exactly as written in the catalog file, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub cost: BTreeMap<ResourceKind, f64>,
    pub duration: f64,
    pub once: bool,
    #[serde(default)]
    pub scaling: Option<f64>,
    #[serde(default)]
    pub requirement: Option<Requirement>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

/// Minimum building level gating an upgrade. Written as a pair in the
/// catalog file, e.g. `["quarry", 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement(pub Building, pub u32);

impl Requirement {
    pub fn building(&self) -> Building {
        self.0
    }

    pub fn min_level(&self) -> u32 {
        self.1
    }

    pub fn is_met(&self, settlement: &Settlement) -> bool {
        settlement.level(self.0) >= self.1
    }
}
