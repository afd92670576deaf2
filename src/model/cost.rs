use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::kinds::ResourceKind;

/// Amount of each resource kind an upgrade charges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(BTreeMap<ResourceKind, f64>);

impl Cost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ResourceKind, amount: f64) -> Self {
        self.0.insert(kind, amount);
        self
    }

    pub fn get(&self, kind: ResourceKind) -> f64 {
        self.0.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, f64)> + '_ {
        self.0.iter().map(|(kind, amount)| (*kind, *amount))
    }

    /// Every entry multiplied by `factor`, with no rounding.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|(kind, amount)| (*kind, amount * factor))
                .collect(),
        )
    }
}

impl FromIterator<(ResourceKind, f64)> for Cost {
    fn from_iter<I: IntoIterator<Item = (ResourceKind, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<ResourceKind, f64>> for Cost {
    fn from(entries: BTreeMap<ResourceKind, f64>) -> Self {
        Self(entries)
    }
}
