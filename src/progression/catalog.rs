use std::collections::HashMap;

use thiserror::Error;

use crate::data::{Requirement, UpgradeDataFile, UpgradeRecord};
use crate::model::{Category, Cost, ResourceKind};

use super::effect::Effect;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no upgrades")]
    Empty,
    #[error("upgrade id {0:?} appears more than once")]
    DuplicateId(String),
    #[error("upgrade {0:?} has an empty id or name")]
    MissingIdentity(String),
    #[error("upgrade {id:?} has no cost entries")]
    EmptyCost { id: String },
    #[error("upgrade {id:?} has a non-positive {} cost of {amount}", .resource.canonical_name())]
    InvalidCost {
        id: String,
        resource: ResourceKind,
        amount: f64,
    },
    #[error("upgrade {id:?} has a non-positive duration of {duration}")]
    InvalidDuration { id: String, duration: f64 },
    #[error("repeatable upgrade {id:?} is missing a scaling factor")]
    MissingScaling { id: String },
    #[error("upgrade {id:?} has scaling {scaling}; repeatable upgrades need scaling > 1")]
    InvalidScaling { id: String, scaling: f64 },
    #[error("failed parsing catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Whether an upgrade disappears after one purchase or stays on sale with
/// its cost multiplied after every purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Repeat {
    Once,
    Scaling(f64),
}

/// A validated, immutable upgrade definition.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub base_cost: Cost,
    pub duration: f64,
    pub repeat: Repeat,
    pub requirement: Option<Requirement>,
    pub effects: Vec<Effect>,
}

impl UpgradeDefinition {
    pub fn is_once(&self) -> bool {
        matches!(self.repeat, Repeat::Once)
    }
}

impl TryFrom<UpgradeRecord> for UpgradeDefinition {
    type Error = CatalogError;

    fn try_from(record: UpgradeRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() || record.name.trim().is_empty() {
            return Err(CatalogError::MissingIdentity(record.id));
        }
        if record.cost.is_empty() {
            return Err(CatalogError::EmptyCost { id: record.id });
        }
        if let Some((resource, amount)) = record
            .cost
            .iter()
            .find(|(_, amount)| !(**amount > 0.0 && amount.is_finite()))
        {
            return Err(CatalogError::InvalidCost {
                id: record.id.clone(),
                resource: *resource,
                amount: *amount,
            });
        }
        if !(record.duration > 0.0 && record.duration.is_finite()) {
            return Err(CatalogError::InvalidDuration {
                id: record.id,
                duration: record.duration,
            });
        }

        let repeat = if record.once {
            Repeat::Once
        } else {
            match record.scaling {
                None => return Err(CatalogError::MissingScaling { id: record.id }),
                Some(scaling) if !(scaling > 1.0 && scaling.is_finite()) => {
                    return Err(CatalogError::InvalidScaling {
                        id: record.id,
                        scaling,
                    });
                }
                Some(scaling) => Repeat::Scaling(scaling),
            }
        };

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            category: record.category,
            base_cost: Cost::from(record.cost),
            duration: record.duration,
            repeat,
            requirement: record.requirement,
            effects: record.effects,
        })
    }
}

/// Ordered collection of upgrade definitions, looked up by id.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeCatalog {
    definitions: Vec<UpgradeDefinition>,
    index: HashMap<String, usize>,
}

impl UpgradeCatalog {
    pub fn from_records(records: Vec<UpgradeRecord>) -> Result<Self, CatalogError> {
        let definitions = records
            .into_iter()
            .map(UpgradeDefinition::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(definitions)
    }

    pub fn new(definitions: Vec<UpgradeDefinition>) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, definition) in definitions.iter().enumerate() {
            if index.insert(definition.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(definition.id.clone()));
            }
        }
        Ok(Self { definitions, index })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: UpgradeDataFile = serde_json::from_str(json)?;
        Self::from_records(file.upgrades)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&UpgradeDefinition> {
        self.position(id).map(|position| &self.definitions[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpgradeDefinition> {
        self.definitions.iter()
    }

    pub(crate) fn definitions(&self) -> &[UpgradeDefinition] {
        &self.definitions
    }
}
