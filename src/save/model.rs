use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Settlement;

pub const SAVE_VERSION: u32 = 1;

/// Persisted session: upgrade purchase counts, tutorial latches and,
/// optionally, the full settlement snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub version: u32,
    /// Purchase count per upgrade id. Never-bought upgrades are omitted.
    pub upgrades: BTreeMap<String, u32>,
    /// Shown flag per tutorial checkpoint name.
    pub tutorial: BTreeMap<String, bool>,
    pub settlement: Option<Settlement>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            upgrades: BTreeMap::new(),
            tutorial: BTreeMap::new(),
            settlement: None,
        }
    }
}
