use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{EventLog, Settlement};
use crate::model::ResourceKind;
use crate::tutorial::PopupSchedule;

/// Session tuning, loaded from an optional JSON file. Missing fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tick_hz: f32,
    /// Delay between a checkpoint triggering and its pop-up appearing.
    pub popup_delay_ms: u64,
    pub popup_margin: f64,
    pub log_capacity: usize,
    pub base_yield_per_second: f64,
    pub chaos_per_extra_worker: f64,
    /// Extra work per second each blacksmith or professor adds to their
    /// lane once its speed unlock is owned.
    pub speedup_per_worker: f64,
    pub gather_amount: f64,
    pub starting_resources: BTreeMap<ResourceKind, f64>,
    pub save_path: String,
    /// Base64 export written by F6 and read back by F7.
    pub export_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_hz: 10.0,
            popup_delay_ms: 800,
            popup_margin: 10.0,
            log_capacity: 50,
            base_yield_per_second: 0.4,
            chaos_per_extra_worker: 0.08,
            speedup_per_worker: 0.5,
            gather_amount: 1.0,
            starting_resources: BTreeMap::new(),
            save_path: "village_save.json".to_string(),
            export_path: "village_save.b64".to_string(),
        }
    }
}

impl GameConfig {
    pub fn popup_delay(&self) -> Duration {
        Duration::from_millis(self.popup_delay_ms)
    }

    pub fn tick_seconds(&self) -> f64 {
        1.0 / f64::from(self.tick_hz.max(0.1))
    }

    pub fn popup_schedule(&self) -> PopupSchedule {
        PopupSchedule::new(self.popup_delay())
    }

    /// Fresh settlement with this config's rates and starting stock.
    pub fn new_settlement(&self) -> Settlement {
        let mut settlement = Settlement::default();
        settlement.base_yield_per_second = self.base_yield_per_second;
        settlement.chaos_per_extra_worker = self.chaos_per_extra_worker;
        settlement.speedup_per_worker = self.speedup_per_worker;
        settlement.log = EventLog::with_capacity(self.log_capacity);
        for (kind, amount) in &self.starting_resources {
            settlement.resources.set(*kind, *amount);
        }
        settlement
    }
}
