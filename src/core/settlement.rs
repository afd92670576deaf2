use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Building, Category, Feature, ResourceKind, Role};
use crate::progression::StoryQueue;

use super::event_log::{EventLog, LogCategory};
use super::resource_store::ResourceStore;
use super::work_queue::{WorkOrder, WorkQueue};

const MAX_CHAOS: f64 = 0.9;
/// Floor for a lane's time multiplier, so stacked reductions never stall or
/// reverse the clock.
const MIN_TIME_FACTOR: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("lumberjacks are the default job; assign villagers elsewhere instead")]
    DefaultRole,
    #[error("the {} job has not been unlocked", .0.canonical_name())]
    Locked(Role),
    #[error("no free villagers to assign")]
    NoFreeVillagers,
    #[error("no villagers are working as {}", .0.canonical_name())]
    NoneAssigned(Role),
}

/// Live world state shared by upgrade effects, tutorial predicates and the
/// host loop.
///
/// Every accessor treats a missing entry as absent: level 0, not unlocked,
/// no chaos, a production multiplier of 1. A partially initialized settlement
/// is therefore always safe to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settlement {
    pub resources: ResourceStore,
    levels: BTreeMap<Building, u32>,
    pub villagers: u32,
    assignments: BTreeMap<Role, u32>,
    production: BTreeMap<Role, f64>,
    pub mentor_boost: f64,
    unlocks: BTreeSet<Feature>,
    chaos: BTreeMap<Role, f64>,
    pub log: EventLog,
    pub stories: StoryQueue,
    pub work: WorkQueue,
    pub paused: bool,
    pub tick_index: u64,
    pub base_yield_per_second: f64,
    pub chaos_per_extra_worker: f64,
    pub speedup_per_worker: f64,
}

impl Default for Settlement {
    fn default() -> Self {
        Self {
            resources: ResourceStore::default(),
            levels: BTreeMap::new(),
            villagers: 0,
            assignments: BTreeMap::new(),
            production: BTreeMap::new(),
            mentor_boost: 0.0,
            unlocks: BTreeSet::new(),
            chaos: BTreeMap::new(),
            log: EventLog::default(),
            stories: StoryQueue::default(),
            work: WorkQueue::default(),
            paused: false,
            tick_index: 0,
            base_yield_per_second: 0.0,
            chaos_per_extra_worker: 0.0,
            speedup_per_worker: 0.0,
        }
    }
}

impl Settlement {
    pub fn level(&self, building: Building) -> u32 {
        self.levels.get(&building).copied().unwrap_or(0)
    }

    pub fn raise_level(&mut self, building: Building, amount: u32) {
        let level = self.levels.entry(building).or_insert(0);
        *level = level.saturating_add(amount);
    }

    pub fn is_unlocked(&self, feature: Feature) -> bool {
        self.unlocks.contains(&feature)
    }

    /// Returns `true` when the flag was newly set.
    pub fn unlock(&mut self, feature: Feature) -> bool {
        let inserted = self.unlocks.insert(feature);
        if inserted {
            log::info!("unlocked {}", feature.canonical_name());
        }
        inserted
    }

    pub fn add_villagers(&mut self, count: u32) {
        self.villagers = self.villagers.saturating_add(count);
    }

    pub fn assigned(&self, role: Role) -> u32 {
        self.assignments.get(&role).copied().unwrap_or(0)
    }

    /// Number of villagers working `role`. Anyone not assigned elsewhere
    /// gathers wood.
    pub fn workers(&self, role: Role) -> u32 {
        match role {
            Role::Lumberjack => {
                let assigned = self.assignments.values().copied().sum::<u32>();
                self.villagers.saturating_sub(assigned)
            }
            _ => self.assigned(role),
        }
    }

    pub fn can_assign(&self, role: Role) -> bool {
        role.required_feature()
            .is_some_and(|feature| self.is_unlocked(feature))
    }

    pub fn assign(&mut self, role: Role) -> Result<(), AssignError> {
        if role == Role::Lumberjack {
            return Err(AssignError::DefaultRole);
        }
        if !self.can_assign(role) {
            return Err(AssignError::Locked(role));
        }
        if self.workers(Role::Lumberjack) == 0 {
            return Err(AssignError::NoFreeVillagers);
        }
        *self.assignments.entry(role).or_insert(0) += 1;
        Ok(())
    }

    pub fn unassign(&mut self, role: Role) -> Result<(), AssignError> {
        if role == Role::Lumberjack {
            return Err(AssignError::DefaultRole);
        }
        match self.assignments.get_mut(&role) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(AssignError::NoneAssigned(role)),
        }
    }

    pub fn production(&self, role: Role) -> f64 {
        self.production.get(&role).copied().unwrap_or(1.0)
    }

    pub fn scale_production(&mut self, role: Role, factor: f64) {
        *self.production.entry(role).or_insert(1.0) *= factor;
    }

    pub fn adjust_production(&mut self, role: Role, delta: f64) {
        *self.production.entry(role).or_insert(1.0) += delta;
    }

    pub fn chaos(&self, role: Role) -> f64 {
        self.chaos.get(&role).copied().unwrap_or(0.0)
    }

    pub fn set_chaos(&mut self, role: Role, value: f64) {
        self.chaos.insert(role, value.clamp(0.0, MAX_CHAOS));
    }

    pub fn log_message(&mut self, category: LogCategory, text: impl Into<String>) {
        self.log.push(category, text);
    }

    pub fn gather(&mut self, kind: ResourceKind, amount: f64) {
        self.resources.add(kind, amount);
    }

    pub fn tick(&mut self, dt_seconds: f64) {
        self.resources.begin_tick();
        if self.paused || dt_seconds <= 0.0 {
            return;
        }

        self.tick_index += 1;
        self.refresh_chaos();
        self.produce(dt_seconds);
        self.advance_work(dt_seconds);
    }

    /// How many time units of work a lane gets done per second.
    ///
    /// Without the lane's speed unlock this is 1. Once unlocked, each crew
    /// member adds `speedup_per_worker` (reduced by chaos), and the result
    /// is divided by the crew role's production multiplier, which acts as a
    /// time multiplier for these two jobs.
    pub fn work_speed(&self, category: Category) -> f64 {
        if !self.is_unlocked(category.speed_feature()) {
            return 1.0;
        }
        let crew = category.crew();
        let boost =
            self.workers(crew) as f64 * self.speedup_per_worker * (1.0 - self.chaos(crew));
        (1.0 + boost) / self.production(crew).max(MIN_TIME_FACTOR)
    }

    fn advance_work(&mut self, dt_seconds: f64) {
        for category in Category::ALL {
            let work = self.work_speed(category) * dt_seconds;
            for order in self.work.advance(category, work) {
                self.complete(order);
            }
        }
    }

    fn complete(&mut self, order: WorkOrder) {
        for effect in &order.effects {
            effect.apply(self, &order.id);
        }
        log::info!("finished {} ({})", order.name, order.id);
    }

    fn refresh_chaos(&mut self) {
        for role in Role::ALL {
            let extra = self.workers(role).saturating_sub(1);
            self.set_chaos(role, extra as f64 * self.chaos_per_extra_worker);
        }
    }

    fn produce(&mut self, dt_seconds: f64) {
        let mentor_factor = if self.is_unlocked(Feature::Mentor) {
            1.0 + self.mentor_boost
        } else {
            1.0
        };

        for role in Role::ALL {
            let Some(kind) = role.output() else {
                continue;
            };
            let amount = self.workers(role) as f64
                * self.base_yield_per_second
                * self.production(role)
                * mentor_factor
                * (1.0 - self.chaos(role))
                * dt_seconds;
            self.resources.add(kind, amount);
        }
    }
}
