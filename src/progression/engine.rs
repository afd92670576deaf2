use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::{Settlement, WorkOrder};
use crate::model::{Building, Category, Cost, ResourceKind};

use super::catalog::{Repeat, UpgradeCatalog, UpgradeDefinition};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PurchaseError {
    #[error("no upgrade with id {0:?}")]
    UnknownUpgrade(String),
    #[error("upgrade {id:?} can only be bought once and is already owned")]
    AlreadyPurchased { id: String },
    #[error(
        "upgrade {id:?} needs {} level {required}, current level is {current}",
        .building.canonical_name()
    )]
    RequirementNotMet {
        id: String,
        building: Building,
        required: u32,
        current: u32,
    },
    #[error(
        "upgrade {id:?} needs {required} {}, only {available} in stock",
        .resource.canonical_name()
    )]
    InsufficientResources {
        id: String,
        resource: ResourceKind,
        required: f64,
        available: f64,
    },
}

/// How an upgrade should be presented right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Requirement not met yet.
    Hidden,
    /// One-shot upgrade already bought; hidden for good.
    Consumed,
    /// Listed, but the player cannot pay for it.
    Unaffordable,
    Available,
}

impl Eligibility {
    pub fn is_listed(self) -> bool {
        matches!(self, Self::Unaffordable | Self::Available)
    }
}

/// Engine-owned mutable state for one catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeProgress {
    pub purchase_count: u32,
    pub current_cost: Cost,
}

impl UpgradeProgress {
    fn fresh(definition: &UpgradeDefinition) -> Self {
        Self {
            purchase_count: 0,
            current_cost: definition.base_cost.clone(),
        }
    }

    /// Progress after `count` purchases. The cost is computed from the base
    /// in one step, so any count restores in constant time.
    fn after(definition: &UpgradeDefinition, count: u32) -> Self {
        match definition.repeat {
            Repeat::Once => Self {
                purchase_count: count.min(1),
                current_cost: definition.base_cost.clone(),
            },
            Repeat::Scaling(scaling) => Self {
                purchase_count: count,
                current_cost: definition
                    .base_cost
                    .scaled(scaling.powf(f64::from(count))),
            },
        }
    }

    fn is_consumed(&self, definition: &UpgradeDefinition) -> bool {
        definition.is_once() && self.purchase_count > 0
    }
}

/// What the shop list renders for one listed upgrade.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub cost: Cost,
    pub duration: f64,
    pub repeatable: bool,
    pub purchase_count: u32,
    pub affordable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    pub id: String,
    pub spent: Cost,
    pub purchase_count: u32,
    pub consumed: bool,
    /// Base time until the effects land.
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionEngine {
    catalog: UpgradeCatalog,
    progress: Vec<UpgradeProgress>,
}

impl ProgressionEngine {
    pub fn new(catalog: UpgradeCatalog) -> Self {
        let progress = catalog.iter().map(UpgradeProgress::fresh).collect();
        Self { catalog, progress }
    }

    pub fn catalog(&self) -> &UpgradeCatalog {
        &self.catalog
    }

    pub fn progress(&self, id: &str) -> Option<&UpgradeProgress> {
        self.catalog.position(id).map(|position| &self.progress[position])
    }

    pub fn current_cost(&self, id: &str) -> Option<&Cost> {
        self.progress(id).map(|progress| &progress.current_cost)
    }

    pub fn purchase_count(&self, id: &str) -> u32 {
        self.progress(id)
            .map(|progress| progress.purchase_count)
            .unwrap_or(0)
    }

    pub fn eligibility(&self, id: &str, settlement: &Settlement) -> Option<Eligibility> {
        let position = self.catalog.position(id)?;
        Some(self.eligibility_at(position, settlement))
    }

    fn eligibility_at(&self, position: usize, settlement: &Settlement) -> Eligibility {
        let definition = &self.catalog.definitions()[position];
        let progress = &self.progress[position];

        if progress.is_consumed(definition) {
            return Eligibility::Consumed;
        }
        if definition
            .requirement
            .is_some_and(|requirement| !requirement.is_met(settlement))
        {
            return Eligibility::Hidden;
        }
        if settlement.resources.can_afford(&progress.current_cost) {
            Eligibility::Available
        } else {
            Eligibility::Unaffordable
        }
    }

    /// Every upgrade the shop should show, in catalog order.
    pub fn list_eligible(&self, settlement: &Settlement) -> Vec<UpgradeSummary> {
        self.listed(settlement, |_| true)
    }

    pub fn list_eligible_in(
        &self,
        category: Category,
        settlement: &Settlement,
    ) -> Vec<UpgradeSummary> {
        self.listed(settlement, |definition| definition.category == category)
    }

    fn listed<F>(&self, settlement: &Settlement, filter: F) -> Vec<UpgradeSummary>
    where
        F: Fn(&UpgradeDefinition) -> bool,
    {
        self.catalog
            .definitions()
            .iter()
            .zip(&self.progress)
            .enumerate()
            .filter(|(_, (definition, _))| filter(*definition))
            .filter_map(|(position, (definition, progress))| {
                let eligibility = self.eligibility_at(position, settlement);
                eligibility.is_listed().then(|| UpgradeSummary {
                    id: definition.id.clone(),
                    name: definition.name.clone(),
                    description: definition.description.clone(),
                    category: definition.category,
                    cost: progress.current_cost.clone(),
                    duration: definition.duration,
                    repeatable: !definition.is_once(),
                    purchase_count: progress.purchase_count,
                    affordable: eligibility == Eligibility::Available,
                })
            })
            .collect()
    }

    /// Pays for one upgrade and queues its work.
    ///
    /// Either every cost entry is deducted and the upgrade joins its
    /// category's work queue, or the settlement is left untouched and an
    /// error describes why. The effects land when the settlement's clock
    /// finishes the work. The purchase counts immediately, so a one-shot
    /// upgrade cannot be bought twice while it is still in progress.
    pub fn purchase(
        &mut self,
        id: &str,
        settlement: &mut Settlement,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let position = self
            .catalog
            .position(id)
            .ok_or_else(|| PurchaseError::UnknownUpgrade(id.to_string()))?;
        let definition = &self.catalog.definitions()[position];
        let progress = &mut self.progress[position];

        if progress.is_consumed(definition) {
            log::debug!("rejected purchase of {id}: already owned");
            return Err(PurchaseError::AlreadyPurchased { id: id.to_string() });
        }
        if let Some(requirement) = definition.requirement
            && !requirement.is_met(settlement)
        {
            log::debug!("rejected purchase of {id}: requirement not met");
            return Err(PurchaseError::RequirementNotMet {
                id: id.to_string(),
                building: requirement.building(),
                required: requirement.min_level(),
                current: settlement.level(requirement.building()),
            });
        }

        let spent = progress.current_cost.clone();
        settlement.resources.spend(&spent).map_err(|shortfall| {
            log::debug!("rejected purchase of {id}: short on {:?}", shortfall.kind);
            PurchaseError::InsufficientResources {
                id: id.to_string(),
                resource: shortfall.kind,
                required: shortfall.required,
                available: shortfall.available,
            }
        })?;

        settlement.work.push(WorkOrder::new(
            id,
            definition.name.clone(),
            definition.category,
            definition.duration,
            definition.effects.clone(),
        ));
        *progress = UpgradeProgress::after(definition, progress.purchase_count.saturating_add(1));

        let consumed = progress.is_consumed(definition);
        log::info!(
            "purchased {} ({}), count {}, ready in {}s",
            definition.name,
            id,
            progress.purchase_count,
            definition.duration
        );

        Ok(PurchaseReceipt {
            id: id.to_string(),
            spent,
            purchase_count: progress.purchase_count,
            consumed,
            duration: definition.duration,
        })
    }

    /// Purchase counts keyed by upgrade id, omitting never-bought upgrades.
    pub fn purchase_counts(&self) -> BTreeMap<String, u32> {
        self.catalog
            .iter()
            .zip(&self.progress)
            .filter(|(_, progress)| progress.purchase_count > 0)
            .map(|(definition, progress)| (definition.id.clone(), progress.purchase_count))
            .collect()
    }

    /// Replaces all progress with saved counts, recomputing scaled costs.
    /// Returns the saved ids that are not in the catalog; they are ignored.
    pub fn restore_counts(&mut self, counts: &BTreeMap<String, u32>) -> Vec<String> {
        for (definition, progress) in self.catalog.iter().zip(self.progress.iter_mut()) {
            let saved = counts.get(&definition.id).copied().unwrap_or(0);
            *progress = UpgradeProgress::after(definition, saved);
        }

        counts
            .keys()
            .filter(|id| self.catalog.position(id).is_none())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::{Duration, Instant};

    use super::{Eligibility, ProgressionEngine, PurchaseError};
    use crate::core::Settlement;
    use crate::data::{Requirement, UpgradeRecord};
    use crate::model::{Building, Category, ResourceKind, Role};
    use crate::progression::{Effect, UpgradeCatalog};

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPSILON * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    fn record(
        id: &str,
        cost: &[(ResourceKind, f64)],
        scaling: Option<f64>,
        requirement: Option<Requirement>,
        effects: Vec<Effect>,
    ) -> UpgradeRecord {
        UpgradeRecord {
            id: id.to_string(),
            name: id.replace('_', " "),
            description: String::new(),
            category: Category::Craft,
            cost: cost.iter().copied().collect(),
            duration: 2.0,
            once: scaling.is_none(),
            scaling,
            requirement,
            effects,
        }
    }

    fn engine() -> ProgressionEngine {
        let catalog = UpgradeCatalog::from_records(vec![
            record(
                "build_tent",
                &[(ResourceKind::Wood, 10.0), (ResourceKind::Food, 10.0)],
                None,
                None,
                vec![
                    Effect::RaiseLevel {
                        building: Building::Tent,
                        amount: 1,
                    },
                    Effect::AddVillagers { count: 2 },
                ],
            ),
            record(
                "expand_tent",
                &[(ResourceKind::Wood, 20.0), (ResourceKind::Food, 40.0)],
                Some(1.5),
                Some(Requirement(Building::Tent, 1)),
                vec![Effect::RaiseLevel {
                    building: Building::Tent,
                    amount: 1,
                }],
            ),
            record(
                "build_smithy",
                &[(ResourceKind::Wood, 200.0), (ResourceKind::Stone, 200.0)],
                None,
                Some(Requirement(Building::Quarry, 2)),
                vec![Effect::ScaleProduction {
                    role: Role::Miner,
                    factor: 2.0,
                }],
            ),
        ])
        .expect("test catalog is valid");
        ProgressionEngine::new(catalog)
    }

    fn stocked(amounts: &[(ResourceKind, f64)]) -> Settlement {
        let mut settlement = Settlement::default();
        for (kind, amount) in amounts {
            settlement.resources.set(*kind, *amount);
        }
        settlement
    }

    fn listed_ids(engine: &ProgressionEngine, settlement: &Settlement) -> Vec<String> {
        engine
            .list_eligible(settlement)
            .into_iter()
            .map(|summary| summary.id)
            .collect()
    }

    #[test]
    fn one_shot_purchase_pays_applies_and_disappears() {
        let mut engine = engine();
        let mut settlement = stocked(&[(ResourceKind::Wood, 10.0), (ResourceKind::Food, 10.0)]);

        let receipt = engine
            .purchase("build_tent", &mut settlement)
            .expect("exact stock is enough");

        assert!(receipt.consumed);
        assert_eq!(receipt.purchase_count, 1);
        assert_eq!(receipt.duration, 2.0);
        assert_eq!(settlement.resources.amount(ResourceKind::Wood), 0.0);
        assert_eq!(settlement.resources.amount(ResourceKind::Food), 0.0);
        assert_eq!(settlement.level(Building::Tent), 0);
        assert_eq!(settlement.work.len(), 1);

        settlement.tick(2.0);
        assert!(settlement.work.is_empty());
        assert_eq!(settlement.level(Building::Tent), 1);
        assert_eq!(settlement.villagers, 2);
        assert!(!listed_ids(&engine, &settlement).contains(&"build_tent".to_string()));

        settlement.resources.set(ResourceKind::Wood, 1_000.0);
        settlement.resources.set(ResourceKind::Food, 1_000.0);
        assert_eq!(
            engine.eligibility("build_tent", &settlement),
            Some(Eligibility::Consumed)
        );
        assert_eq!(
            engine.purchase("build_tent", &mut settlement),
            Err(PurchaseError::AlreadyPurchased {
                id: "build_tent".to_string()
            })
        );
        assert_eq!(settlement.level(Building::Tent), 1);
    }

    #[test]
    fn repeatable_cost_compounds_per_purchase() {
        let mut engine = engine();
        let mut settlement = stocked(&[
            (ResourceKind::Wood, 1_000_000.0),
            (ResourceKind::Food, 1_000_000.0),
        ]);
        settlement.raise_level(Building::Tent, 1);

        for n in 1..=5 {
            engine
                .purchase("expand_tent", &mut settlement)
                .expect("plenty of stock");
            let cost = engine.current_cost("expand_tent").expect("known id");
            assert_close(cost.get(ResourceKind::Wood), 20.0 * 1.5_f64.powi(n));
            assert_close(cost.get(ResourceKind::Food), 40.0 * 1.5_f64.powi(n));
        }
        assert_eq!(engine.purchase_count("expand_tent"), 5);
        assert_eq!(settlement.work.len(), 5);
        settlement.tick(10.0);
        assert_eq!(settlement.level(Building::Tent), 6);
        assert!(listed_ids(&engine, &settlement).contains(&"expand_tent".to_string()));
    }

    #[test]
    fn insufficient_stock_changes_nothing() {
        let mut engine = engine();
        let mut settlement = stocked(&[(ResourceKind::Wood, 500.0), (ResourceKind::Stone, 150.0)]);
        settlement.raise_level(Building::Quarry, 2);

        let error = engine
            .purchase("build_smithy", &mut settlement)
            .expect_err("stone is short");

        assert_eq!(
            error,
            PurchaseError::InsufficientResources {
                id: "build_smithy".to_string(),
                resource: ResourceKind::Stone,
                required: 200.0,
                available: 150.0,
            }
        );
        assert_eq!(settlement.resources.amount(ResourceKind::Wood), 500.0);
        assert_eq!(settlement.resources.amount(ResourceKind::Stone), 150.0);
        assert_eq!(settlement.production(Role::Miner), 1.0);
        assert_eq!(engine.purchase_count("build_smithy"), 0);
        assert!(settlement.work.is_empty());
    }

    #[test]
    fn one_shot_in_progress_cannot_be_bought_again() {
        let mut engine = engine();
        let mut settlement = stocked(&[(ResourceKind::Wood, 100.0), (ResourceKind::Food, 100.0)]);

        engine
            .purchase("build_tent", &mut settlement)
            .expect("tent is affordable");

        assert_eq!(
            engine.eligibility("build_tent", &settlement),
            Some(Eligibility::Consumed)
        );
        assert_eq!(
            engine.purchase("build_tent", &mut settlement),
            Err(PurchaseError::AlreadyPurchased {
                id: "build_tent".to_string()
            })
        );
        assert_eq!(settlement.work.len(), 1);
        assert_eq!(settlement.resources.amount(ResourceKind::Wood), 90.0);
    }

    #[test]
    fn requirement_gates_listing_and_purchase() {
        let mut engine = engine();
        let mut settlement = stocked(&[(ResourceKind::Wood, 500.0), (ResourceKind::Stone, 500.0)]);
        settlement.raise_level(Building::Quarry, 1);

        assert!(!listed_ids(&engine, &settlement).contains(&"build_smithy".to_string()));
        assert!(matches!(
            engine.purchase("build_smithy", &mut settlement),
            Err(PurchaseError::RequirementNotMet {
                required: 2,
                current: 1,
                ..
            })
        ));
        assert_eq!(settlement.resources.amount(ResourceKind::Wood), 500.0);

        settlement.raise_level(Building::Quarry, 1);
        assert!(listed_ids(&engine, &settlement).contains(&"build_smithy".to_string()));
    }

    #[test]
    fn unaffordable_upgrades_are_listed_but_disabled() {
        let engine = engine();
        let settlement = stocked(&[(ResourceKind::Wood, 3.0)]);

        let listed = engine.list_eligible(&settlement);

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "build_tent");
        assert!(!listed[0].affordable);
        assert_eq!(
            engine.eligibility("build_tent", &settlement),
            Some(Eligibility::Unaffordable)
        );
        assert_eq!(engine.eligibility("missing", &settlement), None);
    }

    #[test]
    fn unknown_id_is_rejected() {
        let mut engine = engine();
        let mut settlement = Settlement::default();
        assert_eq!(
            engine.purchase("build_castle", &mut settlement),
            Err(PurchaseError::UnknownUpgrade("build_castle".to_string()))
        );
    }

    #[test]
    fn restore_counts_recomputes_costs_and_reports_unknown_ids() {
        let mut engine = engine();
        let saved = BTreeMap::from([
            ("build_tent".to_string(), 3),
            ("expand_tent".to_string(), 2),
            ("retired_upgrade".to_string(), 1),
        ]);

        let skipped = engine.restore_counts(&saved);

        assert_eq!(skipped, vec!["retired_upgrade".to_string()]);
        assert_eq!(engine.purchase_count("build_tent"), 1);
        assert_eq!(engine.purchase_count("expand_tent"), 2);
        let cost = engine.current_cost("expand_tent").expect("known id");
        assert_close(cost.get(ResourceKind::Wood), 45.0);
        assert_eq!(
            engine.purchase_counts(),
            BTreeMap::from([("build_tent".to_string(), 1), ("expand_tent".to_string(), 2)])
        );
    }

    #[test]
    fn restoring_a_huge_count_is_immediate() {
        let mut engine = engine();
        let saved = BTreeMap::from([("expand_tent".to_string(), u32::MAX)]);

        let started = Instant::now();
        assert!(engine.restore_counts(&saved).is_empty());
        assert!(started.elapsed() < Duration::from_secs(1));

        assert_eq!(engine.purchase_count("expand_tent"), u32::MAX);
        let cost = engine.current_cost("expand_tent").expect("known id");
        assert_eq!(cost.get(ResourceKind::Wood), f64::INFINITY);

        let mut settlement = stocked(&[(ResourceKind::Wood, 1e300), (ResourceKind::Food, 1e300)]);
        settlement.raise_level(Building::Tent, 1);
        assert_eq!(
            engine.eligibility("expand_tent", &settlement),
            Some(Eligibility::Unaffordable)
        );
    }
}
