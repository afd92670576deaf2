use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Cost, ResourceKind};

/// Change in each stock since the last `begin_tick`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickDeltas(BTreeMap<ResourceKind, f64>);

impl TickDeltas {
    pub fn reset(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, kind: ResourceKind) -> f64 {
        self.0.get(&kind).copied().unwrap_or(0.0)
    }

    fn record(&mut self, kind: ResourceKind, amount: f64) {
        *self.0.entry(kind).or_insert(0.0) += amount;
    }
}

/// First resource kind a cost could not be covered by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shortfall {
    pub kind: ResourceKind,
    pub required: f64,
    pub available: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceStore {
    stock: BTreeMap<ResourceKind, f64>,
    total_gathered: BTreeMap<ResourceKind, f64>,
    total_spent: BTreeMap<ResourceKind, f64>,
    #[serde(skip)]
    pub tick_deltas: TickDeltas,
}

impl ResourceStore {
    pub fn begin_tick(&mut self) {
        self.tick_deltas.reset();
    }

    pub fn amount(&self, kind: ResourceKind) -> f64 {
        self.stock.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn total_gathered(&self, kind: ResourceKind) -> f64 {
        self.total_gathered.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn total_spent(&self, kind: ResourceKind) -> f64 {
        self.total_spent.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, kind: ResourceKind, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        *self.stock.entry(kind).or_insert(0.0) += amount;
        *self.total_gathered.entry(kind).or_insert(0.0) += amount;
        self.tick_deltas.record(kind, amount);
    }

    /// Overwrites a stock without touching lifetime totals. Used by hosts
    /// seeding a new game or tests building a fixture.
    pub fn set(&mut self, kind: ResourceKind, amount: f64) {
        self.stock.insert(kind, amount.max(0.0));
    }

    pub fn shortfall(&self, cost: &Cost) -> Option<Shortfall> {
        cost.iter().find_map(|(kind, required)| {
            let available = self.amount(kind);
            (available < required).then_some(Shortfall {
                kind,
                required,
                available,
            })
        })
    }

    pub fn can_afford(&self, cost: &Cost) -> bool {
        self.shortfall(cost).is_none()
    }

    /// Deducts every entry of `cost`, or nothing at all if any entry is short.
    pub fn spend(&mut self, cost: &Cost) -> Result<(), Shortfall> {
        if let Some(shortfall) = self.shortfall(cost) {
            return Err(shortfall);
        }
        for (kind, amount) in cost.iter() {
            if amount <= 0.0 {
                continue;
            }
            let stock = self.stock.entry(kind).or_insert(0.0);
            *stock = (*stock - amount).max(0.0);
            *self.total_spent.entry(kind).or_insert(0.0) += amount;
            self.tick_deltas.record(kind, -amount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceStore;
    use crate::model::{Cost, ResourceKind};

    #[test]
    fn add_ignores_non_positive_amounts() {
        let mut store = ResourceStore::default();
        store.add(ResourceKind::Wood, -3.0);
        store.add(ResourceKind::Wood, 0.0);
        assert_eq!(store.amount(ResourceKind::Wood), 0.0);

        store.add(ResourceKind::Wood, 2.5);
        assert_eq!(store.amount(ResourceKind::Wood), 2.5);
        assert_eq!(store.total_gathered(ResourceKind::Wood), 2.5);
        assert_eq!(store.tick_deltas.get(ResourceKind::Wood), 2.5);
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut store = ResourceStore::default();
        store.set(ResourceKind::Wood, 50.0);
        store.set(ResourceKind::Stone, 10.0);
        let cost = Cost::new()
            .with(ResourceKind::Wood, 20.0)
            .with(ResourceKind::Stone, 40.0);

        let shortfall = store.spend(&cost).expect_err("stone is short");

        assert_eq!(shortfall.kind, ResourceKind::Stone);
        assert_eq!(shortfall.required, 40.0);
        assert_eq!(shortfall.available, 10.0);
        assert_eq!(store.amount(ResourceKind::Wood), 50.0);
        assert_eq!(store.amount(ResourceKind::Stone), 10.0);
    }

    #[test]
    fn spend_deducts_exact_amounts() {
        let mut store = ResourceStore::default();
        store.set(ResourceKind::Wood, 10.0);
        store.set(ResourceKind::Food, 10.0);
        let cost = Cost::new()
            .with(ResourceKind::Wood, 10.0)
            .with(ResourceKind::Food, 10.0);

        store.begin_tick();
        store.spend(&cost).expect("exact stock should be enough");

        assert_eq!(store.amount(ResourceKind::Wood), 0.0);
        assert_eq!(store.amount(ResourceKind::Food), 0.0);
        assert_eq!(store.total_spent(ResourceKind::Food), 10.0);
        assert_eq!(store.tick_deltas.get(ResourceKind::Wood), -10.0);
    }
}
