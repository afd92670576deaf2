use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::progression::Effect;

/// Remaining time below this counts as done.
const FINISH_EPSILON: f64 = 1e-9;

/// A paid-for upgrade waiting for its timer. The effects are carried along
/// so a saved queue can finish without the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub duration: f64,
    pub remaining: f64,
    pub effects: Vec<Effect>,
}

impl WorkOrder {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        duration: f64,
        effects: Vec<Effect>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            duration,
            remaining: duration,
            effects,
        }
    }

    /// Fraction of the work done, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }
}

/// Crafts and research waiting to finish, in purchase order.
///
/// Each category is its own lane: only the oldest order of a lane makes
/// progress, and time left over when it finishes rolls into the next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkQueue {
    orders: VecDeque<WorkOrder>,
}

impl WorkQueue {
    pub fn push(&mut self, order: WorkOrder) {
        self.orders.push_back(order);
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkOrder> {
        self.orders.iter()
    }

    /// Order currently being worked on in `category`.
    pub fn active(&self, category: Category) -> Option<&WorkOrder> {
        self.orders.iter().find(|order| order.category == category)
    }

    pub fn queued_in(&self, category: Category) -> usize {
        self.orders
            .iter()
            .filter(|order| order.category == category)
            .count()
    }

    /// Spends `work` time units on the `category` lane and returns the
    /// orders that finished, oldest first.
    pub fn advance(&mut self, category: Category, work: f64) -> Vec<WorkOrder> {
        let mut finished = Vec::new();
        let mut budget = work;

        while budget > 0.0 {
            let Some(position) = self
                .orders
                .iter()
                .position(|order| order.category == category)
            else {
                break;
            };
            let order = &mut self.orders[position];
            let spent = budget.min(order.remaining);
            order.remaining -= spent;
            budget -= spent;
            if order.remaining > FINISH_EPSILON {
                break;
            }
            if let Some(order) = self.orders.remove(position) {
                finished.push(order);
            }
        }

        finished
    }
}

#[cfg(test)]
mod tests {
    use super::{WorkOrder, WorkQueue};
    use crate::model::Category;

    fn order(id: &str, category: Category, duration: f64) -> WorkOrder {
        WorkOrder::new(id, id, category, duration, Vec::new())
    }

    fn ids(orders: &[WorkOrder]) -> Vec<&str> {
        orders.iter().map(|order| order.id.as_str()).collect()
    }

    #[test]
    fn only_the_oldest_order_in_a_lane_progresses() {
        let mut queue = WorkQueue::default();
        queue.push(order("tent", Category::Craft, 2.0));
        queue.push(order("pier", Category::Craft, 4.0));

        assert!(queue.advance(Category::Craft, 1.0).is_empty());

        let active = queue.active(Category::Craft).expect("tent is in progress");
        assert_eq!(active.id, "tent");
        assert!((active.progress() - 0.5).abs() < 1e-9);
        let pier = queue.iter().nth(1).expect("pier is waiting");
        assert_eq!(pier.progress(), 0.0);
    }

    #[test]
    fn leftover_time_rolls_into_the_next_order() {
        let mut queue = WorkQueue::default();
        queue.push(order("tent", Category::Craft, 2.0));
        queue.push(order("pier", Category::Craft, 4.0));
        queue.push(order("axes", Category::Craft, 1.0));

        let finished = queue.advance(Category::Craft, 6.5);

        assert_eq!(ids(&finished), vec!["tent", "pier"]);
        let axes = queue.active(Category::Craft).expect("axes still running");
        assert!((axes.remaining - 0.5).abs() < 1e-9);
    }

    #[test]
    fn lanes_do_not_share_time() {
        let mut queue = WorkQueue::default();
        queue.push(order("tent", Category::Craft, 2.0));
        queue.push(order("mentorship", Category::Research, 3.0));

        let finished = queue.advance(Category::Research, 3.0);

        assert_eq!(ids(&finished), vec!["mentorship"]);
        assert_eq!(queue.queued_in(Category::Craft), 1);
        assert_eq!(queue.queued_in(Category::Research), 0);
        assert_eq!(
            queue.active(Category::Craft).map(|order| order.remaining),
            Some(2.0)
        );
    }

    #[test]
    fn empty_lane_ignores_work() {
        let mut queue = WorkQueue::default();
        assert!(queue.advance(Category::Craft, 10.0).is_empty());
        assert!(queue.is_empty());
    }
}
