mod catalog;
mod effect;
mod engine;
mod narrative;

pub use catalog::{CatalogError, Repeat, UpgradeCatalog, UpgradeDefinition};
pub use effect::Effect;
pub use engine::{
    Eligibility, ProgressionEngine, PurchaseError, PurchaseReceipt, UpgradeProgress,
    UpgradeSummary,
};
pub use narrative::{Narrative, StoryAdvance, StoryQueue, StoryStep};
