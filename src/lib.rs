pub mod config;
pub mod core;
pub mod data;
pub mod model;
pub mod progression;
pub mod save;
pub mod tutorial;

pub use config::GameConfig;
pub use core::{
    AssignError, EventLog, LogCategory, LogEntry, ResourceStore, Settlement, WorkOrder, WorkQueue,
};
pub use data::{bundled_catalog, load_catalog, load_catalog_from_path, load_config_from_path};
pub use model::{
    Anchor, Building, Category, Cost, Feature, ResourceKind, Role, ScreenPoint, ScreenRect,
    ScreenSize, Tab,
};
pub use progression::{
    CatalogError, Effect, Eligibility, ProgressionEngine, PurchaseError, PurchaseReceipt, Repeat,
    StoryAdvance, StoryQueue, UpgradeCatalog, UpgradeDefinition, UpgradeSummary,
};
pub use save::{
    SaveData, SaveFormat, apply_save_data, read_save, save_data_from_session, write_save,
};
pub use tutorial::{
    Checkpoint, Orientation, PopupRequest, PopupSchedule, TutorialController, TutorialState,
    place_in_viewport, place_popup,
};
