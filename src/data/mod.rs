mod loader;
mod upgrade_data;

pub use loader::{
    bundled_catalog, catalog_path, load_catalog, load_catalog_from_path, load_config_from_path,
};
pub use upgrade_data::{Requirement, UpgradeDataFile, UpgradeRecord};
