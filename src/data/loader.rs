use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::config::GameConfig;
use crate::progression::{CatalogError, UpgradeCatalog};

use super::UpgradeDataFile;

const CATALOG_RELATIVE_PATH: &str = "data/upgrades.json";
const BUNDLED_CATALOG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/upgrades.json"));

pub fn catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(CATALOG_RELATIVE_PATH)
}

/// The catalog compiled into the binary.
pub fn bundled_catalog() -> Result<UpgradeCatalog, CatalogError> {
    UpgradeCatalog::from_json_str(BUNDLED_CATALOG)
}

pub fn load_catalog() -> Result<UpgradeCatalog> {
    load_catalog_from_path(catalog_path())
}

pub fn load_catalog_from_path(path: impl AsRef<Path>) -> Result<UpgradeCatalog> {
    let path = path.as_ref();
    let file: UpgradeDataFile = read_json(path, "upgrade catalog")?;
    UpgradeCatalog::from_records(file.upgrades)
        .with_context(|| format!("invalid upgrade catalog: {}", path.display()))
}

pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<GameConfig> {
    read_json(path.as_ref(), "game config")
}

fn read_json<T>(path: &Path, label: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {label} file: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing {label} file as JSON: {}", path.display()))
}
