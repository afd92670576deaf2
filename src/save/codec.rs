use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::SaveData;

/// Text encodings a save file can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    /// Pretty-printed JSON, written by quick-save.
    Json,
    /// Compact JSON wrapped in standard base64, for pasting a save around
    /// as one opaque string.
    Base64,
}

impl SaveFormat {
    /// `.b64` and `.txt` files hold base64; anything else is JSON.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("b64" | "txt") => Self::Base64,
            _ => Self::Json,
        }
    }

    pub fn encode(self, save: &SaveData) -> Result<String> {
        match self {
            Self::Json => {
                serde_json::to_string_pretty(save).context("failed to serialize save as JSON")
            }
            Self::Base64 => {
                let json = serde_json::to_vec(save).context("failed to serialize save as JSON")?;
                Ok(STANDARD.encode(json))
            }
        }
    }

    pub fn decode(self, text: &str) -> Result<SaveData> {
        match self {
            Self::Json => serde_json::from_str(text).context("save is not valid JSON"),
            Self::Base64 => {
                // Pasted exports often pick up line breaks.
                let packed = text.split_whitespace().collect::<String>();
                let json = STANDARD
                    .decode(packed)
                    .context("save is not valid base64")?;
                serde_json::from_slice(&json).context("decoded save is not valid JSON")
            }
        }
    }
}

/// Writes `save` to `path` in the format its extension implies.
pub fn write_save(path: impl AsRef<Path>, save: &SaveData) -> Result<()> {
    let path = path.as_ref();
    let text = SaveFormat::for_path(path).encode(save)?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

/// Reads a save from `path` in the format its extension implies.
pub fn read_save(path: impl AsRef<Path>) -> Result<SaveData> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    SaveFormat::for_path(path)
        .decode(&text)
        .with_context(|| format!("failed to load {}", path.display()))
}
