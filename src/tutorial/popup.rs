use crate::model::{Anchor, Tab};

use super::checkpoint::Checkpoint;

/// A request to show one pop-up. Ephemeral; discarded once displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupRequest {
    pub checkpoint: Option<Checkpoint>,
    pub text: String,
    /// Element to place the pop-up next to. `None` centers it.
    pub anchor: Option<Anchor>,
    /// Tab to switch to first, so the anchor is visible when measured.
    pub activate_tab: Option<Tab>,
}

impl PopupRequest {
    pub fn centered(text: impl Into<String>) -> Self {
        Self {
            checkpoint: None,
            text: text.into(),
            anchor: None,
            activate_tab: None,
        }
    }
}
