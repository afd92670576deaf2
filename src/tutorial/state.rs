use std::collections::BTreeMap;

use thiserror::Error;

use super::checkpoint::Checkpoint;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TutorialError {
    #[error("unknown tutorial checkpoint {0:?}")]
    UnknownCheckpoint(String),
}

/// One "already shown" latch per checkpoint. Latches only ever go from
/// unset to set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialState {
    shown: BTreeMap<Checkpoint, bool>,
}

impl Default for TutorialState {
    fn default() -> Self {
        Self {
            shown: Checkpoint::ALL
                .into_iter()
                .map(|checkpoint| (checkpoint, false))
                .collect(),
        }
    }
}

impl TutorialState {
    pub fn is_shown(&self, checkpoint: Checkpoint) -> bool {
        self.shown.get(&checkpoint).copied().unwrap_or(false)
    }

    /// Sets the latch. Returns `true` only on the unset-to-set transition.
    pub fn mark_shown(&mut self, checkpoint: Checkpoint) -> bool {
        let latch = self.shown.entry(checkpoint).or_insert(false);
        let newly = !*latch;
        *latch = true;
        newly
    }

    pub fn shown_count(&self) -> usize {
        self.shown.values().filter(|shown| **shown).count()
    }

    /// Flags keyed by checkpoint name, covering every declared checkpoint.
    pub fn to_saved(&self) -> BTreeMap<String, bool> {
        Checkpoint::ALL
            .into_iter()
            .map(|checkpoint| {
                (
                    checkpoint.canonical_name().to_string(),
                    self.is_shown(checkpoint),
                )
            })
            .collect()
    }

    /// Rebuilds state from saved flags. Every name must belong to the
    /// declared checkpoint set; checkpoints missing from `saved` start unset.
    pub fn from_saved(saved: &BTreeMap<String, bool>) -> Result<Self, TutorialError> {
        let mut state = Self::default();
        for (name, shown) in saved {
            let checkpoint = Checkpoint::from_name(name)
                .ok_or_else(|| TutorialError::UnknownCheckpoint(name.clone()))?;
            if *shown {
                state.mark_shown(checkpoint);
            }
        }
        Ok(state)
    }
}
