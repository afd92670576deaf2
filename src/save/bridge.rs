use anyhow::{Context, Result, bail};

use crate::core::Settlement;
use crate::progression::ProgressionEngine;
use crate::tutorial::{TutorialController, TutorialState};

use super::{SAVE_VERSION, SaveData};

pub fn save_data_from_session(
    engine: &ProgressionEngine,
    tutorial: &TutorialController,
    settlement: &Settlement,
) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        upgrades: engine.purchase_counts(),
        tutorial: tutorial.state().to_saved(),
        settlement: Some(settlement.clone()),
    }
}

/// Restores a session from `save`.
///
/// Tutorial flags are validated before anything is touched, so an invalid
/// save leaves the session unchanged. Saved upgrade ids missing from the
/// catalog are skipped with a warning.
pub fn apply_save_data(
    engine: &mut ProgressionEngine,
    tutorial: &mut TutorialController,
    settlement: &mut Settlement,
    save: &SaveData,
) -> Result<()> {
    if save.version > SAVE_VERSION {
        bail!(
            "save version {} is newer than supported version {SAVE_VERSION}",
            save.version
        );
    }

    let tutorial_state =
        TutorialState::from_saved(&save.tutorial).context("invalid tutorial flags in save")?;

    for id in engine.restore_counts(&save.upgrades) {
        log::warn!("save references unknown upgrade {id:?}; skipped");
    }
    tutorial.replace_state(tutorial_state);
    if let Some(saved) = &save.settlement {
        let (base_yield, chaos_rate, speedup) = (
            settlement.base_yield_per_second,
            settlement.chaos_per_extra_worker,
            settlement.speedup_per_worker,
        );
        *settlement = saved.clone();
        // Rates come from the running config, not the save.
        settlement.base_yield_per_second = base_yield;
        settlement.chaos_per_extra_worker = chaos_rate;
        settlement.speedup_per_worker = speedup;
    }

    Ok(())
}
