use bevy::prelude::*;
use village_progression::{
    LogCategory, StoryAdvance, apply_save_data, read_save, save_data_from_session, write_save,
};

use super::popup::close_popup;
use super::resources::{ActivePopup, RuntimeConfig, SessionState, UiAction};
use super::state::SimRunState;

pub fn apply_ui_actions(
    mut actions: EventReader<UiAction>,
    mut session: ResMut<SessionState>,
    config: Res<RuntimeConfig>,
) {
    let SessionState {
        settlement, engine, ..
    } = &mut *session;

    for action in actions.read() {
        match action {
            UiAction::Purchase(id) => match engine.purchase(id, settlement) {
                Ok(receipt) => {
                    debug!("bought {} (count {})", receipt.id, receipt.purchase_count);
                }
                Err(err) => settlement.log_message(LogCategory::Warning, err.to_string()),
            },
            UiAction::Assign(role) => {
                if let Err(err) = settlement.assign(*role) {
                    settlement.log_message(LogCategory::Warning, err.to_string());
                }
            }
            UiAction::Unassign(role) => {
                if let Err(err) = settlement.unassign(*role) {
                    settlement.log_message(LogCategory::Warning, err.to_string());
                }
            }
            UiAction::Gather(kind) => settlement.gather(*kind, config.0.gather_amount),
            UiAction::AcknowledgeStory => {
                if settlement.stories.acknowledge() == StoryAdvance::Finished {
                    debug!("story finished");
                }
            }
            UiAction::SelectTab(_) | UiAction::DismissPopup => {}
        }
    }
}

/// Advances the settlement on a fixed step and queues a pop-up for every
/// tutorial checkpoint reached.
pub fn tick_simulation(
    time: Res<Time>,
    config: Res<RuntimeConfig>,
    mut session: ResMut<SessionState>,
) {
    let steps = session
        .tick_timer
        .tick(time.delta())
        .times_finished_this_tick();
    let dt = config.0.tick_seconds();

    for _ in 0..steps {
        session.settlement.tick(dt);
        let SessionState {
            settlement,
            tutorial,
            popups,
            ..
        } = &mut *session;
        for request in tutorial.tick(settlement) {
            popups.schedule(request, time.elapsed());
        }
    }
}

pub fn mark_sim_running(session: Option<ResMut<SessionState>>) {
    if let Some(mut session) = session {
        session.settlement.paused = false;
    }
}

pub fn mark_sim_paused(session: Option<ResMut<SessionState>>) {
    if let Some(mut session) = session {
        session.settlement.paused = true;
    }
}

/// F5 and F9 quick-save and quick-load the JSON save. F6 and F7 export and
/// import the base64 copy.
pub fn handle_save_hotkeys(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<RuntimeConfig>,
    mut session: ResMut<SessionState>,
    mut active: ResMut<ActivePopup>,
) {
    let config = &config.0;

    if keys.just_pressed(KeyCode::F5) {
        store_session(&mut session, &config.save_path);
    }
    if keys.just_pressed(KeyCode::F6) {
        store_session(&mut session, &config.export_path);
    }
    if keys.just_pressed(KeyCode::F9) {
        restore_session(&mut commands, &mut session, &mut active, &config.save_path);
    }
    if keys.just_pressed(KeyCode::F7) {
        restore_session(&mut commands, &mut session, &mut active, &config.export_path);
    }
}

fn store_session(session: &mut SessionState, path: &str) {
    let save = save_data_from_session(&session.engine, &session.tutorial, &session.settlement);
    session.last_save_message = Some(match write_save(path, &save) {
        Ok(()) => {
            info!("saved session to {path}");
            format!("saved to {path}")
        }
        Err(err) => {
            warn!("save failed: {err:#}");
            format!("save failed: {err}")
        }
    });
}

/// Replaces the session with the save at `path`. Pop-ups raised by the old
/// session are dropped, and the run state stays with the host.
fn restore_session(
    commands: &mut Commands,
    session: &mut SessionState,
    active: &mut ActivePopup,
    path: &str,
) {
    let SessionState {
        settlement,
        engine,
        tutorial,
        popups,
        last_save_message,
        ..
    } = session;
    let paused = settlement.paused;

    let result =
        read_save(path).and_then(|save| apply_save_data(engine, tutorial, settlement, &save));
    *last_save_message = Some(match result {
        Ok(()) => {
            settlement.paused = paused;
            popups.clear();
            if let Some(shown) = active.0.take() {
                close_popup(commands, shown);
            }
            info!("loaded session from {path}");
            format!("loaded {path}")
        }
        Err(err) => {
            warn!("load failed: {err:#}");
            format!("load failed: {err}")
        }
    });
}
