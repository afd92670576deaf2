use std::path::Path;

use bevy::prelude::*;
use village_progression::{
    ProgressionEngine, TutorialController, apply_save_data, bundled_catalog, load_catalog,
    read_save,
};

use super::resources::{RuntimeConfig, SessionState};
use super::state::{AppPhase, SimRunState};

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("PrimaryCamera"), Camera2d));
}

pub fn bootstrap_session(
    mut commands: Commands,
    config: Res<RuntimeConfig>,
    mut next_phase: ResMut<NextState<AppPhase>>,
    mut next_run_state: ResMut<NextState<SimRunState>>,
) {
    let config = &config.0;
    let catalog = match load_catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!("using bundled upgrade catalog: {err:#}");
            match bundled_catalog() {
                Ok(catalog) => catalog,
                Err(err) => {
                    error!("bundled upgrade catalog is invalid: {err}");
                    return;
                }
            }
        }
    };

    let mut engine = ProgressionEngine::new(catalog);
    let mut tutorial = TutorialController::default();
    let mut settlement = config.new_settlement();

    let mut paused = false;
    if Path::new(&config.save_path).exists() {
        match read_save(&config.save_path).and_then(|save| {
            apply_save_data(&mut engine, &mut tutorial, &mut settlement, &save)
        }) {
            Ok(()) => {
                info!("loaded save from {}", config.save_path);
                paused = settlement.paused;
            }
            Err(err) => {
                warn!("ignoring save {}: {err:#}", config.save_path);
            }
        }
    }

    next_run_state.set(if paused {
        SimRunState::Paused
    } else {
        SimRunState::Running
    });

    commands.insert_resource(SessionState {
        settlement,
        engine,
        tutorial,
        popups: config.popup_schedule(),
        tick_timer: Timer::from_seconds(config.tick_seconds() as f32, TimerMode::Repeating),
        last_save_message: None,
    });

    next_phase.set(AppPhase::InGame);
}
