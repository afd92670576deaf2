mod input;
mod popup;
mod resources;
mod setup;
mod simulation;
mod state;
mod view;

use bevy::prelude::*;

pub use resources::RuntimeConfig;
use resources::{ActivePopup, ActiveTab, UiAction};
use state::{AppPhase, SimRunState};

pub struct SettlementAppPlugin;

impl Plugin for SettlementAppPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppPhase>()
            .init_state::<SimRunState>()
            .init_resource::<RuntimeConfig>()
            .init_resource::<ActiveTab>()
            .init_resource::<ActivePopup>()
            .add_event::<UiAction>()
            .add_systems(Startup, setup::spawn_camera)
            .add_systems(OnEnter(AppPhase::Boot), setup::bootstrap_session)
            .add_systems(OnEnter(AppPhase::InGame), view::spawn_ui)
            .add_systems(OnEnter(SimRunState::Running), simulation::mark_sim_running)
            .add_systems(OnEnter(SimRunState::Paused), simulation::mark_sim_paused)
            .add_systems(
                Update,
                (
                    input::handle_keyboard_controls,
                    input::emit_button_actions,
                    simulation::handle_save_hotkeys,
                    simulation::apply_ui_actions,
                    simulation::tick_simulation.run_if(in_state(SimRunState::Running)),
                    popup::dismiss_popup,
                    popup::show_next_popup,
                    popup::place_active_popup,
                    view::refresh_tabs,
                    view::refresh_shop_lists,
                    view::refresh_roles,
                    view::refresh_resources,
                    view::refresh_log,
                    view::refresh_story,
                    view::refresh_hud,
                )
                    .chain()
                    .run_if(in_state(AppPhase::InGame)),
            );
    }
}
