mod app;

use bevy::prelude::*;
use bevy::window::{PresentMode, Window};
use village_progression::{GameConfig, load_config_from_path};

const CONFIG_PATH: &str = "village_config.json";

fn main() {
    let (config, config_error) = match load_config_from_path(CONFIG_PATH) {
        Ok(config) => (config, None),
        Err(err) => (GameConfig::default(), Some(format!("{err:#}"))),
    };

    App::new()
        .insert_resource(app::RuntimeConfig(config))
        .insert_resource(ClearColor(Color::srgb(0.07, 0.06, 0.05)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Village".to_string(),
                resolution: (1280.0, 720.0).into(),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(app::SettlementAppPlugin)
        .add_systems(Startup, move || {
            if let Some(err) = &config_error {
                warn!("using default config: {err}");
            }
        })
        .run();
}
