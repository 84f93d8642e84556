//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: DefaultPlugins (window/render) + simulation + shell.
//! - `configure_headless`: simulation only, for integration tests.

use std::io::ErrorKind;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::LevelState;
use crate::common::tunables::{ConfigError, Tunables};
use crate::plugins;

const TUNABLES_PATH: &str = "tunables.toml";

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let loaded = Tunables::load(TUNABLES_PATH);
    let tunables = loaded.as_ref().map_or_else(|_| Tunables::default(), Clone::clone);
    let (width, height) = (tunables.playfield.width as u32, tunables.playfield.height as u32);

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Skyward".into(),
            resolution: WindowResolution::new(width, height),
            resizable: false,
            ..default()
        }),
        ..default()
    }));
    // Logging only exists once DefaultPlugins are in.
    report_tunables(TUNABLES_PATH, &loaded);

    // Inserted before the core plugin so it is not replaced by defaults.
    app.insert_resource(tunables);

    configure_game(app);
    plugins::register_render(app);
    plugins::register_shell(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (camera/sprites) or the shell; tests drive
///   levels through `StartLevel` directly.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<LevelState>();
    plugins::register_gameplay(app);
}

/// A missing file is the normal case and falls back to defaults quietly.
fn report_tunables(path: &str, loaded: &Result<Tunables, ConfigError>) {
    match loaded {
        Ok(_) => info!("loaded tunables from {path}"),
        Err(ConfigError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            debug!("no {path}; using default tunables");
        }
        Err(err) => warn!("{err}; using default tunables"),
    }
}
