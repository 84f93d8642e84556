//! Feature plugins.

use bevy::prelude::*;

pub mod actors;
pub mod boss;
pub mod collision;
pub mod core;
pub mod entities;
pub mod level;
pub mod player;
pub mod projectiles;

// Render / shell only
pub mod camera;
pub mod flow;
pub mod render;

/// Register the simulation plugins. All of them work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    level::plugin(app);
    entities::plugin(app);
    projectiles::plugin(app);
    boss::plugin(app);
    collision::plugin(app);
    player::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    render::plugin(app);
}

/// Register the host shell that drives level flow.
pub fn register_shell(app: &mut App) {
    flow::plugin(app);
}
