//! Camera plugin (render-only).
//!
//! The playfield is centered on the origin and never scrolls, so one fixed
//! `Camera2d` at the origin frames the whole level.

use bevy::prelude::*;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}
