//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` + `StatesPlugin` provide the ECS runtime and state transitions.
//! - `skyward::game::configure_headless` installs the simulation plugins.
//! - Time never advances on its own, so `FixedUpdate` only runs when a test calls
//!   `tick`. `app.update()` still runs `Update` and state transitions.
#![allow(dead_code)]

use std::time::Duration;

use bevy::ecs::message::{Message, Messages};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use skyward::common::state::LevelState;
use skyward::common::tunables::{LevelTunables, Tunables};
use skyward::plugins::actors::Category;
use skyward::plugins::entities::EntityManager;
use skyward::plugins::level::{LevelId, StartLevel};

pub fn app_headless(tunables: Tunables) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.insert_resource(tunables);

    skyward::game::configure_headless(&mut app);
    app
}

/// Seeded tunables with every random roll disabled, so tests place actors themselves.
pub fn quiet_tunables() -> Tunables {
    let mut t = Tunables {
        seed: Some(7),
        levels: LevelTunables {
            level_one_spawn_probability: 0.0,
            level_two_spawn_probability: 0.0,
            pickup_probability: 0.0,
            ..default()
        },
        ..default()
    };
    t.scout.fire_probability = 0.0;
    t.gunship.fire_probability = 0.0;
    t.boss.fire_probability = 0.0;
    t.boss.shield_probability = 0.0;
    t
}

/// Request `level` and run frames until it is constructed and running.
pub fn start_level(app: &mut App, level: LevelId) {
    app.world_mut().write_message(StartLevel { level });
    // request -> Initializing -> construct -> Running
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(state(app), LevelState::Running);
}

/// One simulation tick.
pub fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

pub fn state(app: &App) -> LevelState {
    *app.world().resource::<State<LevelState>>().get()
}

pub fn player(app: &App) -> Entity {
    let manager = app.world().resource::<EntityManager>();
    manager.units(Category::Friendly)[0]
}

/// Spawn `bundle` and register it in `category`, as the level would.
pub fn spawn_live(app: &mut App, category: Category, bundle: impl Bundle) -> Entity {
    let e = app.world_mut().spawn(bundle).id();
    app.world_mut().resource_mut::<EntityManager>().add(category, e);
    e
}

pub fn drain<M: Message>(app: &mut App) -> Vec<M> {
    app.world_mut().resource_mut::<Messages<M>>().drain().collect()
}
