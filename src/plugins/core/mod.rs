//! Core plugin: shared resources and global settings.
//!
//! Tunables are only defaulted when the host has not inserted its own; the tick rate
//! and the RNG seed are read from whichever tunables end up installed.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();

    let (tick_hz, seed) = {
        let t = app.world().resource::<Tunables>();
        (t.tick_hz, t.seed)
    };

    app.insert_resource(Time::<Fixed>::from_hz(tick_hz))
        .insert_resource(GameRng::from_tunable_seed(seed))
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    match seed {
        Some(seed) => info!("simulation at {tick_hz} Hz, seed {seed}"),
        None => info!("simulation at {tick_hz} Hz, unseeded"),
    }
}

#[cfg(test)]
mod tests;
