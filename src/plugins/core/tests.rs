use std::time::Duration;

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
    assert!(app.world().get_resource::<GameRng>().is_some());
    assert_eq!(
        app.world().resource::<Time<Fixed>>().timestep(),
        Duration::from_millis(50),
        "20 Hz by default"
    );
}

#[test]
fn host_tunables_win_over_defaults() {
    let mut app = App::new();
    app.insert_resource(Tunables { tick_hz: 40.0, seed: Some(11), ..default() });
    core::plugin(&mut app);

    assert_eq!(app.world().resource::<Tunables>().tick_hz, 40.0);
    assert_eq!(app.world().resource::<Time<Fixed>>().timestep(), Duration::from_millis(25));
    assert_eq!(app.world().resource::<GameRng>().seed, Some(11));
}
