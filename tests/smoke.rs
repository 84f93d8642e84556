mod common;

use bevy::prelude::*;
use skyward::common::state::LevelState;
use skyward::common::tunables::Tunables;
use skyward::plugins::actors::{Actor, Category, ProjectileKind};
use skyward::plugins::entities::EntityManager;
use skyward::plugins::level::{ActiveLevel, LevelId};
use skyward::plugins::player::PlayerIntent;
use skyward::plugins::projectiles::ProjectilePools;

#[test]
fn boots_idle_until_a_level_is_requested() {
    let mut app = common::app_headless(Tunables::default());

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(common::state(&app), LevelState::Idle);
    assert!(app.world().get_resource::<ActiveLevel>().is_none());
}

#[test]
fn level_construction_places_the_player_and_prewarms_the_user_pool() {
    let t = common::quiet_tunables();
    let mut app = common::app_headless(t.clone());
    common::start_level(&mut app, LevelId::One);

    let manager = app.world().resource::<EntityManager>();
    assert_eq!(manager.len(Category::Friendly), 1);
    assert_eq!(manager.total(), 1);

    let pools = app.world().resource::<ProjectilePools>();
    assert_eq!(pools.pool(ProjectileKind::User).available_len(), t.projectiles.prewarm);
    assert_eq!(pools.in_use(), 0);
}

#[test]
fn seeded_level_runs_many_ticks_with_consistent_lists() {
    let t = Tunables { seed: Some(1234), ..default() };
    let mut app = common::app_headless(t);
    common::start_level(&mut app, LevelId::Two);

    app.world_mut().resource_mut::<PlayerIntent>().fire = true;

    for _ in 0..400 {
        common::tick(&mut app);

        let world = app.world();
        if world.resource::<ActiveLevel>().outcome.is_some() {
            break;
        }

        let manager = world.resource::<EntityManager>();
        for category in EntityManager::UPDATE_ORDER {
            for &e in manager.units(category) {
                let actor = world.get::<Actor>(e).expect("listed entity exists");
                assert_eq!(actor.category(), category);
                assert!(!actor.is_destroyed(), "cleanup leaves no destroyed actor listed");
            }
        }

        let pools = world.resource::<ProjectilePools>();
        assert_eq!(
            pools.in_use(),
            manager.len(Category::UserProjectile) + manager.len(Category::EnemyProjectile),
            "every live projectile is checked out of exactly one pool"
        );
    }

    assert!(app.world().resource::<ActiveLevel>().ticks > 0);
}
