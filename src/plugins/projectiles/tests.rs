//! Producer/allocator tests. Each system runs once against a bare world; no schedule.

use bevy::prelude::*;

use crate::common::test_utils::{drain, run_system_once, sim_world, spawn_live};
use crate::common::tunables::{EnemyTunables, Tunables};
use crate::plugins::actors::spawn::{enemy_plane, user_plane};
use crate::plugins::actors::*;
use crate::plugins::entities::{ActorAdded, EntityManager};

use super::allocator::allocate_projectiles;
use super::pool::{self, PooledProjectile, ProjectilePools};
use super::request::{generate_enemy_fire, request_volleys};
use super::SpawnProjectileRequest;

fn world() -> (World, Tunables) {
    let t = Tunables::default();
    (sim_world(t.clone(), 3), t)
}

fn request(world: &mut World, kind: ProjectileKind, position: Vec2) {
    let owner = world.spawn_empty().id();
    world.write_message(SpawnProjectileRequest { kind, position, owner });
}

fn prewarm(world: &mut World, kind: ProjectileKind, count: usize) {
    run_system_once(
        world,
        move |mut commands: Commands, t: Res<Tunables>, mut pools: ResMut<ProjectilePools>| {
            pools.prewarm(&mut commands, &t, kind, count);
        },
    );
}

// -----------------------------------------------------------------------------
// Allocator
// -----------------------------------------------------------------------------

#[test]
fn prewarmed_projectiles_are_parked() {
    let (mut world, _) = world();
    prewarm(&mut world, ProjectileKind::User, 4);

    let pools = world.resource::<ProjectilePools>();
    assert_eq!(pools.pool(ProjectileKind::User).available_len(), 4);
    assert_eq!(pools.in_use(), 0);

    let mut q = world.query::<(&PooledProjectile, &Hitbox, &Movement, &Visibility, &Actor)>();
    assert_eq!(q.iter(&world).count(), 4);
    for (_, hitbox, movement, vis, actor) in q.iter(&world) {
        assert!(!hitbox.enabled);
        assert_eq!(movement.velocity, Vec2::ZERO);
        assert_eq!(*vis, Visibility::Hidden);
        assert!(!actor.is_destroyed());
    }
    assert_eq!(world.resource::<EntityManager>().total(), 0, "parked projectiles are not live");
}

#[test]
fn pool_hit_reactivates_the_parked_entity_in_place() {
    let (mut world, t) = world();
    prewarm(&mut world, ProjectileKind::User, 1);
    let parked = world.resource::<ProjectilePools>().pool(ProjectileKind::User).available_len();
    assert_eq!(parked, 1);

    let at = Vec2::new(-400.0, 20.0);
    request(&mut world, ProjectileKind::User, at);
    run_system_once(&mut world, allocate_projectiles);

    let manager = world.resource::<EntityManager>();
    let live = manager.units(Category::UserProjectile).to_vec();
    assert_eq!(live.len(), 1);
    let e = live[0];

    let pools = world.resource::<ProjectilePools>();
    assert_eq!(pools.pool(ProjectileKind::User).available_len(), 0);
    assert_eq!(pools.pool(ProjectileKind::User).created(), 1, "no fresh spawn");

    assert_eq!(world.get::<Transform>(e).unwrap().translation.truncate(), at);
    assert_eq!(world.get::<Movement>(e).unwrap().velocity, Vec2::new(t.projectiles.user_speed, 0.0));
    assert!(world.get::<Hitbox>(e).unwrap().enabled);
    assert_eq!(world.get::<Hitbox>(e).unwrap().bounds().center(), at);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Visible);
    assert_eq!(world.get::<Actor>(e).unwrap().spawn_origin, at);

    let added = drain::<ActorAdded>(&mut world);
    assert_eq!(added, vec![ActorAdded { entity: e, kind: ActorKind::Projectile(ProjectileKind::User) }]);
}

#[test]
fn pool_miss_spawns_a_fresh_active_projectile() {
    let (mut world, t) = world();
    let at = Vec2::new(300.0, -10.0);
    request(&mut world, ProjectileKind::Boss, at);
    request(&mut world, ProjectileKind::Enemy, at);

    run_system_once(&mut world, allocate_projectiles);

    let manager = world.resource::<EntityManager>();
    assert_eq!(manager.len(Category::EnemyProjectile), 2);

    let pools = world.resource::<ProjectilePools>();
    assert_eq!(pools.pool(ProjectileKind::Boss).in_use_len(), 1);
    assert_eq!(pools.pool(ProjectileKind::Enemy).in_use_len(), 1);
    assert_eq!(pools.in_use(), 2);

    let boss_shot = world.resource::<EntityManager>().units(Category::EnemyProjectile)[0];
    assert_eq!(world.get::<PooledProjectile>(boss_shot).unwrap().kind, ProjectileKind::Boss);
    assert_eq!(world.get::<Movement>(boss_shot).unwrap().velocity, Vec2::new(-t.projectiles.boss_speed, 0.0));
    assert!(world.get::<Hitbox>(boss_shot).unwrap().enabled);
}

#[test]
fn profiles_send_user_shots_right_and_hostile_shots_left() {
    let t = Tunables::default().projectiles;
    assert!(pool::profile(&t, ProjectileKind::User).1.x > 0.0);
    assert!(pool::profile(&t, ProjectileKind::Enemy).1.x < 0.0);
    assert!(pool::profile(&t, ProjectileKind::Boss).1.x < 0.0);
    assert_eq!(pool::profile(&t, ProjectileKind::Boss).0, t.boss_size);
}

#[test]
fn deactivate_parks_a_spent_projectile() {
    let t = Tunables::default().projectiles;
    let mut actor = Actor::new(ActorKind::Projectile(ProjectileKind::User), t.user_size, Vec2::ZERO);
    let mut health = Health::new(1);
    let mut movement = Movement::new(Vec2::new(15.0, 0.0));
    let mut hitbox = Hitbox::for_actor(&actor);
    let mut vis = Visibility::Visible;
    actor.destroy(DestroyCause::Spent);
    health.take_damage(1);

    pool::deactivate(&mut actor, Some(&mut health), Some(&mut movement), Some(&mut hitbox), Some(&mut vis));

    assert!(!actor.is_destroyed());
    assert_eq!(health.current(), 1);
    assert_eq!(movement.velocity, Vec2::ZERO);
    assert!(!hitbox.enabled);
    assert_eq!(vis, Visibility::Hidden);
}

// -----------------------------------------------------------------------------
// Producers
// -----------------------------------------------------------------------------

#[test]
fn volleys_follow_fire_rate_and_rows() {
    let (mut world, t) = world();
    // Quarter-second ticks against 2 shots per second: fires every second tick.
    world.insert_resource(Time::<Fixed>::from_seconds(0.25));

    let player = spawn_live(&mut world, Category::Friendly, user_plane(&t, 5));
    {
        let mut shooter = world.get_mut::<Shooter>(player).unwrap();
        *shooter = Shooter::new(ProjectileKind::User, 2.0, Vec2::new(70.0, 0.0)).with_rows(2, 3, 20.0);
        shooter.start();
    }

    run_system_once(&mut world, request_volleys);
    assert!(drain::<SpawnProjectileRequest>(&mut world).is_empty());

    run_system_once(&mut world, request_volleys);
    let sent = drain::<SpawnProjectileRequest>(&mut world);
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|r| r.kind == ProjectileKind::User && r.owner == player));
    let origin = t.player.spawn + Vec2::new(70.0, 0.0);
    assert_eq!(sent[0].position, origin + Vec2::new(0.0, -20.0));
    assert_eq!(sent[1].position, origin);
}

#[test]
fn idle_or_destroyed_shooters_request_nothing() {
    let (mut world, t) = world();
    world.insert_resource(Time::<Fixed>::from_seconds(1.0));
    let idle = spawn_live(&mut world, Category::Friendly, user_plane(&t, 5));
    let dead = spawn_live(&mut world, Category::Friendly, user_plane(&t, 5));
    world.get_mut::<Shooter>(dead).unwrap().start();
    world.get_mut::<Actor>(dead).unwrap().destroy(DestroyCause::Rammed);

    run_system_once(&mut world, request_volleys);

    assert!(drain::<SpawnProjectileRequest>(&mut world).is_empty());
    assert!(!world.get::<Shooter>(idle).unwrap().is_firing());
}

#[test]
fn certain_fire_roll_fires_from_every_live_enemy_nose() {
    let t = Tunables {
        scout: EnemyTunables { fire_probability: 1.0, ..default() },
        ..default()
    };
    let mut world = sim_world(t.clone(), 3);
    let at = Vec2::new(500.0, 100.0);
    let scout = spawn_live(&mut world, Category::Enemy, enemy_plane(&t, EnemyVariant::Scout, at));
    let dead = spawn_live(&mut world, Category::Enemy, enemy_plane(&t, EnemyVariant::Scout, at));
    world.get_mut::<Actor>(dead).unwrap().destroy(DestroyCause::ShotDown);

    run_system_once(&mut world, generate_enemy_fire);

    let sent = drain::<SpawnProjectileRequest>(&mut world);
    assert_eq!(
        sent,
        vec![SpawnProjectileRequest {
            kind: ProjectileKind::Enemy,
            position: at - Vec2::new(t.scout.size.x * 0.5, 0.0),
            owner: scout,
        }]
    );
}

#[test]
fn zero_fire_probability_never_fires() {
    let t = Tunables {
        scout: EnemyTunables { fire_probability: 0.0, ..default() },
        ..default()
    };
    let mut world = sim_world(t.clone(), 3);
    spawn_live(&mut world, Category::Enemy, enemy_plane(&t, EnemyVariant::Scout, Vec2::ZERO));

    for _ in 0..50 {
        run_system_once(&mut world, generate_enemy_fire);
    }

    assert!(drain::<SpawnProjectileRequest>(&mut world).is_empty());
}
