//! Actor bundles.
//!
//! Every constructor takes its configuration explicitly (tunables, positions); nothing
//! reads global state. Callers spawn the bundle and register the entity with the
//! `EntityManager`.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;
use crate::plugins::boss::{BossBehavior, ShieldVisual};
use crate::plugins::player::PlayerBehavior;

use super::behavior::{Behavior, ScriptedBehavior};
use super::components::*;

/// Render depth per actor family. Simulation ignores z.
pub const Z_PICKUP: f32 = 1.0;
pub const Z_PLANE: f32 = 2.0;
pub const Z_SHIELD: f32 = 2.5;
pub const Z_PROJECTILE: f32 = 3.0;

fn placed(actor: &Actor, z: f32) -> (Transform, Hitbox) {
    let mut hitbox = Hitbox::for_actor(actor);
    hitbox.update_position(actor.spawn_origin);
    (Transform::from_translation(actor.spawn_origin.extend(z)), hitbox)
}

pub fn user_plane(tunables: &Tunables, health: u32) -> impl Bundle {
    let p = &tunables.player;
    let actor = Actor::new(ActorKind::UserPlane, p.size, p.spawn);
    let (transform, hitbox) = placed(&actor, Z_PLANE);
    let bounds = Rect::from_corners(p.bounds_min, p.bounds_max);

    (
        Name::new("UserPlane"),
        LevelScoped,
        actor,
        transform,
        hitbox,
        Movement::default(),
        Health::new(health),
        Shooter::new(ProjectileKind::User, p.fire_rate, p.projectile_offset).with_rows(
            1,
            p.max_bullet_rows,
            p.row_spacing,
        ),
        Behavior::Player(PlayerBehavior::new(p.speed, bounds, p.invulnerability_ticks)),
        Visibility::Visible,
    )
}

pub fn enemy_plane(tunables: &Tunables, variant: EnemyVariant, position: Vec2) -> impl Bundle {
    let stats = match variant {
        EnemyVariant::Scout => &tunables.scout,
        EnemyVariant::Gunship => &tunables.gunship,
    };
    let actor = Actor::new(ActorKind::EnemyPlane(variant), stats.size, position);
    let (transform, hitbox) = placed(&actor, Z_PLANE);

    (
        Name::new(format!("EnemyPlane({variant:?})")),
        LevelScoped,
        actor,
        transform,
        hitbox,
        Movement::new(Vec2::new(-stats.speed, 0.0)),
        Health::new(stats.health),
        Behavior::Scripted(ScriptedBehavior {
            variant,
            fire_probability: stats.fire_probability,
            // Fire from the nose (left edge).
            projectile_offset: Vec2::new(-stats.size.x * 0.5, 0.0),
        }),
        Visibility::Visible,
    )
}

/// Spawn the boss and its shield visual. Returns `(boss, shield_visual)`.
pub fn spawn_boss(commands: &mut Commands, tunables: &Tunables, rng: &mut GameRng) -> (Entity, Entity) {
    let b = &tunables.boss;
    let boss = commands.spawn_empty().id();

    let shield = commands
        .spawn((
            Name::new("BossShield"),
            LevelScoped,
            ShieldVisual { owner: boss, offset: b.shield_offset, size: b.shield_size },
            Transform::from_translation((b.spawn + b.shield_offset).extend(Z_SHIELD)),
            Visibility::Hidden,
        ))
        .id();

    let actor = Actor::new(ActorKind::Boss, b.size, b.spawn);
    let (transform, hitbox) = placed(&actor, Z_PLANE);

    commands.entity(boss).insert((
        Name::new("Boss"),
        LevelScoped,
        actor,
        transform,
        hitbox,
        Movement::default(),
        Health::new(b.health),
        Behavior::Boss(BossBehavior::new(b, rng).with_shield_visual(shield)),
        Visibility::Visible,
    ));

    (boss, shield)
}

pub fn pickup(tunables: &Tunables, kind: PickupKind, position: Vec2) -> impl Bundle {
    let p = &tunables.pickups;
    let actor = Actor::new(ActorKind::Pickup(kind), p.size, position);
    let (transform, hitbox) = placed(&actor, Z_PICKUP);

    (
        Name::new(format!("Pickup({kind:?})")),
        LevelScoped,
        actor,
        transform,
        hitbox,
        Movement::new(Vec2::new(-p.speed, 0.0)),
        Visibility::Visible,
    )
}
