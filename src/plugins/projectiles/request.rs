//! Producers: decide who fires this tick and write `SpawnProjectileRequest`s.
//!
//! Neither system touches `ProjectilePools`.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::plugins::actors::{Actor, Behavior, Category, ProjectileKind, Shooter};
use crate::plugins::entities::EntityManager;

use super::messages::SpawnProjectileRequest;

/// Rate-limited volleys from every friendly `Shooter`.
pub fn request_volleys(
    manager: Res<EntityManager>,
    time: Res<Time<Fixed>>,
    mut q: Query<(&Actor, &Transform, &mut Shooter)>,
    mut writer: MessageWriter<SpawnProjectileRequest>,
) {
    let dt = time.timestep().as_secs_f32();

    for &e in manager.units(Category::Friendly) {
        let Ok((actor, tf, mut shooter)) = q.get_mut(e) else { continue; };
        if actor.is_destroyed() || !shooter.update(dt) {
            continue;
        }

        let owner = tf.translation.truncate();
        let kind = shooter.projectile;
        for position in shooter.volley_positions(owner) {
            writer.write(SpawnProjectileRequest { kind, position, owner: e });
        }
    }
}

/// Independent per-tick Bernoulli fire roll for every live enemy.
pub fn generate_enemy_fire(
    manager: Res<EntityManager>,
    mut rng: ResMut<GameRng>,
    q: Query<(&Actor, &Transform, &Behavior)>,
    mut writer: MessageWriter<SpawnProjectileRequest>,
) {
    for &e in manager.units(Category::Enemy) {
        let Ok((actor, tf, behavior)) = q.get(e) else { continue; };
        if actor.is_destroyed() {
            continue;
        }

        let (kind, probability, offset) = match behavior {
            Behavior::Scripted(s) => (ProjectileKind::Enemy, s.fire_probability, s.projectile_offset),
            Behavior::Boss(b) => (ProjectileKind::Boss, b.fire_probability, b.projectile_offset),
            Behavior::Player(_) => continue,
        };

        if rng.chance(probability) {
            writer.write(SpawnProjectileRequest {
                kind,
                position: tf.translation.truncate() + offset,
                owner: e,
            });
        }
    }
}
