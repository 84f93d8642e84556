//! Spawn consumer: activate projectiles from the pools.
//!
//! The allocator is the only system that acquires. A pool miss spawns a fresh
//! entity directly in the active state; a hit reactivates the parked entity in place.
//!
//! Invariant: every entity a pool hands out carries the pooled projectile components.
//! A violation is a bug; in release builds the request is dropped.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::invariant;
use crate::common::tunables::Tunables;
use crate::plugins::actors::{Actor, ActorKind, Hitbox, Movement};
use crate::plugins::entities::{ActorAdded, EntityManager};

use super::messages::SpawnProjectileRequest;
use super::pool::{ProjectilePools, PooledProjectile, activate, active_bundle};

pub fn allocate_projectiles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut pools: ResMut<ProjectilePools>,
    mut manager: ResMut<EntityManager>,
    mut reader: MessageReader<SpawnProjectileRequest>,
    mut added: MessageWriter<ActorAdded>,
    mut q: Query<
        (&mut Actor, &mut Transform, &mut Movement, &mut Hitbox, &mut Visibility),
        With<PooledProjectile>,
    >,
) {
    let t = &tunables.projectiles;

    for req in reader.read() {
        let mut missed = false;
        let e = pools.pool_mut(req.kind).acquire(|| {
            missed = true;
            commands.spawn(active_bundle(t, req.kind, req.position)).id()
        });

        if !missed {
            let Ok((mut actor, mut tf, mut movement, mut hitbox, mut vis)) = q.get_mut(e) else {
                invariant::violated(format!("{:?} pool handed out {e:?} without projectile components", req.kind));
                continue;
            };
            activate(t, req.kind, req.position, &mut actor, &mut tf, &mut movement, &mut hitbox, &mut vis);
        }

        if manager.add(req.kind.category(), e) {
            added.write(ActorAdded { entity: e, kind: ActorKind::Projectile(req.kind) });
        }
    }
}
