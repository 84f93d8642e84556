//! One `ObjectPool<Entity>` per projectile kind.
//!
//! Pooled projectile entities are never despawned during a level. Inactive ones keep
//! every component and are parked in the inactive state:
//! - hidden
//! - velocity = 0
//! - hitbox disabled
//! - not destroyed, health full
//!
//! `deactivate` is the only writer of that state; `activate` is the only way out of it.

use bevy::prelude::*;

use crate::common::pool::ObjectPool;
use crate::common::tunables::{ProjectileTunables, Tunables};
use crate::plugins::actors::spawn::Z_PROJECTILE;
use crate::plugins::actors::{Actor, ActorKind, Health, Hitbox, LevelScoped, Movement, ProjectileKind};

/// Marks an entity owned by `ProjectilePools`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PooledProjectile {
    pub kind: ProjectileKind,
}

#[derive(Resource, Debug, Default)]
pub struct ProjectilePools {
    user: ObjectPool<Entity>,
    enemy: ObjectPool<Entity>,
    boss: ObjectPool<Entity>,
}

impl ProjectilePools {
    pub fn pool(&self, kind: ProjectileKind) -> &ObjectPool<Entity> {
        match kind {
            ProjectileKind::User => &self.user,
            ProjectileKind::Enemy => &self.enemy,
            ProjectileKind::Boss => &self.boss,
        }
    }

    pub fn pool_mut(&mut self, kind: ProjectileKind) -> &mut ObjectPool<Entity> {
        match kind {
            ProjectileKind::User => &mut self.user,
            ProjectileKind::Enemy => &mut self.enemy,
            ProjectileKind::Boss => &mut self.boss,
        }
    }

    /// Projectiles currently attached to live lists, all kinds.
    pub fn in_use(&self) -> usize {
        ProjectileKind::ALL.iter().map(|k| self.pool(*k).in_use_len()).sum()
    }

    /// Spawn `count` inactive projectiles of `kind` and stock them.
    pub fn prewarm(&mut self, commands: &mut Commands, tunables: &Tunables, kind: ProjectileKind, count: usize) {
        let pool = self.pool_mut(kind);
        for _ in 0..count {
            let e = commands.spawn(inactive_bundle(&tunables.projectiles, kind)).id();
            if let Err(err) = pool.stock(e) {
                crate::common::invariant::violated(format!("prewarm {kind:?}: {err}"));
            }
        }
    }
}

/// Logical size and per-tick velocity for a kind. User shots fly right, hostile shots left.
pub fn profile(t: &ProjectileTunables, kind: ProjectileKind) -> (Vec2, Vec2) {
    match kind {
        ProjectileKind::User => (t.user_size, Vec2::new(t.user_speed, 0.0)),
        ProjectileKind::Enemy => (t.enemy_size, Vec2::new(-t.enemy_speed, 0.0)),
        ProjectileKind::Boss => (t.boss_size, Vec2::new(-t.boss_speed, 0.0)),
    }
}

fn bundle(t: &ProjectileTunables, kind: ProjectileKind, position: Vec2, active: bool) -> impl Bundle {
    let (size, velocity) = profile(t, kind);
    let actor = Actor::new(ActorKind::Projectile(kind), size, position);
    let mut hitbox = Hitbox::for_actor(&actor);
    hitbox.update_position(position);
    hitbox.enabled = active;

    (
        Name::new(format!("Projectile({kind:?})")),
        LevelScoped,
        PooledProjectile { kind },
        actor,
        Transform::from_translation(position.extend(Z_PROJECTILE)),
        Movement::new(if active { velocity } else { Vec2::ZERO }),
        hitbox,
        Health::new(1),
        if active { Visibility::Visible } else { Visibility::Hidden },
    )
}

pub fn inactive_bundle(t: &ProjectileTunables, kind: ProjectileKind) -> impl Bundle {
    bundle(t, kind, Vec2::ZERO, false)
}

/// Fresh entity for a pool miss; spawned straight into the active state.
pub fn active_bundle(t: &ProjectileTunables, kind: ProjectileKind, position: Vec2) -> impl Bundle {
    bundle(t, kind, position, true)
}

/// Bring a parked projectile back into play at `position`.
#[allow(clippy::too_many_arguments)]
pub fn activate(
    t: &ProjectileTunables,
    kind: ProjectileKind,
    position: Vec2,
    actor: &mut Actor,
    transform: &mut Transform,
    movement: &mut Movement,
    hitbox: &mut Hitbox,
    visibility: &mut Visibility,
) {
    let (_, velocity) = profile(t, kind);
    actor.spawn_origin = position;
    transform.translation = position.extend(Z_PROJECTILE);
    movement.velocity = velocity;
    hitbox.enabled = true;
    hitbox.update_position(position);
    *visibility = Visibility::Visible;
}

/// Reset routine handed to `ObjectPool::release`.
pub fn deactivate(
    actor: &mut Actor,
    health: Option<&mut Health>,
    movement: Option<&mut Movement>,
    hitbox: Option<&mut Hitbox>,
    visibility: Option<&mut Visibility>,
) {
    actor.revive();
    if let Some(health) = health {
        health.reset();
    }
    if let Some(movement) = movement {
        movement.velocity = Vec2::ZERO;
    }
    if let Some(hitbox) = hitbox {
        hitbox.enabled = false;
    }
    if let Some(visibility) = visibility {
        *visibility = Visibility::Hidden;
    }
}
