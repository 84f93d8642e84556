//! Collision handler: pairwise AABB tests between live lists, then damage.
//!
//! ```text
//!   friendly   x enemy              ram: both sides take ram damage (Rammed)
//!   user proj. x enemy              enemy takes projectile damage (ShotDown),
//!                                   projectile is spent even against a shield
//!   enemy proj x friendly           friendly takes projectile damage (ShotDown)
//!   pickup     x friendly           pickup applies its effect (Collected)
//!   enemy      past the line        friendly takes penetration damage,
//!                                   enemy is destroyed (Penetrated)
//! ```
//!
//! Each pair is O(n·m) per tick. Fine for a few dozen live actors; there is no
//! spatial partitioning.
//!
//! A pair where either side is already destroyed is skipped, so one projectile
//! never hits two targets and a dead plane never rams.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::actors::{
    Actor, ActorKind, Behavior, Category, DamageOutcome, DestroyCause, Health, Hitbox, PickupKind, Shooter,
    apply_damage,
};
use crate::plugins::entities::EntityManager;
use crate::plugins::level::TickSet;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (sync_hitboxes, handle_collisions)
            .chain()
            .in_set(TickSet::Collide),
    );
}

/// Recompute every hitbox from its owner's position (after movement, before tests).
pub fn sync_hitboxes(mut q: Query<(&Transform, &mut Hitbox), With<Actor>>) {
    for (tf, mut hitbox) in &mut q {
        hitbox.update_position(tf.translation.truncate());
    }
}

type TargetQuery<'w> = (
    &'w mut Actor,
    &'w Transform,
    &'w mut Hitbox,
    Option<&'w mut Health>,
    Option<&'w mut Behavior>,
    Option<&'w mut Shooter>,
);

type Target<'w> = (
    Mut<'w, Actor>,
    &'w Transform,
    Mut<'w, Hitbox>,
    Option<Mut<'w, Health>>,
    Option<Mut<'w, Behavior>>,
    Option<Mut<'w, Shooter>>,
);

#[inline]
fn in_contact(a: &Target<'_>, b: &Target<'_>) -> bool {
    !a.0.is_destroyed() && !b.0.is_destroyed() && a.2.check_collision(&b.2)
}

/// Damage one side of a pair.
///
/// The shield is checked before `Health` is borrowed mutably, so a shielded hit
/// never registers as a health change. A player that survives a hit opens its
/// invulnerability window when `open_window` is set.
fn strike(t: &mut Target<'_>, amount: u32, cause: DestroyCause, open_window: bool) -> DamageOutcome {
    let (actor, _, hitbox, health, behavior, _) = t;
    if actor.is_destroyed() || behavior.as_deref().is_some_and(Behavior::is_shielded) {
        return DamageOutcome::Ignored;
    }

    let outcome = apply_damage(
        actor,
        health.as_mut().map(|h| &mut **h),
        behavior.as_deref(),
        amount,
        cause,
    );

    if open_window && outcome == DamageOutcome::Absorbed {
        if let Some(Behavior::Player(player)) = behavior.as_deref_mut() {
            player.begin_invulnerability(hitbox);
        }
    }
    outcome
}

pub fn handle_collisions(
    manager: Res<EntityManager>,
    tunables: Res<Tunables>,
    mut q: Query<TargetQuery<'static>>,
) {
    let ram = tunables.projectiles.ram_damage;
    let shot = tunables.projectiles.damage;

    // friendly x enemy
    for &f in manager.units(Category::Friendly) {
        for &e in manager.units(Category::Enemy) {
            let Ok([mut friendly, mut enemy]) = q.get_many_mut([f, e]) else { continue; };
            if !in_contact(&friendly, &enemy) {
                continue;
            }
            strike(&mut friendly, ram, DestroyCause::Rammed, true);
            strike(&mut enemy, ram, DestroyCause::Rammed, false);
        }
    }

    // user projectiles x enemy
    for &p in manager.units(Category::UserProjectile) {
        for &e in manager.units(Category::Enemy) {
            let Ok([mut projectile, mut enemy]) = q.get_many_mut([p, e]) else { continue; };
            if !in_contact(&projectile, &enemy) {
                continue;
            }
            strike(&mut enemy, shot, DestroyCause::ShotDown, false);
            spend(&mut projectile);
        }
    }

    // enemy projectiles x friendly
    for &p in manager.units(Category::EnemyProjectile) {
        for &f in manager.units(Category::Friendly) {
            let Ok([mut projectile, mut friendly]) = q.get_many_mut([p, f]) else { continue; };
            if !in_contact(&projectile, &friendly) {
                continue;
            }
            strike(&mut friendly, shot, DestroyCause::ShotDown, true);
            spend(&mut projectile);
        }
    }

    // pickups x friendly
    for &p in manager.units(Category::Pickup) {
        for &f in manager.units(Category::Friendly) {
            let Ok([mut pickup, mut friendly]) = q.get_many_mut([p, f]) else { continue; };
            if !in_contact(&pickup, &friendly) {
                continue;
            }
            let ActorKind::Pickup(kind) = pickup.0.kind else { continue; };
            collect(kind, &mut friendly, &tunables);
            pickup.0.destroy(DestroyCause::Collected);
        }
    }

    // penetration: enemies that travelled a full screen width from their spawn point
    let width = tunables.playfield.width;
    let penetration = tunables.player.penetration_damage;
    for &e in manager.units(Category::Enemy) {
        let crossed = q.get(e).is_ok_and(|(actor, tf, ..)| {
            !actor.is_destroyed() && (tf.translation.x - actor.spawn_origin.x).abs() > width
        });
        if !crossed {
            continue;
        }

        if let Ok(mut enemy) = q.get_mut(e) {
            enemy.0.destroy(DestroyCause::Penetrated);
        }
        debug!("enemy {e:?} penetrated the defense line");

        for &f in manager.units(Category::Friendly) {
            if let Ok(mut friendly) = q.get_mut(f) {
                strike(&mut friendly, penetration, DestroyCause::Depleted, false);
            }
        }
    }
}

/// Any contact uses a projectile up, shield or not.
fn spend(projectile: &mut Target<'_>) {
    if let Some(health) = projectile.3.as_mut() {
        let remaining = health.current();
        health.take_damage(remaining);
    }
    projectile.0.destroy(DestroyCause::Spent);
}

fn collect(kind: PickupKind, friendly: &mut Target<'_>, tunables: &Tunables) {
    match kind {
        PickupKind::HealthPack => {
            if let Some(health) = friendly.3.as_mut() {
                health.heal(tunables.pickups.heal_amount);
            }
        }
        PickupKind::SpreadShot => {
            if let Some(shooter) = friendly.5.as_mut() {
                shooter.add_row();
            }
        }
    }
    debug!("collected {kind:?}");
}
