//! Entity manager: per-category live lists plus the per-tick update and cleanup passes.
//!
//! ---------------------------
//! LIVE LISTS
//! ---------------------------
//! Every actor in play sits in exactly one ordered list, picked by its `Category`:
//!
//! ```text
//!   friendly  enemy  user_projectiles  enemy_projectiles  pickups
//! ```
//!
//! Systems walk the lists (not raw queries) so iteration order is the insertion
//! order, identical between runs with the same seed.
//!
//! ---------------------------
//! PER TICK
//! ---------------------------
//! - Act:     `update_actors` moves every actor (behavior first), expires projectiles
//!            and pickups that leave the playfield margin.
//! - Cleanup: `publish_health_changes`, then `remove_destroyed_actors` detaches
//!            destroyed actors, releases pooled ones and despawns the rest.

pub mod messages;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::common::invariant;
use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;
use crate::plugins::actors::{Actor, Behavior, Category, DestroyCause, Health, Hitbox, Movement, Shooter};
use crate::plugins::level::TickSet;
use crate::plugins::player::PlayerIntent;
use crate::plugins::projectiles::{PooledProjectile, ProjectilePools, pool};

pub use messages::{ActorAdded, ActorRemoved, EnemyDestroyed, HealthChanged};

#[derive(Resource, Debug, Default)]
pub struct EntityManager {
    friendly: Vec<Entity>,
    enemy: Vec<Entity>,
    user_projectiles: Vec<Entity>,
    enemy_projectiles: Vec<Entity>,
    pickups: Vec<Entity>,
}

impl EntityManager {
    /// Category order for every per-tick pass.
    pub const UPDATE_ORDER: [Category; 5] = [
        Category::Friendly,
        Category::Enemy,
        Category::UserProjectile,
        Category::EnemyProjectile,
        Category::Pickup,
    ];

    fn list(&self, category: Category) -> &Vec<Entity> {
        match category {
            Category::Friendly => &self.friendly,
            Category::Enemy => &self.enemy,
            Category::UserProjectile => &self.user_projectiles,
            Category::EnemyProjectile => &self.enemy_projectiles,
            Category::Pickup => &self.pickups,
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<Entity> {
        match category {
            Category::Friendly => &mut self.friendly,
            Category::Enemy => &mut self.enemy,
            Category::UserProjectile => &mut self.user_projectiles,
            Category::EnemyProjectile => &mut self.enemy_projectiles,
            Category::Pickup => &mut self.pickups,
        }
    }

    /// Append to a list. An entity already tracked anywhere is an invariant violation
    /// and is not added twice.
    pub fn add(&mut self, category: Category, e: Entity) -> bool {
        if let Some(existing) = self.category_of(e) {
            invariant::violated(format!("{e:?} added to {category:?} while already in {existing:?}"));
            return false;
        }
        self.list_mut(category).push(e);
        true
    }

    /// Remove from a list, keeping the order of the rest. Returns whether it was there.
    pub fn remove(&mut self, category: Category, e: Entity) -> bool {
        let list = self.list_mut(category);
        match list.iter().position(|x| *x == e) {
            Some(i) => {
                list.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn units(&self, category: Category) -> &[Entity] {
        self.list(category)
    }

    #[inline]
    pub fn len(&self, category: Category) -> usize {
        self.list(category).len()
    }

    pub fn total(&self) -> usize {
        Self::UPDATE_ORDER.iter().map(|c| self.len(*c)).sum()
    }

    pub fn category_of(&self, e: Entity) -> Option<Category> {
        Self::UPDATE_ORDER
            .into_iter()
            .find(|c| self.list(*c).contains(&e))
    }

    #[inline]
    pub fn contains(&self, e: Entity) -> bool {
        self.category_of(e).is_some()
    }

    /// All live entities in update order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        Self::UPDATE_ORDER
            .into_iter()
            .flat_map(|c| self.list(c).iter().copied())
    }

    /// Move every entity matching `pred` out of `category` into `out`, keeping the
    /// relative order of both halves.
    pub fn extract_where(
        &mut self,
        category: Category,
        mut pred: impl FnMut(Entity) -> bool,
        out: &mut Vec<Entity>,
    ) {
        self.list_mut(category).retain(|e| {
            if pred(*e) {
                out.push(*e);
                false
            } else {
                true
            }
        });
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<EntityManager>()
        .add_message::<ActorAdded>()
        .add_message::<ActorRemoved>()
        .add_message::<HealthChanged>()
        .add_message::<EnemyDestroyed>();

    app.add_systems(FixedUpdate, update_actors.in_set(TickSet::Act))
        .add_systems(
            FixedUpdate,
            (publish_health_changes, remove_destroyed_actors)
                .chain()
                .in_set(TickSet::Cleanup),
        );
}

// -----------------------------------------------------------------------------
// Update
// -----------------------------------------------------------------------------

type ActorQuery<'w> = (
    &'w mut Actor,
    &'w mut Transform,
    Option<&'w mut Movement>,
    Option<&'w mut Behavior>,
    Option<&'w mut Hitbox>,
    Option<&'w mut Shooter>,
);

/// One tick of movement and behavior for every live actor, in list order.
pub fn update_actors(
    manager: Res<EntityManager>,
    tunables: Res<Tunables>,
    intent: Res<PlayerIntent>,
    mut rng: ResMut<GameRng>,
    mut q: Query<ActorQuery<'static>>,
    mut order: Local<Vec<Entity>>,
) {
    let expiry = tunables.playfield.expiry_rect();

    order.clear();
    order.extend(manager.iter());

    for &e in order.iter() {
        let Ok((mut actor, mut tf, mut movement, mut behavior, mut hitbox, mut shooter)) = q.get_mut(e) else {
            invariant::violated(format!("live list references {e:?}, which has no actor"));
            continue;
        };
        if actor.is_destroyed() {
            continue;
        }

        let mut pos = tf.translation.truncate();

        match behavior.as_deref_mut() {
            Some(Behavior::Player(player)) => {
                if let Some(movement) = movement.as_deref_mut() {
                    player.steer(&intent, movement);
                    player.update_position(movement, &mut pos);
                }
                if let Some(hitbox) = hitbox.as_deref_mut() {
                    player.tick_invulnerability(hitbox);
                }
                if let Some(shooter) = shooter.as_deref_mut() {
                    shooter.set_firing(intent.fire);
                }
            }
            Some(Behavior::Boss(boss)) => {
                if let Some(movement) = movement.as_deref_mut() {
                    boss.update_position(movement, &mut pos, &mut rng);
                }
                if let Some(transition) = boss.update_shield(&mut rng) {
                    debug!("boss {e:?} shield {transition:?}");
                }
            }
            Some(Behavior::Scripted(_)) | None => {
                if let Some(movement) = movement.as_deref() {
                    movement.step(&mut pos);
                }
            }
        }

        tf.translation.x = pos.x;
        tf.translation.y = pos.y;

        if actor.kind.expires_offscreen() && !expiry.contains(pos) {
            actor.destroy(DestroyCause::OutOfBounds);
        }
    }
}

// -----------------------------------------------------------------------------
// Cleanup
// -----------------------------------------------------------------------------

/// Health-bar pushes. Pooled projectiles are excluded: their health is an
/// implementation detail of "one hit destroys".
pub fn publish_health_changes(
    q: Query<(Entity, &Health), (Changed<Health>, Without<PooledProjectile>)>,
    mut writer: MessageWriter<HealthChanged>,
) {
    for (entity, health) in &q {
        writer.write(HealthChanged { entity, current: health.current(), max: health.max() });
    }
}

type CleanupQuery<'w> = (
    &'w mut Actor,
    Option<&'w PooledProjectile>,
    Option<&'w Behavior>,
    Option<&'w mut Health>,
    Option<&'w mut Movement>,
    Option<&'w mut Hitbox>,
    Option<&'w mut Visibility>,
);

/// Detach destroyed actors from their lists.
///
/// - every removal writes `ActorRemoved`;
/// - destroyed enemies additionally write `EnemyDestroyed`, once;
/// - pooled projectiles go back to their pool through `pool::deactivate`;
/// - everything else is despawned (a boss takes its shield visual with it).
pub fn remove_destroyed_actors(
    mut commands: Commands,
    mut manager: ResMut<EntityManager>,
    mut pools: ResMut<ProjectilePools>,
    mut q: Query<CleanupQuery<'static>>,
    mut removed: MessageWriter<ActorRemoved>,
    mut destroyed: MessageWriter<EnemyDestroyed>,
    mut buf: Local<Vec<Entity>>,
) {
    for category in EntityManager::UPDATE_ORDER {
        buf.clear();
        manager.extract_where(
            category,
            |e| q.get(e).map_or(true, |(actor, ..)| actor.is_destroyed()),
            &mut buf,
        );

        for &e in buf.iter() {
            let Ok((mut actor, pooled, behavior, health, movement, hitbox, visibility)) = q.get_mut(e) else {
                // Despawned behind the manager's back; nothing left to notify about.
                continue;
            };

            let kind = actor.kind;
            removed.write(ActorRemoved { entity: e, kind });
            if category == Category::Enemy {
                let cause = actor.destroy_cause().unwrap_or(DestroyCause::Depleted);
                destroyed.write(EnemyDestroyed { entity: e, kind, cause });
            }

            match pooled {
                Some(pooled) => {
                    let released = pools.pool_mut(pooled.kind).release(e, |_| {
                        pool::deactivate(
                            &mut actor,
                            health.map(Mut::into_inner),
                            movement.map(Mut::into_inner),
                            hitbox.map(Mut::into_inner),
                            visibility.map(Mut::into_inner),
                        );
                    });
                    if let Err(err) = released {
                        invariant::violated(format!("release {e:?} to {:?} pool: {err}", pooled.kind));
                    }
                }
                None => {
                    if let Some(Behavior::Boss(boss)) = behavior {
                        if let Some(visual) = boss.shield_visual {
                            commands.entity(visual).try_despawn();
                        }
                    }
                    commands.entity(e).despawn();
                }
            }
        }
    }
}
