//! Test helpers.
//!
//! Bevy provides `World::run_system_once` (via the `RunSystemOnce` trait) for quickly
//! executing a system in tests without building a full schedule.
//!
//! Systems that use `Commands` enqueue structural changes; applying them is normally
//! handled by `ApplyDeferred` / schedule boundaries. We call `world.flush()` after
//! running so queued commands are applied before assertions.

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;
use crate::plugins::actors::Category;
use crate::plugins::entities::{ActorAdded, ActorRemoved, EnemyDestroyed, EntityManager, HealthChanged};
use crate::plugins::player::PlayerIntent;
use crate::plugins::projectiles::{ProjectilePools, SpawnProjectileRequest};

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Bare world with every resource and message buffer the tick systems read.
pub fn sim_world(tunables: Tunables, seed: u64) -> World {
    let mut world = World::new();
    world.insert_resource(Time::<Fixed>::from_hz(tunables.tick_hz));
    world.insert_resource(tunables);
    world.insert_resource(GameRng::from_seed(seed));
    world.init_resource::<EntityManager>();
    world.init_resource::<ProjectilePools>();
    world.init_resource::<PlayerIntent>();
    world.init_resource::<Messages<ActorAdded>>();
    world.init_resource::<Messages<ActorRemoved>>();
    world.init_resource::<Messages<HealthChanged>>();
    world.init_resource::<Messages<EnemyDestroyed>>();
    world.init_resource::<Messages<SpawnProjectileRequest>>();
    world
}

/// Spawn `bundle` and register it in `category`.
pub fn spawn_live(world: &mut World, category: Category, bundle: impl Bundle) -> Entity {
    let e = world.spawn(bundle).id();
    world.resource_mut::<EntityManager>().add(category, e);
    e
}

/// Take every buffered message of type `M`.
pub fn drain<M: Message>(world: &mut World) -> Vec<M> {
    world.resource_mut::<Messages<M>>().drain().collect()
}
