//! Projectiles plugin: message-based producer → consumer spawning over per-kind pools.
//!
//! # Data flow (one tick)
//! ```text
//!   TickSet::Fire
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  request_volleys        friendly Shooters, rate-limited              │
//! │  generate_enemy_fire    per-enemy Bernoulli roll (scripted + boss)   │
//! │      - writes: SpawnProjectileRequest                                │
//! └──────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   TickSet::Allocate
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  allocate_projectiles                                                │
//! │      - reads: SpawnProjectileRequest                                 │
//! │      - mutates: ProjectilePools (acquire), EntityManager (add)       │
//! │      - writes: ActorAdded                                            │
//! └──────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   TickSet::Collide      projectiles hit and are destroyed (Spent)
//!   TickSet::Act (next)   projectiles past the playfield margin: OutOfBounds
//!                │
//!                v
//!   TickSet::Cleanup
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  remove_destroyed_actors (entities plugin)                           │
//! │      - mutates: EntityManager (remove), ProjectilePools (release)    │
//! └──────────────────────────────────────────────────────────────────────┘
//!
//! Feedback loop:
//!   cleanup releases into ObjectPool::available
//!   allocator acquires from ObjectPool::available
//! ```
//!
//! Producers never borrow `ProjectilePools`. The allocator is the single writer on
//! acquire and cleanup the single writer on release, so pool mutation stays local.

pub mod allocator;
pub mod messages;
pub mod pool;
pub mod request;

use bevy::prelude::*;

use crate::plugins::level::TickSet;

pub use messages::SpawnProjectileRequest;
pub use pool::{PooledProjectile, ProjectilePools};

pub fn plugin(app: &mut App) {
    app.init_resource::<ProjectilePools>()
        .add_message::<SpawnProjectileRequest>();

    app.add_systems(
        FixedUpdate,
        (request::request_volleys, request::generate_enemy_fire)
            .chain()
            .in_set(TickSet::Fire),
    )
    .add_systems(
        FixedUpdate,
        allocator::allocate_projectiles.in_set(TickSet::Allocate),
    );
}

#[cfg(test)]
mod tests;
