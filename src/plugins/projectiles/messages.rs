//! Buffered spawn requests.
//!
//! Producers (the player's shooter, enemy and boss fire rolls) only write intent.
//! The allocator is the single consumer that touches the pools on acquire.

use bevy::prelude::*;

use crate::plugins::actors::ProjectileKind;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub kind: ProjectileKind,
    /// World position of the projectile's origin.
    pub position: Vec2,
    pub owner: Entity,
}
