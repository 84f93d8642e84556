//! Notifications for the render/score collaborators.
//!
//! All are written inside the fixed tick and drained by whoever listens; the
//! simulation never reads them back.

use bevy::prelude::*;

use crate::plugins::actors::{ActorKind, DestroyCause};

/// An actor joined a live list (spawned, or activated from a pool).
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorAdded {
    pub entity: Entity,
    pub kind: ActorKind,
}

/// An actor left its live list. The entity may already be despawned or parked in a pool.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorRemoved {
    pub entity: Entity,
    pub kind: ActorKind,
}

/// Health-bar push. Written once per tick for each actor whose health changed.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: u32,
    pub max: u32,
}

/// Exactly once per destroyed enemy, whatever destroyed it.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyDestroyed {
    pub entity: Entity,
    pub kind: ActorKind,
    pub cause: DestroyCause,
}
