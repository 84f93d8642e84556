//! Closed set of per-tick behaviors, selected when an actor is spawned.
//!
//! Projectiles and pickups carry no `Behavior`: they only move.

use bevy::prelude::*;

use crate::plugins::boss::BossBehavior;
use crate::plugins::player::PlayerBehavior;

use super::components::EnemyVariant;

#[derive(Component, Debug, Clone)]
pub enum Behavior {
    Player(PlayerBehavior),
    Scripted(ScriptedBehavior),
    Boss(BossBehavior),
}

impl Behavior {
    /// Shielded actors ignore all incoming damage.
    #[inline]
    pub fn is_shielded(&self) -> bool {
        match self {
            Self::Boss(boss) => boss.is_shielded(),
            Self::Player(_) | Self::Scripted(_) => false,
        }
    }
}

/// Straight-line enemy that fires on an independent per-tick roll.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedBehavior {
    pub variant: EnemyVariant,
    pub fire_probability: f32,
    pub projectile_offset: Vec2,
}
