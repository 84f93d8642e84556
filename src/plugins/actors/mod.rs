//! Actors: the simulated entities and their components.
//!
//! Everything alive in a level (planes, boss, projectiles, pickups) is one ECS
//! entity with an `Actor` component plus whichever of `Movement`, `Hitbox`,
//! `Health`, `Shooter`, `Behavior` its kind needs. There is no per-kind type
//! hierarchy; `ActorKind` + `Behavior` select the rules.

pub mod behavior;
pub mod components;
pub mod spawn;

pub use behavior::{Behavior, ScriptedBehavior};
pub use components::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already destroyed, or shielded.
    Ignored,
    /// Health dropped but stayed above zero.
    Absorbed,
    /// This hit destroyed the actor.
    Destroyed,
}

/// Apply `amount` damage to an actor.
///
/// - destroyed actors and shielded behaviors ignore damage (health is not touched);
/// - actors without `Health` are one-hit;
/// - the actor is destroyed exactly once, on the hit that depletes its health.
pub fn apply_damage(
    actor: &mut Actor,
    health: Option<&mut Health>,
    behavior: Option<&Behavior>,
    amount: u32,
    cause: DestroyCause,
) -> DamageOutcome {
    if actor.is_destroyed() || behavior.is_some_and(Behavior::is_shielded) {
        return DamageOutcome::Ignored;
    }

    let depleted = match health {
        Some(health) => {
            health.take_damage(amount);
            health.is_depleted()
        }
        None => true,
    };

    if depleted && actor.destroy(cause) {
        DamageOutcome::Destroyed
    } else {
        DamageOutcome::Absorbed
    }
}
