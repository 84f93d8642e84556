//! Render plugin: the sprite collaborator.
//!
//! The simulation never touches sprites. This plugin listens to the entity lifecycle
//! messages and dresses entities with solid-color sprites sized from the actor's
//! logical size, so the project ships without assets.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::plugins::actors::{Actor, ActorKind, EnemyVariant, PickupKind, ProjectileKind};
use crate::plugins::boss::ShieldVisual;
use crate::plugins::entities::{ActorAdded, ActorRemoved, EntityManager};

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (attach_sprites, hide_removed, dress_shield_visuals));
}

pub fn color_for(kind: ActorKind) -> Color {
    match kind {
        ActorKind::UserPlane => Color::srgb(0.30, 0.65, 0.95),
        ActorKind::EnemyPlane(EnemyVariant::Scout) => Color::srgb(0.85, 0.35, 0.30),
        ActorKind::EnemyPlane(EnemyVariant::Gunship) => Color::srgb(0.65, 0.20, 0.45),
        ActorKind::Boss => Color::srgb(0.55, 0.10, 0.10),
        ActorKind::Projectile(ProjectileKind::User) => Color::srgb(1.0, 0.95, 0.55),
        ActorKind::Projectile(ProjectileKind::Enemy) => Color::srgb(1.0, 0.55, 0.25),
        ActorKind::Projectile(ProjectileKind::Boss) => Color::srgb(1.0, 0.25, 0.65),
        ActorKind::Pickup(PickupKind::HealthPack) => Color::srgb(0.35, 0.90, 0.45),
        ActorKind::Pickup(PickupKind::SpreadShot) => Color::srgb(0.95, 0.80, 0.20),
    }
}

/// Reused pooled projectiles are announced again; re-inserting the same sprite is harmless.
pub fn attach_sprites(mut commands: Commands, mut added: MessageReader<ActorAdded>, q: Query<&Actor>) {
    for msg in added.read() {
        let Ok(actor) = q.get(msg.entity) else { continue; };
        commands
            .entity(msg.entity)
            .try_insert(Sprite::from_color(color_for(msg.kind), actor.size));
    }
}

/// Hide whatever left play and is not back in it. A pooled projectile can be released
/// and reacquired between two frames; the pool owns its visibility while it is live.
pub fn hide_removed(
    mut commands: Commands,
    mut removed: MessageReader<ActorRemoved>,
    manager: Option<Res<EntityManager>>,
) {
    for msg in removed.read() {
        if manager.as_ref().is_some_and(|m| m.contains(msg.entity)) {
            continue;
        }
        if let Ok(mut entity) = commands.get_entity(msg.entity) {
            entity.try_insert(Visibility::Hidden);
        }
    }
}

pub fn dress_shield_visuals(mut commands: Commands, q: Query<(Entity, &ShieldVisual), Added<ShieldVisual>>) {
    for (e, shield) in &q {
        commands
            .entity(e)
            .try_insert(Sprite::from_color(Color::srgba(0.40, 0.80, 1.0, 0.35), shield.size));
    }
}
