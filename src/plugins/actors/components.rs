//! Actor composition: one `Actor` identity plus optional per-concern components.
//!
//! ```text
//!  Actor      kind, logical size, spawn origin, destroyed flag
//!  Transform  position (x, y); z is render depth only
//!  Movement   per-tick displacement
//!  Hitbox     axis-aligned collision rect (size + offset), enable flag
//!  Health     current/max, clamped
//!  Shooter    rate-limited fire control (player)
//!  Behavior   closed set of per-tick behaviors (see `behavior.rs`)
//! ```

use bevy::prelude::*;

/// Which live list an actor belongs to. Exactly one per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Friendly,
    Enemy,
    UserProjectile,
    EnemyProjectile,
    Pickup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyVariant {
    Scout,
    Gunship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    User,
    Enemy,
    Boss,
}

impl ProjectileKind {
    pub const ALL: [Self; 3] = [Self::User, Self::Enemy, Self::Boss];

    #[inline]
    pub fn category(self) -> Category {
        match self {
            Self::User => Category::UserProjectile,
            Self::Enemy | Self::Boss => Category::EnemyProjectile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupKind {
    /// Restores player health.
    HealthPack,
    /// Adds one bullet row to the player's volley.
    SpreadShot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    UserPlane,
    EnemyPlane(EnemyVariant),
    Boss,
    Projectile(ProjectileKind),
    Pickup(PickupKind),
}

impl ActorKind {
    #[inline]
    pub fn category(self) -> Category {
        match self {
            Self::UserPlane => Category::Friendly,
            Self::EnemyPlane(_) | Self::Boss => Category::Enemy,
            Self::Projectile(kind) => kind.category(),
            Self::Pickup(_) => Category::Pickup,
        }
    }

    /// Beneficial actors collide regardless of either side's enable flag.
    #[inline]
    pub fn is_beneficial(self) -> bool {
        matches!(self, Self::Pickup(_))
    }

    /// Actors that are destroyed once they leave the playfield margin.
    #[inline]
    pub fn expires_offscreen(self) -> bool {
        matches!(self, Self::Projectile(_) | Self::Pickup(_))
    }
}

/// Why an actor was destroyed. Recorded once, on the first `destroy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyCause {
    /// Health depleted by a projectile.
    ShotDown,
    /// Health depleted by a plane-vs-plane collision.
    Rammed,
    /// Enemy crossed the defense line.
    Penetrated,
    /// Projectile consumed by a hit.
    Spent,
    /// Left the playfield.
    OutOfBounds,
    /// Pickup collected by the player.
    Collected,
    /// Health depleted by anything else (direct damage).
    Depleted,
}

impl DestroyCause {
    /// Destructions that count towards the kill tally.
    #[inline]
    pub fn is_kill(self) -> bool {
        matches!(self, Self::ShotDown | Self::Rammed)
    }
}

#[derive(Component, Debug, Clone)]
pub struct Actor {
    pub kind: ActorKind,
    /// Logical size. Source of truth for the default hitbox; never image pixels.
    pub size: Vec2,
    /// Position when spawned (or last activated from a pool).
    pub spawn_origin: Vec2,
    destroyed: Option<DestroyCause>,
}

impl Actor {
    pub fn new(kind: ActorKind, size: Vec2, spawn_origin: Vec2) -> Self {
        Self { kind, size, spawn_origin, destroyed: None }
    }

    /// Mark destroyed. Returns `true` only on the first call; later calls keep the
    /// original cause and have no effect.
    #[inline]
    pub fn destroy(&mut self, cause: DestroyCause) -> bool {
        if self.destroyed.is_some() {
            return false;
        }
        self.destroyed = Some(cause);
        true
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.is_some()
    }

    #[inline]
    pub fn destroy_cause(&self) -> Option<DestroyCause> {
        self.destroyed
    }

    /// Clear the destroyed flag. Pool reuse only; living actors never come back.
    #[inline]
    pub(crate) fn revive(&mut self) {
        self.destroyed = None;
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

/// Per-tick displacement. Zero velocity is a valid stationary state.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Movement {
    pub velocity: Vec2,
}

impl Movement {
    pub fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }

    /// Overwrite both components (no accumulation).
    #[inline]
    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.velocity = Vec2::new(vx, vy);
    }

    /// Apply one tick of displacement. No bounds checking.
    #[inline]
    pub fn step(&self, position: &mut Vec2) {
        *position += self.velocity;
    }
}

/// Axis-aligned collision rectangle, independent of visual size.
///
/// Invariant: `bounds` is recomputed with `update_position` after the owner moves and
/// before collision testing in the same tick.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    size: Vec2,
    offset: Vec2,
    pub enabled: bool,
    pub beneficial: bool,
    bounds: Rect,
}

impl Hitbox {
    pub fn new(size: Vec2, offset: Vec2) -> Self {
        Self {
            size,
            offset,
            enabled: true,
            beneficial: false,
            bounds: Rect::from_center_size(offset, size),
        }
    }

    /// Default hitbox derived from an actor's logical size, centered on its origin.
    pub fn for_actor(actor: &Actor) -> Self {
        Self {
            beneficial: actor.kind.is_beneficial(),
            ..Self::new(actor.size, Vec2::ZERO)
        }
    }

    /// Resize. Always recenters: the offset resets to zero.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.offset = Vec2::ZERO;
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Recompute the world-space rect from the owner's current position.
    #[inline]
    pub fn update_position(&mut self, owner: Vec2) {
        self.bounds = Rect::from_center_size(owner + self.offset, self.size);
    }

    /// Strict overlap on all four edges (touching does not count), gated by the enable
    /// flags unless either side is beneficial.
    pub fn check_collision(&self, other: &Hitbox) -> bool {
        let gate = (self.enabled && other.enabled) || self.beneficial || other.beneficial;
        if !gate {
            return false;
        }
        let (a, b) = (self.bounds, other.bounds);
        a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
    }
}

/// Current/max health. Invariant: `0 <= current <= max`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Subtract, saturating at zero. Returns `true` only for the call that takes
    /// health from positive to zero, so the owner is destroyed exactly once.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.current > 0;
        self.current = self.current.saturating_sub(amount);
        was_alive && self.current == 0
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Same contract as [`Health::take_damage`]: `true` means the caller must destroy the
    /// owner with [`DestroyCause::Depleted`].
    pub fn set_current(&mut self, value: u32) -> bool {
        let was_alive = self.current > 0;
        self.current = value.min(self.max);
        was_alive && self.current == 0
    }

    /// Lowering the max clamps the current value down with it. A max of zero depletes.
    pub fn set_max(&mut self, max: u32) -> bool {
        let was_alive = self.current > 0;
        self.max = max;
        self.current = self.current.min(max);
        was_alive && self.current == 0
    }

    /// Back to full. Pool reuse only.
    pub fn reset(&mut self) {
        self.current = self.max;
    }
}

/// Rate-limited fire control.
///
/// `update` accumulates time while firing and reports a volley once the accumulator
/// reaches `1 / fire_rate`, then resets it to zero (overshoot is dropped).
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Shooter {
    pub projectile: ProjectileKind,
    fire_rate: f32,
    since_last_shot: f32,
    firing: bool,
    /// Owner-relative spawn offset of the center row.
    pub offset: Vec2,
    bullet_rows: u32,
    max_rows: u32,
    pub row_spacing: f32,
}

impl Shooter {
    pub fn new(projectile: ProjectileKind, fire_rate: f32, offset: Vec2) -> Self {
        Self {
            projectile,
            fire_rate,
            since_last_shot: 0.0,
            firing: false,
            offset,
            bullet_rows: 1,
            max_rows: 1,
            row_spacing: 0.0,
        }
    }

    pub fn with_rows(mut self, rows: u32, max_rows: u32, row_spacing: f32) -> Self {
        self.max_rows = max_rows.max(1);
        self.bullet_rows = rows.clamp(1, self.max_rows);
        self.row_spacing = row_spacing;
        self
    }

    #[inline]
    pub fn is_firing(&self) -> bool {
        self.firing
    }

    #[inline]
    pub fn bullet_rows(&self) -> u32 {
        self.bullet_rows
    }

    #[inline]
    pub fn since_last_shot(&self) -> f32 {
        self.since_last_shot
    }

    pub fn start(&mut self) {
        self.firing = true;
    }

    /// Stop firing. The accumulator resets; nothing carries over to the next start.
    pub fn stop(&mut self) {
        self.firing = false;
        self.since_last_shot = 0.0;
    }

    pub fn set_firing(&mut self, firing: bool) {
        match (self.firing, firing) {
            (false, true) => self.start(),
            (true, false) => self.stop(),
            _ => {}
        }
    }

    /// Advance by `dt` seconds. Returns `true` when a volley should fire this tick.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.firing || self.fire_rate <= 0.0 {
            return false;
        }
        self.since_last_shot += dt;
        if self.since_last_shot >= 1.0 / self.fire_rate {
            self.since_last_shot = 0.0;
            return true;
        }
        false
    }

    /// Add one row, up to the cap. Returns whether the row count changed.
    pub fn add_row(&mut self) -> bool {
        if self.bullet_rows >= self.max_rows {
            return false;
        }
        self.bullet_rows += 1;
        true
    }

    /// Spawn positions for one volley: `owner + offset + (row - rows/2) * spacing`
    /// vertically (integer row math).
    pub fn volley_positions(&self, owner: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        let rows = self.bullet_rows as i32;
        (0..rows).map(move |row| {
            let shift = (row - rows / 2) as f32 * self.row_spacing;
            owner + self.offset + Vec2::new(0.0, shift)
        })
    }
}

/// Tags every entity that belongs to one level instance; teardown despawns them all.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelScoped;
