//! Tunable gameplay constants.
//!
//! Units: world units (pixels) and ticks. Velocities are per-tick displacements.
//! The playfield is centered on the origin with +y up.
//!
//! Every section is `#[serde(default)]`, so a partial `tunables.toml` only overrides
//! the keys it names.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tunables: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tunables: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Simulation ticks per second.
    pub tick_hz: f64,
    /// Fixed RNG seed for deterministic replays. `None` draws from entropy.
    pub seed: Option<u64>,
    pub playfield: PlayfieldTunables,
    pub player: PlayerTunables,
    pub scout: EnemyTunables,
    pub gunship: EnemyTunables,
    pub boss: BossTunables,
    pub projectiles: ProjectileTunables,
    pub pickups: PickupTunables,
    pub levels: LevelTunables,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            tick_hz: 20.0,
            seed: None,
            playfield: PlayfieldTunables::default(),
            player: PlayerTunables::default(),
            scout: EnemyTunables::default(),
            gunship: EnemyTunables {
                size: Vec2::new(130.0, 64.0),
                health: 3,
                speed: 3.0,
                fire_probability: 0.02,
            },
            boss: BossTunables::default(),
            projectiles: ProjectileTunables::default(),
            pickups: PickupTunables::default(),
            levels: LevelTunables::default(),
        }
    }
}

impl Tunables {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayfieldTunables {
    pub width: f32,
    pub height: f32,
    /// Extra room outside the visible field before a projectile/pickup expires.
    pub despawn_margin: f32,
}

impl Default for PlayfieldTunables {
    fn default() -> Self {
        Self { width: 1300.0, height: 750.0, despawn_margin: 150.0 }
    }
}

impl PlayfieldTunables {
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Visible field.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Field grown by `despawn_margin` on every side.
    #[inline]
    pub fn expiry_rect(&self) -> Rect {
        self.rect().inflate(self.despawn_margin)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTunables {
    pub size: Vec2,
    pub health: u32,
    pub speed: f32,
    pub spawn: Vec2,
    /// Area the player's origin may occupy; moves leaving it are rolled back.
    pub bounds_min: Vec2,
    pub bounds_max: Vec2,
    pub fire_rate: f32,
    pub projectile_offset: Vec2,
    pub row_spacing: f32,
    pub max_bullet_rows: u32,
    pub invulnerability_ticks: u32,
    /// Damage taken when an enemy crosses the defense line. Ignores invulnerability.
    pub penetration_damage: u32,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self {
            size: Vec2::new(120.0, 40.0),
            health: 5,
            speed: 8.0,
            spawn: Vec2::new(-545.0, 0.0),
            bounds_min: Vec2::new(-590.0, -335.0),
            bounds_max: Vec2::new(0.0, 335.0),
            fire_rate: 5.0,
            projectile_offset: Vec2::new(70.0, 0.0),
            row_spacing: 20.0,
            max_bullet_rows: 3,
            invulnerability_ticks: 20,
            penetration_damage: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyTunables {
    pub size: Vec2,
    pub health: u32,
    /// Leftward displacement per tick.
    pub speed: f32,
    pub fire_probability: f32,
}

impl Default for EnemyTunables {
    fn default() -> Self {
        Self {
            size: Vec2::new(110.0, 54.0),
            health: 1,
            speed: 6.0,
            fire_probability: 0.01,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossTunables {
    pub size: Vec2,
    pub health: u32,
    pub spawn: Vec2,
    pub vertical_speed: f32,
    /// Each of {+v, -v, 0} appears this many times in the move pattern.
    pub move_frequency_per_cycle: usize,
    pub max_frames_with_same_move: u32,
    pub min_y: f32,
    pub max_y: f32,
    pub fire_probability: f32,
    pub projectile_offset: Vec2,
    pub shield_probability: f32,
    pub max_frames_with_shield: u32,
    pub shield_offset: Vec2,
    pub shield_size: Vec2,
}

impl Default for BossTunables {
    fn default() -> Self {
        Self {
            size: Vec2::new(300.0, 110.0),
            health: 100,
            spawn: Vec2::new(400.0, 0.0),
            vertical_speed: 8.0,
            move_frequency_per_cycle: 5,
            max_frames_with_same_move: 10,
            min_y: -300.0,
            max_y: 300.0,
            fire_probability: 0.04,
            projectile_offset: Vec2::new(-150.0, -20.0),
            shield_probability: 0.002,
            max_frames_with_shield: 500,
            shield_offset: Vec2::new(-110.0, 0.0),
            shield_size: Vec2::new(200.0, 200.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectileTunables {
    pub user_speed: f32,
    pub enemy_speed: f32,
    pub boss_speed: f32,
    pub user_size: Vec2,
    pub enemy_size: Vec2,
    pub boss_size: Vec2,
    pub damage: u32,
    /// Inactive user projectiles spawned when a level is constructed.
    pub prewarm: usize,
    /// Damage each side takes from a plane-vs-plane collision.
    pub ram_damage: u32,
}

impl Default for ProjectileTunables {
    fn default() -> Self {
        Self {
            user_speed: 15.0,
            enemy_speed: 10.0,
            boss_speed: 15.0,
            user_size: Vec2::new(40.0, 10.0),
            enemy_size: Vec2::new(30.0, 12.0),
            boss_size: Vec2::new(50.0, 24.0),
            damage: 1,
            prewarm: 32,
            ram_damage: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickupTunables {
    pub size: Vec2,
    pub speed: f32,
    pub heal_amount: u32,
}

impl Default for PickupTunables {
    fn default() -> Self {
        Self { size: Vec2::new(36.0, 36.0), speed: 4.0, heal_amount: 1 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LevelTunables {
    pub level_one_kills: u32,
    pub level_one_max_enemies: usize,
    pub level_one_spawn_probability: f32,
    pub level_two_kills: u32,
    pub level_two_max_enemies: usize,
    pub level_two_spawn_probability: f32,
    /// Chance per tick that a gunship replaces a scout in level two.
    pub level_two_gunship_share: f32,
    pub pickup_probability: f32,
}

impl Default for LevelTunables {
    fn default() -> Self {
        Self {
            level_one_kills: 10,
            level_one_max_enemies: 5,
            level_one_spawn_probability: 0.20,
            level_two_kills: 15,
            level_two_max_enemies: 7,
            level_two_spawn_probability: 0.25,
            level_two_gunship_share: 0.35,
            pickup_probability: 0.004,
        }
    }
}
