//! Level registry: level identifiers mapped to their configuration.
//!
//! Adding a level means adding a `LevelId` variant and its arm in `config`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::common::tunables::Tunables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelId {
    One,
    Two,
    Three,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown level `{0}`")]
pub struct UnknownLevel(pub String);

impl LevelId {
    pub const FIRST: Self = Self::One;
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    pub fn name(self) -> &'static str {
        match self {
            Self::One => "LevelOne",
            Self::Two => "LevelTwo",
            Self::Three => "LevelThree",
        }
    }

    /// The level that follows a win, if any. `None` means the game is won.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::One => Some(Self::Two),
            Self::Two => Some(Self::Three),
            Self::Three => None,
        }
    }

    pub fn config(self, t: &Tunables) -> LevelConfig {
        let l = &t.levels;
        let (spawn_policy, win_condition) = match self {
            Self::One => (
                SpawnPolicy::Squadron {
                    max_enemies: l.level_one_max_enemies,
                    spawn_probability: l.level_one_spawn_probability,
                    gunship_share: 0.0,
                },
                WinCondition::KillCount(l.level_one_kills),
            ),
            Self::Two => (
                SpawnPolicy::Squadron {
                    max_enemies: l.level_two_max_enemies,
                    spawn_probability: l.level_two_spawn_probability,
                    gunship_share: l.level_two_gunship_share,
                },
                WinCondition::KillCount(l.level_two_kills),
            ),
            Self::Three => (SpawnPolicy::Boss, WinCondition::BossDefeated),
        };

        LevelConfig {
            spawn_policy,
            win_condition,
            player_health: t.player.health,
            pickup_probability: l.pickup_probability,
        }
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LevelId {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLevel(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnPolicy {
    /// Per tick, one roll per free slot under `max_enemies`. Each spawn is a
    /// gunship with probability `gunship_share`, a scout otherwise.
    Squadron {
        max_enemies: usize,
        spawn_probability: f32,
        gunship_share: f32,
    },
    /// The boss is placed at construction; nothing spawns afterwards.
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinCondition {
    KillCount(u32),
    BossDefeated,
}

impl WinCondition {
    #[inline]
    pub fn is_met(self, kills: u32, boss_defeated: bool) -> bool {
        match self {
            Self::KillCount(target) => kills >= target,
            Self::BossDefeated => boss_defeated,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub spawn_policy: SpawnPolicy,
    pub win_condition: WinCondition,
    pub player_health: u32,
    /// Chance per tick of a pickup drifting in from the right edge.
    pub pickup_probability: f32,
}
