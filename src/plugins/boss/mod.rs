//! Boss AI: shuffled vertical move pattern + shield state machine.
//!
//! ```text
//!  move pattern   [+v, -v, 0] x frequency, shuffled
//!                 same index for `max_frames_with_same_move` ticks,
//!                 then reshuffle and advance (wraps)
//!
//!  shield         UNSHIELDED --(roll < p, per tick)--> SHIELDED{frames: 0}
//!                 SHIELDED{frames} --(frames == max)--> UNSHIELDED
//!                 frames only counts while SHIELDED
//! ```
//!
//! Moves that would leave `[min_y, max_y]` are rolled back, so the boss can stick at
//! an edge until the pattern turns it around.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tunables::BossTunables;
use crate::plugins::actors::{Behavior, Movement};
use crate::plugins::level::TickSet;

#[derive(Debug, Clone, PartialEq)]
pub struct MovePattern {
    moves: Vec<f32>,
    index: usize,
    frames_on_move: u32,
    max_frames_with_same_move: u32,
}

impl MovePattern {
    pub fn new(speed: f32, frequency: usize, max_frames_with_same_move: u32, rng: &mut GameRng) -> Self {
        let mut moves = Vec::with_capacity(frequency * 3);
        for _ in 0..frequency {
            moves.extend([speed, -speed, 0.0]);
        }
        rng.shuffle(&mut moves);
        Self::from_moves(moves, max_frames_with_same_move)
    }

    /// Unshuffled pattern, used as given until the first reshuffle.
    pub fn from_moves(moves: Vec<f32>, max_frames_with_same_move: u32) -> Self {
        Self {
            moves,
            index: 0,
            frames_on_move: 0,
            max_frames_with_same_move: max_frames_with_same_move.max(1),
        }
    }

    #[inline]
    pub fn moves(&self) -> &[f32] {
        &self.moves
    }

    /// Vertical displacement for this tick.
    pub fn next_move(&mut self, rng: &mut GameRng) -> f32 {
        let Some(&current) = self.moves.get(self.index) else {
            return 0.0;
        };

        self.frames_on_move += 1;
        if self.frames_on_move >= self.max_frames_with_same_move {
            rng.shuffle(&mut self.moves);
            self.frames_on_move = 0;
            self.index += 1;
        }
        if self.index >= self.moves.len() {
            self.index = 0;
        }
        current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShieldState {
    #[default]
    Unshielded,
    Shielded { frames: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldTransition {
    Activated,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shield {
    state: ShieldState,
    pub activation_probability: f32,
    pub max_frames: u32,
}

impl Shield {
    pub fn new(activation_probability: f32, max_frames: u32) -> Self {
        Self { state: ShieldState::Unshielded, activation_probability, max_frames }
    }

    #[inline]
    pub fn state(&self) -> ShieldState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.state, ShieldState::Shielded { .. })
    }

    /// One tick of the state machine. Returns the transition taken, if any.
    pub fn update(&mut self, rng: &mut GameRng) -> Option<ShieldTransition> {
        let mut transition = None;

        match &mut self.state {
            ShieldState::Shielded { frames } => *frames += 1,
            ShieldState::Unshielded => {
                if rng.chance(self.activation_probability) {
                    self.state = ShieldState::Shielded { frames: 0 };
                    transition = Some(ShieldTransition::Activated);
                }
            }
        }

        if let ShieldState::Shielded { frames } = self.state {
            if frames >= self.max_frames {
                self.state = ShieldState::Unshielded;
                transition = Some(ShieldTransition::Exhausted);
            }
        }

        transition
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossBehavior {
    pub pattern: MovePattern,
    pub shield: Shield,
    pub min_y: f32,
    pub max_y: f32,
    pub fire_probability: f32,
    pub projectile_offset: Vec2,
    /// Visual tracking entity, despawned together with the boss.
    pub shield_visual: Option<Entity>,
}

impl BossBehavior {
    pub fn new(t: &BossTunables, rng: &mut GameRng) -> Self {
        Self {
            pattern: MovePattern::new(
                t.vertical_speed,
                t.move_frequency_per_cycle,
                t.max_frames_with_same_move,
                rng,
            ),
            shield: Shield::new(t.shield_probability, t.max_frames_with_shield),
            min_y: t.min_y,
            max_y: t.max_y,
            fire_probability: t.fire_probability,
            projectile_offset: t.projectile_offset,
            shield_visual: None,
        }
    }

    pub fn with_shield_visual(mut self, visual: Entity) -> Self {
        self.shield_visual = Some(visual);
        self
    }

    #[inline]
    pub fn is_shielded(&self) -> bool {
        self.shield.is_active()
    }

    /// Take this tick's pattern step. A step that would leave `[min_y, max_y]`
    /// reverts the position to its pre-move value.
    pub fn update_position(&mut self, movement: &mut Movement, position: &mut Vec2, rng: &mut GameRng) {
        let before = *position;
        movement.set_velocity(0.0, self.pattern.next_move(rng));
        movement.step(position);
        if position.y < self.min_y || position.y > self.max_y {
            *position = before;
        }
    }

    pub fn update_shield(&mut self, rng: &mut GameRng) -> Option<ShieldTransition> {
        self.shield.update(rng)
    }
}

/// Shield sprite anchor. Tracks `owner + offset` every tick; visible while shielded.
#[derive(Component, Debug, Clone, Copy)]
pub struct ShieldVisual {
    pub owner: Entity,
    pub offset: Vec2,
    pub size: Vec2,
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        track_shield_visuals
            .in_set(TickSet::Act)
            .after(crate::plugins::entities::update_actors),
    );
}

pub fn track_shield_visuals(
    // Disjointness proof: shield visuals are never actors with a Behavior.
    mut q_visuals: Query<(&ShieldVisual, &mut Transform, &mut Visibility)>,
    q_owners: Query<(&Transform, &Behavior), Without<ShieldVisual>>,
) {
    for (visual, mut tf, mut vis) in &mut q_visuals {
        let Ok((owner_tf, behavior)) = q_owners.get(visual.owner) else {
            *vis = Visibility::Hidden;
            continue;
        };

        let anchor = owner_tf.translation.truncate() + visual.offset;
        tf.translation.x = anchor.x;
        tf.translation.y = anchor.y;

        *vis = if behavior.is_shielded() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
