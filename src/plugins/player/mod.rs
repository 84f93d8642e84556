//! Player plugin.
//!
//! Pipeline:
//! - Update: sample keyboard state into the `PlayerIntent` resource (when an input
//!   backend exists; headless apps set the resource directly)
//! - FixedUpdate: `update_actors` steers the user plane from the intent once per tick
//!
//! The simulation never sees key events, only the already-debounced intent.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::plugins::actors::{Hitbox, Movement};
use crate::plugins::level::messages::LevelCommand;

/// One axis of movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisIntent {
    Negative,
    #[default]
    Idle,
    Positive,
}

impl AxisIntent {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Idle => 0.0,
            Self::Positive => 1.0,
        }
    }

    fn from_keys(negative: bool, positive: bool) -> Self {
        match (negative, positive) {
            (true, false) => Self::Negative,
            (false, true) => Self::Positive,
            _ => Self::Idle,
        }
    }
}

/// Player commands for the next tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub vertical: AxisIntent,
    pub horizontal: AxisIntent,
    pub fire: bool,
}

impl PlayerIntent {
    pub fn move_up(&mut self) {
        self.vertical = AxisIntent::Positive;
    }

    pub fn move_down(&mut self) {
        self.vertical = AxisIntent::Negative;
    }

    pub fn move_left(&mut self) {
        self.horizontal = AxisIntent::Negative;
    }

    pub fn move_right(&mut self) {
        self.horizontal = AxisIntent::Positive;
    }

    pub fn stop_vertical(&mut self) {
        self.vertical = AxisIntent::Idle;
    }

    pub fn stop_horizontal(&mut self) {
        self.horizontal = AxisIntent::Idle;
    }
}

/// Per-tick rules for the user plane: steering, bounds rollback, invulnerability.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBehavior {
    pub speed: f32,
    /// Area the plane's origin may occupy.
    pub bounds: Rect,
    invulnerability_window: u32,
    /// Covered collision passes left; `Some(0)` while the last one runs. `None` when vulnerable.
    invulnerable_ticks: Option<u32>,
}

impl PlayerBehavior {
    pub fn new(speed: f32, bounds: Rect, invulnerability_window: u32) -> Self {
        Self { speed, bounds, invulnerability_window, invulnerable_ticks: None }
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks.is_some()
    }

    /// Overwrite velocity from the intent.
    pub fn steer(&self, intent: &PlayerIntent, movement: &mut Movement) {
        movement.set_velocity(
            intent.horizontal.sign() * self.speed,
            intent.vertical.sign() * self.speed,
        );
    }

    /// Move one tick. An axis whose move would leave `bounds` is rolled back to its
    /// pre-move value (not clamped to the edge).
    pub fn update_position(&self, movement: &Movement, position: &mut Vec2) {
        let before = *position;
        movement.step(position);
        if position.x < self.bounds.min.x || position.x > self.bounds.max.x {
            position.x = before.x;
        }
        if position.y < self.bounds.min.y || position.y > self.bounds.max.y {
            position.y = before.y;
        }
    }

    /// Open an invulnerability window: the hitbox stops colliding with anything
    /// except beneficial pickups for the next `invulnerability_window` collision passes.
    /// The pass that opened the window does not count.
    pub fn begin_invulnerability(&mut self, hitbox: &mut Hitbox) {
        if self.invulnerability_window == 0 {
            return;
        }
        self.invulnerable_ticks = Some(self.invulnerability_window);
        hitbox.enabled = false;
    }

    /// Runs once per tick before the collision pass. Consumes one covered pass, and
    /// re-enables the hitbox on the tick after the last covered pass.
    pub fn tick_invulnerability(&mut self, hitbox: &mut Hitbox) {
        self.invulnerable_ticks = match self.invulnerable_ticks {
            None => return,
            Some(0) => {
                hitbox.enabled = true;
                None
            }
            Some(left) => Some(left - 1),
        };
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerIntent>()
        .add_systems(Update, gather_input);
}

/// Sample key state once per frame into `PlayerIntent`.
///
/// No-op in headless apps (no `ButtonInput<KeyCode>`).
fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut intent: ResMut<PlayerIntent>,
    mut commands: MessageWriter<LevelCommand>,
) {
    let Some(keys) = keys else { return; };

    let up = keys.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]);
    let down = keys.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]);
    let left = keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]);
    let right = keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]);

    intent.vertical = AxisIntent::from_keys(down, up);
    intent.horizontal = AxisIntent::from_keys(left, right);
    intent.fire = keys.pressed(KeyCode::Space);

    if keys.any_just_pressed([KeyCode::KeyP, KeyCode::Escape]) {
        commands.write(LevelCommand::TogglePause);
    }
}

#[cfg(test)]
mod tests;
