//! Flow plugin: the host side of the level lifecycle.
//!
//! The level only signals (`LevelChange`, `GameWon`, `GameOver`, `LevelFinished`);
//! deciding what runs next lives here.
//!
//! ```text
//! Startup ──> StartLevel(FIRST)
//! LevelChange{next} ──> StartLevel(next)
//! Lost + R ──> StartLevel(same level)
//! Won (last level) + R ──> StartLevel(FIRST)
//! ```

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::state::LevelState;
use crate::plugins::level::{ActiveLevel, GameOver, GameWon, LevelChange, LevelFinished, LevelId, StartLevel};

/// Kill counts of every finished level instance, oldest first.
#[derive(Resource, Debug, Default)]
pub struct ScoreBoard {
    pub entries: Vec<LevelFinished>,
}

impl ScoreBoard {
    pub fn total_kills(&self) -> u32 {
        self.entries.iter().map(|e| e.kills).sum()
    }

    pub fn best(&self, level: LevelId) -> Option<u32> {
        self.entries.iter().filter(|e| e.level == level).map(|e| e.kills).max()
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ScoreBoard>()
        .add_systems(Startup, start_first_level)
        .add_systems(
            Update,
            (record_scores, announce_endings, advance_on_level_change, restart_on_key),
        );
}

pub fn start_first_level(mut start: MessageWriter<StartLevel>) {
    start.write(StartLevel { level: LevelId::FIRST });
}

pub fn advance_on_level_change(mut changes: MessageReader<LevelChange>, mut start: MessageWriter<StartLevel>) {
    if let Some(change) = changes.read().last() {
        info!("advancing to {}", change.next);
        start.write(StartLevel { level: change.next });
    }
}

pub fn record_scores(mut finished: MessageReader<LevelFinished>, mut board: ResMut<ScoreBoard>) {
    for msg in finished.read() {
        board.entries.push(*msg);
        debug!("{} finished with {} kills ({} total)", msg.level, msg.kills, board.total_kills());
    }
}

fn announce_endings(mut over: MessageReader<GameOver>, mut won: MessageReader<GameWon>) {
    for msg in over.read() {
        info!("game over on {}; press R to retry", msg.level);
    }
    if won.read().count() > 0 {
        info!("all levels cleared; press R to play again");
    }
}

/// Level to start when the player asks for a restart, if the current state allows one.
pub fn restart_target(state: LevelState, current: Option<LevelId>) -> Option<LevelId> {
    match state {
        LevelState::Lost => Some(current.unwrap_or(LevelId::FIRST)),
        // A won level with a successor has already advanced; only the final win waits.
        LevelState::Won => Some(LevelId::FIRST),
        _ => None,
    }
}

fn restart_on_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    state: Res<State<LevelState>>,
    level: Option<Res<ActiveLevel>>,
    mut start: MessageWriter<StartLevel>,
) {
    let Some(keys) = keys else { return; };
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    if let Some(target) = restart_target(*state.get(), level.map(|l| l.id)) {
        start.write(StartLevel { level: target });
    }
}
