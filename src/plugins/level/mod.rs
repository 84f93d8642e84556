//! Level driver: lifecycle state machine + the fixed-tick pipeline.
//!
//! ```text
//!   StartLevel ──> teardown, fresh resources ──> Initializing
//!   OnEnter(Initializing): construct (player, boss, prewarm) ──> Running
//!   Running <──LevelCommand──> Paused
//!   Running ──outcome──> Won | Lost
//! ```
//!
//! One tick (FixedUpdate, only while Running and undecided):
//!
//! ```text
//!   Spawn     spawn policy (enemies, pickups)
//!   Act       movement + behavior, shield visuals
//!   Fire      volleys, enemy/boss fire rolls
//!   Allocate  requests -> pooled projectiles
//!   Collide   hitbox sync, pairwise resolution
//!   Cleanup   health pushes, remove destroyed, release to pools
//!   Resolve   kill count, win/lose
//! ```
//!
//! Paused skips the whole pipeline; nothing is lost while paused.

pub mod messages;
pub mod registry;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::state::LevelState;
use crate::common::tunables::Tunables;
use crate::plugins::actors::spawn::{enemy_plane, pickup, spawn_boss, user_plane};
use crate::plugins::actors::{ActorKind, Category, DestroyCause, EnemyVariant, LevelScoped, PickupKind, ProjectileKind};
use crate::plugins::entities::{ActorAdded, EnemyDestroyed, EntityManager};
use crate::plugins::player::PlayerIntent;
use crate::plugins::projectiles::ProjectilePools;

pub use messages::{GameOver, GameWon, LevelChange, LevelCommand, LevelFinished, StartLevel};
pub use registry::{LevelConfig, LevelId, SpawnPolicy, UnknownLevel, WinCondition};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Spawn,
    Act,
    Fire,
    Allocate,
    Collide,
    Cleanup,
    Resolve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Won,
    Lost,
}

/// Per-instance bookkeeping. Replaced wholesale on every `StartLevel`.
#[derive(Resource, Debug, Clone)]
pub struct ActiveLevel {
    pub id: LevelId,
    pub config: LevelConfig,
    /// Enemies shot down or rammed.
    pub kills: u32,
    /// Enemies that crossed the defense line. Not kills.
    pub penetrations: u32,
    pub boss_defeated: bool,
    pub outcome: Option<LevelOutcome>,
    pub ticks: u64,
}

impl ActiveLevel {
    pub fn new(id: LevelId, tunables: &Tunables) -> Self {
        Self {
            id,
            config: id.config(tunables),
            kills: 0,
            penetrations: 0,
            boss_defeated: false,
            outcome: None,
            ticks: 0,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<StartLevel>()
        .add_message::<LevelCommand>()
        .add_message::<LevelChange>()
        .add_message::<GameWon>()
        .add_message::<GameOver>()
        .add_message::<LevelFinished>();

    app.configure_sets(
        FixedUpdate,
        (
            TickSet::Spawn.run_if(level_in_play),
            TickSet::Act.run_if(level_in_play),
            TickSet::Fire.run_if(level_in_play),
            TickSet::Allocate.run_if(level_in_play),
            TickSet::Collide.run_if(level_in_play),
            TickSet::Cleanup.run_if(level_in_play),
            TickSet::Resolve.run_if(level_in_play),
        )
            .chain(),
    );

    app.add_systems(Update, (start_requested_level, apply_level_commands).chain())
        .add_systems(OnEnter(LevelState::Initializing), construct_level)
        .add_systems(
            FixedUpdate,
            (count_tick, evaluate_spawn_policy).chain().in_set(TickSet::Spawn),
        )
        .add_systems(
            FixedUpdate,
            (update_kill_count, check_level_outcome).chain().in_set(TickSet::Resolve),
        );
}

/// Tick gate: a constructed level, running, outcome still open.
pub fn level_in_play(state: Option<Res<State<LevelState>>>, level: Option<Res<ActiveLevel>>) -> bool {
    let (Some(state), Some(level)) = (state, level) else {
        return false;
    };
    *state.get() == LevelState::Running && level.outcome.is_none()
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

/// Handle the latest `StartLevel`: despawn every level-scoped entity, replace the
/// per-level resources and enter `Initializing`.
pub fn start_requested_level(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut requests: MessageReader<StartLevel>,
    q_scoped: Query<Entity, With<LevelScoped>>,
    mut next: ResMut<NextState<LevelState>>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    for e in &q_scoped {
        commands.entity(e).despawn();
    }

    commands.insert_resource(EntityManager::default());
    commands.insert_resource(ProjectilePools::default());
    commands.insert_resource(PlayerIntent::default());
    commands.insert_resource(ActiveLevel::new(request.level, &tunables));
    next.set(LevelState::Initializing);

    info!("starting {}", request.level);
}

/// Place the player (and the boss on boss levels), prewarm the user pool, run.
pub fn construct_level(
    mut commands: Commands,
    tunables: Res<Tunables>,
    level: Option<Res<ActiveLevel>>,
    mut manager: ResMut<EntityManager>,
    mut pools: ResMut<ProjectilePools>,
    mut rng: ResMut<GameRng>,
    mut added: MessageWriter<ActorAdded>,
    mut next: ResMut<NextState<LevelState>>,
) {
    let Some(level) = level else {
        warn!("entered Initializing without an ActiveLevel");
        return;
    };

    let player = commands.spawn(user_plane(&tunables, level.config.player_health)).id();
    if manager.add(Category::Friendly, player) {
        added.write(ActorAdded { entity: player, kind: ActorKind::UserPlane });
    }

    if level.config.spawn_policy == SpawnPolicy::Boss {
        let (boss, _) = spawn_boss(&mut commands, &tunables, &mut rng);
        if manager.add(Category::Enemy, boss) {
            added.write(ActorAdded { entity: boss, kind: ActorKind::Boss });
        }
    }

    pools.prewarm(&mut commands, &tunables, ProjectileKind::User, tunables.projectiles.prewarm);

    next.set(LevelState::Running);
    info!("{} running", level.id);
}

pub fn apply_level_commands(
    mut reader: MessageReader<LevelCommand>,
    state: Res<State<LevelState>>,
    mut next: ResMut<NextState<LevelState>>,
) {
    // Commands compose: Pause then TogglePause in one frame ends up Running.
    let mut current = *state.get();
    for command in reader.read() {
        current = match (command, current) {
            (LevelCommand::Pause | LevelCommand::TogglePause, LevelState::Running) => LevelState::Paused,
            (LevelCommand::Resume | LevelCommand::TogglePause, LevelState::Paused) => LevelState::Running,
            (_, other) => other,
        };
    }

    if current != *state.get() {
        debug!("level {:?} -> {current:?}", state.get());
        next.set(current);
    }
}

// -----------------------------------------------------------------------------
// Tick
// -----------------------------------------------------------------------------

fn count_tick(mut level: ResMut<ActiveLevel>) {
    level.ticks += 1;
}

/// Spawn enemies up to the level's cap (one roll per free slot) and, rarely, a pickup.
/// Asking for more than the cap is silently capped.
pub fn evaluate_spawn_policy(
    mut commands: Commands,
    tunables: Res<Tunables>,
    level: Res<ActiveLevel>,
    mut manager: ResMut<EntityManager>,
    mut rng: ResMut<GameRng>,
    mut added: MessageWriter<ActorAdded>,
) {
    let half = tunables.playfield.half_extents();

    if let SpawnPolicy::Squadron { max_enemies, spawn_probability, gunship_share } = level.config.spawn_policy {
        let free = max_enemies.saturating_sub(manager.len(Category::Enemy));
        for _ in 0..free {
            if !rng.chance(spawn_probability) {
                continue;
            }
            let variant = if rng.chance(gunship_share) { EnemyVariant::Gunship } else { EnemyVariant::Scout };
            let size = match variant {
                EnemyVariant::Scout => tunables.scout.size,
                EnemyVariant::Gunship => tunables.gunship.size,
            };
            let y = rng.range_f32(-half.y + size.y * 0.5, half.y - size.y * 0.5);
            let e = commands.spawn(enemy_plane(&tunables, variant, Vec2::new(half.x, y))).id();
            if manager.add(Category::Enemy, e) {
                added.write(ActorAdded { entity: e, kind: ActorKind::EnemyPlane(variant) });
            }
            debug!("spawned {variant:?} at y={y:.0}");
        }
    }

    if rng.chance(level.config.pickup_probability) {
        let kind = if rng.chance(0.5) { PickupKind::HealthPack } else { PickupKind::SpreadShot };
        let size = tunables.pickups.size;
        let y = rng.range_f32(-half.y + size.y * 0.5, half.y - size.y * 0.5);
        let e = commands.spawn(pickup(&tunables, kind, Vec2::new(half.x, y))).id();
        if manager.add(Category::Pickup, e) {
            added.write(ActorAdded { entity: e, kind: ActorKind::Pickup(kind) });
        }
        debug!("spawned {kind:?} pickup");
    }
}

pub fn update_kill_count(mut level: ResMut<ActiveLevel>, mut reader: MessageReader<EnemyDestroyed>) {
    for msg in reader.read() {
        if msg.cause.is_kill() {
            level.kills += 1;
        } else if msg.cause == DestroyCause::Penetrated {
            level.penetrations += 1;
        }
        if msg.kind == ActorKind::Boss {
            level.boss_defeated = true;
        }
    }
}

/// Lose (no friendly left) is checked before win, so a mutual kill is a loss.
pub fn check_level_outcome(
    mut level: ResMut<ActiveLevel>,
    manager: Res<EntityManager>,
    mut next: ResMut<NextState<LevelState>>,
    mut finished: MessageWriter<LevelFinished>,
    mut change: MessageWriter<LevelChange>,
    mut won: MessageWriter<GameWon>,
    mut game_over: MessageWriter<GameOver>,
) {
    if level.outcome.is_some() {
        return;
    }

    let outcome = if manager.len(Category::Friendly) == 0 {
        LevelOutcome::Lost
    } else if level.config.win_condition.is_met(level.kills, level.boss_defeated) {
        LevelOutcome::Won
    } else {
        return;
    };

    level.outcome = Some(outcome);
    finished.write(LevelFinished { level: level.id, kills: level.kills });
    info!("{} {outcome:?} after {} ticks, {} kills", level.id, level.ticks, level.kills);

    match outcome {
        LevelOutcome::Lost => {
            next.set(LevelState::Lost);
            game_over.write(GameOver { level: level.id });
        }
        LevelOutcome::Won => {
            next.set(LevelState::Won);
            match level.id.next() {
                Some(next_level) => {
                    change.write(LevelChange { next: next_level });
                }
                None => {
                    won.write(GameWon);
                }
            }
        }
    }
}
