// Round state machine: owns one round's entities, scores and countdown.

use crate::domain::outcome::{RoundResult, RoundSummary};
use crate::domain::state::{
    GameMode, MoveDirection, Player, PlayerSlot, PlayerSnapshot, ProjectileId, ProjectileSnapshot,
    RoundPhase, RoundSnapshot, TargetId, TargetSnapshot,
};
use crate::domain::systems::collision::{self, CollisionReport, HitBoxes};
use crate::domain::systems::entity_store::EntityStore;
use crate::domain::systems::movement;
use crate::domain::systems::physics;
use crate::domain::systems::scoring::ScoreKeeper;
use crate::domain::tuning::RoundConfig;
use tracing::debug;

/// Everything that happened during one `tick`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub collisions: CollisionReport,
    pub spawned_targets: Vec<TargetId>,
}

struct Round {
    mode: GameMode,
    phase: RoundPhase,
    remaining_secs: u32,
    tick: u64,
    players: Vec<Player>,
    store: EntityStore,
    scores: ScoreKeeper,
}

impl Round {
    fn new(mode: GameMode, config: &RoundConfig, seed: u64) -> Self {
        let players = mode
            .slots()
            .iter()
            .map(|slot| Player {
                slot: *slot,
                x: match slot {
                    PlayerSlot::One => config.player.start_x_one,
                    PlayerSlot::Two => config.player.start_x_two,
                },
                y: config.player.baseline_y,
            })
            .collect();

        let mut store = EntityStore::new(config.arena, config.projectile, config.target, seed);
        for _ in 0..config.target.min_count {
            store.spawn_target();
        }

        Self {
            mode,
            phase: RoundPhase::Running,
            remaining_secs: config.round.duration_seconds,
            tick: 0,
            players,
            store,
            scores: ScoreKeeper::new(mode, config.round.score_increment),
        }
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.slot == slot)
    }
}

/// Drives rounds for one mode: tick order, countdown, end detection and restart.
///
/// The controller is the only owner of round state. A restart throws the old
/// round away and builds a fresh one; nothing carries over except the mode
/// and configuration.
pub struct RoundController {
    config: RoundConfig,
    base_seed: u64,
    rounds_started: u64,
    round: Round,
}

impl RoundController {
    pub fn new(mode: GameMode, config: RoundConfig, seed: u64) -> Self {
        Self {
            config,
            base_seed: seed,
            rounds_started: 1,
            round: Round::new(mode, &config, round_seed(seed, 1)),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.round.mode
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.round.remaining_secs
    }

    pub fn scores(&self) -> &ScoreKeeper {
        &self.round.scores
    }

    pub fn store(&self) -> &EntityStore {
        &self.round.store
    }

    /// 1-based count of rounds played by this controller, restarts included.
    pub fn rounds_started(&self) -> u64 {
        self.rounds_started
    }

    /// Advances the simulation by `dt` seconds. Does nothing once the round has ended.
    ///
    /// Order: physics, collision detection, hit scoring and removal, expiry
    /// removal, then one replacement per removed target and a final top-up to
    /// the minimum population.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        if self.round.phase != RoundPhase::Running {
            return TickReport::default();
        }

        let round = &mut self.round;
        physics::advance(&mut round.store, dt, self.config.round.reference_tick);

        let collisions = collision::resolve(
            &round.store,
            self.config.arena,
            HitBoxes {
                projectile_width: self.config.projectile.width,
                projectile_height: self.config.projectile.height,
                target_size: self.config.target.size,
            },
        );

        let mut removed_targets = 0usize;
        for hit in &collisions.hits {
            if round.store.remove(hit.target) {
                removed_targets += 1;
            }
            round.store.remove(hit.projectile);
            round.scores.apply_hit(hit.scorer);
            debug!(
                tick = round.tick,
                target_id = hit.target.0,
                projectile_id = hit.projectile.0,
                player = hit.scorer.number(),
                "target hit"
            );
        }

        for id in &collisions.expired_projectiles {
            round.store.remove(*id);
        }

        for id in &collisions.expired_targets {
            if round.store.remove(*id) {
                removed_targets += 1;
            }
        }

        let mut spawned_targets = Vec::with_capacity(removed_targets);
        for _ in 0..removed_targets {
            spawned_targets.push(round.store.spawn_target());
        }
        while round.store.target_count() < self.config.target.min_count {
            spawned_targets.push(round.store.spawn_target());
        }

        round.tick += 1;
        TickReport {
            collisions,
            spawned_targets,
        }
    }

    /// Counts one second down. Returns the summary exactly once, when time runs out.
    pub fn tick_second(&mut self) -> Option<RoundSummary> {
        if self.round.phase != RoundPhase::Running {
            return None;
        }

        self.round.remaining_secs = self.round.remaining_secs.saturating_sub(1);
        if self.round.remaining_secs > 0 {
            return None;
        }

        self.round.phase = RoundPhase::Ended;
        let summary = self.summary();
        debug!(mode = ?summary.mode, result = ?summary.result, "round ended");
        Some(summary)
    }

    fn summary(&self) -> RoundSummary {
        let scores = &self.round.scores;
        let result = match self.round.mode {
            GameMode::SinglePlayer => RoundResult::Single {
                score: scores.score(PlayerSlot::One).unwrap_or_default(),
            },
            GameMode::TwoPlayer => RoundResult::Duel {
                player1: scores.score(PlayerSlot::One).unwrap_or_default(),
                player2: scores.score(PlayerSlot::Two).unwrap_or_default(),
            },
        };
        RoundSummary {
            mode: self.round.mode,
            result,
        }
    }

    /// Fires one projectile for `slot`. Ignored for absent slots or after the round ended.
    pub fn handle_fire(&mut self, slot: PlayerSlot) -> Option<ProjectileId> {
        if self.round.phase != RoundPhase::Running {
            return None;
        }
        let player_tuning = self.config.player;
        let round = &mut self.round;
        let (x, y) = movement::muzzle(round.players.iter().find(|p| p.slot == slot)?, player_tuning);
        Some(round.store.spawn_projectile(x, y, slot))
    }

    /// Moves `slot` one step. Returns false when the input was ignored.
    pub fn handle_move(&mut self, slot: PlayerSlot, direction: MoveDirection) -> bool {
        if self.round.phase != RoundPhase::Running {
            return false;
        }
        let (player_tuning, arena) = (self.config.player, self.config.arena);
        match self.round.player_mut(slot) {
            Some(player) => {
                movement::step_player(player, direction, player_tuning, arena);
                true
            }
            None => false,
        }
    }

    /// Replaces an ended round with a fresh one in the same mode.
    pub fn restart(&mut self) -> bool {
        if self.round.phase != RoundPhase::Ended {
            return false;
        }
        self.rounds_started += 1;
        self.round = Round::new(
            self.round.mode,
            &self.config,
            round_seed(self.base_seed, self.rounds_started),
        );
        true
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let round = &self.round;
        RoundSnapshot {
            tick: round.tick,
            mode: round.mode,
            phase: round.phase,
            remaining_secs: round.remaining_secs,
            players: round
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    slot: p.slot,
                    x: p.x,
                    y: p.y,
                    score: round.scores.score(p.slot).unwrap_or_default(),
                })
                .collect(),
            projectiles: round.store.projectiles().map(ProjectileSnapshot::from).collect(),
            targets: round.store.targets().map(TargetSnapshot::from).collect(),
        }
    }

    // Test hook for placing a target at an exact position.
    #[cfg(test)]
    pub(crate) fn place_target(&mut self, x: f32, y: f32) -> TargetId {
        self.round.store.place_target(x, y)
    }

    #[cfg(test)]
    pub(crate) fn remove_target(&mut self, id: TargetId) -> bool {
        self.round.store.remove(id)
    }

    #[cfg(test)]
    pub(crate) fn fire_from(&mut self, slot: PlayerSlot, x: f32, y: f32) -> ProjectileId {
        self.round.store.spawn_projectile(x, y, slot)
    }
}

// Spreads consecutive round numbers over the seed space.
fn round_seed(base: u64, round: u64) -> u64 {
    base ^ round.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
