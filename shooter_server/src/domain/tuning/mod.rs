// Gameplay tuning grouped per entity kind, plus the arena and round rules.

pub mod player;
pub mod projectile;
pub mod target;

use player::PlayerTuning;
use projectile::ProjectileTuning;
use target::TargetTuning;

/// Arena size in world units. Origin is bottom-left, y grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundTuning {
    /// Countdown start value in whole seconds.
    pub duration_seconds: u32,

    /// Points credited per hit.
    pub score_increment: u32,

    /// Tick length (seconds) that entity speeds are expressed against.
    pub reference_tick: f32,
}

impl Default for RoundTuning {
    fn default() -> Self {
        Self {
            duration_seconds: 30,
            score_increment: 10,
            reference_tick: 1.0 / 120.0,
        }
    }
}

/// Everything a round needs to know about the world it simulates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundConfig {
    pub arena: ArenaBounds,
    pub round: RoundTuning,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub target: TargetTuning,
}
