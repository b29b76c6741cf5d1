// Use-case level inputs/outputs for the round session.

use crate::domain::{GameMode, MoveDirection, PlayerSlot, RoundOutcome, RoundSnapshot};

/// Commands the host shell sends into a session task.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    // Discards any current round and starts a fresh one in `mode`.
    Start { mode: GameMode },
    Move { slot: PlayerSlot, direction: MoveDirection },
    Fire { slot: PlayerSlot },
    Restart,
    Close,
}

/// Latest state of a session, published after every change.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    ModeSelection,
    Playing { round: u64, snapshot: RoundSnapshot },
}

/// One-off events tagged with the round they belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotice {
    Outcome { round: u64, outcome: RoundOutcome },
    Warning { round: u64, message: String },
}

impl SessionNotice {
    pub fn round(&self) -> u64 {
        match self {
            SessionNotice::Outcome { round, .. } | SessionNotice::Warning { round, .. } => *round,
        }
    }
}
