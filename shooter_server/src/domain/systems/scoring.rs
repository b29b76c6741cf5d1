use crate::domain::state::{GameMode, PlayerSlot};
use std::collections::BTreeMap;
use tracing::warn;

/// Per-player cumulative score for one round.
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    increment: u32,
    scores: BTreeMap<PlayerSlot, u32>,
}

impl ScoreKeeper {
    /// Starts every slot of `mode` at zero.
    pub fn new(mode: GameMode, increment: u32) -> Self {
        Self {
            increment,
            scores: mode.slots().iter().map(|slot| (*slot, 0)).collect(),
        }
    }

    /// Credits one hit. A slot outside the round is a wiring bug and is ignored.
    pub fn apply_hit(&mut self, slot: PlayerSlot) -> bool {
        match self.scores.get_mut(&slot) {
            Some(score) => {
                *score = score.saturating_add(self.increment);
                true
            }
            None => {
                warn!(player = slot.number(), "hit credited to a player outside the round; ignoring");
                false
            }
        }
    }

    pub fn score(&self, slot: PlayerSlot) -> Option<u32> {
        self.scores.get(&slot).copied()
    }

    pub fn scores(&self) -> &BTreeMap<PlayerSlot, u32> {
        &self.scores
    }
}
