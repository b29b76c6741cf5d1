// Final round results and how they read on the outcome screen.

use crate::domain::state::{GameMode, PlayerSlot};
use std::cmp::Ordering;
use std::fmt;

/// What a finished round persists to the score archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Single { score: u32 },
    Duel { player1: u32, player2: u32 },
}

/// Handed out exactly once, on the Running -> Ended transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub mode: GameMode,
    pub result: RoundResult,
}

/// Result of asking the archive for a player's best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestScoreLookup {
    Found(u32),
    // No prior rounds in this mode; distinct from a best of zero.
    Absent,
    // The archive could not answer.
    Unavailable,
}

impl From<Option<u32>> for BestScoreLookup {
    fn from(best: Option<u32>) -> Self {
        match best {
            Some(score) => BestScoreLookup::Found(score),
            None => BestScoreLookup::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    NewHighScore { score: u32 },
    BelowBest { score: u32, best: u32 },
    BestUnavailable { score: u32 },
    Winner { slot: PlayerSlot, player1: u32, player2: u32 },
    Tie { score: u32 },
}

impl RoundOutcome {
    /// Turns a final result into the verdict shown to players.
    ///
    /// `best` only matters for single-player rounds. An absent history makes
    /// any score a new high score; a failed lookup never does.
    pub fn resolve(result: RoundResult, best: BestScoreLookup) -> Self {
        match result {
            RoundResult::Single { score } => match best {
                BestScoreLookup::Absent => RoundOutcome::NewHighScore { score },
                BestScoreLookup::Found(best) if score > best => RoundOutcome::NewHighScore { score },
                BestScoreLookup::Found(best) => RoundOutcome::BelowBest { score, best },
                BestScoreLookup::Unavailable => RoundOutcome::BestUnavailable { score },
            },
            RoundResult::Duel { player1, player2 } => match player1.cmp(&player2) {
                Ordering::Greater => RoundOutcome::Winner {
                    slot: PlayerSlot::One,
                    player1,
                    player2,
                },
                Ordering::Less => RoundOutcome::Winner {
                    slot: PlayerSlot::Two,
                    player1,
                    player2,
                },
                Ordering::Equal => RoundOutcome::Tie { score: player1 },
            },
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::NewHighScore { score } => write!(f, "Score: {score}\nNew High Score!"),
            RoundOutcome::BelowBest { score, best } => {
                write!(f, "Score: {score}\nHighest Score: {best}")
            }
            RoundOutcome::BestUnavailable { score } => {
                write!(f, "Score: {score}\nHighest Score: unavailable")
            }
            RoundOutcome::Winner { slot, .. } => write!(f, "{slot} Wins!"),
            RoundOutcome::Tie { .. } => write!(f, "It's a Tie!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_single_player_has_no_history_then_score_is_a_new_high_score() {
        let outcome = RoundOutcome::resolve(RoundResult::Single { score: 50 }, BestScoreLookup::Absent);

        assert_eq!(outcome, RoundOutcome::NewHighScore { score: 50 });
        assert_eq!(outcome.to_string(), "Score: 50\nNew High Score!");
    }

    #[test]
    fn when_single_player_has_no_history_and_scored_zero_then_it_is_still_a_new_high_score() {
        let outcome = RoundOutcome::resolve(RoundResult::Single { score: 0 }, None.into());

        assert_eq!(outcome, RoundOutcome::NewHighScore { score: 0 });
    }

    #[test]
    fn when_single_player_beats_best_then_new_high_score() {
        let outcome = RoundOutcome::resolve(RoundResult::Single { score: 60 }, Some(50).into());

        assert_eq!(outcome, RoundOutcome::NewHighScore { score: 60 });
    }

    #[test]
    fn when_single_player_matches_best_then_best_is_reported() {
        let outcome = RoundOutcome::resolve(RoundResult::Single { score: 50 }, Some(50).into());

        assert_eq!(outcome, RoundOutcome::BelowBest { score: 50, best: 50 });
        assert_eq!(outcome.to_string(), "Score: 50\nHighest Score: 50");
    }

    #[test]
    fn when_best_lookup_failed_then_no_high_score_is_claimed() {
        let outcome = RoundOutcome::resolve(
            RoundResult::Single { score: 90 },
            BestScoreLookup::Unavailable,
        );

        assert_eq!(outcome, RoundOutcome::BestUnavailable { score: 90 });
    }

    #[test]
    fn when_player_one_scores_more_then_player_one_wins() {
        let outcome = RoundOutcome::resolve(
            RoundResult::Duel {
                player1: 40,
                player2: 30,
            },
            BestScoreLookup::Absent,
        );

        assert_eq!(outcome.to_string(), "Player 1 Wins!");
    }

    #[test]
    fn when_player_two_scores_more_then_player_two_wins() {
        let outcome = RoundOutcome::resolve(
            RoundResult::Duel {
                player1: 10,
                player2: 30,
            },
            BestScoreLookup::Found(999),
        );

        assert_eq!(
            outcome,
            RoundOutcome::Winner {
                slot: PlayerSlot::Two,
                player1: 10,
                player2: 30,
            }
        );
    }

    #[test]
    fn when_duel_scores_are_equal_then_tie() {
        let outcome = RoundOutcome::resolve(
            RoundResult::Duel {
                player1: 20,
                player2: 20,
            },
            BestScoreLookup::Absent,
        );

        assert_eq!(outcome, RoundOutcome::Tie { score: 20 });
        assert_eq!(outcome.to_string(), "It's a Tie!");
    }
}
