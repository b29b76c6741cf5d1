use serde::{Deserialize, Serialize};

// Game mode as stored and queried by the score service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Single,
    Duel,
}

// Final score of one recorded game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedScore {
    Single(u32),
    Duel { player1: u32, player2: u32 },
}

impl RecordedScore {
    pub fn mode(&self) -> Mode {
        match self {
            RecordedScore::Single(_) => Mode::Single,
            RecordedScore::Duel { .. } => Mode::Duel,
        }
    }

    // Duels count the better of the two seats.
    pub fn best(&self) -> u32 {
        match *self {
            RecordedScore::Single(score) => score,
            RecordedScore::Duel { player1, player2 } => player1.max(player2),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub game_id: String,
    pub mode: Mode,
    pub score: RecordedScore,
    pub recorded_at: u64,
}

// Registered player with a salted password digest and their game history.
#[derive(Clone, Debug)]
pub struct Account {
    pub account_id: String,
    // Lowercased and trimmed; unique across accounts.
    pub email: String,
    pub password_salt: String,
    pub password_digest: String,
    pub created_at: u64,
    pub games: Vec<GameRecord>,
}
