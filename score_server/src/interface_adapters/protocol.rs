use serde::{Deserialize, Serialize};

use crate::domain::entities::{Mode, RecordedScore};

// Request payload for register and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

// Response payload for register and login.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub account_id: String,
}

// Request payload for recording a finished game.
#[derive(Debug, Deserialize)]
pub struct RecordGameRequest {
    pub mode: Mode,
    pub score: ScoreDto,
}

// A bare number for single games, both seats for duels.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum ScoreDto {
    Single(u32),
    Duel { player1: u32, player2: u32 },
}

impl From<ScoreDto> for RecordedScore {
    fn from(score: ScoreDto) -> Self {
        match score {
            ScoreDto::Single(score) => RecordedScore::Single(score),
            ScoreDto::Duel { player1, player2 } => RecordedScore::Duel { player1, player2 },
        }
    }
}

// Response payload for a recorded game.
#[derive(Debug, Serialize)]
pub struct RecordGameResponse {
    pub game_id: String,
}

// Query string for best score lookups.
#[derive(Debug, Deserialize)]
pub struct BestScoreQuery {
    pub mode: Mode,
}

// Response payload for best score lookups; `null` when no games were recorded.
#[derive(Debug, Serialize)]
pub struct BestScoreResponse {
    pub best: Option<u32>,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
