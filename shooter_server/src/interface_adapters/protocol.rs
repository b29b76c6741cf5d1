// Wire protocol DTOs and conversions for the host-shell WebSocket.
// Score service DTOs live with the score client.

use crate::domain::{
    GameMode, MoveDirection, PlayerSlot, RoundOutcome, RoundPhase, RoundSnapshot,
};
use crate::domain::state::{PlayerSnapshot, ProjectileSnapshot, TargetSnapshot};
use crate::use_cases::{SessionCommand, SessionNotice};
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected shells over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Account the connection plays under after a successful Login.
    Identity { account_id: String },
    Registered { account_id: String },
    RegisterFailed { reason: FailureReason },
    LoginFailed { reason: FailureReason },
    // Handshake done; the shell should offer single or duel.
    ModeSelection,
    Snapshot(SnapshotDto),
    Outcome(OutcomeDto),
    Warning { round: u64, message: String },
}

/// Messages the shell sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    // Handshake messages.
    Register(CredentialsDto),
    Login(CredentialsDto),
    Guest,
    // Session messages, accepted after the handshake.
    SelectMode { mode: ModeDto },
    Move { player: u8, direction: DirectionDto },
    Fire { player: u8 },
    Restart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    InvalidCredentials,
    AlreadyRegistered,
    StoreUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeDto {
    Single,
    Duel,
}

impl From<ModeDto> for GameMode {
    fn from(mode: ModeDto) -> Self {
        match mode {
            ModeDto::Single => GameMode::SinglePlayer,
            ModeDto::Duel => GameMode::TwoPlayer,
        }
    }
}

impl From<GameMode> for ModeDto {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::SinglePlayer => ModeDto::Single,
            GameMode::TwoPlayer => ModeDto::Duel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionDto {
    Left,
    Right,
}

impl From<DirectionDto> for MoveDirection {
    fn from(direction: DirectionDto) -> Self {
        match direction {
            DirectionDto::Left => MoveDirection::Left,
            DirectionDto::Right => MoveDirection::Right,
        }
    }
}

impl ClientMessage {
    /// Maps a post-handshake message to a session command.
    ///
    /// Returns `None` for handshake messages and for player numbers that are
    /// not a seat at all. Seats outside the current mode are left to the round.
    pub fn into_command(self) -> Option<SessionCommand> {
        match self {
            ClientMessage::SelectMode { mode } => Some(SessionCommand::Start { mode: mode.into() }),
            ClientMessage::Move { player, direction } => Some(SessionCommand::Move {
                slot: PlayerSlot::from_number(player)?,
                direction: direction.into(),
            }),
            ClientMessage::Fire { player } => Some(SessionCommand::Fire {
                slot: PlayerSlot::from_number(player)?,
            }),
            ClientMessage::Restart => Some(SessionCommand::Restart),
            ClientMessage::Register(_) | ClientMessage::Login(_) | ClientMessage::Guest => None,
        }
    }
}

/// Render state for one tick.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotDto {
    pub round: u64,
    pub tick: u64,
    pub mode: ModeDto,
    pub phase: PhaseDto,
    pub remaining_secs: u32,
    pub players: Vec<PlayerDto>,
    pub projectiles: Vec<ProjectileDto>,
    pub targets: Vec<TargetDto>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDto {
    Running,
    Ended,
}

impl From<RoundPhase> for PhaseDto {
    fn from(phase: RoundPhase) -> Self {
        match phase {
            RoundPhase::Running => PhaseDto::Running,
            RoundPhase::Ended => PhaseDto::Ended,
        }
    }
}

impl SnapshotDto {
    pub fn new(round: u64, snapshot: &RoundSnapshot) -> Self {
        Self {
            round,
            tick: snapshot.tick,
            mode: snapshot.mode.into(),
            phase: snapshot.phase.into(),
            remaining_secs: snapshot.remaining_secs,
            players: snapshot.players.iter().map(PlayerDto::from).collect(),
            projectiles: snapshot.projectiles.iter().map(ProjectileDto::from).collect(),
            targets: snapshot.targets.iter().map(TargetDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerDto {
    pub player: u8,
    pub x: f32,
    pub y: f32,
    pub score: u32,
}

impl From<&PlayerSnapshot> for PlayerDto {
    fn from(player: &PlayerSnapshot) -> Self {
        Self {
            player: player.slot.number(),
            x: player.x,
            y: player.y,
            score: player.score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileDto {
    pub id: u64,
    pub owner: u8,
    pub x: f32,
    pub y: f32,
}

impl From<&ProjectileSnapshot> for ProjectileDto {
    fn from(projectile: &ProjectileSnapshot) -> Self {
        Self {
            id: projectile.id.0,
            owner: projectile.owner.number(),
            x: projectile.x,
            y: projectile.y,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetDto {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl From<&TargetSnapshot> for TargetDto {
    fn from(target: &TargetSnapshot) -> Self {
        Self {
            id: target.id.0,
            x: target.x,
            y: target.y,
        }
    }
}

/// End-of-round verdict with the text the shell should display.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeDto {
    pub round: u64,
    pub kind: OutcomeKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    NewHighScore,
    BelowBest,
    BestUnavailable,
    Winner,
    Tie,
}

impl OutcomeDto {
    pub fn new(round: u64, outcome: &RoundOutcome) -> Self {
        let (kind, winner) = match outcome {
            RoundOutcome::NewHighScore { .. } => (OutcomeKind::NewHighScore, None),
            RoundOutcome::BelowBest { .. } => (OutcomeKind::BelowBest, None),
            RoundOutcome::BestUnavailable { .. } => (OutcomeKind::BestUnavailable, None),
            RoundOutcome::Winner { slot, .. } => (OutcomeKind::Winner, Some(slot.number())),
            RoundOutcome::Tie { .. } => (OutcomeKind::Tie, None),
        };
        Self {
            round,
            kind,
            text: outcome.to_string(),
            winner,
        }
    }
}

impl From<SessionNotice> for ServerMessage {
    fn from(notice: SessionNotice) -> Self {
        match notice {
            SessionNotice::Outcome { round, outcome } => {
                ServerMessage::Outcome(OutcomeDto::new(round, &outcome))
            }
            SessionNotice::Warning { round, message } => ServerMessage::Warning { round, message },
        }
    }
}
