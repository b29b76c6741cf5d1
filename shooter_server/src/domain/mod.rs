// Domain layer: core simulation types and rules.

pub mod errors;
pub mod outcome;
pub mod ports;
pub mod round;
pub mod state;
pub mod systems;
pub mod tuning;

pub use errors::ArchiveError;
pub use outcome::{BestScoreLookup, RoundOutcome, RoundResult, RoundSummary};
pub use ports::{AccountId, IdentityProvider, LoginResult, RegisterResult, ScoreArchive};
pub use round::{RoundController, TickReport};
pub use state::{GameMode, MoveDirection, PlayerSlot, RoundPhase, RoundSnapshot};
pub use tuning::RoundConfig;
