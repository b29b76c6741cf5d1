use async_trait::async_trait;
use std::fmt;

use crate::domain::errors::ArchiveError;
use crate::domain::outcome::RoundResult;
use crate::domain::state::GameMode;

/// Opaque account key handed out by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Port for the external store of finished rounds.
#[async_trait]
pub trait ScoreArchive: Send + Sync {
    async fn persist(
        &self,
        account: &AccountId,
        mode: GameMode,
        result: RoundResult,
    ) -> Result<(), ArchiveError>;

    // `None` means no rounds recorded for this mode, not a best of zero.
    async fn best_score(&self, account: &AccountId, mode: GameMode)
    -> Result<Option<u32>, ArchiveError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    Ok(AccountId),
    InvalidCredentials,
    StoreUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterResult {
    Registered(AccountId),
    AlreadyRegistered,
    InvalidCredentials,
    StoreUnavailable,
}

// Port for the account service that backs login and registration.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> LoginResult;
    async fn register(&self, email: &str, password: &str) -> RegisterResult;
}
