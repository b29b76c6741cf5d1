use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    AccountId, ArchiveError, GameMode, IdentityProvider, LoginResult, RegisterResult, RoundResult,
    ScoreArchive,
};

pub(crate) type PersistedRounds = Arc<Mutex<Vec<(AccountId, GameMode, RoundResult)>>>;

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub persist: bool,
    pub best_score: bool,
}

// In-memory archive that records every persist call.
#[derive(Clone)]
pub(crate) struct RecordingArchive {
    best: Option<u32>,
    persisted: PersistedRounds,
    failures: FailureFlags,
}

impl RecordingArchive {
    pub(crate) fn new() -> Self {
        Self {
            best: None,
            persisted: Arc::new(Mutex::new(Vec::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_best(mut self, best: u32) -> Self {
        self.best = Some(best);
        self
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn persisted(&self) -> Vec<(AccountId, GameMode, RoundResult)> {
        let guard = self.persisted.lock().expect("persisted mutex poisoned");
        guard.clone()
    }
}

#[async_trait]
impl ScoreArchive for RecordingArchive {
    async fn persist(
        &self,
        account: &AccountId,
        mode: GameMode,
        result: RoundResult,
    ) -> Result<(), ArchiveError> {
        if self.failures.persist {
            return Err(ArchiveError::Unavailable);
        }

        let mut guard = self.persisted.lock().expect("persisted mutex poisoned");
        guard.push((account.clone(), mode, result));
        Ok(())
    }

    async fn best_score(
        &self,
        _account: &AccountId,
        _mode: GameMode,
    ) -> Result<Option<u32>, ArchiveError> {
        if self.failures.best_score {
            return Err(ArchiveError::Unavailable);
        }
        Ok(self.best)
    }
}

// Archive whose persist never completes; best lookups report no history.
#[derive(Clone, Copy)]
pub(crate) struct HangingArchive;

#[async_trait]
impl ScoreArchive for HangingArchive {
    async fn persist(
        &self,
        _account: &AccountId,
        _mode: GameMode,
        _result: RoundResult,
    ) -> Result<(), ArchiveError> {
        std::future::pending().await
    }

    async fn best_score(
        &self,
        _account: &AccountId,
        _mode: GameMode,
    ) -> Result<Option<u32>, ArchiveError> {
        Ok(None)
    }
}

pub(crate) type SeenCredentials = Arc<Mutex<Vec<(String, String)>>>;

// Identity provider that answers from a canned result and records what it was asked.
#[derive(Clone)]
pub(crate) struct ScriptedIdentity {
    pub login: LoginResult,
    pub register: RegisterResult,
    pub seen: SeenCredentials,
}

impl ScriptedIdentity {
    pub(crate) fn new(login: LoginResult, register: RegisterResult) -> Self {
        Self {
            login,
            register,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn seen(&self) -> Vec<(String, String)> {
        let guard = self.seen.lock().expect("seen mutex poisoned");
        guard.clone()
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn login(&self, email: &str, password: &str) -> LoginResult {
        let mut guard = self.seen.lock().expect("seen mutex poisoned");
        guard.push((email.to_string(), password.to_string()));
        self.login.clone()
    }

    async fn register(&self, email: &str, password: &str) -> RegisterResult {
        let mut guard = self.seen.lock().expect("seen mutex poisoned");
        guard.push((email.to_string(), password.to_string()));
        self.register.clone()
    }
}
