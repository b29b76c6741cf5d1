use crate::domain::{
    AccountId, ArchiveError, GameMode, IdentityProvider, LoginResult, RegisterResult,
    RoundResult, ScoreArchive,
};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    account_id: String,
}

#[derive(Debug, Serialize)]
struct RecordGameRequest {
    mode: &'static str,
    score: ScorePayload,
}

// A bare number for single rounds, both seats for duels.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ScorePayload {
    Single(u32),
    Duel { player1: u32, player2: u32 },
}

impl From<RoundResult> for ScorePayload {
    fn from(result: RoundResult) -> Self {
        match result {
            RoundResult::Single { score } => ScorePayload::Single(score),
            RoundResult::Duel { player1, player2 } => ScorePayload::Duel { player1, player2 },
        }
    }
}

#[derive(Debug, Deserialize)]
struct BestScoreResponse {
    best: Option<u32>,
}

fn mode_param(mode: GameMode) -> &'static str {
    match mode {
        GameMode::SinglePlayer => "single",
        GameMode::TwoPlayer => "duel",
    }
}

// Thin reqwest client for the score service: accounts and round history.
#[derive(Clone)]
pub struct ScoreServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScoreServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    // Account ids are opaque, so they go in as one escaped path segment.
    fn account_url(&self, account: &AccountId, leaf: &str) -> Result<Url, ArchiveError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            warn!(error = %e, base_url = %self.base_url, "invalid score service url");
            ArchiveError::Unavailable
        })?;
        url.path_segments_mut()
            .map_err(|_| ArchiveError::Unavailable)?
            .pop_if_empty()
            .extend(["accounts", account.as_str(), leaf]);
        Ok(url)
    }

    async fn post_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<(StatusCode, Option<AccountId>), reqwest::Error> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok((status, None));
        }
        let body = response.json::<AccountResponse>().await?;
        Ok((status, Some(AccountId::new(body.account_id))))
    }
}

#[async_trait]
impl ScoreArchive for ScoreServiceClient {
    async fn persist(
        &self,
        account: &AccountId,
        mode: GameMode,
        result: RoundResult,
    ) -> Result<(), ArchiveError> {
        let url = self.account_url(account, "games")?;
        let response = self
            .http
            .post(url)
            .json(&RecordGameRequest {
                mode: mode_param(mode),
                score: result.into(),
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "score service unreachable");
                ArchiveError::Unavailable
            })?;

        match archive_status(response.status()) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    async fn best_score(
        &self,
        account: &AccountId,
        mode: GameMode,
    ) -> Result<Option<u32>, ArchiveError> {
        let mut url = self.account_url(account, "best")?;
        url.query_pairs_mut().append_pair("mode", mode_param(mode));
        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(error = %e, "score service unreachable");
            ArchiveError::Unavailable
        })?;

        if let Some(err) = archive_status(response.status()) {
            return Err(err);
        }

        response
            .json::<BestScoreResponse>()
            .await
            .map(|body| body.best)
            .map_err(|_| ArchiveError::Unavailable)
    }
}

#[async_trait]
impl IdentityProvider for ScoreServiceClient {
    async fn login(&self, email: &str, password: &str) -> LoginResult {
        match self.post_credentials("/accounts/login", email, password).await {
            Ok((_, Some(account))) => LoginResult::Ok(account),
            Ok((status, None)) => login_status(status),
            Err(e) => {
                warn!(error = %e, "login request failed");
                LoginResult::StoreUnavailable
            }
        }
    }

    async fn register(&self, email: &str, password: &str) -> RegisterResult {
        match self.post_credentials("/accounts/register", email, password).await {
            Ok((_, Some(account))) => RegisterResult::Registered(account),
            Ok((status, None)) => register_status(status),
            Err(e) => {
                warn!(error = %e, "register request failed");
                RegisterResult::StoreUnavailable
            }
        }
    }
}

// `None` means the call succeeded.
fn archive_status(status: StatusCode) -> Option<ArchiveError> {
    if status.is_success() {
        None
    } else if status == StatusCode::NOT_FOUND {
        Some(ArchiveError::UnknownAccount)
    } else if status.is_server_error() {
        Some(ArchiveError::Unavailable)
    } else {
        Some(ArchiveError::Rejected {
            status: status.as_u16(),
        })
    }
}

fn login_status(status: StatusCode) -> LoginResult {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => LoginResult::InvalidCredentials,
        _ => LoginResult::StoreUnavailable,
    }
}

fn register_status(status: StatusCode) -> RegisterResult {
    match status {
        StatusCode::BAD_REQUEST => RegisterResult::InvalidCredentials,
        StatusCode::CONFLICT => RegisterResult::AlreadyRegistered,
        _ => RegisterResult::StoreUnavailable,
    }
}
