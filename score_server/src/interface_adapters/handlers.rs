use crate::domain::errors::ScoreError;
use crate::interface_adapters::protocol::{
    AccountResponse, BestScoreQuery, BestScoreResponse, CredentialsRequest, ErrorResponse,
    RecordGameRequest, RecordGameResponse,
};
use crate::interface_adapters::state::{AppState, InMemoryAccountStore, SystemClock};
use crate::use_cases::best_score::BestScoreUseCase;
use crate::use_cases::login::LoginUseCase;
use crate::use_cases::record_game::RecordGameUseCase;
use crate::use_cases::register::RegisterUseCase;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn account_store(state: &AppState) -> InMemoryAccountStore {
    InMemoryAccountStore {
        accounts: state.accounts.clone(),
    }
}

// Handler for creating an account.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), HandlerError> {
    let use_case = RegisterUseCase {
        clock: SystemClock,
        store: account_store(&state),
    };

    let result = use_case
        .execute(payload)
        .await
        .map_err(|err| map_score_error(err, ScoreErrorContext::Register))?;

    info!(account_id = %result.account_id, "account registered");
    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            account_id: result.account_id,
        }),
    ))
}

// Handler for checking credentials.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AccountResponse>, HandlerError> {
    let use_case = LoginUseCase {
        store: account_store(&state),
    };

    let result = use_case
        .execute(payload)
        .await
        .map_err(|err| map_score_error(err, ScoreErrorContext::Login))?;

    Ok(Json(AccountResponse {
        account_id: result.account_id,
    }))
}

// Handler for appending a finished game to an account.
pub async fn record_game(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(payload): Json<RecordGameRequest>,
) -> Result<(StatusCode, Json<RecordGameResponse>), HandlerError> {
    let use_case = RecordGameUseCase {
        clock: SystemClock,
        store: account_store(&state),
    };

    let mode = payload.mode;
    let result = use_case
        .execute(&account_id, payload)
        .await
        .map_err(|err| map_score_error(err, ScoreErrorContext::RecordGame))?;

    info!(%account_id, ?mode, game_id = %result.game_id, "game recorded");
    Ok((
        StatusCode::CREATED,
        Json(RecordGameResponse {
            game_id: result.game_id,
        }),
    ))
}

// Handler for the best score of one mode.
pub async fn best_score(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(query): Query<BestScoreQuery>,
) -> Result<Json<BestScoreResponse>, HandlerError> {
    let use_case = BestScoreUseCase {
        store: account_store(&state),
    };

    let best = use_case
        .execute(&account_id, query.mode)
        .await
        .map_err(|err| map_score_error(err, ScoreErrorContext::BestScore))?;

    Ok(Json(BestScoreResponse { best }))
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

// Maps domain errors to HTTP responses by endpoint context.
enum ScoreErrorContext {
    Register,
    Login,
    RecordGame,
    BestScore,
}

fn map_score_error(err: ScoreError, context: ScoreErrorContext) -> HandlerError {
    if err == ScoreError::StorageFailure {
        warn!("account store failure");
        return error_response(StatusCode::BAD_GATEWAY, "storage error");
    }

    match context {
        ScoreErrorContext::Register => match err {
            ScoreError::AlreadyRegistered => {
                error_response(StatusCode::CONFLICT, "email already registered")
            }
            _ => error_response(StatusCode::BAD_REQUEST, "a valid email and a password are required"),
        },
        ScoreErrorContext::Login => match err {
            ScoreError::MalformedCredentials => {
                error_response(StatusCode::BAD_REQUEST, "email and password are required")
            }
            _ => error_response(StatusCode::UNAUTHORIZED, "invalid email or password"),
        },
        ScoreErrorContext::RecordGame => match err {
            ScoreError::UnknownAccount => error_response(StatusCode::NOT_FOUND, "unknown account"),
            _ => error_response(StatusCode::BAD_REQUEST, "score does not match mode"),
        },
        ScoreErrorContext::BestScore => match err {
            ScoreError::UnknownAccount => error_response(StatusCode::NOT_FOUND, "unknown account"),
            _ => error_response(StatusCode::BAD_REQUEST, "invalid request"),
        },
    }
}
