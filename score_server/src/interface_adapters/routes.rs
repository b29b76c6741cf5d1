use crate::interface_adapters::handlers::{best_score, login, record_game, register};
use crate::interface_adapters::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/accounts/register", post(register))
        .route("/accounts/login", post(login))
        .route("/accounts/{account_id}/games", post(record_game))
        .route("/accounts/{account_id}/best", get(best_score))
        .with_state(state)
}
