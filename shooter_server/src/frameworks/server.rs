// Framework bootstrap for the shooter server runtime.

use crate::frameworks::config;
use crate::interface_adapters::clients::ScoreServiceClient;
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use crate::use_cases::SessionSettings;

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc, time::Duration};

/// Everything `run` needs; `from_env` is the production source.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub score_service_url: String,
    pub score_service_timeout: Duration,
    pub session: SessionSettings,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let score_service_timeout = config::score_service_timeout();
        Self {
            score_service_url: config::score_service_url(),
            score_service_timeout,
            session: SessionSettings {
                round_config: config::round_config(),
                tick_interval: config::TICK_INTERVAL,
                countdown_interval: config::COUNTDOWN_INTERVAL,
                command_channel_capacity: config::COMMAND_CHANNEL_CAPACITY,
                notice_channel_capacity: config::NOTICE_CHANNEL_CAPACITY,
                archive_timeout: score_service_timeout,
                seed: 0,
            },
        }
    }
}

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, config: ServerConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(config)?;
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, ServerConfig::from_env()).await
}

fn build_state(config: ServerConfig) -> Result<Arc<AppState>> {
    let client = ScoreServiceClient::new(
        config.score_service_url.clone(),
        config.score_service_timeout,
    )
    .map_err(|e| std::io::Error::other(format!("failed to initialize score client: {e}")))?;
    tracing::debug!(
        score_service_url = %config.score_service_url,
        score_service_timeout_ms = config.score_service_timeout.as_millis(),
        round = ?config.session.round_config,
        "score client configured"
    );

    let client = Arc::new(client);
    Ok(Arc::new(AppState {
        archive: client.clone(),
        identity: client,
        session_settings: config.session,
    }))
}
