use crate::frameworks::config;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;
use std::net::SocketAddr;

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

pub async fn run() -> std::io::Result<()> {
    init_runtime();

    // Accounts and game history live in memory for the lifetime of the process.
    let app = app(AppState::default());

    let addr = SocketAddr::from(([0, 0, 0, 0], config::http_port()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| {
            tracing::error!(%addr, error = %e, "failed to bind");
        })?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}
