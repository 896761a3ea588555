//! Voice Quiz - turn engine for a spoken trivia game
//!
//! A Rust backend implementing a per-session quiz state machine behind a
//! small JSON API for a voice platform.

mod answer;
mod api;
mod config;
mod questions;
mod report;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use config::QuizConfig;
use report::{HttpResultSink, ResultReporter};
use runtime::TurnRuntime;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voice_quiz=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = QuizConfig::from_env()?;
    tracing::info!(
        port = config.port,
        results_url = %config.results_url,
        report_timeout_secs = config.report_timeout.as_secs(),
        "Configuration loaded"
    );

    // Result reporting
    let sink = HttpResultSink::new(config.results_url.clone(), config.report_timeout)?;
    let runtime = TurnRuntime::new(ResultReporter::new(Arc::new(sink)));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(AppState::new(runtime))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Voice quiz server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
