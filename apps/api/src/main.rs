mod config;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod notify;
mod routes;
mod screening;
mod shortlist;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{ChatModel, LlmClient, RetryPolicy};
use crate::notify::Notifier;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screening API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite storage
    let db = create_pool(&config.database_url).await?;

    // Initialize the model client
    let llm: Arc<dyn ChatModel> = Arc::new(LlmClient::new(
        config.ollama_base_url.clone(),
        config.llm_model.clone(),
        RetryPolicy::default(),
    ));
    info!("LLM client initialized (model: {})", config.llm_model);

    // Initialize the notification collaborator
    let notifier = Notifier::new(config.notify_webhook_url.clone());
    if config.notify_webhook_url.is_none() {
        info!("Notification webhook not configured; invites will be skipped");
    }

    // Build app state
    let state = AppState {
        db,
        llm,
        notifier,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
