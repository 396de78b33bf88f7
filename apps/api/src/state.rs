use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::llm_client::ChatModel;
use crate::notify::Notifier;

/// Shared application state injected into all route handlers via Axum
/// extractors. The model client sits behind `Arc<dyn ChatModel>` so tests
/// swap in deterministic fakes.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub llm: Arc<dyn ChatModel>,
    pub notifier: Notifier,
    pub config: Config,
}
