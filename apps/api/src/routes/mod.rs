pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs;
use crate::screening::handlers;
use crate::shortlist;
use crate::state::AppState;

/// Resume uploads are small; 10 MiB leaves generous headroom over the
/// default multipart limit.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job listings
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_store_jobs),
        )
        .route(
            "/api/v1/jobs/summarize",
            post(handlers::handle_summarize_jd),
        )
        // Screening pipeline
        .route(
            "/api/v1/jobs/:job_id/match",
            post(handlers::handle_match_resume),
        )
        // Shortlist
        .route(
            "/api/v1/shortlist",
            get(shortlist::handle_list_shortlist).post(shortlist::handle_submit_details),
        )
        .route(
            "/api/v1/shortlist/notify",
            post(shortlist::handle_notify_candidate),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
