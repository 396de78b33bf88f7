//! Axum route handlers for job-listing storage.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::db;
use crate::errors::AppError;
use crate::models::job::{JobListing, NewJobListing};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StoreJobsRequest {
    pub job_listings: Vec<NewJobListing>,
}

#[derive(Debug, Serialize)]
pub struct StoreJobsResponse {
    pub stored: u64,
}

#[derive(Debug, Serialize)]
pub struct JobListingsResponse {
    pub job_listings: Vec<JobListing>,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<JobListingsResponse>, AppError> {
    let job_listings = db::list_job_listings(&state.db).await?;
    Ok(Json(JobListingsResponse { job_listings }))
}

/// POST /api/v1/jobs
///
/// Bulk-stores job listings. Listings are immutable once stored.
pub async fn handle_store_jobs(
    State(state): State<AppState>,
    Json(request): Json<StoreJobsRequest>,
) -> Result<Json<StoreJobsResponse>, AppError> {
    if request.job_listings.is_empty() {
        return Err(AppError::Validation(
            "job_listings are required".to_string(),
        ));
    }

    let stored = db::insert_job_listings(&state.db, &request.job_listings).await?;
    Ok(Json(StoreJobsResponse { stored }))
}
