//! Axum route handlers for shortlisting and interview notification.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::db;
use crate::errors::AppError;
use crate::models::candidate::{NewShortlistedCandidate, ShortlistedCandidate};
use crate::notify::InterviewInvite;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ShortlistResponse {
    pub candidates: Vec<ShortlistedCandidate>,
}

#[derive(Debug, Serialize)]
pub struct SubmitDetailsResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub email: String,
    pub candidate_name: String,
    pub job_title: String,
    pub assessment_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub sent: bool,
}

/// GET /api/v1/shortlist
pub async fn handle_list_shortlist(
    State(state): State<AppState>,
) -> Result<Json<ShortlistResponse>, AppError> {
    let candidates = db::list_shortlisted_candidates(&state.db).await?;
    Ok(Json(ShortlistResponse { candidates }))
}

/// POST /api/v1/shortlist
///
/// Appends a candidate to the shortlist. Rows are never mutated or deleted
/// afterwards.
pub async fn handle_submit_details(
    State(state): State<AppState>,
    Json(candidate): Json<NewShortlistedCandidate>,
) -> Result<Json<SubmitDetailsResponse>, AppError> {
    if candidate.phone.trim().is_empty()
        || candidate.email.trim().is_empty()
        || candidate.reason.trim().is_empty()
    {
        return Err(AppError::Validation("All fields are required".to_string()));
    }
    if !(0..=100).contains(&candidate.match_score) {
        return Err(AppError::Validation(
            "match_score must be between 0 and 100".to_string(),
        ));
    }

    let id = db::insert_shortlisted_candidate(&state.db, &candidate).await?;
    Ok(Json(SubmitDetailsResponse { id }))
}

/// POST /api/v1/shortlist/notify
///
/// Sends an interview invitation through the notification collaborator.
/// Delivery failure is reported in the body, not as a request failure.
pub async fn handle_notify_candidate(
    State(state): State<AppState>,
    Json(request): Json<NotifyRequest>,
) -> Result<Json<NotifyResponse>, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation(
            "Candidate email is required".to_string(),
        ));
    }

    let invite = InterviewInvite {
        to_address: &request.email,
        candidate_name: &request.candidate_name,
        job_title: &request.job_title,
        assessment_link: request.assessment_link.as_deref(),
    };
    let sent = state.notifier.send_invite(&invite).await;

    Ok(Json(NotifyResponse { sent }))
}
