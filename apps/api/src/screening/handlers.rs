//! Axum route handlers for the screening pipeline.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db;
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::screening::parser::MatchResult;
use crate::screening::pipeline::{run_match, UploadedDocument};
use crate::screening::prompts::summarize_prompt;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SummarizeJdRequest {
    pub jd_content: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeJdResponse {
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/:job_id/match
///
/// Runs the full pipeline for an uploaded resume (multipart field `resume`)
/// against the stored job description. The MatchResult is the response body
/// — results are never parked in shared state between requests.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<MatchResult>, AppError> {
    let document = read_resume_field(multipart).await?;

    let jd_text = db::get_job_description(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let result = run_match(&document, &jd_text, state.llm.as_ref()).await?;

    Ok(Json(result))
}

/// POST /api/v1/jobs/summarize
///
/// Standalone JD summarization, useful for previewing what the match
/// pipeline will score against.
pub async fn handle_summarize_jd(
    State(state): State<AppState>,
    Json(request): Json<SummarizeJdRequest>,
) -> Result<Json<SummarizeJdResponse>, AppError> {
    if request.jd_content.trim().is_empty() {
        return Err(AppError::Validation(
            "jd_content cannot be empty".to_string(),
        ));
    }

    let summary = state
        .llm
        .complete(&summarize_prompt(&request.jd_content), None)
        .await
        .map_err(|e| AppError::Llm(format!("JD summarization failed: {e}")))?;

    Ok(Json(SummarizeJdResponse { summary }))
}

/// Pulls the `resume` field out of the multipart body.
async fn read_resume_field(mut multipart: Multipart) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }

        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| AppError::Validation("Resume file has no filename".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read resume upload: {e}")))?;

        return Ok(UploadedDocument {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::Validation(
        "No resume file uploaded".to_string(),
    ))
}
