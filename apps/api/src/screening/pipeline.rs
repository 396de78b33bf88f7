//! Match orchestration — sequences extraction, normalization, the two
//! model calls, and reply parsing into one pipeline run.

use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::screening::extract::extract_text;
use crate::screening::normalize::normalize;
use crate::screening::parser::{parse_match_reply, MatchResult};
use crate::screening::prompts::{match_user_prompt, summarize_prompt, MATCH_SYSTEM};

/// An uploaded resume. Lives in memory for the duration of one pipeline
/// run and is never persisted.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Runs the full match pipeline for one resume against one job description.
///
/// extract → normalize → summarize JD → match → parse. The two model calls
/// are strictly sequential: the match prompt depends on the summary.
///
/// Format and extraction failures abort the run. Model-communication
/// failures abort after the client's retry budget. Parse failures never
/// abort — they degrade the result to the sentinel.
///
/// The caller fetches the JD text from storage and owns persistence and
/// notification; this function's only side effects are the two outbound
/// model calls.
pub async fn run_match(
    document: &UploadedDocument,
    jd_text: &str,
    chat: &dyn ChatModel,
) -> Result<MatchResult, AppError> {
    debug!(filename = %document.filename, "extracting resume text");
    let raw_text = extract_text(&document.filename, &document.bytes)?;
    let resume_text = normalize(&raw_text);

    debug!("summarizing job description");
    let jd_summary = chat
        .complete(&summarize_prompt(jd_text), None)
        .await
        .map_err(|e| AppError::Llm(format!("JD summarization failed: {e}")))?;

    debug!("scoring resume against job summary");
    let user_prompt = match_user_prompt(&resume_text, &jd_summary);
    let reply = chat
        .complete(MATCH_SYSTEM, Some(&user_prompt))
        .await
        .map_err(|e| AppError::Llm(format!("match evaluation failed: {e}")))?;

    debug!(raw_reply = %reply, "raw model reply");
    Ok(parse_match_reply(&reply))
}
