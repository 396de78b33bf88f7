// All LLM prompt constants for the screening pipeline.
// Builders are pure: same inputs always produce the same prompt text.

/// System instruction for JD summarization. The JD text is appended verbatim.
pub const SUMMARIZE_SYSTEM_PREFIX: &str = "Summarize this job description: ";

/// System prompt for match scoring — names the exact output contract and
/// enforces JSON-only output.
pub const MATCH_SYSTEM: &str = "You are an AI Resume Evaluator. \
    Given a job summary and a candidate resume, extract relevant data from the resume \
    and evaluate how well the candidate matches the job summary.\n\n\
    Respond ONLY with a valid JSON object in this structure:\n\
    {\n\
    \x20 \"match_score\": integer between 0 and 100,\n\
    \x20 \"skills\": list of strings,\n\
    \x20 \"experience\": string,\n\
    \x20 \"education\": string,\n\
    \x20 \"summary\": string,\n\
    \x20 \"objective\": string\n\
    }\n\n\
    Do not include explanations, markdown, or any text outside of the JSON object.";

/// Match user-message template. Replace `{resume_text}` and `{jd_summary}`
/// before sending.
pub const MATCH_USER_TEMPLATE: &str =
    "Resume: {resume_text}\n\nJob Summary: {jd_summary}\n\nReturn only the JSON.";

/// Builds the summarize prompt for a job description.
pub fn summarize_prompt(jd_text: &str) -> String {
    format!("{SUMMARIZE_SYSTEM_PREFIX}{jd_text}")
}

/// Builds the match user message from the normalized resume text and the
/// JD summary.
pub fn match_user_prompt(resume_text: &str, jd_summary: &str) -> String {
    MATCH_USER_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{jd_summary}", jd_summary)
}
