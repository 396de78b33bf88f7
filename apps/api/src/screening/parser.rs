//! Match-result parsing — recovers a structured result from a model reply
//! that is supposed to be pure JSON but may arrive wrapped in prose or
//! code fences.
//!
//! Parsing is total: any failure degrades to the sentinel result instead
//! of aborting the request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// The fixed error string placed in every field when a reply cannot be
/// parsed.
pub const PARSE_ERROR_SENTINEL: &str = "Error parsing AI response";

/// A structured match result. Fields are carried as raw JSON values so a
/// well-formed reply passes through unchanged (no coercion), partially
/// filled objects are tolerated, and the sentinel state can hold the same
/// error string in every field — including `match_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default)]
    pub match_score: Value,
    #[serde(default)]
    pub skills: Value,
    #[serde(default)]
    pub experience: Value,
    #[serde(default)]
    pub education: Value,
    #[serde(default)]
    pub summary: Value,
    #[serde(default)]
    pub objective: Value,
}

impl MatchResult {
    /// The all-fields-equal-error-string result used to signal a non-fatal
    /// parse failure.
    pub fn sentinel() -> Self {
        let error = Value::String(PARSE_ERROR_SENTINEL.to_string());
        Self {
            match_score: error.clone(),
            skills: error.clone(),
            experience: error.clone(),
            education: error.clone(),
            summary: error.clone(),
            objective: error,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::sentinel()
    }

    /// The match score as an integer in [0, 100], if the reply carried one.
    pub fn score(&self) -> Option<i64> {
        self.match_score.as_i64().filter(|s| (0..=100).contains(s))
    }
}

/// The span from the first `{` to the last `}` in the reply.
///
/// Deliberately greedy: a reply containing multiple JSON-looking fragments
/// resolves to the outermost span, which then either parses or falls into
/// the sentinel path. This mirrors the documented contract — do not narrow
/// it to the first balanced object.
fn json_span(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end >= start).then(|| &reply[start..=end])
}

/// Parses a raw model reply into a `MatchResult`. Never errors: replies
/// with no braces, truncated JSON, or malformed content all degrade to the
/// sentinel result.
pub fn parse_match_reply(reply: &str) -> MatchResult {
    let Some(span) = json_span(reply) else {
        warn!("model reply contains no JSON object span");
        return MatchResult::sentinel();
    };

    match serde_json::from_str::<MatchResult>(span) {
        Ok(result) => result,
        Err(e) => {
            warn!("failed to parse model reply as JSON: {e}");
            MatchResult::sentinel()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_reply_passes_fields_through_unchanged() {
        let reply = r#"{"match_score": 82, "skills": ["Python", "APIs"], "experience": "5 years", "education": "BS CS", "summary": "Strong fit", "objective": "Backend role"}"#;
        let result = parse_match_reply(reply);

        assert_eq!(result.match_score, json!(82));
        assert_eq!(result.skills, json!(["Python", "APIs"]));
        assert_eq!(result.experience, json!("5 years"));
        assert_eq!(result.education, json!("BS CS"));
        assert_eq!(result.summary, json!("Strong fit"));
        assert_eq!(result.objective, json!("Backend role"));
        assert_eq!(result.score(), Some(82));
        assert!(!result.is_sentinel());
    }

    #[test]
    fn test_json_wrapped_in_prose_is_recovered() {
        let reply = r#"Sure! Here's the result: {"match_score": 70} Hope that helps!"#;
        let result = parse_match_reply(reply);

        assert_eq!(result.match_score, json!(70));
        assert_eq!(result.score(), Some(70));
        // Absent keys are tolerated, not invented.
        assert_eq!(result.skills, Value::Null);
        assert!(!result.is_sentinel());
    }

    #[test]
    fn test_reply_with_no_braces_is_the_sentinel() {
        let result = parse_match_reply("I could not evaluate this resume.");
        assert!(result.is_sentinel());
        assert_eq!(result.match_score, json!(PARSE_ERROR_SENTINEL));
        assert_eq!(result.objective, json!(PARSE_ERROR_SENTINEL));
    }

    #[test]
    fn test_empty_reply_is_the_sentinel() {
        assert!(parse_match_reply("").is_sentinel());
    }

    #[test]
    fn test_truncated_json_is_the_sentinel() {
        assert!(parse_match_reply(r#"{"match_score": 70"#).is_sentinel());
    }

    #[test]
    fn test_malformed_fenced_json_is_the_sentinel() {
        let reply = "```json\n{\"match_score\": 70,\n```";
        assert!(parse_match_reply(reply).is_sentinel());
    }

    #[test]
    fn test_closing_brace_before_opening_brace_is_the_sentinel() {
        assert!(parse_match_reply("} stray braces {").is_sentinel());
    }

    #[test]
    fn test_multiple_fragments_resolve_to_the_outermost_span() {
        // The greedy first-{-to-last-} span covers both fragments and is
        // not valid JSON, so this degrades rather than grabbing the first
        // fragment alone.
        let reply = r#"{"match_score": 10} and also {"match_score": 90}"#;
        assert!(parse_match_reply(reply).is_sentinel());
    }

    #[test]
    fn test_non_object_span_is_the_sentinel() {
        assert!(parse_match_reply("scores: {not json at all}").is_sentinel());
    }

    #[test]
    fn test_out_of_range_score_is_not_a_valid_score() {
        let result = parse_match_reply(r#"{"match_score": 250}"#);
        assert!(!result.is_sentinel());
        assert_eq!(result.match_score, json!(250));
        assert_eq!(result.score(), None);
    }

    #[test]
    fn test_sentinel_serializes_with_every_field_equal() {
        let value = serde_json::to_value(MatchResult::sentinel()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 6);
        for field in object.values() {
            assert_eq!(field, &json!(PARSE_ERROR_SENTINEL));
        }
    }
}
