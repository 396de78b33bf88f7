//! Text normalization — cleans extracted resume text into the canonical
//! form fed to prompts.

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn page_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)page \d+ of \d+").expect("valid page-header regex"))
}

/// Normalizes extracted text: collapses every whitespace run (including
/// newlines) to a single space, removes `Page <n> of <m>` headers anywhere
/// in the text, and trims the ends. Header removal re-collapses the gap it
/// leaves so that normalization is idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let collapsed = whitespace_run().replace_all(text, " ");
    let stripped = page_header().replace_all(&collapsed, " ");
    let recollapsed = whitespace_run().replace_all(&stripped, " ");
    recollapsed.trim().to_string()
}
