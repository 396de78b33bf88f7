use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A shortlisted candidate, created after a decision to move the candidate
/// to the next screening round. Append-only: the pipeline never mutates or
/// deletes these rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShortlistedCandidate {
    pub id: i64,
    pub phone: String,
    pub email: String,
    pub reason: String,
    pub match_score: i64,
    pub created_at: DateTime<Utc>,
}

/// Payload for shortlisting a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShortlistedCandidate {
    pub phone: String,
    pub email: String,
    pub reason: String,
    pub match_score: i64,
}
