use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored job listing. Immutable once stored; the description is the
/// free text candidates are evaluated against.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobListing {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Payload for bulk-storing job listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJobListing {
    pub title: String,
    pub description: String,
}
