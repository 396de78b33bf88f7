//! Storage collaborator: SQLite pool, schema bootstrap, and the queries the
//! pipeline's callers need. The pipeline itself never touches the database.

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::candidate::{NewShortlistedCandidate, ShortlistedCandidate};
use crate::models::job::{JobListing, NewJobListing};

/// Listings returned per page. The original UI only ever showed ten.
const JOB_LISTING_PAGE: i64 = 10;

/// Creates a SQLite connection pool and bootstraps the schema.
/// The URL should allow creation, e.g. `sqlite:screening.db?mode=rwc`.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Connecting to SQLite...");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    migrate(&pool).await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS job_listings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shortlisted_candidates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            reason TEXT NOT NULL,
            match_score INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list_job_listings(pool: &SqlitePool) -> Result<Vec<JobListing>, sqlx::Error> {
    sqlx::query_as::<_, JobListing>(
        "SELECT id, title, description FROM job_listings ORDER BY id LIMIT ?",
    )
    .bind(JOB_LISTING_PAGE)
    .fetch_all(pool)
    .await
}

/// Fetches the free-text description for a job, or `None` if the id is
/// unknown. This is the storage contract the match pipeline's caller uses.
pub async fn get_job_description(
    pool: &SqlitePool,
    job_id: i64,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT description FROM job_listings WHERE id = ?")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_job_listings(
    pool: &SqlitePool,
    listings: &[NewJobListing],
) -> Result<u64, sqlx::Error> {
    let mut stored = 0u64;
    for listing in listings {
        sqlx::query("INSERT INTO job_listings (title, description) VALUES (?, ?)")
            .bind(&listing.title)
            .bind(&listing.description)
            .execute(pool)
            .await?;
        stored += 1;
    }
    Ok(stored)
}

/// Appends a shortlisted candidate and returns the storage-assigned id.
pub async fn insert_shortlisted_candidate(
    pool: &SqlitePool,
    candidate: &NewShortlistedCandidate,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO shortlisted_candidates (phone, email, reason, match_score, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&candidate.phone)
    .bind(&candidate.email)
    .bind(&candidate.reason)
    .bind(candidate.match_score)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn list_shortlisted_candidates(
    pool: &SqlitePool,
) -> Result<Vec<ShortlistedCandidate>, sqlx::Error> {
    sqlx::query_as::<_, ShortlistedCandidate>(
        "SELECT id, phone, email, reason, match_score, created_at \
         FROM shortlisted_candidates ORDER BY id",
    )
    .fetch_all(pool)
    .await
}
