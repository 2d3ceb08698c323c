//! Database access for the lead engine
//!
//! One shared SQLite database holds leads, the partner/product catalog and
//! the downstream CRM records. UUIDs and timestamps are stored as TEXT
//! (hyphenated / RFC 3339) and parsed on read.

pub mod companies;
pub mod contacts;
pub mod deals;
pub mod leads;
pub mod partners;
pub mod schema;

use chrono::{DateTime, Utc};
use crm_common::{Error, Result};
use sqlx::SqlitePool;
use std::path::Path;
use uuid::Uuid;

/// Initialize the database connection pool.
///
/// Creates the database file (and parent directory) if missing and applies
/// the schema.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;
    schema::init_tables(&pool).await?;

    Ok(pool)
}

pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| Error::Internal(format!("Failed to parse {}: {}", field, e)))
}

pub(crate) fn parse_opt_uuid(value: Option<String>, field: &str) -> Result<Option<Uuid>> {
    value.map(|s| parse_uuid(&s, field)).transpose()
}

pub(crate) fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Failed to parse {}: {}", field, e)))
}
