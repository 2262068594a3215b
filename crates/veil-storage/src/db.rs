//! History table operations

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use time::OffsetDateTime;
use tracing::debug;
use veil_core::{
    BlurLevel, HISTORY_LIMIT, HistoryRecord, NewHistoryRecord, RedactionMode, format_timestamp,
};

const CREATE_HISTORY: &str = r#"
CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    original_filename TEXT,
    processed_filename TEXT,
    mode TEXT,
    blur_level INTEGER,
    emails INTEGER,
    phones INTEGER,
    cards INTEGER,
    created_at TEXT
)
"#;

/// Append-only store of processing records
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HistoryStore {
    pool: SqlitePool,
}

impl HistoryStore {
    /// Open (or create) the database and ensure the history table exists
    pub async fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_HISTORY).execute(&pool).await?;
        debug!("History store ready at {}", db_path.display());

        Ok(Self { pool })
    }

    /// Append one record. The timestamp is assigned here.
    pub async fn record(&self, record: NewHistoryRecord) -> Result<HistoryRecord> {
        let created_at = format_timestamp(OffsetDateTime::now_utc())?;
        let counts = record.counts;

        let result = sqlx::query(
            r#"
            INSERT INTO history (
                original_filename,
                processed_filename,
                mode,
                blur_level,
                emails,
                phones,
                cards,
                created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.original_filename)
        .bind(&record.processed_filename)
        .bind(record.mode.as_str())
        .bind(i64::from(record.blur_level))
        .bind(counts.map(|c| c.email as i64))
        .bind(counts.map(|c| c.phone as i64))
        .bind(counts.map(|c| c.card as i64))
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(HistoryRecord {
            id: result.last_insert_rowid(),
            original_filename: record.original_filename,
            processed_filename: record.processed_filename,
            mode: record.mode,
            blur_level: record.blur_level,
            emails: counts.map(|c| c.email),
            phones: counts.map(|c| c.phone),
            cards: counts.map(|c| c.card),
            created_at,
        })
    }

    /// Most recent records, newest first. `limit` is capped at [`HISTORY_LIMIT`].
    pub async fn recent(&self, limit: u32) -> Result<Vec<HistoryRecord>> {
        let limit = limit.min(HISTORY_LIMIT);

        let rows = sqlx::query(
            r#"
            SELECT
                id,
                original_filename,
                processed_filename,
                mode,
                blur_level,
                emails,
                phones,
                cards,
                created_at
            FROM history
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }

    /// Total number of rows
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM history")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

fn row_to_record(row: &SqliteRow) -> Result<HistoryRecord> {
    let mode: String = row.try_get("mode")?;
    let blur_level: i64 = row.try_get("blur_level")?;
    let emails: Option<i64> = row.try_get("emails")?;
    let phones: Option<i64> = row.try_get("phones")?;
    let cards: Option<i64> = row.try_get("cards")?;

    Ok(HistoryRecord {
        id: row.try_get("id")?,
        original_filename: row.try_get("original_filename")?,
        processed_filename: row.try_get("processed_filename")?,
        mode: mode.parse::<RedactionMode>()?,
        blur_level: BlurLevel::from_level(blur_level),
        emails: emails.map(|n| n as u32),
        phones: phones.map(|n| n as u32),
        cards: cards.map(|n| n as u32),
        created_at: row.try_get("created_at")?,
    })
}
