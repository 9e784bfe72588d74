//! Document store over PostgreSQL.
//!
//! Records live in a single `documents` table addressed by collection
//! name, one JSONB document per record. The document's `timestamp` field
//! is a fixed-width ISO-8601 string (see [`timestamp`]), so ordering on
//! the raw string is chronological and `list_all` can sort newest-first
//! without casting. A stored document that no longer deserializes (for
//! example a corrupted timestamp) surfaces as an error on read rather
//! than being returned silently mangled.

pub mod models;
pub mod timestamp;

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::ApiError;
use models::Record;

/// Most records a single listing returns.
const LIST_CAP: i64 = 1000;

/// Handle over the document store. Constructed once at startup and
/// injected into handlers through the application state; cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect, verify reachability, and apply the idempotent schema.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        tracing::info!("connecting to document store");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        sqlx::query("SELECT 1").fetch_one(&pool).await?;

        let store = Self { pool };
        store.apply_schema().await?;

        tracing::info!("document store ready");
        Ok(store)
    }

    /// Build a store whose pool connects on first use. Queries against an
    /// unreachable server fail at execution time, not construction time.
    pub fn connect_lazy(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(3))
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    async fn apply_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                doc JSONB NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_documents_collection_ts
                ON documents(collection, (doc->>'timestamp') DESC)
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Write one record to its collection.
    pub async fn insert<T: Record>(&self, record: &T) -> Result<(), ApiError> {
        let doc = serde_json::to_value(record)?;
        sqlx::query("INSERT INTO documents (id, collection, doc) VALUES ($1, $2, $3)")
            .bind(record.id())
            .bind(T::COLLECTION)
            .bind(&doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Write a batch of records in one transaction; all or nothing.
    pub async fn insert_many<T: Record>(&self, records: &[T]) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            let doc = serde_json::to_value(record)?;
            sqlx::query("INSERT INTO documents (id, collection, doc) VALUES ($1, $2, $3)")
                .bind(record.id())
                .bind(T::COLLECTION)
                .bind(&doc)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// All records in a collection, newest first, capped at [`LIST_CAP`].
    pub async fn list_all<T: Record>(&self) -> Result<Vec<T>, ApiError> {
        let docs: Vec<serde_json::Value> = sqlx::query_scalar(
            r#"
            SELECT doc FROM documents
            WHERE collection = $1
            ORDER BY doc->>'timestamp' DESC
            LIMIT $2
        "#,
        )
        .bind(T::COLLECTION)
        .bind(LIST_CAP)
        .fetch_all(&self.pool)
        .await?;

        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(ApiError::from))
            .collect()
    }

    /// Zero-or-one record in `T`'s collection with the given email.
    pub async fn find_by_email<T: Record>(&self, email: &str) -> Result<Option<T>, ApiError> {
        let doc: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT doc FROM documents WHERE collection = $1 AND doc->>'email' = $2 LIMIT 1",
        )
        .bind(T::COLLECTION)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        doc.map(|doc| serde_json::from_value(doc).map_err(ApiError::from))
            .transpose()
    }

    /// Number of records in `T`'s collection.
    pub async fn count<T: Record>(&self) -> Result<i64, ApiError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
            .bind(T::COLLECTION)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Round-trip latency of a trivial query, for readiness checks.
    pub async fn ping(&self) -> Result<Duration, sqlx::Error> {
        let start = std::time::Instant::now();
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(start.elapsed())
    }

    /// Close the pool. Called once on graceful shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
