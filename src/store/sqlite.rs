//! SQLite-backed gift store.
//!
//! The durable backend. Every successful mutation re-reads the ordered
//! collection and pushes it through a watch channel, so subscribers always see
//! the same snapshot a fresh `list` would return.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;
use tokio::sync::watch;

use super::GiftStore;
use crate::errors::AppError;
use crate::models::Gift;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS gifts (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            reserved INTEGER NOT NULL DEFAULT 0,
            reserved_by TEXT,
            reserved_at TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_gifts_created_at ON gifts(created_at);
        CREATE INDEX IF NOT EXISTS idx_gifts_reserved ON gifts(reserved);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Durable gift store with a live change feed.
pub struct SqliteGiftStore {
    pool: SqlitePool,
    changes: watch::Sender<Vec<Gift>>,
}

impl SqliteGiftStore {
    pub fn new(pool: SqlitePool) -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self { pool, changes }
    }

    async fn fetch_all(&self) -> Result<Vec<Gift>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, reserved, reserved_by, reserved_at, created_at
             FROM gifts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(gift_from_row).collect())
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<Gift>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, reserved, reserved_by, reserved_at, created_at
             FROM gifts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(gift_from_row))
    }

    /// Push the current ordered collection to subscribers.
    async fn publish(&self) -> Result<(), AppError> {
        let gifts = self.fetch_all().await?;
        self.changes.send_replace(gifts);
        Ok(())
    }
}

#[async_trait]
impl GiftStore for SqliteGiftStore {
    async fn list(&self) -> Result<Vec<Gift>, AppError> {
        self.fetch_all().await
    }

    async fn create(&self, name: &str) -> Result<Gift, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO gifts (id, name, reserved, reserved_by, reserved_at, created_at)
             VALUES (?, ?, 0, NULL, NULL, ?)",
        )
        .bind(&id)
        .bind(name)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.publish().await?;

        Ok(Gift {
            id,
            name: name.to_string(),
            reserved: false,
            reserved_by: None,
            reserved_at: None,
            created_at: now,
        })
    }

    async fn reserve(&self, id: &str, guest_name: &str) -> Result<Gift, AppError> {
        let now = Utc::now().to_rfc3339();

        // Conditional write: only an unreserved row can flip. A concurrent
        // reservation that lands first makes this a no-op.
        let result = sqlx::query(
            "UPDATE gifts SET reserved = 1, reserved_by = ?, reserved_at = ?
             WHERE id = ? AND reserved = 0",
        )
        .bind(guest_name)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish a vanished gift from a lost race.
            return match self.fetch_one(id).await? {
                Some(_) => Err(AppError::Conflict(format!(
                    "Gift {} is already reserved",
                    id
                ))),
                None => Err(AppError::NotFound(format!("Gift {} not found", id))),
            };
        }

        self.publish().await?;

        let gift = self
            .fetch_one(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Gift {} not found", id)))?;
        Ok(gift)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        // Idempotent: a missing row is fine.
        sqlx::query("DELETE FROM gifts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.publish().await?;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM gifts").execute(&self.pool).await?;

        self.publish().await?;
        Ok(())
    }

    async fn replace_all(&self, gifts: &[Gift]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM gifts").execute(&mut *tx).await?;

        for gift in gifts {
            sqlx::query(
                "INSERT INTO gifts (id, name, reserved, reserved_by, reserved_at, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&gift.id)
            .bind(&gift.name)
            .bind(gift.reserved as i32)
            .bind(&gift.reserved_by)
            .bind(&gift.reserved_at)
            .bind(&gift.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.publish().await?;
        Ok(())
    }

    fn subscribe(&self) -> Option<watch::Receiver<Vec<Gift>>> {
        Some(self.changes.subscribe())
    }
}

fn gift_from_row(row: &sqlx::sqlite::SqliteRow) -> Gift {
    let reserved: i32 = row.get("reserved");
    Gift {
        id: row.get("id"),
        name: row.get("name"),
        reserved: reserved != 0,
        reserved_by: row.get("reserved_by"),
        reserved_at: row.get("reserved_at"),
        created_at: row.get("created_at"),
    }
}
