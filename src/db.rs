use anyhow::Result;
use sqlx::{any::AnyPoolOptions, Any, Pool};

/// Counter slot holding the running total of removed tracking parameters.
/// Every surface that displays stats reads and writes this one slot.
pub const TOTAL_PARAMS_REMOVED: &str = "totalParamsRemoved";

/// Persistent named counters. The store holds opaque running totals; what a
/// counter means is up to the caller.
#[derive(Clone)]
pub struct Db {
    pub pool: Pool<Any>,
}

impl Db {
    pub async fn new(database_url: &str) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    async fn init(&self) -> Result<()> {
        let is_sqlite = self.pool.connect_options().database_url.scheme() == "sqlite";

        let create_counters = if is_sqlite {
            "CREATE TABLE IF NOT EXISTS counters (
                name TEXT PRIMARY KEY,
                value INTEGER NOT NULL DEFAULT 0
            )"
        } else {
            "CREATE TABLE IF NOT EXISTS counters (
                name TEXT PRIMARY KEY,
                value BIGINT NOT NULL DEFAULT 0
            )"
        };
        sqlx::query(create_counters).execute(&self.pool).await?;

        Ok(())
    }

    /// Current value of a counter; a slot never written reads as 0.
    pub async fn get_counter(&self, name: &str) -> Result<i64> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT value FROM counters WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value).unwrap_or(0))
    }

    pub async fn increment_counter(&self, name: &str, amount: i64) -> Result<()> {
        sqlx::query(
            "INSERT INTO counters (name, value) VALUES (?, ?)
             ON CONFLICT(name) DO UPDATE SET value = counters.value + excluded.value",
        )
        .bind(name)
        .bind(amount)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn set_counter(&self, name: &str, value: i64) -> Result<()> {
        sqlx::query(
            "INSERT INTO counters (name, value) VALUES (?, ?)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value",
        )
        .bind(name)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
