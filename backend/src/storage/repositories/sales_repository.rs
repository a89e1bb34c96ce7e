use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use shared::DayEntry;
use sqlx::Row;
use tracing::debug;

use crate::storage::connection::DbConnection;
use crate::storage::traits::SalesStorage;

/// Repository for daily sales rows
#[derive(Clone)]
pub struct SalesRepository {
    db: DbConnection,
}

impl SalesRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SalesStorage for SalesRepository {
    async fn list_month(&self, user_id: &str, year: i32, month: u32) -> Result<Vec<DayEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT day, value, ly_value
            FROM sales_daily
            WHERE user_id = ? AND year = ? AND month = ?
            ORDER BY day ASC
            "#,
        )
        .bind(user_id)
        .bind(year)
        .bind(i64::from(month))
        .fetch_all(self.db.pool())
        .await?;

        let entries = rows
            .iter()
            .map(|row| {
                let day: i64 = row.get("day");
                Ok(DayEntry {
                    day: u32::try_from(day).with_context(|| format!("stored day {} out of range", day))?,
                    value: row.get("value"),
                    prior_year_value: row.get("ly_value"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} day rows for {} {}-{:02}", entries.len(), user_id, year, month);
        Ok(entries)
    }

    async fn upsert_day(&self, user_id: &str, year: i32, month: u32, entry: &DayEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sales_daily (user_id, year, month, day, value, ly_value, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id, year, month, day) DO UPDATE SET
                value = excluded.value,
                ly_value = excluded.ly_value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(year)
        .bind(i64::from(month))
        .bind(i64::from(entry.day))
        .bind(entry.value)
        .bind(entry.prior_year_value)
        .bind(Utc::now().to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}
