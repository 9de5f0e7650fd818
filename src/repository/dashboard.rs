//! Dashboard aggregates

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{error::AppResult, models::dashboard::StatusCount};

/// Live asset count with summed cost and book value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetTotals {
    pub count: i64,
    pub cost: Decimal,
    pub current_value: Decimal,
}

#[derive(Clone)]
pub struct DashboardRepository {
    pool: Pool<Postgres>,
}

impl DashboardRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn asset_totals(&self) -> AppResult<AssetTotals> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count,
                   COALESCE(SUM(purchase_cost), 0) AS cost,
                   COALESCE(SUM(current_value), 0) AS current_value
            FROM assets
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AssetTotals {
            count: row.get("count"),
            cost: row.get("cost"),
            current_value: row.get("current_value"),
        })
    }

    pub async fn license_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM licenses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Live asset count per status label, labels without assets included
    pub async fn assets_by_status(&self) -> AppResult<Vec<StatusCount>> {
        let counts = sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT s.id AS status_id, s.name AS status, s.kind, COUNT(a.id) AS count
            FROM status_labels s
            LEFT JOIN assets a ON a.status_id = s.id AND a.deleted_at IS NULL
            GROUP BY s.id, s.name, s.kind
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }
}
