//! Asset history repository. Rows are append-only: there is no update or
//! delete here.

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::asset_history::{AssetHistory, AssetHistoryEntry, HandoverDocument, NewAssetHistory},
};

const ENTRY_SELECT: &str = r#"
    SELECT h.id, h.asset_id, a.asset_tag,
           h.user_id, u.name AS user_name,
           h.admin_id, ad.name AS admin_name,
           h.action_type, h.note, h.created_at
    FROM asset_histories h
    JOIN assets a ON a.id = h.asset_id
    LEFT JOIN users u ON u.id = h.user_id
    LEFT JOIN users ad ON ad.id = h.admin_id
"#;

#[derive(Clone)]
pub struct AssetHistoriesRepository {
    pool: Pool<Postgres>,
}

impl AssetHistoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append a history row on the transaction's connection
    pub async fn append(&self, conn: &mut PgConnection, entry: &NewAssetHistory) -> AppResult<AssetHistory> {
        let history = sqlx::query_as::<_, AssetHistory>(
            r#"
            INSERT INTO asset_histories (asset_id, user_id, admin_id, action_type, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(entry.asset_id)
        .bind(entry.user_id)
        .bind(entry.admin_id)
        .bind(entry.action_type)
        .bind(&entry.note)
        .fetch_one(&mut *conn)
        .await?;
        Ok(history)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<AssetHistory> {
        sqlx::query_as::<_, AssetHistory>("SELECT * FROM asset_histories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("History entry with id {} not found", id)))
    }

    /// History of one asset, newest first
    pub async fn list_for_asset(&self, asset_id: i32) -> AppResult<Vec<AssetHistoryEntry>> {
        let query = format!(
            "{} WHERE h.asset_id = $1 ORDER BY h.created_at DESC, h.id DESC",
            ENTRY_SELECT
        );
        let entries = sqlx::query_as::<_, AssetHistoryEntry>(&query)
            .bind(asset_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    /// Newest entries across all assets
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<AssetHistoryEntry>> {
        let query = format!("{} ORDER BY h.created_at DESC, h.id DESC LIMIT $1", ENTRY_SELECT);
        let entries = sqlx::query_as::<_, AssetHistoryEntry>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    /// Handover data for a history row
    pub async fn handover(&self, history_id: i32) -> AppResult<HandoverDocument> {
        sqlx::query_as::<_, HandoverDocument>(
            r#"
            SELECT h.id AS history_id, h.created_at AS handed_over_at, h.note,
                   a.asset_tag, a.serial, a.purchase_date,
                   m.name AS model_name, m.model_number,
                   mf.name AS manufacturer_name, c.name AS category_name,
                   h.user_id AS receiver_id, u.name AS receiver_name, u.email AS receiver_email,
                   d.name AS receiver_department,
                   h.admin_id AS issuer_id, ad.name AS issuer_name
            FROM asset_histories h
            JOIN assets a ON a.id = h.asset_id
            JOIN device_models m ON m.id = a.model_id
            JOIN manufacturers mf ON mf.id = m.manufacturer_id
            JOIN categories c ON c.id = m.category_id
            LEFT JOIN users u ON u.id = h.user_id
            LEFT JOIN departments d ON d.id = u.department_id
            LEFT JOIN users ad ON ad.id = h.admin_id
            WHERE h.id = $1
            "#,
        )
        .bind(history_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("History entry with id {} not found", history_id)))
    }
}
