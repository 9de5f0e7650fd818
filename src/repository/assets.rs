//! Assets repository for database operations

use rust_decimal::Decimal;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::asset::{Asset, AssetDetails, AssetQuery, CreateAsset, DepreciableAsset, UpdateAsset},
};

const DETAILS_SELECT: &str = r#"
    SELECT a.id, a.asset_tag, a.serial, a.model_id, m.name AS model_name,
           mf.name AS manufacturer_name, c.name AS category_name,
           a.status_id, s.name AS status_name, s.kind AS status_kind,
           a.supplier_id, sp.name AS supplier_name,
           a.assigned_to, u.name AS assigned_name,
           a.purchase_date, a.purchase_cost, a.current_value, a.useful_life_months,
           a.residual_value, a.warranty_months, a.order_number, a.notes,
           a.created_at, a.updated_at
    FROM assets a
    JOIN device_models m ON m.id = a.model_id
    JOIN manufacturers mf ON mf.id = m.manufacturer_id
    JOIN categories c ON c.id = m.category_id
    JOIN status_labels s ON s.id = a.status_id
    LEFT JOIN suppliers sp ON sp.id = a.supplier_id
    LEFT JOIN users u ON u.id = a.assigned_to
"#;

const LIST_FILTER: &str = r#"
    WHERE a.deleted_at IS NULL
      AND ($1::text IS NULL OR a.asset_tag ILIKE $1 OR a.serial ILIKE $1)
      AND ($2::int4 IS NULL OR a.status_id = $2)
      AND ($3::int4 IS NULL OR a.model_id = $3)
      AND ($4::int4 IS NULL OR a.assigned_to = $4)
"#;

#[derive(Clone)]
pub struct AssetsRepository {
    pool: Pool<Postgres>,
}

impl AssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a live (not soft-deleted) asset by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset with id {} not found", id)))
    }

    /// Get asset with related names resolved
    pub async fn get_details(&self, id: i32) -> AppResult<AssetDetails> {
        let query = format!("{} WHERE a.id = $1 AND a.deleted_at IS NULL", DETAILS_SELECT);
        sqlx::query_as::<_, AssetDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset with id {} not found", id)))
    }

    /// List assets with filters and pagination, newest first
    pub async fn list(&self, query: &AssetQuery, per_page: i64, offset: i64) -> AppResult<(Vec<AssetDetails>, i64)> {
        let search = query
            .search
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", s.trim()));

        let count_query = format!("SELECT COUNT(*) FROM assets a {}", LIST_FILTER);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&search)
            .bind(query.status_id)
            .bind(query.model_id)
            .bind(query.assigned_to)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "{} {} ORDER BY a.created_at DESC, a.id DESC LIMIT $5 OFFSET $6",
            DETAILS_SELECT, LIST_FILTER
        );
        let assets = sqlx::query_as::<_, AssetDetails>(&select_query)
            .bind(&search)
            .bind(query.status_id)
            .bind(query.model_id)
            .bind(query.assigned_to)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((assets, total))
    }

    /// Check if an asset tag is taken (soft-deleted assets keep their tag)
    pub async fn tag_exists(&self, asset_tag: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM assets WHERE asset_tag = $1 AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(asset_tag)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Check if a serial number is taken (soft-deleted assets keep their serial)
    pub async fn serial_exists(&self, serial: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM assets WHERE serial = $1 AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(serial)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create an asset. `current_value` starts at the purchase cost.
    pub async fn create(&self, data: &CreateAsset, useful_life_months: i32) -> AppResult<Asset> {
        let residual_value = data.residual_value.unwrap_or(Decimal::ZERO);
        let current_value = data.purchase_cost.unwrap_or(Decimal::ZERO);

        let asset = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                asset_tag, serial, model_id, status_id, supplier_id,
                purchase_date, purchase_cost, current_value, useful_life_months,
                residual_value, warranty_months, order_number, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&data.asset_tag)
        .bind(&data.serial)
        .bind(data.model_id)
        .bind(data.status_id)
        .bind(data.supplier_id)
        .bind(data.purchase_date)
        .bind(data.purchase_cost)
        .bind(current_value)
        .bind(useful_life_months)
        .bind(residual_value)
        .bind(data.warranty_months)
        .bind(&data.order_number)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(asset)
    }

    /// Update the provided fields of an asset, plus its book value when revalued
    pub async fn update(&self, id: i32, data: &UpdateAsset, current_value: Option<Decimal>) -> AppResult<Asset> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.asset_tag, "asset_tag");
        add_field!(data.serial, "serial");
        add_field!(data.model_id, "model_id");
        add_field!(data.status_id, "status_id");
        add_field!(data.supplier_id, "supplier_id");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.purchase_cost, "purchase_cost");
        add_field!(data.useful_life_months, "useful_life_months");
        add_field!(data.residual_value, "residual_value");
        add_field!(data.warranty_months, "warranty_months");
        add_field!(data.order_number, "order_number");
        add_field!(data.notes, "notes");
        add_field!(current_value, "current_value");
        let _ = idx;

        let query = format!(
            "UPDATE assets SET {} WHERE id = $1 AND deleted_at IS NULL RETURNING *",
            sets.join(", ")
        );

        let mut builder = sqlx::query_as::<_, Asset>(&query).bind(id);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.asset_tag);
        bind_field!(data.serial);
        bind_field!(data.model_id);
        bind_field!(data.status_id);
        bind_field!(data.supplier_id);
        bind_field!(data.purchase_date);
        bind_field!(data.purchase_cost);
        bind_field!(data.useful_life_months);
        bind_field!(data.residual_value);
        bind_field!(data.warranty_months);
        bind_field!(data.order_number);
        bind_field!(data.notes);
        bind_field!(current_value);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset with id {} not found", id)))
    }

    /// Soft-delete an asset; history rows keep referencing it
    pub async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE assets SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset with id {} not found", id)));
        }
        Ok(())
    }

    // ---- Dependency checks (all rows, the foreign keys see soft-deleted assets too) ----

    pub async fn exists_for_model(&self, model_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM assets WHERE model_id = $1)")
            .bind(model_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn exists_for_status(&self, status_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM assets WHERE status_id = $1)")
            .bind(status_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn exists_for_supplier(&self, supplier_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM assets WHERE supplier_id = $1)")
            .bind(supplier_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Whether a user currently holds any live asset
    pub async fn exists_assigned_to(&self, user_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM assets WHERE assigned_to = $1 AND deleted_at IS NULL)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // ---- Transactional operations (caller owns the transaction) ----

    /// Lock a live asset row until the surrounding transaction ends
    pub async fn lock_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset with id {} not found", id)))
    }

    /// Set status and assignee together
    pub async fn set_assignment(
        &self,
        conn: &mut PgConnection,
        id: i32,
        status_id: i32,
        assigned_to: Option<i32>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE assets SET status_id = $1, assigned_to = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(status_id)
        .bind(assigned_to)
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn set_status(&self, conn: &mut PgConnection, id: i32, status_id: i32) -> AppResult<()> {
        sqlx::query("UPDATE assets SET status_id = $1, updated_at = NOW() WHERE id = $2")
            .bind(status_id)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    // ---- Depreciation ----

    /// Live assets with a purchase date and a positive purchase cost
    pub async fn list_depreciable(&self) -> AppResult<Vec<DepreciableAsset>> {
        let assets = sqlx::query_as::<_, DepreciableAsset>(
            r#"
            SELECT id, purchase_date, purchase_cost, residual_value, useful_life_months, current_value
            FROM assets
            WHERE deleted_at IS NULL
              AND purchase_date IS NOT NULL
              AND purchase_cost > 0
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    pub async fn set_current_value(&self, id: i32, current_value: Decimal) -> AppResult<()> {
        sqlx::query("UPDATE assets SET current_value = $1, updated_at = NOW() WHERE id = $2")
            .bind(current_value)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
