//! Maintenances repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::maintenance::{CreateMaintenance, Maintenance, UpdateMaintenance},
};

const SELECT_WITH_NAMES: &str = r#"
    SELECT mt.*, a.asset_tag, s.name AS supplier_name
    FROM maintenances mt
    JOIN assets a ON a.id = mt.asset_id
    JOIN suppliers s ON s.id = mt.supplier_id
"#;

#[derive(Clone)]
pub struct MaintenancesRepository {
    pool: Pool<Postgres>,
}

impl MaintenancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, per_page: i64, offset: i64) -> AppResult<(Vec<Maintenance>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenances")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "{} ORDER BY mt.created_at DESC, mt.id DESC LIMIT $1 OFFSET $2",
            SELECT_WITH_NAMES
        );
        let maintenances = sqlx::query_as::<_, Maintenance>(&query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((maintenances, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Maintenance> {
        let query = format!("{} WHERE mt.id = $1", SELECT_WITH_NAMES);
        sqlx::query_as::<_, Maintenance>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance with id {} not found", id)))
    }

    /// Lock a maintenance row until the surrounding transaction ends
    pub async fn lock_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<Maintenance> {
        sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenances WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance with id {} not found", id)))
    }

    pub async fn insert(&self, conn: &mut PgConnection, data: &CreateMaintenance) -> AppResult<Maintenance> {
        let maintenance = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenances (asset_id, supplier_id, cost, start_date, completion_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.asset_id)
        .bind(data.supplier_id)
        .bind(data.cost)
        .bind(data.start_date)
        .bind(data.completion_date)
        .bind(&data.notes)
        .fetch_one(&mut *conn)
        .await?;
        Ok(maintenance)
    }

    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i32,
        data: &UpdateMaintenance,
    ) -> AppResult<Maintenance> {
        sqlx::query_as::<_, Maintenance>(
            r#"
            UPDATE maintenances
            SET supplier_id = COALESCE($1, supplier_id),
                start_date = COALESCE($2, start_date),
                completion_date = COALESCE($3, completion_date),
                cost = COALESCE($4, cost),
                notes = COALESCE($5, notes),
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(data.supplier_id)
        .bind(data.start_date)
        .bind(data.completion_date)
        .bind(data.cost)
        .bind(&data.notes)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance with id {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Maintenance with id {} not found", id)));
        }
        Ok(())
    }

    pub async fn exists_for_supplier(&self, supplier_id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM maintenances WHERE supplier_id = $1)")
                .bind(supplier_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
