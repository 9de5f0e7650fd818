//! Manufacturers repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::master_data::{CreateManufacturer, Manufacturer, UpdateManufacturer},
};

#[derive(Clone)]
pub struct ManufacturersRepository {
    pool: Pool<Postgres>,
}

impl ManufacturersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, per_page: i64, offset: i64) -> AppResult<(Vec<Manufacturer>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM manufacturers")
            .fetch_one(&self.pool)
            .await?;

        let manufacturers = sqlx::query_as::<_, Manufacturer>(
            "SELECT * FROM manufacturers ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((manufacturers, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Manufacturer> {
        sqlx::query_as::<_, Manufacturer>("SELECT * FROM manufacturers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Manufacturer with id {} not found", id)))
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM manufacturers WHERE LOWER(name) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateManufacturer) -> AppResult<Manufacturer> {
        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            "INSERT INTO manufacturers (name, support_url) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.support_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(manufacturer)
    }

    pub async fn update(&self, id: i32, data: &UpdateManufacturer) -> AppResult<Manufacturer> {
        sqlx::query_as::<_, Manufacturer>(
            r#"
            UPDATE manufacturers
            SET name = COALESCE($1, name),
                support_url = COALESCE($2, support_url),
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.support_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Manufacturer with id {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM manufacturers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Manufacturer with id {} not found", id)));
        }
        Ok(())
    }
}
