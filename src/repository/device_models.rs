//! Device models repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::device_model::{CreateDeviceModel, DeviceModel, UpdateDeviceModel},
};

const SELECT_WITH_NAMES: &str = r#"
    SELECT dm.*, mf.name AS manufacturer_name, c.name AS category_name
    FROM device_models dm
    JOIN manufacturers mf ON mf.id = dm.manufacturer_id
    JOIN categories c ON c.id = dm.category_id
"#;

#[derive(Clone)]
pub struct DeviceModelsRepository {
    pool: Pool<Postgres>,
}

impl DeviceModelsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, per_page: i64, offset: i64) -> AppResult<(Vec<DeviceModel>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM device_models")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "{} ORDER BY dm.created_at DESC, dm.id DESC LIMIT $1 OFFSET $2",
            SELECT_WITH_NAMES
        );
        let models = sqlx::query_as::<_, DeviceModel>(&query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((models, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<DeviceModel> {
        let query = format!("{} WHERE dm.id = $1", SELECT_WITH_NAMES);
        sqlx::query_as::<_, DeviceModel>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device model with id {} not found", id)))
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM device_models WHERE LOWER(name) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateDeviceModel) -> AppResult<DeviceModel> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO device_models (name, model_number, manufacturer_id, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.model_number)
        .bind(data.manufacturer_id)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateDeviceModel) -> AppResult<DeviceModel> {
        let updated: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE device_models
            SET name = COALESCE($1, name),
                model_number = COALESCE($2, model_number),
                manufacturer_id = COALESCE($3, manufacturer_id),
                category_id = COALESCE($4, category_id),
                updated_at = NOW()
            WHERE id = $5
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.model_number)
        .bind(data.manufacturer_id)
        .bind(data.category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => self.get_by_id(id).await,
            None => Err(AppError::NotFound(format!("Device model with id {} not found", id))),
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM device_models WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Device model with id {} not found", id)));
        }
        Ok(())
    }

    pub async fn exists_for_category(&self, category_id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM device_models WHERE category_id = $1)")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn exists_for_manufacturer(&self, manufacturer_id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM device_models WHERE manufacturer_id = $1)")
                .bind(manufacturer_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
