//! Status labels repository

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::status_label::{CreateStatusLabel, StatusLabel, UpdateStatusLabel},
};

#[derive(Clone)]
pub struct StatusLabelsRepository {
    pool: Pool<Postgres>,
}

impl StatusLabelsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, per_page: i64, offset: i64) -> AppResult<(Vec<StatusLabel>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM status_labels")
            .fetch_one(&self.pool)
            .await?;

        let labels = sqlx::query_as::<_, StatusLabel>(
            "SELECT * FROM status_labels ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((labels, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<StatusLabel> {
        sqlx::query_as::<_, StatusLabel>("SELECT * FROM status_labels WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Status label with id {} not found", id)))
    }

    /// Look up a label by exact name
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<StatusLabel>> {
        let label = sqlx::query_as::<_, StatusLabel>("SELECT * FROM status_labels WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(label)
    }

    /// Look up a label on the transaction's connection
    pub async fn find_in(&self, conn: &mut PgConnection, id: i32) -> AppResult<Option<StatusLabel>> {
        let label = sqlx::query_as::<_, StatusLabel>("SELECT * FROM status_labels WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(label)
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM status_labels WHERE LOWER(name) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateStatusLabel) -> AppResult<StatusLabel> {
        let label = sqlx::query_as::<_, StatusLabel>(
            "INSERT INTO status_labels (name, kind, notes) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.kind)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(label)
    }

    pub async fn update(&self, id: i32, data: &UpdateStatusLabel) -> AppResult<StatusLabel> {
        sqlx::query_as::<_, StatusLabel>(
            r#"
            UPDATE status_labels
            SET name = COALESCE($1, name),
                kind = COALESCE($2, kind),
                notes = COALESCE($3, notes),
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.kind)
        .bind(&data.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Status label with id {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM status_labels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Status label with id {} not found", id)));
        }
        Ok(())
    }
}
