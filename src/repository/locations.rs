//! Locations repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::location::{CreateLocation, Location, UpdateLocation},
};

const SELECT_WITH_PARENT: &str = r#"
    SELECT l.*, p.name AS parent_name
    FROM locations l
    LEFT JOIN locations p ON p.id = l.parent_id
"#;

#[derive(Clone)]
pub struct LocationsRepository {
    pool: Pool<Postgres>,
}

impl LocationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, per_page: i64, offset: i64) -> AppResult<(Vec<Location>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "{} ORDER BY l.created_at DESC, l.id DESC LIMIT $1 OFFSET $2",
            SELECT_WITH_PARENT
        );
        let locations = sqlx::query_as::<_, Location>(&query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((locations, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Location> {
        let query = format!("{} WHERE l.id = $1", SELECT_WITH_PARENT);
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location with id {} not found", id)))
    }

    pub async fn create(&self, data: &CreateLocation) -> AppResult<Location> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO locations (name, address, parent_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        let updated: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE locations
            SET name = COALESCE($1, name),
                address = COALESCE($2, address),
                parent_id = COALESCE($3, parent_id),
                updated_at = NOW()
            WHERE id = $4
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(data.parent_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => self.get_by_id(id).await,
            None => Err(AppError::NotFound(format!("Location with id {} not found", id))),
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Location with id {} not found", id)));
        }
        Ok(())
    }

    pub async fn has_children(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE parent_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
