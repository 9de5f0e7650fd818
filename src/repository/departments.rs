//! Departments repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::department::{CreateDepartment, Department, UpdateDepartment},
};

const SELECT_WITH_MANAGER: &str = r#"
    SELECT d.*, u.name AS manager_name
    FROM departments d
    LEFT JOIN users u ON u.id = d.manager_id
"#;

#[derive(Clone)]
pub struct DepartmentsRepository {
    pool: Pool<Postgres>,
}

impl DepartmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, per_page: i64, offset: i64) -> AppResult<(Vec<Department>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "{} ORDER BY d.created_at DESC, d.id DESC LIMIT $1 OFFSET $2",
            SELECT_WITH_MANAGER
        );
        let departments = sqlx::query_as::<_, Department>(&query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((departments, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Department> {
        let query = format!("{} WHERE d.id = $1", SELECT_WITH_MANAGER);
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department with id {} not found", id)))
    }

    pub async fn create(&self, data: &CreateDepartment) -> AppResult<Department> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO departments (name, manager_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&data.name)
        .bind(data.manager_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateDepartment) -> AppResult<Department> {
        let updated: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE departments
            SET name = COALESCE($1, name),
                manager_id = COALESCE($2, manager_id),
                updated_at = NOW()
            WHERE id = $3
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(data.manager_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => self.get_by_id(id).await,
            None => Err(AppError::NotFound(format!("Department with id {} not found", id))),
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Department with id {} not found", id)));
        }
        Ok(())
    }

    /// Whether the user manages any department
    pub async fn exists_for_manager(&self, user_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM departments WHERE manager_id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
