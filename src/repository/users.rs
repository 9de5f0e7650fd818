//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{CreateUser, UpdateUser, User},
    },
};

const SELECT_WITH_NAMES: &str = r#"
    SELECT u.*, d.name AS department_name, l.name AS location_name
    FROM users u
    LEFT JOIN departments d ON d.id = u.department_id
    LEFT JOIN locations l ON l.id = u.location_id
"#;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a live user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        let query = format!("{} WHERE u.id = $1 AND u.deleted_at IS NULL", SELECT_WITH_NAMES);
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Whether a live user exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND deleted_at IS NULL)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Get a live user by email (login key)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let query = format!(
            "{} WHERE LOWER(u.email) = LOWER($1) AND u.deleted_at IS NULL",
            SELECT_WITH_NAMES
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Check if email already exists (soft-deleted users keep theirs)
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn list(&self, per_page: i64, offset: i64) -> AppResult<(Vec<User>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "{} WHERE u.deleted_at IS NULL ORDER BY u.created_at DESC, u.id DESC LIMIT $1 OFFSET $2",
            SELECT_WITH_NAMES
        );
        let users = sqlx::query_as::<_, User>(&query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((users, total))
    }

    /// Create a user. `password_hash` must already be hashed.
    pub async fn create(&self, data: &CreateUser, password_hash: &str) -> AppResult<User> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password, role, department_id, location_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(password_hash)
        .bind(data.role.unwrap_or_default())
        .bind(data.department_id)
        .bind(data.location_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update a user. A new password arrives already hashed.
    pub async fn update(&self, id: i32, data: &UpdateUser, password_hash: Option<&str>) -> AppResult<User> {
        let updated: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                email = COALESCE($2, email),
                password = COALESCE($3, password),
                role = COALESCE($4, role),
                department_id = COALESCE($5, department_id),
                location_id = COALESCE($6, location_id),
                updated_at = NOW()
            WHERE id = $7 AND deleted_at IS NULL
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(password_hash)
        .bind(data.role)
        .bind(data.department_id)
        .bind(data.location_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => self.get_by_id(id).await,
            None => Err(AppError::NotFound(format!("User with id {} not found", id))),
        }
    }

    /// Set role and password of an existing account (used to promote on re-seed)
    pub async fn set_credentials(&self, id: i32, role: Role, password_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET role = $1, password = $2, updated_at = NOW() WHERE id = $3")
            .bind(role)
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }

    // Dependency checks count soft-deleted users: their foreign keys still hold.

    pub async fn exists_for_department(&self, department_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE department_id = $1)")
            .bind(department_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn exists_for_location(&self, location_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE location_id = $1)")
            .bind(location_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
