//! Suppliers repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::supplier::{CreateSupplier, Supplier, UpdateSupplier},
};

const SELECT_WITH_COUNT: &str = r#"
    SELECT s.*,
           (SELECT COUNT(*) FROM assets a WHERE a.supplier_id = s.id AND a.deleted_at IS NULL) AS assets_count
    FROM suppliers s
"#;

#[derive(Clone)]
pub struct SuppliersRepository {
    pool: Pool<Postgres>,
}

impl SuppliersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, per_page: i64, offset: i64) -> AppResult<(Vec<Supplier>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "{} ORDER BY s.created_at DESC, s.id DESC LIMIT $1 OFFSET $2",
            SELECT_WITH_COUNT
        );
        let suppliers = sqlx::query_as::<_, Supplier>(&query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((suppliers, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Supplier> {
        let query = format!("{} WHERE s.id = $1", SELECT_WITH_COUNT);
        sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Supplier with id {} not found", id)))
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM suppliers WHERE LOWER(name) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateSupplier) -> AppResult<Supplier> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, contact_name, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.contact_name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(supplier)
    }

    pub async fn update(&self, id: i32, data: &UpdateSupplier) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = COALESCE($1, name),
                contact_name = COALESCE($2, contact_name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                address = COALESCE($5, address),
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.contact_name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Supplier with id {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Supplier with id {} not found", id)));
        }
        Ok(())
    }
}
