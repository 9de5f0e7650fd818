//! Supplier model

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Digits, spaces and `-+()` only
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9\s\-+()]*$").unwrap());

/// Supplier record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Supplier {
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Number of live assets bought from this supplier
    #[sqlx(default)]
    pub assets_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create supplier request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplier {
    #[validate(length(min = 1, max = 255, message = "Supplier name is required"))]
    pub name: String,
    #[validate(length(max = 255))]
    pub contact_name: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Phone number is invalid"))]
    pub phone: Option<String>,
    #[validate(email(message = "Email is not valid"))]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

/// Update supplier request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSupplier {
    #[validate(length(min = 1, max = 255, message = "Supplier name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub contact_name: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Phone number is invalid"))]
    pub phone: Option<String>,
    #[validate(email(message = "Email is not valid"))]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(phone: &str) -> CreateSupplier {
        CreateSupplier {
            name: "FPT Trading".to_string(),
            contact_name: None,
            phone: Some(phone.to_string()),
            email: Some("sales@fpt.example".to_string()),
            address: None,
        }
    }

    #[test]
    fn test_phone_format() {
        assert!(supplier("+84 (28) 3930-1234").validate().is_ok());
        assert!(supplier("call me").validate().is_err());
    }
}
