//! Category and manufacturer models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::CategoryKind;

/// Category record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    /// What the category groups (asset, accessory, license)
    pub kind: CategoryKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    pub kind: Option<CategoryKind>,
}

/// Update category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    pub kind: Option<CategoryKind>,
}

/// Manufacturer record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Manufacturer {
    pub id: i32,
    pub name: String,
    pub support_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create manufacturer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateManufacturer {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    #[validate(url(message = "Support URL must be a valid URL"))]
    pub support_url: Option<String>,
}

/// Update manufacturer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateManufacturer {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(url(message = "Support URL must be a valid URL"))]
    pub support_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_requires_name() {
        let data = CreateCategory { name: String::new(), kind: None };
        let errors = data.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_manufacturer_support_url_must_be_url() {
        let data = CreateManufacturer {
            name: "Dell".to_string(),
            support_url: Some("not a url".to_string()),
        };
        assert!(data.validate().is_err());

        let data = CreateManufacturer {
            name: "Dell".to_string(),
            support_url: Some("https://www.dell.com/support".to_string()),
        };
        assert!(data.validate().is_ok());
    }
}
