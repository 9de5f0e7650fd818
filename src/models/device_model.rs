//! Device model (a make/model of hardware, e.g. "Latitude 5440")

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Device model with its manufacturer and category names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DeviceModel {
    pub id: i32,
    pub name: String,
    pub model_number: Option<String>,
    pub manufacturer_id: i32,
    #[sqlx(default)]
    pub manufacturer_name: Option<String>,
    pub category_id: i32,
    #[sqlx(default)]
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create device model request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDeviceModel {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Model number is required"))]
    pub model_number: String,
    pub manufacturer_id: i32,
    pub category_id: i32,
}

/// Update device model request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDeviceModel {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub model_number: Option<String>,
    pub manufacturer_id: Option<i32>,
    pub category_id: Option<i32>,
}
