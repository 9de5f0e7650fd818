//! Status label model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::StatusKind;

/// Named lifecycle state. Rules branch on `kind`, never on `name`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StatusLabel {
    pub id: i32,
    pub name: String,
    pub kind: StatusKind,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create status label request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStatusLabel {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,
    pub kind: StatusKind,
    pub notes: Option<String>,
}

/// Update status label request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusLabel {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    pub kind: Option<StatusKind>,
    pub notes: Option<String>,
}
