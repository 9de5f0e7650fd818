//! Asset model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::StatusKind;

/// Asset row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Asset {
    pub id: i32,
    pub asset_tag: String,
    pub serial: String,
    pub model_id: i32,
    pub status_id: i32,
    pub supplier_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    pub current_value: Decimal,
    pub useful_life_months: i32,
    pub residual_value: Decimal,
    pub warranty_months: Option<i32>,
    pub order_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Asset {
    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }
}

/// Asset with its model, status, supplier and assignee resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetDetails {
    pub id: i32,
    pub asset_tag: String,
    pub serial: String,
    pub model_id: i32,
    pub model_name: String,
    pub manufacturer_name: String,
    pub category_name: String,
    pub status_id: i32,
    pub status_name: String,
    pub status_kind: StatusKind,
    pub supplier_id: Option<i32>,
    pub supplier_name: Option<String>,
    pub assigned_to: Option<i32>,
    pub assigned_name: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    pub current_value: Decimal,
    pub useful_life_months: i32,
    pub residual_value: Decimal,
    pub warranty_months: Option<i32>,
    pub order_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Asset list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssetQuery {
    /// Matches asset tag or serial (case-insensitive, partial)
    pub search: Option<String>,
    pub status_id: Option<i32>,
    pub model_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create asset request (intake)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 255, message = "Asset tag is required"))]
    pub asset_tag: String,
    #[validate(length(min = 1, max = 255, message = "Serial is required"))]
    pub serial: String,
    pub model_id: i32,
    pub status_id: i32,
    pub supplier_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    /// Defaults to 36 months
    #[validate(range(min = 1, message = "Useful life must be at least one month"))]
    pub useful_life_months: Option<i32>,
    pub residual_value: Option<Decimal>,
    #[validate(range(min = 0, message = "Warranty months cannot be negative"))]
    pub warranty_months: Option<i32>,
    #[validate(length(max = 255))]
    pub order_number: Option<String>,
    pub notes: Option<String>,
}

/// Update asset request
///
/// Assignment is not editable here; use checkout/checkin.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 255, message = "Asset tag must be 1-255 characters"))]
    pub asset_tag: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Serial must be 1-255 characters"))]
    pub serial: Option<String>,
    pub model_id: Option<i32>,
    pub status_id: Option<i32>,
    pub supplier_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    #[validate(range(min = 1, message = "Useful life must be at least one month"))]
    pub useful_life_months: Option<i32>,
    pub residual_value: Option<Decimal>,
    #[validate(range(min = 0, message = "Warranty months cannot be negative"))]
    pub warranty_months: Option<i32>,
    #[validate(length(max = 255))]
    pub order_number: Option<String>,
    pub notes: Option<String>,
}

/// Asset fields needed by the depreciation job
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DepreciableAsset {
    pub id: i32,
    pub purchase_date: NaiveDate,
    pub purchase_cost: Decimal,
    pub residual_value: Decimal,
    pub useful_life_months: i32,
    pub current_value: Decimal,
}
