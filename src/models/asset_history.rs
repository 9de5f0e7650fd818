//! Asset history (append-only audit trail)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::ActionType;

/// History row from database. Rows are written once and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetHistory {
    pub id: i32,
    pub asset_id: i32,
    /// User the action targeted (receiver on checkout, returner on checkin)
    pub user_id: Option<i32>,
    /// Operator who performed the action
    pub admin_id: Option<i32>,
    pub action_type: ActionType,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// History row to append
#[derive(Debug, Clone)]
pub struct NewAssetHistory {
    pub asset_id: i32,
    pub user_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub action_type: ActionType,
    pub note: Option<String>,
}

/// Checkout request: hand an asset to a user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    pub asset_id: i32,
    /// Receiving user
    pub user_id: i32,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Checkin request: take an asset back and put it in `status_id`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckinRequest {
    pub asset_id: i32,
    pub status_id: i32,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// History row with display names, for activity feeds
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetHistoryEntry {
    pub id: i32,
    pub asset_id: i32,
    pub asset_tag: String,
    pub user_id: Option<i32>,
    pub user_name: Option<String>,
    pub admin_id: Option<i32>,
    pub admin_name: Option<String>,
    pub action_type: ActionType,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data printed on an equipment handover form
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HandoverDocument {
    pub history_id: i32,
    pub handed_over_at: DateTime<Utc>,
    pub note: Option<String>,
    pub asset_tag: String,
    pub serial: String,
    pub model_name: String,
    pub model_number: Option<String>,
    pub manufacturer_name: String,
    pub category_name: String,
    pub purchase_date: Option<NaiveDate>,
    pub receiver_id: Option<i32>,
    pub receiver_name: Option<String>,
    pub receiver_email: Option<String>,
    pub receiver_department: Option<String>,
    pub issuer_id: Option<i32>,
    pub issuer_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_length_is_limited() {
        let request = CheckoutRequest {
            asset_id: 1,
            user_id: 2,
            note: Some("x".repeat(501)),
        };
        assert!(request.validate().is_err());

        let request = CheckinRequest {
            asset_id: 1,
            status_id: 1,
            note: Some("x".repeat(500)),
        };
        assert!(request.validate().is_ok());
    }
}
