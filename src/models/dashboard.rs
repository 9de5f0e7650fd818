//! Dashboard statistics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{asset_history::AssetHistoryEntry, enums::StatusKind};

/// Number of live assets per status label
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StatusCount {
    pub status_id: i32,
    pub status: String,
    pub kind: StatusKind,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_assets: i64,
    /// Sum of purchase costs
    pub total_cost: Decimal,
    /// Sum of depreciated book values
    pub total_current_value: Decimal,
    pub total_licenses: i64,
    pub assets_by_status: Vec<StatusCount>,
    pub recent_activity: Vec<AssetHistoryEntry>,
}
