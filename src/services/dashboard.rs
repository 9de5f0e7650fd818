//! Dashboard statistics

use crate::{error::AppResult, models::dashboard::DashboardStats, repository::Repository};

const RECENT_ACTIVITY_LIMIT: i64 = 5;

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let totals = self.repository.dashboard.asset_totals().await?;

        Ok(DashboardStats {
            total_assets: totals.count,
            total_cost: totals.cost,
            total_current_value: totals.current_value,
            total_licenses: self.repository.dashboard.license_count().await?,
            assets_by_status: self.repository.dashboard.assets_by_status().await?,
            recent_activity: self
                .repository
                .asset_histories
                .recent(RECENT_ACTIVITY_LIMIT)
                .await?,
        })
    }
}
