//! Straight-line depreciation of asset book values.
//!
//! The value of an asset is a pure function of its purchase data and today's
//! date, so a run can be repeated at any time. Rows are updated one by one;
//! a failing row is logged and skipped.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::asset::DepreciableAsset,
    repository::{assets::AssetsRepository, Repository},
};

/// Whole calendar months from `purchased` to `today`.
///
/// A month counts once its day-of-month is reached. Future purchase dates
/// give 0.
pub fn months_elapsed(purchased: NaiveDate, today: NaiveDate) -> i64 {
    let mut months = (today.year() as i64 - purchased.year() as i64) * 12
        + (today.month() as i64 - purchased.month() as i64);
    if today.day() < purchased.day() {
        months -= 1;
    }
    months.max(0)
}

/// Book value of an asset on `today`, rounded to cents and kept within
/// `[residual_value, purchase_cost]` and non-negative.
pub fn compute_current_value(asset: &DepreciableAsset, today: NaiveDate, default_life_months: i32) -> Decimal {
    let life = if asset.useful_life_months > 0 {
        asset.useful_life_months
    } else {
        default_life_months.max(1)
    };

    let cost = asset.purchase_cost;
    let residual = asset.residual_value;
    let monthly = (cost - residual) / Decimal::from(life);
    let months = months_elapsed(asset.purchase_date, today);

    let value = (cost - monthly * Decimal::from(months))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    value.max(residual).min(cost).max(Decimal::ZERO)
}

/// Outcome of one depreciation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DepreciationReport {
    /// Assets with a purchase date and a positive cost
    pub eligible: usize,
    /// Assets whose stored value changed
    pub updated: usize,
    /// Assets that could not be written
    pub failed: usize,
}

/// Storage used by a depreciation run
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepreciationStore: Send + Sync {
    async fn list_depreciable(&self) -> AppResult<Vec<DepreciableAsset>>;
    async fn set_current_value(&self, id: i32, current_value: Decimal) -> AppResult<()>;
}

#[async_trait]
impl DepreciationStore for AssetsRepository {
    async fn list_depreciable(&self) -> AppResult<Vec<DepreciableAsset>> {
        AssetsRepository::list_depreciable(self).await
    }

    async fn set_current_value(&self, id: i32, current_value: Decimal) -> AppResult<()> {
        AssetsRepository::set_current_value(self, id, current_value).await
    }
}

/// Recompute every eligible asset. Only listing failures abort the run.
pub async fn run<S>(store: &S, today: NaiveDate, default_life_months: i32) -> AppResult<DepreciationReport>
where
    S: DepreciationStore + ?Sized,
{
    let assets = store.list_depreciable().await?;
    let mut report = DepreciationReport {
        eligible: assets.len(),
        ..Default::default()
    };

    for asset in &assets {
        let value = compute_current_value(asset, today, default_life_months);
        if value == asset.current_value {
            continue;
        }
        match store.set_current_value(asset.id, value).await {
            Ok(()) => report.updated += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!(asset_id = asset.id, error = %e, "Depreciation update failed, skipping asset");
            }
        }
    }

    tracing::info!(
        eligible = report.eligible,
        updated = report.updated,
        failed = report.failed,
        %today,
        "Depreciation run finished"
    );
    Ok(report)
}

#[derive(Clone)]
pub struct DepreciationService {
    repository: Repository,
    default_life_months: i32,
}

impl DepreciationService {
    pub fn new(repository: Repository, default_life_months: i32) -> Self {
        Self {
            repository,
            default_life_months,
        }
    }

    /// Run as of today's date (UTC)
    pub async fn run_now(&self) -> AppResult<DepreciationReport> {
        run(&self.repository.assets, Utc::now().date_naive(), self.default_life_months).await
    }
}

/// Run depreciation every `interval_hours`, starting immediately.
///
/// Runs are awaited inline, so a slow run delays the next tick instead of
/// overlapping it.
pub fn spawn_scheduler(service: DepreciationService, interval_hours: u64) -> JoinHandle<()> {
    let period = Duration::from_secs(interval_hours.max(1) * 3600);
    tracing::info!(interval_hours = interval_hours.max(1), "Depreciation scheduler started");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(e) = service.run_now().await {
                tracing::error!(error = %e, "Scheduled depreciation run failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn laptop(id: i32, cost: Decimal, residual: Decimal, life: i32, purchased: NaiveDate) -> DepreciableAsset {
        DepreciableAsset {
            id,
            purchase_date: purchased,
            purchase_cost: cost,
            residual_value: residual,
            useful_life_months: life,
            current_value: cost,
        }
    }

    #[test]
    fn test_months_elapsed_counts_whole_months() {
        assert_eq!(months_elapsed(date(2023, 1, 15), date(2025, 1, 15)), 24);
        assert_eq!(months_elapsed(date(2023, 1, 15), date(2025, 1, 14)), 23);
        assert_eq!(months_elapsed(date(2024, 1, 31), date(2024, 2, 29)), 0);
        assert_eq!(months_elapsed(date(2024, 12, 1), date(2025, 1, 1)), 1);
        assert_eq!(months_elapsed(date(2026, 1, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_two_years_into_three_year_life() {
        let asset = laptop(1, dec!(12000000.00), dec!(0), 36, date(2023, 1, 15));
        assert_eq!(compute_current_value(&asset, date(2025, 1, 15), 36), dec!(4000000.00));
    }

    #[test]
    fn test_value_never_drops_below_residual() {
        let asset = laptop(1, dec!(1000.00), dec!(100.00), 12, date(2020, 1, 1));
        assert_eq!(compute_current_value(&asset, date(2025, 1, 1), 36), dec!(100.00));
    }

    #[test]
    fn test_future_purchase_keeps_full_cost() {
        let asset = laptop(1, dec!(1500.00), dec!(0), 36, date(2030, 6, 1));
        assert_eq!(compute_current_value(&asset, date(2025, 1, 1), 36), dec!(1500.00));
    }

    #[test]
    fn test_residual_above_cost_is_capped_at_cost() {
        let asset = laptop(1, dec!(500.00), dec!(800.00), 36, date(2023, 1, 1));
        assert_eq!(compute_current_value(&asset, date(2025, 1, 1), 36), dec!(500.00));
    }

    #[test]
    fn test_non_positive_life_uses_default() {
        let asset = laptop(1, dec!(3600.00), dec!(0), 0, date(2024, 1, 1));
        assert_eq!(compute_current_value(&asset, date(2025, 1, 1), 36), dec!(2400.00));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 1000 / 3 per month, one month elapsed: 666.666... -> 666.67
        let asset = laptop(1, dec!(1000.00), dec!(0), 3, date(2025, 1, 1));
        assert_eq!(compute_current_value(&asset, date(2025, 2, 1), 36), dec!(666.67));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut asset = laptop(1, dec!(2399.99), dec!(150.00), 48, date(2022, 7, 9));
        let today = date(2025, 3, 2);
        let first = compute_current_value(&asset, today, 36);
        asset.current_value = first;
        assert_eq!(compute_current_value(&asset, today, 36), first);
    }

    #[tokio::test]
    async fn test_failed_row_does_not_abort_run() {
        let purchased = date(2023, 1, 15);
        let mut store = MockDepreciationStore::new();
        store.expect_list_depreciable().times(1).returning(move || {
            Ok(vec![
                laptop(1, dec!(3600.00), dec!(0), 36, purchased),
                laptop(2, dec!(3600.00), dec!(0), 36, purchased),
                laptop(3, dec!(3600.00), dec!(0), 36, purchased),
            ])
        });
        store
            .expect_set_current_value()
            .withf(|id, _| *id == 2)
            .times(1)
            .returning(|_, _| Err(AppError::Internal("connection reset".to_string())));
        store
            .expect_set_current_value()
            .withf(|id, value| *id != 2 && *value == dec!(1200.00))
            .times(2)
            .returning(|_, _| Ok(()));

        let report = run(&store, date(2025, 1, 15), 36).await.unwrap();
        assert_eq!(
            report,
            DepreciationReport {
                eligible: 3,
                updated: 2,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_unchanged_rows_are_not_written() {
        let mut store = MockDepreciationStore::new();
        store.expect_list_depreciable().returning(|| {
            let mut asset = laptop(7, dec!(900.00), dec!(0), 36, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
            asset.current_value = dec!(900.00);
            Ok(vec![asset])
        });
        store.expect_set_current_value().never();

        let report = run(&store, date(2025, 1, 20), 36).await.unwrap();
        assert_eq!(report.eligible, 1);
        assert_eq!(report.updated, 0);
    }

    #[tokio::test]
    async fn test_listing_failure_is_returned() {
        let mut store = MockDepreciationStore::new();
        store
            .expect_list_depreciable()
            .returning(|| Err(AppError::Internal("pool timed out".to_string())));

        assert!(run(&store, date(2025, 1, 1), 36).await.is_err());
    }
}
