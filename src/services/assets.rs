//! Asset intake and maintenance of asset records

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use super::{depreciation, lifecycle, referenced};
use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{AssetQuery, CreateAsset, DepreciableAsset, UpdateAsset},
        Asset, AssetDetails, PageQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
    default_life_months: i32,
}

impl AssetsService {
    pub fn new(repository: Repository, default_life_months: i32) -> Self {
        Self {
            repository,
            default_life_months,
        }
    }

    pub async fn list(&self, query: &AssetQuery) -> AppResult<(Vec<AssetDetails>, i64)> {
        let page = PageQuery {
            page: query.page,
            per_page: query.per_page,
        };
        self.repository
            .assets
            .list(query, page.per_page(), page.offset())
            .await
    }

    pub async fn get(&self, id: i32) -> AppResult<AssetDetails> {
        self.repository.assets.get_details(id).await
    }

    /// Register a new asset. Its book value starts at the purchase cost.
    pub async fn create(&self, data: &CreateAsset) -> AppResult<AssetDetails> {
        data.validate()?;
        check_residual(data.purchase_cost, data.residual_value)?;

        if self.repository.assets.tag_exists(&data.asset_tag, None).await? {
            return Err(AppError::Conflict(format!("Asset tag {} is already in use", data.asset_tag)));
        }
        if self.repository.assets.serial_exists(&data.serial, None).await? {
            return Err(AppError::Conflict(format!("Serial {} is already in use", data.serial)));
        }

        self.check_references(Some(data.model_id), data.supplier_id).await?;
        self.check_status(data.status_id, false).await?;

        let life = data.useful_life_months.unwrap_or(self.default_life_months);
        let asset = self.repository.assets.create(data, life).await?;
        tracing::info!(asset_id = asset.id, asset_tag = %asset.asset_tag, "Asset created");

        self.repository.assets.get_details(asset.id).await
    }

    /// Update an asset. Assignment only changes through checkout/checkin,
    /// and a change to the purchase data revalues the asset.
    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<AssetDetails> {
        data.validate()?;
        let current = self.repository.assets.get_by_id(id).await?;

        check_residual(
            data.purchase_cost.or(current.purchase_cost),
            data.residual_value.or(Some(current.residual_value)),
        )?;

        if let Some(ref tag) = data.asset_tag {
            if self.repository.assets.tag_exists(tag, Some(id)).await? {
                return Err(AppError::Conflict(format!("Asset tag {} is already in use", tag)));
            }
        }
        if let Some(ref serial) = data.serial {
            if self.repository.assets.serial_exists(serial, Some(id)).await? {
                return Err(AppError::Conflict(format!("Serial {} is already in use", serial)));
            }
        }

        self.check_references(data.model_id, data.supplier_id).await?;
        if let Some(status_id) = data.status_id.filter(|&s| s != current.status_id) {
            self.check_status(status_id, current.is_assigned()).await?;
        }

        let current_value = revalue(&current, data, Utc::now().date_naive(), self.default_life_months);
        self.repository.assets.update(id, data, current_value).await?;
        tracing::info!(asset_id = id, ?current_value, "Asset updated");

        self.repository.assets.get_details(id).await
    }

    /// Soft-delete an asset; checked-out assets must be checked in first
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let asset = self.repository.assets.get_by_id(id).await?;
        if asset.is_assigned() {
            return Err(AppError::BusinessRule(format!(
                "Asset {} is checked out; check it in before deleting",
                asset.asset_tag
            )));
        }
        self.repository.assets.soft_delete(id).await?;
        tracing::info!(asset_id = id, asset_tag = %asset.asset_tag, "Asset deleted");
        Ok(())
    }

    async fn check_references(&self, model_id: Option<i32>, supplier_id: Option<i32>) -> AppResult<()> {
        if let Some(model_id) = model_id {
            referenced(self.repository.device_models.get_by_id(model_id).await)?;
        }
        if let Some(supplier_id) = supplier_id {
            referenced(self.repository.suppliers.get_by_id(supplier_id).await)?;
        }
        Ok(())
    }

    async fn check_status(&self, status_id: i32, assigned: bool) -> AppResult<()> {
        let status = referenced(self.repository.status_labels.get_by_id(status_id).await)?;
        lifecycle::ensure_manual_status(&status, assigned)
    }
}

/// New book value when an update touches the purchase data, `None` otherwise.
///
/// With a purchase date and cost the value follows the depreciation schedule;
/// without a date the stored value is clamped into `[residual, cost]`.
fn revalue(asset: &Asset, data: &UpdateAsset, today: NaiveDate, default_life_months: i32) -> Option<Decimal> {
    if data.purchase_cost.is_none()
        && data.residual_value.is_none()
        && data.purchase_date.is_none()
        && data.useful_life_months.is_none()
    {
        return None;
    }

    let residual = data.residual_value.unwrap_or(asset.residual_value);
    let value = match (data.purchase_cost.or(asset.purchase_cost), data.purchase_date.or(asset.purchase_date)) {
        (Some(cost), Some(purchase_date)) => depreciation::compute_current_value(
            &DepreciableAsset {
                id: asset.id,
                purchase_date,
                purchase_cost: cost,
                residual_value: residual,
                useful_life_months: data.useful_life_months.unwrap_or(asset.useful_life_months),
                current_value: asset.current_value,
            },
            today,
            default_life_months,
        ),
        (Some(cost), None) => asset.current_value.max(residual).min(cost),
        (None, _) => asset.current_value.max(residual),
    };
    Some(value)
}

fn check_residual(purchase_cost: Option<Decimal>, residual_value: Option<Decimal>) -> AppResult<()> {
    if let Some(cost) = purchase_cost {
        if cost < Decimal::ZERO {
            return Err(AppError::Validation("Purchase cost cannot be negative".to_string()));
        }
    }
    if let Some(residual) = residual_value {
        if residual < Decimal::ZERO {
            return Err(AppError::Validation("Residual value cannot be negative".to_string()));
        }
        if let Some(cost) = purchase_cost {
            if residual > cost {
                return Err(AppError::Validation(
                    "Residual value cannot exceed the purchase cost".to_string(),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn asset(cost: Decimal, residual: Decimal, purchase_date: Option<NaiveDate>) -> Asset {
        Asset {
            id: 1,
            asset_tag: "LAP-0001".to_string(),
            serial: "SN-123".to_string(),
            model_id: 1,
            status_id: 1,
            supplier_id: None,
            assigned_to: None,
            purchase_date,
            purchase_cost: Some(cost),
            current_value: cost,
            useful_life_months: 36,
            residual_value: residual,
            warranty_months: None,
            order_number: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lowering_cost_without_purchase_date_clamps_value() {
        let current = asset(dec!(1000.00), dec!(100.00), None);
        let data = UpdateAsset {
            purchase_cost: Some(dec!(500.00)),
            ..Default::default()
        };
        assert_eq!(revalue(&current, &data, date(2025, 1, 1), 36), Some(dec!(500.00)));
    }

    #[test]
    fn test_raising_residual_lifts_value() {
        let mut current = asset(dec!(1000.00), dec!(0), None);
        current.current_value = dec!(200.00);
        let data = UpdateAsset {
            residual_value: Some(dec!(300.00)),
            ..Default::default()
        };
        assert_eq!(revalue(&current, &data, date(2025, 1, 1), 36), Some(dec!(300.00)));
    }

    #[test]
    fn test_dated_asset_follows_depreciation_schedule() {
        let current = asset(dec!(1200.00), dec!(0), Some(date(2024, 1, 15)));
        let data = UpdateAsset {
            purchase_cost: Some(dec!(2400.00)),
            useful_life_months: Some(24),
            ..Default::default()
        };
        // 12 of 24 months elapsed
        assert_eq!(revalue(&current, &data, date(2025, 1, 15), 36), Some(dec!(1200.00)));
    }

    #[test]
    fn test_unrelated_update_keeps_value() {
        let current = asset(dec!(1000.00), dec!(100.00), None);
        let data = UpdateAsset {
            notes: Some("Dented lid".to_string()),
            ..Default::default()
        };
        assert_eq!(revalue(&current, &data, date(2025, 1, 1), 36), None);
    }

    #[test]
    fn test_residual_must_not_exceed_cost() {
        assert!(check_residual(Some(dec!(1000)), Some(dec!(100))).is_ok());
        assert!(check_residual(Some(dec!(1000)), Some(dec!(1000))).is_ok());
        assert!(matches!(
            check_residual(Some(dec!(1000)), Some(dec!(1000.01))),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_money_is_rejected() {
        assert!(check_residual(Some(dec!(-1)), None).is_err());
        assert!(check_residual(None, Some(dec!(-0.01))).is_err());
        assert!(check_residual(None, Some(dec!(50))).is_ok());
    }
}
