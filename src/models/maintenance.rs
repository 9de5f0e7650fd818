//! Maintenance model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Maintenance record with asset tag and supplier name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Maintenance {
    pub id: i32,
    pub asset_id: i32,
    #[sqlx(default)]
    pub asset_tag: Option<String>,
    pub supplier_id: i32,
    #[sqlx(default)]
    pub supplier_name: Option<String>,
    pub cost: Option<Decimal>,
    pub start_date: NaiveDate,
    /// Set once the service is finished; the asset returns to the ready state
    pub completion_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Maintenance {
    pub fn is_completed(&self) -> bool {
        self.completion_date.is_some()
    }
}

fn check_dates(
    start_date: Option<NaiveDate>,
    completion_date: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (start_date, completion_date) {
        (Some(start), Some(done)) if done < start => {
            let mut err = ValidationError::new("completion_before_start");
            err.message = Some("Completion date must be on or after the start date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

fn check_cost(cost: Option<Decimal>) -> Result<(), ValidationError> {
    match cost {
        Some(c) if c < Decimal::ZERO => {
            let mut err = ValidationError::new("negative_cost");
            err.message = Some("Cost cannot be negative".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Start maintenance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_maintenance", skip_on_field_errors = false))]
pub struct CreateMaintenance {
    pub asset_id: i32,
    pub supplier_id: i32,
    pub start_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
}

fn validate_create_maintenance(data: &CreateMaintenance) -> Result<(), ValidationError> {
    check_dates(Some(data.start_date), data.completion_date)?;
    check_cost(data.cost)
}

/// Update maintenance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_maintenance", skip_on_field_errors = false))]
pub struct UpdateMaintenance {
    pub supplier_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
}

fn validate_update_maintenance(data: &UpdateMaintenance) -> Result<(), ValidationError> {
    check_dates(data.start_date, data.completion_date)?;
    check_cost(data.cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(start: NaiveDate, done: Option<NaiveDate>, cost: Option<Decimal>) -> CreateMaintenance {
        CreateMaintenance {
            asset_id: 1,
            supplier_id: 1,
            start_date: start,
            completion_date: done,
            cost,
            notes: None,
        }
    }

    #[test]
    fn test_completion_before_start_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let before = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert!(request(start, Some(before), None).validate().is_err());
        assert!(request(start, Some(start), None).validate().is_ok());
        assert!(request(start, None, None).validate().is_ok());
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(request(start, None, Some(dec!(-1.00))).validate().is_err());
        assert!(request(start, None, Some(dec!(0))).validate().is_ok());
        assert!(request(start, None, Some(dec!(450000.50))).validate().is_ok());
    }
}
