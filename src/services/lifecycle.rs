//! Lifecycle status mapping and the eligibility rules shared by checkout,
//! checkin and maintenance.

use crate::{
    config::LifecycleConfig,
    error::{AppError, AppResult},
    models::{Asset, StatusKind, StatusLabel},
    repository::Repository,
};

/// Status labels the system moves assets into on its own.
///
/// Resolved once at startup from the `[lifecycle]` names; a missing label
/// stops the server from starting.
#[derive(Debug, Clone)]
pub struct LifecycleStatuses {
    /// Set on checkout
    pub deployed: StatusLabel,
    /// Set when maintenance completes
    pub ready: StatusLabel,
    /// Set when maintenance starts
    pub maintenance: StatusLabel,
}

impl LifecycleStatuses {
    pub async fn resolve(repository: &Repository, config: &LifecycleConfig) -> AppResult<Self> {
        let statuses = Self {
            deployed: lookup(repository, &config.deployed).await?,
            ready: lookup(repository, &config.ready).await?,
            maintenance: lookup(repository, &config.maintenance).await?,
        };

        tracing::info!(
            deployed = statuses.deployed.id,
            ready = statuses.ready.id,
            maintenance = statuses.maintenance.id,
            "Lifecycle statuses resolved"
        );
        Ok(statuses)
    }

    /// Whether the label is one of the configured lifecycle statuses
    pub fn contains(&self, status_id: i32) -> bool {
        [&self.deployed, &self.ready, &self.maintenance]
            .iter()
            .any(|s| s.id == status_id)
    }

    /// Status an asset returns to when its maintenance completes: deployed
    /// while it is still assigned, ready otherwise
    pub fn after_maintenance(&self, asset: &Asset) -> &StatusLabel {
        if asset.is_assigned() {
            &self.deployed
        } else {
            &self.ready
        }
    }
}

async fn lookup(repository: &Repository, name: &str) -> AppResult<StatusLabel> {
    repository
        .status_labels
        .find_by_name(name)
        .await?
        .ok_or_else(|| {
            AppError::Configuration(format!("Lifecycle status label '{}' does not exist", name))
        })
}

/// An asset can be checked out when it is unassigned and its status is deployable
pub fn ensure_checkout_eligible(asset: &Asset, status: &StatusLabel) -> AppResult<()> {
    if asset.is_assigned() {
        return Err(AppError::BusinessRule(format!(
            "Asset {} is already checked out",
            asset.asset_tag
        )));
    }
    if !status.kind.is_deployable() {
        return Err(AppError::BusinessRule(format!(
            "Asset {} is not deployable (status: {})",
            asset.asset_tag, status.name
        )));
    }
    Ok(())
}

/// An asset can be checked in when it is assigned; returns the outgoing assignee
pub fn ensure_checkin_eligible(asset: &Asset) -> AppResult<i32> {
    asset.assigned_to.ok_or_else(|| {
        AppError::BusinessRule(format!("Asset {} is not checked out", asset.asset_tag))
    })
}

/// Statuses a plain asset update may set.
///
/// Assignment and a deployed-kind status go together: only checkout enters
/// that state and only checkin leaves it.
pub fn ensure_manual_status(status: &StatusLabel, assigned: bool) -> AppResult<()> {
    let deployed = status.kind == StatusKind::Deployed;
    if deployed && !assigned {
        return Err(AppError::BusinessRule(format!(
            "Status '{}' marks an asset as deployed; use checkout instead",
            status.name
        )));
    }
    if !deployed && assigned {
        return Err(AppError::BusinessRule(format!(
            "Asset is checked out; use checkin to move it to '{}'",
            status.name
        )));
    }
    Ok(())
}

/// A checked-in asset has no assignee, so it cannot land in a deployed-kind status
pub fn ensure_checkin_target(status: &StatusLabel) -> AppResult<()> {
    if status.kind == StatusKind::Deployed {
        return Err(AppError::BusinessRule(format!(
            "Status '{}' marks an asset as deployed; check in to another status",
            status.name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn asset(assigned_to: Option<i32>) -> Asset {
        Asset {
            id: 1,
            asset_tag: "LAP-0001".to_string(),
            serial: "SN-123".to_string(),
            model_id: 1,
            status_id: 1,
            supplier_id: None,
            assigned_to,
            purchase_date: None,
            purchase_cost: None,
            current_value: Decimal::ZERO,
            useful_life_months: 36,
            residual_value: Decimal::ZERO,
            warranty_months: None,
            order_number: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn label(id: i32, name: &str, kind: StatusKind) -> StatusLabel {
        StatusLabel {
            id,
            name: name.to_string(),
            kind,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_checkout_requires_deployable_unassigned_asset() {
        let ready = label(1, "Ready to Deploy", StatusKind::Deployable);
        let broken = label(2, "Broken", StatusKind::Broken);

        assert!(ensure_checkout_eligible(&asset(None), &ready).is_ok());

        let err = ensure_checkout_eligible(&asset(Some(5)), &ready).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(ref m) if m.contains("already checked out")));

        let err = ensure_checkout_eligible(&asset(None), &broken).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(ref m) if m.contains("not deployable")));
    }

    #[test]
    fn test_rules_use_kind_not_name() {
        let renamed = label(1, "Shelf", StatusKind::Deployable);
        assert!(ensure_checkout_eligible(&asset(None), &renamed).is_ok());

        let misleading = label(2, "Ready to Deploy", StatusKind::Pending);
        assert!(ensure_checkout_eligible(&asset(None), &misleading).is_err());
    }

    #[test]
    fn test_checkin_returns_outgoing_assignee() {
        assert_eq!(ensure_checkin_eligible(&asset(Some(42))).unwrap(), 42);
        assert!(matches!(
            ensure_checkin_eligible(&asset(None)),
            Err(AppError::BusinessRule(_))
        ));
    }

    #[test]
    fn test_contains_lifecycle_status() {
        let statuses = LifecycleStatuses {
            deployed: label(2, "Deployed", StatusKind::Deployed),
            ready: label(1, "Ready to Deploy", StatusKind::Deployable),
            maintenance: label(3, "In Maintenance", StatusKind::Pending),
        };
        assert!(statuses.contains(1));
        assert!(statuses.contains(3));
        assert!(!statuses.contains(4));
    }

    #[test]
    fn test_manual_status_keeps_assignment_and_kind_together() {
        let ready = label(1, "Ready to Deploy", StatusKind::Deployable);
        let deployed = label(2, "Deployed", StatusKind::Deployed);

        assert!(ensure_manual_status(&ready, false).is_ok());
        assert!(ensure_manual_status(&deployed, true).is_ok());

        let err = ensure_manual_status(&deployed, false).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(ref m) if m.contains("use checkout")));

        let err = ensure_manual_status(&ready, true).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(ref m) if m.contains("use checkin")));
    }

    #[test]
    fn test_checkin_target_cannot_be_deployed() {
        assert!(ensure_checkin_target(&label(1, "Ready to Deploy", StatusKind::Deployable)).is_ok());
        assert!(ensure_checkin_target(&label(5, "Broken", StatusKind::Broken)).is_ok());
        assert!(matches!(
            ensure_checkin_target(&label(2, "Deployed", StatusKind::Deployed)),
            Err(AppError::BusinessRule(_))
        ));
    }

    #[test]
    fn test_completed_maintenance_restores_assigned_asset_to_deployed() {
        let statuses = LifecycleStatuses {
            deployed: label(2, "Deployed", StatusKind::Deployed),
            ready: label(1, "Ready to Deploy", StatusKind::Deployable),
            maintenance: label(3, "In Maintenance", StatusKind::Pending),
        };
        assert_eq!(statuses.after_maintenance(&asset(Some(7))).id, 2);
        assert_eq!(statuses.after_maintenance(&asset(None)).id, 1);
    }
}
