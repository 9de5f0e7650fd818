//! Business logic services

pub mod assets;
pub mod catalog;
pub mod dashboard;
pub mod depreciation;
pub mod lifecycle;
pub mod maintenance;
pub mod organization;
pub mod status_labels;
pub mod transactions;
pub mod users;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub assets: assets::AssetsService,
    pub transactions: transactions::TransactionsService,
    pub maintenance: maintenance::MaintenanceService,
    pub depreciation: depreciation::DepreciationService,
    pub catalog: catalog::CatalogService,
    pub organization: organization::OrganizationService,
    pub status_labels: status_labels::StatusLabelsService,
    pub users: users::UsersService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services. Fails when a configured lifecycle status label
    /// does not exist.
    pub async fn new(repository: Repository, config: &AppConfig) -> AppResult<Self> {
        let lifecycle = lifecycle::LifecycleStatuses::resolve(&repository, &config.lifecycle).await?;
        let default_life = config.depreciation.default_useful_life_months;

        Ok(Self {
            assets: assets::AssetsService::new(repository.clone(), default_life),
            transactions: transactions::TransactionsService::new(repository.clone(), lifecycle.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone(), lifecycle.clone()),
            depreciation: depreciation::DepreciationService::new(repository.clone(), default_life),
            catalog: catalog::CatalogService::new(repository.clone()),
            organization: organization::OrganizationService::new(repository.clone()),
            status_labels: status_labels::StatusLabelsService::new(repository.clone(), lifecycle),
            users: users::UsersService::new(repository.clone(), config.auth.clone()),
            dashboard: dashboard::DashboardService::new(repository),
        })
    }
}

/// Turn a missing referenced row into a validation error on the request
pub(crate) fn referenced<T>(result: AppResult<T>) -> AppResult<T> {
    match result {
        Err(AppError::NotFound(msg)) => Err(AppError::Validation(msg)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_maps_only_not_found() {
        assert!(matches!(
            referenced::<()>(Err(AppError::NotFound("Supplier with id 9 not found".into()))),
            Err(AppError::Validation(ref m)) if m.contains("Supplier")
        ));
        assert!(matches!(
            referenced::<()>(Err(AppError::Conflict("dup".into()))),
            Err(AppError::Conflict(_))
        ));
        assert_eq!(referenced(Ok(3)).unwrap(), 3);
    }
}
