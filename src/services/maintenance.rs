//! Maintenance records and the asset status moves they trigger

use sqlx::PgConnection;
use validator::Validate;

use super::{lifecycle::LifecycleStatuses, referenced};
use crate::{
    error::{AppError, AppResult},
    models::{
        asset_history::NewAssetHistory,
        maintenance::{CreateMaintenance, Maintenance, UpdateMaintenance},
        ActionType, PageQuery, StatusLabel,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
    lifecycle: LifecycleStatuses,
}

impl MaintenanceService {
    pub fn new(repository: Repository, lifecycle: LifecycleStatuses) -> Self {
        Self { repository, lifecycle }
    }

    pub async fn list(&self, page: &PageQuery) -> AppResult<(Vec<Maintenance>, i64)> {
        self.repository.maintenances.list(page.per_page(), page.offset()).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Maintenance> {
        self.repository.maintenances.get_by_id(id).await
    }

    /// Open a maintenance record and move the asset into maintenance
    /// (or straight back out when the record is already completed)
    pub async fn start(&self, data: &CreateMaintenance, actor_id: i32) -> AppResult<Maintenance> {
        data.validate()?;
        self.repository.assets.get_by_id(data.asset_id).await?;
        referenced(self.repository.suppliers.get_by_id(data.supplier_id).await)?;

        let mut tx = self
            .repository
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        let maintenance = match self.start_locked(&mut tx, data, actor_id).await {
            Ok(maintenance) => maintenance,
            Err(e) => {
                tracing::error!(asset_id = data.asset_id, error = %e, "Maintenance start failed, rolling back");
                return Err(e.into_transaction_failure());
            }
        };
        tx.commit()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        tracing::info!(
            maintenance_id = maintenance.id,
            asset_id = maintenance.asset_id,
            completed = maintenance.is_completed(),
            "Maintenance started"
        );
        self.repository.maintenances.get_by_id(maintenance.id).await
    }

    async fn start_locked(
        &self,
        conn: &mut PgConnection,
        data: &CreateMaintenance,
        actor_id: i32,
    ) -> AppResult<Maintenance> {
        let maintenance = self.repository.maintenances.insert(conn, data).await?;
        let asset = self.repository.assets.lock_for_update(conn, data.asset_id).await?;

        let target = if maintenance.is_completed() {
            self.lifecycle.after_maintenance(&asset)
        } else {
            &self.lifecycle.maintenance
        };
        let status = self.confirm_status(conn, target).await?;
        self.repository.assets.set_status(conn, asset.id, status.id).await?;

        let note = match data.notes.as_deref().map(str::trim) {
            Some(notes) if !notes.is_empty() => format!("Maintenance #{}: {}", maintenance.id, notes),
            _ => format!("Maintenance #{} started", maintenance.id),
        };
        self.repository
            .asset_histories
            .append(
                conn,
                &NewAssetHistory {
                    asset_id: asset.id,
                    user_id: asset.assigned_to,
                    admin_id: Some(actor_id),
                    action_type: ActionType::Maintenance,
                    note: Some(note),
                },
            )
            .await?;

        Ok(maintenance)
    }

    /// Update a record. Setting the completion date for the first time moves
    /// the asset out of maintenance and records it in the asset history.
    pub async fn update(&self, id: i32, data: &UpdateMaintenance, actor_id: i32) -> AppResult<Maintenance> {
        data.validate()?;
        if let Some(supplier_id) = data.supplier_id {
            referenced(self.repository.suppliers.get_by_id(supplier_id).await)?;
        }

        let mut tx = self
            .repository
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        let maintenance = match self.update_locked(&mut tx, id, data, actor_id).await {
            Ok(maintenance) => maintenance,
            Err(e) => {
                tracing::error!(maintenance_id = id, error = %e, "Maintenance update failed, rolling back");
                return Err(e.into_transaction_failure());
            }
        };
        tx.commit()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        tracing::info!(
            maintenance_id = id,
            completed = maintenance.is_completed(),
            "Maintenance updated"
        );
        self.repository.maintenances.get_by_id(id).await
    }

    async fn update_locked(
        &self,
        conn: &mut PgConnection,
        id: i32,
        data: &UpdateMaintenance,
        actor_id: i32,
    ) -> AppResult<Maintenance> {
        let current = self.repository.maintenances.lock_for_update(conn, id).await?;

        let start = data.start_date.unwrap_or(current.start_date);
        if let Some(done) = data.completion_date.or(current.completion_date) {
            if done < start {
                return Err(AppError::Validation(
                    "Completion date must be on or after the start date".to_string(),
                ));
            }
        }

        let maintenance = self.repository.maintenances.update(conn, id, data).await?;

        if current.completion_date.is_none() && data.completion_date.is_some() {
            let asset = self
                .repository
                .assets
                .lock_for_update(conn, maintenance.asset_id)
                .await?;
            let status = self
                .confirm_status(conn, self.lifecycle.after_maintenance(&asset))
                .await?;
            self.repository.assets.set_status(conn, asset.id, status.id).await?;

            self.repository
                .asset_histories
                .append(
                    conn,
                    &NewAssetHistory {
                        asset_id: asset.id,
                        user_id: asset.assigned_to,
                        admin_id: Some(actor_id),
                        action_type: ActionType::Maintenance,
                        note: Some(format!("Maintenance #{} completed", maintenance.id)),
                    },
                )
                .await?;
        }

        Ok(maintenance)
    }

    /// Deleting a record leaves the asset untouched
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.maintenances.delete(id).await?;
        tracing::info!(maintenance_id = id, "Maintenance deleted");
        Ok(())
    }

    async fn confirm_status(&self, conn: &mut PgConnection, expected: &StatusLabel) -> AppResult<StatusLabel> {
        self.repository
            .status_labels
            .find_in(conn, expected.id)
            .await?
            .ok_or_else(|| {
                AppError::Configuration(format!("Status label '{}' no longer exists", expected.name))
            })
    }
}
