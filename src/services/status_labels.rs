//! Status label management

use validator::Validate;

use super::lifecycle::LifecycleStatuses;
use crate::{
    error::{AppError, AppResult},
    models::{
        status_label::{CreateStatusLabel, StatusLabel, UpdateStatusLabel},
        PageQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct StatusLabelsService {
    repository: Repository,
    lifecycle: LifecycleStatuses,
}

impl StatusLabelsService {
    pub fn new(repository: Repository, lifecycle: LifecycleStatuses) -> Self {
        Self { repository, lifecycle }
    }

    pub async fn list(&self, page: &PageQuery) -> AppResult<(Vec<StatusLabel>, i64)> {
        self.repository.status_labels.list(page.per_page(), page.offset()).await
    }

    pub async fn get(&self, id: i32) -> AppResult<StatusLabel> {
        self.repository.status_labels.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateStatusLabel) -> AppResult<StatusLabel> {
        data.validate()?;
        if self.repository.status_labels.name_exists(&data.name, None).await? {
            return Err(AppError::Conflict(format!("Status label '{}' already exists", data.name)));
        }
        let label = self.repository.status_labels.create(data).await?;
        tracing::info!(status_id = label.id, kind = %label.kind, "Status label created");
        Ok(label)
    }

    /// Lifecycle labels are looked up by name at startup, so their name and
    /// kind are fixed
    pub async fn update(&self, id: i32, data: &UpdateStatusLabel) -> AppResult<StatusLabel> {
        data.validate()?;
        let current = self.repository.status_labels.get_by_id(id).await?;

        if let Some(ref name) = data.name {
            if self.repository.status_labels.name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(format!("Status label '{}' already exists", name)));
            }
        }
        if self.lifecycle.contains(id) {
            let renamed = data.name.as_deref().is_some_and(|n| n != current.name);
            let rekinded = data.kind.is_some_and(|k| k != current.kind);
            if renamed || rekinded {
                return Err(AppError::BusinessRule(format!(
                    "Status label '{}' is a lifecycle status; its name and kind cannot change",
                    current.name
                )));
            }
        }
        self.repository.status_labels.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let label = self.repository.status_labels.get_by_id(id).await?;
        if self.lifecycle.contains(id) {
            return Err(AppError::BusinessRule(format!(
                "Cannot delete status label '{}': it is a configured lifecycle status",
                label.name
            )));
        }
        if self.repository.assets.exists_for_status(id).await? {
            return Err(AppError::BusinessRule(format!(
                "Cannot delete status label '{}': assets still use it",
                label.name
            )));
        }
        self.repository.status_labels.delete(id).await?;
        tracing::info!(status_id = id, "Status label deleted");
        Ok(())
    }
}
