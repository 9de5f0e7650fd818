//! Checkout and checkin of assets.
//!
//! Each operation validates its preconditions up front, then opens a
//! transaction, locks the asset row and checks the same rules again before
//! writing. The asset update and its history row commit together or not at
//! all.

use sqlx::PgConnection;
use validator::Validate;

use super::{
    lifecycle::{self, LifecycleStatuses},
    referenced,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        asset_history::{
            AssetHistory, AssetHistoryEntry, CheckinRequest, CheckoutRequest, HandoverDocument,
            NewAssetHistory,
        },
        ActionType, AssetDetails,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct TransactionsService {
    repository: Repository,
    lifecycle: LifecycleStatuses,
}

impl TransactionsService {
    pub fn new(repository: Repository, lifecycle: LifecycleStatuses) -> Self {
        Self { repository, lifecycle }
    }

    /// Assign an asset to a user and mark it deployed
    pub async fn checkout(&self, request: &CheckoutRequest, actor_id: i32) -> AppResult<AssetDetails> {
        request.validate()?;

        let asset = self.repository.assets.get_by_id(request.asset_id).await?;
        if !self.repository.users.exists(request.user_id).await? {
            return Err(AppError::Validation(format!(
                "User with id {} does not exist",
                request.user_id
            )));
        }
        let status = self.repository.status_labels.get_by_id(asset.status_id).await?;
        lifecycle::ensure_checkout_eligible(&asset, &status)?;

        let mut tx = self
            .repository
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        let history = match self.checkout_locked(&mut tx, request, actor_id).await {
            Ok(history) => history,
            Err(e) => {
                tracing::error!(asset_id = request.asset_id, error = %e, "Checkout failed, rolling back");
                return Err(e.into_transaction_failure());
            }
        };
        tx.commit()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        tracing::info!(
            asset_id = request.asset_id,
            user_id = request.user_id,
            admin_id = actor_id,
            history_id = history.id,
            "Asset checked out"
        );

        self.repository.assets.get_details(request.asset_id).await
    }

    async fn checkout_locked(
        &self,
        conn: &mut PgConnection,
        request: &CheckoutRequest,
        actor_id: i32,
    ) -> AppResult<AssetHistory> {
        let asset = self.repository.assets.lock_for_update(conn, request.asset_id).await?;
        let status = self
            .repository
            .status_labels
            .find_in(conn, asset.status_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Status label {} vanished", asset.status_id)))?;
        lifecycle::ensure_checkout_eligible(&asset, &status)?;

        let deployed = self
            .repository
            .status_labels
            .find_in(conn, self.lifecycle.deployed.id)
            .await?
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "Deployed status label '{}' no longer exists",
                    self.lifecycle.deployed.name
                ))
            })?;

        self.repository
            .assets
            .set_assignment(conn, asset.id, deployed.id, Some(request.user_id))
            .await?;

        self.repository
            .asset_histories
            .append(
                conn,
                &NewAssetHistory {
                    asset_id: asset.id,
                    user_id: Some(request.user_id),
                    admin_id: Some(actor_id),
                    action_type: ActionType::Checkout,
                    note: request.note.clone(),
                },
            )
            .await
    }

    /// Take an asset back from its assignee and put it in the requested status
    pub async fn checkin(&self, request: &CheckinRequest, actor_id: i32) -> AppResult<AssetDetails> {
        request.validate()?;

        let asset = self.repository.assets.get_by_id(request.asset_id).await?;
        lifecycle::ensure_checkin_eligible(&asset)?;
        let target = referenced(self.repository.status_labels.get_by_id(request.status_id).await)?;
        lifecycle::ensure_checkin_target(&target)?;

        let mut tx = self
            .repository
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        let history = match self.checkin_locked(&mut tx, request, actor_id).await {
            Ok(history) => history,
            Err(e) => {
                tracing::error!(asset_id = request.asset_id, error = %e, "Checkin failed, rolling back");
                return Err(e.into_transaction_failure());
            }
        };
        tx.commit()
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        tracing::info!(
            asset_id = request.asset_id,
            user_id = ?history.user_id,
            admin_id = actor_id,
            status_id = request.status_id,
            "Asset checked in"
        );

        self.repository.assets.get_details(request.asset_id).await
    }

    async fn checkin_locked(
        &self,
        conn: &mut PgConnection,
        request: &CheckinRequest,
        actor_id: i32,
    ) -> AppResult<AssetHistory> {
        let asset = self.repository.assets.lock_for_update(conn, request.asset_id).await?;
        let previous_user = lifecycle::ensure_checkin_eligible(&asset)?;

        let target = self
            .repository
            .status_labels
            .find_in(conn, request.status_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("Status label with id {} does not exist", request.status_id))
            })?;
        lifecycle::ensure_checkin_target(&target)?;

        self.repository
            .assets
            .set_assignment(conn, asset.id, request.status_id, None)
            .await?;

        self.repository
            .asset_histories
            .append(
                conn,
                &NewAssetHistory {
                    asset_id: asset.id,
                    user_id: Some(previous_user),
                    admin_id: Some(actor_id),
                    action_type: ActionType::Checkin,
                    note: request.note.clone(),
                },
            )
            .await
    }

    /// History of one asset, newest first
    pub async fn history(&self, asset_id: i32) -> AppResult<Vec<AssetHistoryEntry>> {
        self.repository.assets.get_by_id(asset_id).await?;
        self.repository.asset_histories.list_for_asset(asset_id).await
    }

    /// Handover form data for a checkout
    pub async fn handover(&self, history_id: i32) -> AppResult<HandoverDocument> {
        let history = self.repository.asset_histories.get_by_id(history_id).await?;
        if history.action_type != ActionType::Checkout {
            return Err(AppError::BusinessRule(format!(
                "History entry {} is a {}, not a checkout",
                history_id, history.action_type
            )));
        }
        self.repository.asset_histories.handover(history_id).await
    }
}
