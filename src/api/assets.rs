//! Asset endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        asset::{AssetQuery, CreateAsset, UpdateAsset},
        AssetDetails, AssetHistoryEntry, PageQuery,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse, PaginatedResponse, StatusMessage};

/// List assets with filters and pagination
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(AssetQuery),
    responses(
        (status = 200, description = "Page of assets", body = PaginatedResponse<AssetDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_assets(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AssetQuery>,
) -> AppResult<Json<PaginatedResponse<AssetDetails>>> {
    let (assets, total) = state.services.assets.list(&query).await?;
    let page = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    Ok(Json(PaginatedResponse::new(assets, total, &page)))
}

/// Get asset details by ID
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = AssetDetails),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AssetDetails>> {
    let asset = state.services.assets.get(id).await?;
    Ok(Json(asset))
}

/// Register a new asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = MessageResponse<AssetDetails>),
        (status = 403, description = "Staff privileges required"),
        (status = 409, description = "Asset tag or serial already in use", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<MessageResponse<AssetDetails>>)> {
    claims.require_staff()?;
    let asset = state.services.assets.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Asset created successfully", asset)),
    ))
}

/// Update an asset. Assignment changes go through checkout/checkin.
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = MessageResponse<AssetDetails>),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Asset tag or serial already in use", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAsset>,
) -> AppResult<Json<MessageResponse<AssetDetails>>> {
    claims.require_staff()?;
    let asset = state.services.assets.update(id, &data).await?;
    Ok(Json(MessageResponse::new("Asset updated successfully", asset)))
}

/// Soft-delete an asset
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset deleted", body = StatusMessage),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Asset is checked out", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    claims.require_staff()?;
    state.services.assets.delete(id).await?;
    Ok(Json(StatusMessage::new("Asset deleted successfully")))
}

/// Audit trail of an asset, newest first
#[utoipa::path(
    get,
    path = "/assets/{id}/history",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "History entries", body = Vec<AssetHistoryEntry>),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn asset_history(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<AssetHistoryEntry>>> {
    let history = state.services.transactions.history(id).await?;
    Ok(Json(history))
}
