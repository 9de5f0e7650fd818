//! Maintenance endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        maintenance::{CreateMaintenance, Maintenance, UpdateMaintenance},
        PageQuery,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse, PaginatedResponse, StatusMessage};

/// List maintenance records
#[utoipa::path(
    get,
    path = "/maintenances",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of maintenance records", body = PaginatedResponse<Maintenance>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_maintenances(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Maintenance>>> {
    let (maintenances, total) = state.services.maintenance.list(&page).await?;
    Ok(Json(PaginatedResponse::new(maintenances, total, &page)))
}

/// Get a maintenance record by ID
#[utoipa::path(
    get,
    path = "/maintenances/{id}",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Maintenance details", body = Maintenance),
        (status = 404, description = "Maintenance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_maintenance(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Maintenance>> {
    let maintenance = state.services.maintenance.get(id).await?;
    Ok(Json(maintenance))
}

/// Start maintenance on an asset.
///
/// The asset moves to the maintenance status, or straight back out of it
/// when `completion_date` is already set.
#[utoipa::path(
    post,
    path = "/maintenances",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Maintenance created", body = MessageResponse<Maintenance>),
        (status = 403, description = "Staff privileges required"),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_maintenance(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<MessageResponse<Maintenance>>)> {
    claims.require_staff()?;
    let maintenance = state.services.maintenance.start(&data, claims.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Maintenance started successfully", maintenance)),
    ))
}

/// Update a maintenance record; setting `completion_date` returns the asset
/// to ready, or to deployed while it is still assigned
#[utoipa::path(
    put,
    path = "/maintenances/{id}",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance ID")),
    request_body = UpdateMaintenance,
    responses(
        (status = 200, description = "Maintenance updated", body = MessageResponse<Maintenance>),
        (status = 404, description = "Maintenance not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_maintenance(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenance>,
) -> AppResult<Json<MessageResponse<Maintenance>>> {
    claims.require_staff()?;
    let maintenance = state.services.maintenance.update(id, &data, claims.user_id).await?;
    Ok(Json(MessageResponse::new("Maintenance updated successfully", maintenance)))
}

/// Delete a maintenance record (the asset is not touched)
#[utoipa::path(
    delete,
    path = "/maintenances/{id}",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Maintenance deleted", body = StatusMessage),
        (status = 404, description = "Maintenance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_maintenance(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    claims.require_staff()?;
    state.services.maintenance.delete(id).await?;
    Ok(Json(StatusMessage::new("Maintenance deleted successfully")))
}
