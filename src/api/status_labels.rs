//! Status label endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        status_label::{CreateStatusLabel, StatusLabel, UpdateStatusLabel},
        PageQuery,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse, PaginatedResponse, StatusMessage};

/// List status labels
#[utoipa::path(
    get,
    path = "/status-labels",
    tag = "status-labels",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of status labels", body = PaginatedResponse<StatusLabel>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_labels(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<StatusLabel>>> {
    let (labels, total) = state.services.status_labels.list(&page).await?;
    Ok(Json(PaginatedResponse::new(labels, total, &page)))
}

/// Get a status label by ID
#[utoipa::path(
    get,
    path = "/status-labels/{id}",
    tag = "status-labels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Status label ID")),
    responses(
        (status = 200, description = "Status label details", body = StatusLabel),
        (status = 404, description = "Status label not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_status_label(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusLabel>> {
    let status_label = state.services.status_labels.get(id).await?;
    Ok(Json(status_label))
}

/// Create a status label
#[utoipa::path(
    post,
    path = "/status-labels",
    tag = "status-labels",
    security(("bearer_auth" = [])),
    request_body = CreateStatusLabel,
    responses(
        (status = 201, description = "Status label created", body = MessageResponse<StatusLabel>),
        (status = 403, description = "Staff privileges required"),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_status_label(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateStatusLabel>,
) -> AppResult<(StatusCode, Json<MessageResponse<StatusLabel>>)> {
    claims.require_staff()?;
    let status_label = state.services.status_labels.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Status label created successfully", status_label)),
    ))
}

/// Update a status label. Lifecycle labels keep their name and kind.
#[utoipa::path(
    put,
    path = "/status-labels/{id}",
    tag = "status-labels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Status label ID")),
    request_body = UpdateStatusLabel,
    responses(
        (status = 200, description = "Status label updated", body = MessageResponse<StatusLabel>),
        (status = 404, description = "Status label not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_status_label(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateStatusLabel>,
) -> AppResult<Json<MessageResponse<StatusLabel>>> {
    claims.require_staff()?;
    let status_label = state.services.status_labels.update(id, &data).await?;
    Ok(Json(MessageResponse::new("Status label updated successfully", status_label)))
}

/// Delete a status label
#[utoipa::path(
    delete,
    path = "/status-labels/{id}",
    tag = "status-labels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Status label ID")),
    responses(
        (status = 200, description = "Status label deleted", body = StatusMessage),
        (status = 404, description = "Status label not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Assets use the label or it is a lifecycle status", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_status_label(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    claims.require_staff()?;
    state.services.status_labels.delete(id).await?;
    Ok(Json(StatusMessage::new("Status label deleted successfully")))
}
