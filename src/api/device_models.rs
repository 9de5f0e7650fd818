//! Device model endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        device_model::{CreateDeviceModel, DeviceModel, UpdateDeviceModel},
        PageQuery,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse, PaginatedResponse, StatusMessage};

/// List device models
#[utoipa::path(
    get,
    path = "/device-models",
    tag = "device-models",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of device models", body = PaginatedResponse<DeviceModel>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_models(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<DeviceModel>>> {
    let (models, total) = state.services.catalog.list_device_models(&page).await?;
    Ok(Json(PaginatedResponse::new(models, total, &page)))
}

/// Get a device model by ID
#[utoipa::path(
    get,
    path = "/device-models/{id}",
    tag = "device-models",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Device model ID")),
    responses(
        (status = 200, description = "Device model details", body = DeviceModel),
        (status = 404, description = "Device model not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_device_model(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DeviceModel>> {
    let device_model = state.services.catalog.get_device_model(id).await?;
    Ok(Json(device_model))
}

/// Create a device model
#[utoipa::path(
    post,
    path = "/device-models",
    tag = "device-models",
    security(("bearer_auth" = [])),
    request_body = CreateDeviceModel,
    responses(
        (status = 201, description = "Device model created", body = MessageResponse<DeviceModel>),
        (status = 403, description = "Staff privileges required"),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_device_model(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateDeviceModel>,
) -> AppResult<(StatusCode, Json<MessageResponse<DeviceModel>>)> {
    claims.require_staff()?;
    let device_model = state.services.catalog.create_device_model(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Device model created successfully", device_model)),
    ))
}

/// Update a device model
#[utoipa::path(
    put,
    path = "/device-models/{id}",
    tag = "device-models",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Device model ID")),
    request_body = UpdateDeviceModel,
    responses(
        (status = 200, description = "Device model updated", body = MessageResponse<DeviceModel>),
        (status = 404, description = "Device model not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_device_model(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateDeviceModel>,
) -> AppResult<Json<MessageResponse<DeviceModel>>> {
    claims.require_staff()?;
    let device_model = state.services.catalog.update_device_model(id, &data).await?;
    Ok(Json(MessageResponse::new("Device model updated successfully", device_model)))
}

/// Delete a device model
#[utoipa::path(
    delete,
    path = "/device-models/{id}",
    tag = "device-models",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Device model ID")),
    responses(
        (status = 200, description = "Device model deleted", body = StatusMessage),
        (status = 404, description = "Device model not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Assets still use the device model", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_device_model(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    claims.require_staff()?;
    state.services.catalog.delete_device_model(id).await?;
    Ok(Json(StatusMessage::new("Device model deleted successfully")))
}
