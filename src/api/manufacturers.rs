//! Manufacturer endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        master_data::{CreateManufacturer, Manufacturer, UpdateManufacturer},
        PageQuery,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse, PaginatedResponse, StatusMessage};

/// List manufacturers
#[utoipa::path(
    get,
    path = "/manufacturers",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of manufacturers", body = PaginatedResponse<Manufacturer>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_manufacturers(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Manufacturer>>> {
    let (manufacturers, total) = state.services.catalog.list_manufacturers(&page).await?;
    Ok(Json(PaginatedResponse::new(manufacturers, total, &page)))
}

/// Get a manufacturer by ID
#[utoipa::path(
    get,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Manufacturer details", body = Manufacturer),
        (status = 404, description = "Manufacturer not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Manufacturer>> {
    let manufacturer = state.services.catalog.get_manufacturer(id).await?;
    Ok(Json(manufacturer))
}

/// Create a manufacturer
#[utoipa::path(
    post,
    path = "/manufacturers",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    request_body = CreateManufacturer,
    responses(
        (status = 201, description = "Manufacturer created", body = MessageResponse<Manufacturer>),
        (status = 403, description = "Staff privileges required"),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateManufacturer>,
) -> AppResult<(StatusCode, Json<MessageResponse<Manufacturer>>)> {
    claims.require_staff()?;
    let manufacturer = state.services.catalog.create_manufacturer(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Manufacturer created successfully", manufacturer)),
    ))
}

/// Update a manufacturer
#[utoipa::path(
    put,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manufacturer ID")),
    request_body = UpdateManufacturer,
    responses(
        (status = 200, description = "Manufacturer updated", body = MessageResponse<Manufacturer>),
        (status = 404, description = "Manufacturer not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateManufacturer>,
) -> AppResult<Json<MessageResponse<Manufacturer>>> {
    claims.require_staff()?;
    let manufacturer = state.services.catalog.update_manufacturer(id, &data).await?;
    Ok(Json(MessageResponse::new("Manufacturer updated successfully", manufacturer)))
}

/// Delete a manufacturer
#[utoipa::path(
    delete,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Manufacturer deleted", body = StatusMessage),
        (status = 404, description = "Manufacturer not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Device models still reference the manufacturer", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    claims.require_staff()?;
    state.services.catalog.delete_manufacturer(id).await?;
    Ok(Json(StatusMessage::new("Manufacturer deleted successfully")))
}
