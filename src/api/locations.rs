//! Location endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        location::{CreateLocation, Location, UpdateLocation},
        PageQuery,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse, PaginatedResponse, StatusMessage};

/// List locations
#[utoipa::path(
    get,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of locations", body = PaginatedResponse<Location>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_locations(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Location>>> {
    let (locations, total) = state.services.organization.list_locations(&page).await?;
    Ok(Json(PaginatedResponse::new(locations, total, &page)))
}

/// Get a location by ID
#[utoipa::path(
    get,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location details", body = Location),
        (status = 404, description = "Location not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_location(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Location>> {
    let location = state.services.organization.get_location(id).await?;
    Ok(Json(location))
}

/// Create a location
#[utoipa::path(
    post,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    request_body = CreateLocation,
    responses(
        (status = 201, description = "Location created", body = MessageResponse<Location>),
        (status = 403, description = "Staff privileges required"),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_location(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<MessageResponse<Location>>)> {
    claims.require_staff()?;
    let location = state.services.organization.create_location(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Location created successfully", location)),
    ))
}

/// Update a location
#[utoipa::path(
    put,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Location ID")),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location updated", body = MessageResponse<Location>),
        (status = 404, description = "Location not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_location(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLocation>,
) -> AppResult<Json<MessageResponse<Location>>> {
    claims.require_staff()?;
    let location = state.services.organization.update_location(id, &data).await?;
    Ok(Json(MessageResponse::new("Location updated successfully", location)))
}

/// Delete a location
#[utoipa::path(
    delete,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location deleted", body = StatusMessage),
        (status = 404, description = "Location not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Users are based there or it has child locations", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_location(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    claims.require_staff()?;
    state.services.organization.delete_location(id).await?;
    Ok(Json(StatusMessage::new("Location deleted successfully")))
}
