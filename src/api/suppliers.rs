//! Supplier endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        supplier::{CreateSupplier, Supplier, UpdateSupplier},
        PageQuery,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse, PaginatedResponse, StatusMessage};

/// List suppliers
#[utoipa::path(
    get,
    path = "/suppliers",
    tag = "suppliers",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of suppliers", body = PaginatedResponse<Supplier>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Supplier>>> {
    let (suppliers, total) = state.services.organization.list_suppliers(&page).await?;
    Ok(Json(PaginatedResponse::new(suppliers, total, &page)))
}

/// Get a supplier by ID
#[utoipa::path(
    get,
    path = "/suppliers/{id}",
    tag = "suppliers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier details", body = Supplier),
        (status = 404, description = "Supplier not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Supplier>> {
    let supplier = state.services.organization.get_supplier(id).await?;
    Ok(Json(supplier))
}

/// Create a supplier
#[utoipa::path(
    post,
    path = "/suppliers",
    tag = "suppliers",
    security(("bearer_auth" = [])),
    request_body = CreateSupplier,
    responses(
        (status = 201, description = "Supplier created", body = MessageResponse<Supplier>),
        (status = 403, description = "Staff privileges required"),
        (status = 409, description = "Name already in use", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateSupplier>,
) -> AppResult<(StatusCode, Json<MessageResponse<Supplier>>)> {
    claims.require_staff()?;
    let supplier = state.services.organization.create_supplier(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Supplier created successfully", supplier)),
    ))
}

/// Update a supplier
#[utoipa::path(
    put,
    path = "/suppliers/{id}",
    tag = "suppliers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Supplier ID")),
    request_body = UpdateSupplier,
    responses(
        (status = 200, description = "Supplier updated", body = MessageResponse<Supplier>),
        (status = 404, description = "Supplier not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSupplier>,
) -> AppResult<Json<MessageResponse<Supplier>>> {
    claims.require_staff()?;
    let supplier = state.services.organization.update_supplier(id, &data).await?;
    Ok(Json(MessageResponse::new("Supplier updated successfully", supplier)))
}

/// Delete a supplier
#[utoipa::path(
    delete,
    path = "/suppliers/{id}",
    tag = "suppliers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier deleted", body = StatusMessage),
        (status = 404, description = "Supplier not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Assets or maintenance records reference the supplier", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    claims.require_staff()?;
    state.services.organization.delete_supplier(id).await?;
    Ok(Json(StatusMessage::new("Supplier deleted successfully")))
}
