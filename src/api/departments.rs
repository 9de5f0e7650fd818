//! Department endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        department::{CreateDepartment, Department, UpdateDepartment},
        PageQuery,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse, PaginatedResponse, StatusMessage};

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of departments", body = PaginatedResponse<Department>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_departments(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Department>>> {
    let (departments, total) = state.services.organization.list_departments(&page).await?;
    Ok(Json(PaginatedResponse::new(departments, total, &page)))
}

/// Get a department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = Department),
        (status = 404, description = "Department not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Department>> {
    let department = state.services.organization.get_department(id).await?;
    Ok(Json(department))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = MessageResponse<Department>),
        (status = 403, description = "Staff privileges required"),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_department(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<MessageResponse<Department>>)> {
    claims.require_staff()?;
    let department = state.services.organization.create_department(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Department created successfully", department)),
    ))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = MessageResponse<Department>),
        (status = 404, description = "Department not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_department(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateDepartment>,
) -> AppResult<Json<MessageResponse<Department>>> {
    claims.require_staff()?;
    let department = state.services.organization.update_department(id, &data).await?;
    Ok(Json(MessageResponse::new("Department updated successfully", department)))
}

/// Delete a department
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deleted", body = StatusMessage),
        (status = 404, description = "Department not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Users still belong to the department", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_department(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StatusMessage>> {
    claims.require_staff()?;
    state.services.organization.delete_department(id).await?;
    Ok(Json(StatusMessage::new("Department deleted successfully")))
}
