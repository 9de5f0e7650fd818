//! Authentication endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{LoginRequest, LoginResponse, User},
    AppState,
};

use super::{AuthenticatedUser, StatusMessage};

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
        (status = 422, description = "Malformed request", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.services.users.authenticate(&request).await?;
    Ok(Json(response))
}

/// Log out. Tokens are stateless; the client discards its token.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = StatusMessage),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(AuthenticatedUser(claims): AuthenticatedUser) -> Json<StatusMessage> {
    tracing::info!(user_id = claims.user_id, "User logged out");
    Json(StatusMessage::new("Logged out successfully"))
}

/// Get the current user
#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<User>> {
    let user = state.services.users.get(claims.user_id).await?;
    Ok(Json(user))
}
