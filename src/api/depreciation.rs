//! Manual depreciation run

use axum::{extract::State, Json};

use crate::{error::AppResult, services::depreciation::DepreciationReport, AppState};

use super::AuthenticatedUser;

/// Recompute the book value of every eligible asset
#[utoipa::path(
    post,
    path = "/depreciation/run",
    tag = "depreciation",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Run finished", body = DepreciationReport),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn run_depreciation(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<DepreciationReport>> {
    claims.require_staff()?;
    tracing::info!(user_id = claims.user_id, "Manual depreciation run requested");
    let report = state.services.depreciation.run_now().await?;
    Ok(Json(report))
}
