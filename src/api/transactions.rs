//! Checkout, checkin and handover endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        asset_history::{CheckinRequest, CheckoutRequest, HandoverDocument},
        AssetDetails,
    },
    AppState,
};

use super::{AuthenticatedUser, MessageResponse};

/// Check an asset out to a user
#[utoipa::path(
    post,
    path = "/assets/checkout",
    tag = "transactions",
    security(("bearer_auth" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Asset checked out", body = MessageResponse<AssetDetails>),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Asset is not available or the user does not exist", body = crate::error::ErrorResponse),
        (status = 500, description = "Transaction failed and was rolled back", body = crate::error::ErrorResponse)
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<Json<MessageResponse<AssetDetails>>> {
    claims.require_staff()?;
    let asset = state
        .services
        .transactions
        .checkout(&request, claims.user_id)
        .await?;
    Ok(Json(MessageResponse::new("Asset checked out successfully", asset)))
}

/// Check an asset back in
#[utoipa::path(
    post,
    path = "/assets/checkin",
    tag = "transactions",
    security(("bearer_auth" = [])),
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Asset checked in", body = MessageResponse<AssetDetails>),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Asset is not checked out or the status does not exist", body = crate::error::ErrorResponse),
        (status = 500, description = "Transaction failed and was rolled back", body = crate::error::ErrorResponse)
    )
)]
pub async fn checkin(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CheckinRequest>,
) -> AppResult<Json<MessageResponse<AssetDetails>>> {
    claims.require_staff()?;
    let asset = state
        .services
        .transactions
        .checkin(&request, claims.user_id)
        .await?;
    Ok(Json(MessageResponse::new("Asset checked in successfully", asset)))
}

/// Handover form data for a checkout
#[utoipa::path(
    get,
    path = "/assets/checkout/{history_id}/handover",
    tag = "transactions",
    security(("bearer_auth" = [])),
    params(("history_id" = i32, Path, description = "Checkout history entry ID")),
    responses(
        (status = 200, description = "Handover document", body = HandoverDocument),
        (status = 404, description = "History entry not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Entry is not a checkout", body = crate::error::ErrorResponse)
    )
)]
pub async fn handover(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(history_id): Path<i32>,
) -> AppResult<Json<HandoverDocument>> {
    claims.require_staff()?;
    let document = state.services.transactions.handover(history_id).await?;
    Ok(Json(document))
}
