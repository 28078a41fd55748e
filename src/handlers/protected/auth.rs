// handlers/protected/auth.rs - POST /api/v1/auth/refresh

use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ErrorBody;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub token: String,
}

/// Reissue a token for the caller's identity with a fresh expiry.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "auth",
    responses(
        (status = 200, description = "New token", body = RefreshResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn refresh_post(State(state): State<AppState>, auth: AuthUser) -> ApiResult<RefreshResponse> {
    let token = state.tokens.issue(auth.user_id, &auth.username)?;
    Ok(ApiResponse::success(RefreshResponse { token }))
}
