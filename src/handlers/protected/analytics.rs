// handlers/protected/analytics.rs - /api/v1/analytics

use axum::extract::{Path, State};

use crate::error::ErrorBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{PlayerProjection, PlayerRecommendation, TeamRecommendation};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/analytics/teams/{id}/recommendations",
    tag = "analytics",
    params(("id" = i64, Path, description = "Team id")),
    responses(
        (status = 200, description = "Suggestions for the team", body = [TeamRecommendation]),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn team_recommendations_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<TeamRecommendation>> {
    Ok(ApiResponse::success(state.recommendations.team_recommendations(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/players/{id}/projection",
    tag = "analytics",
    params(("id" = i64, Path, description = "Player id")),
    responses(
        (status = 200, description = "Next-week projection", body = PlayerProjection),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn player_projection_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<PlayerProjection> {
    Ok(ApiResponse::success(state.recommendations.player_projection(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/waiver-wire",
    tag = "analytics",
    responses(
        (status = 200, description = "Waiver-wire pickups", body = [PlayerRecommendation]),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn waiver_wire_get(State(state): State<AppState>) -> ApiResult<Vec<PlayerRecommendation>> {
    Ok(ApiResponse::success(state.recommendations.waiver_wire().await?))
}
