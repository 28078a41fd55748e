// handlers/public/analytics.rs - GET /api/v1/public/analytics/waiver-wire

use axum::extract::State;

use crate::error::ErrorBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::PlayerRecommendation;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/public/analytics/waiver-wire",
    tag = "analytics",
    responses(
        (status = 200, description = "Waiver-wire pickups", body = [PlayerRecommendation]),
        (status = 503, description = "Analytics backend unavailable", body = ErrorBody),
    )
)]
pub async fn waiver_wire_get(State(state): State<AppState>) -> ApiResult<Vec<PlayerRecommendation>> {
    Ok(ApiResponse::success(state.recommendations.waiver_wire().await?))
}
