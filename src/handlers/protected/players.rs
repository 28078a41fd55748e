// handlers/protected/players.rs - /api/v1/players

use axum::extract::{Path, State};

use crate::database::{Player, PlayerStats};
use crate::error::{ApiError, ErrorBody};
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/players",
    tag = "players",
    responses((status = 200, description = "Active players, best first", body = [Player])),
    security(("bearer_auth" = []))
)]
pub async fn players_get(State(state): State<AppState>) -> ApiResult<Vec<Player>> {
    Ok(ApiResponse::success(state.players.list_active().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player id")),
    responses(
        (status = 200, description = "The player", body = Player),
        (status = 404, description = "No such player", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn player_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Player> {
    let player = state
        .players
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Player not found"))?;
    Ok(ApiResponse::success(player))
}

/// Unknown players yield an empty list, not a 404.
#[utoipa::path(
    get,
    path = "/api/v1/players/{id}/stats",
    tag = "players",
    params(("id" = i64, Path, description = "Player id")),
    responses((status = 200, description = "Weekly lines, most recent first", body = [PlayerStats])),
    security(("bearer_auth" = []))
)]
pub async fn player_stats_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<PlayerStats>> {
    Ok(ApiResponse::success(state.players.stats(id).await?))
}
