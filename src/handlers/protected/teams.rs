// handlers/protected/teams.rs - /api/v1/teams

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};

use crate::database::{NewTeam, Team};
use crate::error::{ApiError, ErrorBody};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeamFilter {
    /// Only teams owned by this user
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    /// Owning user; the caller when omitted
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(alias = "sleeper_id")]
    pub external_id: String,
    pub league_id: String,
    pub name: String,
    /// Owner display name; the caller's username when omitted
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub is_dynasty: bool,
    #[serde(default = "empty_object")]
    #[schema(value_type = Object)]
    pub settings: Value,
    #[serde(default = "empty_array")]
    #[schema(value_type = Object)]
    pub roster: Value,
}

fn empty_object() -> Value {
    json!({})
}

fn empty_array() -> Value {
    json!([])
}

impl CreateTeamRequest {
    fn into_new_team(self, auth: &AuthUser) -> Result<NewTeam, ApiError> {
        let user_id = self.user_id.unwrap_or(auth.user_id);
        if user_id <= 0 {
            return Err(ApiError::bad_request("Invalid user_id: must be a positive integer"));
        }

        if [&self.external_id, &self.league_id, &self.name]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(ApiError::bad_request("external_id, league_id and name must not be empty"));
        }

        let owner = self
            .owner
            .filter(|owner| !owner.trim().is_empty())
            .unwrap_or_else(|| auth.username.clone());

        Ok(NewTeam {
            user_id,
            external_id: self.external_id,
            league_id: self.league_id,
            name: self.name,
            owner,
            is_dynasty: self.is_dynasty,
            settings: self.settings,
            roster: self.roster,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SyncResponse {
    #[schema(value_type = String)]
    pub message: &'static str,
}

/// GET /api/v1/teams - newest first, optionally narrowed to one owner.
#[utoipa::path(
    get,
    path = "/api/v1/teams",
    tag = "teams",
    params(TeamFilter),
    responses(
        (status = 200, description = "Teams, newest first", body = [Team]),
        (status = 400, description = "Malformed user_id", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn teams_get(
    State(state): State<AppState>,
    filter: Result<Query<TeamFilter>, QueryRejection>,
) -> ApiResult<Vec<Team>> {
    let Query(filter) = filter.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let teams = match filter.user_id {
        Some(user_id) if user_id <= 0 => {
            return Err(ApiError::bad_request("Invalid user_id: must be a positive integer"));
        }
        Some(user_id) => state.teams.list_for_user(user_id).await?,
        None => state.teams.list().await?,
    };

    Ok(ApiResponse::success(teams))
}

/// POST /api/v1/teams - 201 with the stored row, 409 when the team already exists in that league.
#[utoipa::path(
    post,
    path = "/api/v1/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Missing fields or unknown user", body = ErrorBody),
        (status = 409, description = "Team already exists in the league", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn team_post(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> ApiResult<Team> {
    let Json(request) = payload?;
    let team = state.teams.create(&request.into_new_team(&auth)?).await?;
    Ok(ApiResponse::created(team))
}

#[utoipa::path(
    get,
    path = "/api/v1/teams/{id}",
    tag = "teams",
    params(("id" = i64, Path, description = "Team id")),
    responses(
        (status = 200, description = "The team", body = Team),
        (status = 404, description = "No such team", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn team_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Team> {
    let team = state
        .teams
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Team not found"))?;
    Ok(ApiResponse::success(team))
}

/// POST /api/v1/teams/:id/sync - does not check that the team exists.
#[utoipa::path(
    post,
    path = "/api/v1/teams/{id}/sync",
    tag = "teams",
    params(("id" = i64, Path, description = "Team id")),
    responses(
        (status = 200, description = "Sync accepted", body = SyncResponse),
        (status = 502, description = "External platform failed", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn team_sync_post(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<SyncResponse> {
    state.sync.sync_team(id).await?;
    Ok(ApiResponse::success(SyncResponse {
        message: "Team synced successfully",
    }))
}
