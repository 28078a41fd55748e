// handlers/protected/users.rs - /api/v1/users

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::database::{NewUser, User};
use crate::error::{ApiError, ErrorBody};
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(alias = "sleeper_id")]
    pub external_id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CreateUserRequest {
    fn into_new_user(self) -> Result<NewUser, ApiError> {
        if self.external_id.trim().is_empty() || self.username.trim().is_empty() {
            return Err(ApiError::bad_request("external_id and username must not be empty"));
        }

        let display_name = self
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.username.clone());

        Ok(NewUser {
            external_id: self.external_id,
            username: self.username,
            display_name,
            email: self.email,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses((status = 200, description = "Users, newest first", body = [User])),
    security(("bearer_auth" = []))
)]
pub async fn users_get(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.users.list().await?))
}

/// POST /api/v1/users - 201 with the stored row, 409 when the external id is taken.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "External id already registered", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn user_post(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<User> {
    let Json(request) = payload?;
    let user = state.users.create(&request.into_new_user()?).await?;
    Ok(ApiResponse::created(user))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn user_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<User> {
    let user = state
        .users
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(ApiResponse::success(user))
}
