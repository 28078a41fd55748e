// handlers/public/auth.rs - POST /api/v1/public/auth/login

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::database::{DatabaseError, NewUser, User};
use crate::error::{ApiError, ErrorBody};
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "sleeper_id")]
    pub external_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/**
 * POST /api/v1/public/auth/login - Find or create a user and issue a token
 *
 * Input: `{"username": "...", "external_id": "..."}` (`sleeper_id` is accepted
 * in place of `external_id`). Both fields are required and non-empty.
 *
 * The external identifier is the lookup key: an unknown one creates a user whose
 * display name is the username, a known one returns the stored user unchanged.
 * Two first logins racing on the same identifier both resolve to the one row
 * that won the insert.
 */
#[utoipa::path(
    post,
    path = "/api/v1/public/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing or malformed fields", body = ErrorBody),
    )
)]
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload?;
    validate(&request)?;

    let user = match state.users.get_by_external_id(&request.external_id).await? {
        Some(user) => user,
        None => find_or_create(&state, &request).await?,
    };

    let token = state.tokens.issue(user.id, &user.username)?;
    Ok(ApiResponse::success(LoginResponse { token, user }))
}

async fn find_or_create(state: &AppState, request: &LoginRequest) -> Result<User, ApiError> {
    let new_user = NewUser {
        external_id: request.external_id.clone(),
        username: request.username.clone(),
        display_name: request.username.clone(),
        email: None,
    };

    match state.users.create(&new_user).await {
        Ok(created) => {
            tracing::info!(user_id = created.id, "Created user on first login");
            Ok(created)
        }
        // Another request inserted the same external id between our lookup and insert.
        Err(DatabaseError::Conflict(_)) => state
            .users
            .get_by_external_id(&request.external_id)
            .await?
            .ok_or_else(|| ApiError::internal_server_error("User vanished after conflicting insert")),
        Err(err) => Err(err.into()),
    }
}

fn validate(request: &LoginRequest) -> Result<(), ApiError> {
    let missing: Vec<&str> = [("username", &request.username), ("external_id", &request.external_id)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::invalid_json(format!("missing required field(s): {}", missing.join(", "))))
    }
}
