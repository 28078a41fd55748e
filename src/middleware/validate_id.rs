use axum::{
    extract::{RawPathParams, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Path parameters that must hold a positive integer when present.
const ID_PARAMS: &[&str] = &["id", "user_id", "team_id", "player_id"];

/// Name of the first ID-like parameter whose value is not a positive integer.
pub fn find_invalid_id<'a, I>(params: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    params
        .into_iter()
        .filter(|(name, _)| ID_PARAMS.contains(name))
        .find(|(_, value)| !matches!(value.parse::<i64>(), Ok(n) if n > 0))
        .map(|(name, _)| name)
}

/// Rejects malformed IDs before authentication runs.
pub async fn validate_id_middleware(params: Option<RawPathParams>, request: Request, next: Next) -> Response {
    if let Some(params) = &params {
        if let Some(name) = find_invalid_id(params.iter()) {
            return ApiError::bad_request(format!("Invalid {}: must be a positive integer", name)).into_response();
        }
    }

    next.run(request).await
}
