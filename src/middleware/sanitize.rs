use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::AppState;

/// Substrings that reject a query parameter value, matched case-insensitively.
///
/// This is a coarse filter, not an injection defence: every store query is
/// parameterised, and legitimate values containing these tokens are refused.
pub const DENY_LIST: &[&str] = &[
    "'", "\"", ";", "--", "/*", "*/", "xp_", "sp_", "exec", "execute", "union", "select", "insert",
    "update", "delete", "drop", "create", "alter",
];

/// First query parameter (by decoded key) whose decoded value hits the deny list.
pub fn find_rejected_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(_, value)| {
            let lowered = value.to_lowercase();
            DENY_LIST.iter().any(|needle| lowered.contains(needle))
        })
        .map(|(key, _)| key.into_owned())
}

pub async fn sanitize_query_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.config.api.enable_query_sanitizer {
        if let Some(key) = request.uri().query().and_then(find_rejected_param) {
            tracing::warn!(param = %key, "Rejected query parameter");
            return ApiError::bad_request(format!("Invalid characters in parameter {}", key)).into_response();
        }
    }

    next.run(request).await
}
