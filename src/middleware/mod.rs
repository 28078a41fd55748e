//! Request pipeline stages, outermost first:
//! CORS → logging → query sanitizer → rate limit → (per group) ID validation → bearer auth.

pub mod auth;
pub mod cors;
pub mod logging;
pub mod rate_limit;
pub mod response;
pub mod sanitize;
pub mod validate_id;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use cors::cors_middleware;
pub use rate_limit::{rate_limit_middleware, RateLimiter, SlidingWindowLimiter};
pub use response::{ApiResponse, ApiResult};
pub use sanitize::sanitize_query_middleware;
pub use validate_id::validate_id_middleware;

use axum::extract::ConnectInfo;
use axum::http::Request;
use std::net::SocketAddr;

/// Best-effort client address: forwarded headers (when trusted), then the socket peer.
pub fn client_ip<B>(request: &Request<B>, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let headers = request.headers();
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded.or(real_ip) {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
