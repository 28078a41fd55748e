use std::time::Duration;

use axum::{extract::Request, http::header, response::Response};
use tracing::Span;

use super::client_ip;

/// Span opened for every request; the completion event is emitted inside it.
pub fn request_span(request: &Request, trust_forwarded_for: bool) -> Span {
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        client_ip = %client_ip(request, trust_forwarded_for),
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
        user_agent = %user_agent,
    )
}

pub fn log_response(response: &Response, latency: Duration, span: &Span) {
    tracing::info!(
        parent: span,
        status = response.status().as_u16(),
        latency_ms = latency.as_secs_f64() * 1000.0,
        "request completed"
    );
}
