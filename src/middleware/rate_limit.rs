use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;

use super::client_ip;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::AppState;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one request for `key`; false when it falls over the limit.
    async fn check(&self, key: &str) -> bool;

    /// Drop keys with no requests inside the current window.
    async fn prune_idle(&self) {}
}

/// Per-key sliding window of request instants.
///
/// Prune, check and append happen under one lock so concurrent requests for the
/// same key cannot both take the last slot.
pub struct SlidingWindowLimiter {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
    limit: usize,
    window: Duration,
}

impl SlidingWindowLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limit,
            window,
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(api.rate_limit_requests as usize, Duration::from_secs(api.rate_limit_window_secs))
    }

    pub async fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().await;
        let hits = windows.entry(key.to_string()).or_default();

        while let Some(oldest) = hits.front() {
            if now.saturating_duration_since(*oldest) >= self.window {
                hits.pop_front();
            } else {
                break;
            }
        }

        if hits.len() >= self.limit {
            return false;
        }

        hits.push_back(now);
        true
    }

    pub async fn prune_idle_at(&self, now: Instant) -> usize {
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, hits| {
            hits.back()
                .map(|last| now.saturating_duration_since(*last) < self.window)
                .unwrap_or(false)
        });
        before - windows.len()
    }

    pub async fn tracked_keys(&self) -> usize {
        self.windows.lock().await.len()
    }
}

#[async_trait]
impl RateLimiter for SlidingWindowLimiter {
    async fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now()).await
    }

    async fn prune_idle(&self) {
        let removed = self.prune_idle_at(Instant::now()).await;
        if removed > 0 {
            tracing::debug!(removed, "Pruned idle rate limit keys");
        }
    }
}

pub async fn rate_limit_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.config.api.enable_rate_limiting {
        return next.run(request).await;
    }

    let key = client_ip(&request, state.config.api.trust_forwarded_for);
    if !state.rate_limiter.check(&key).await {
        tracing::warn!(client_ip = %key, "Rate limit exceeded");
        return ApiError::too_many_requests("Rate limit exceeded").into_response();
    }

    next.run(request).await
}
