pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware as axum_middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tracing::Span;

use auth::TokenIssuer;
use config::AppConfig;
use handlers::{protected, public};
use middleware::logging;
use middleware::{RateLimiter, SlidingWindowLimiter};
use services::{
    ExternalSync, PgPlayerService, PgTeamService, PgUserService, PlayerStore, RecommendationEngine, SleeperSync,
    StaticRecommendationEngine, TeamStore, UserStore,
};

/// Shared, cheaply clonable state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: TokenIssuer,
    pub users: Arc<dyn UserStore>,
    pub teams: Arc<dyn TeamStore>,
    pub players: Arc<dyn PlayerStore>,
    pub recommendations: Arc<dyn RecommendationEngine>,
    pub sync: Arc<dyn ExternalSync>,
    pub rate_limiter: Arc<dyn RateLimiter>,
}

impl AppState {
    /// Wire the Postgres-backed services and default stubs around one pool.
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            tokens: TokenIssuer::from_config(&config.security),
            users: Arc::new(PgUserService::new(pool.clone())),
            teams: Arc::new(PgTeamService::new(pool.clone())),
            players: Arc::new(PgPlayerService::new(pool)),
            recommendations: Arc::new(StaticRecommendationEngine),
            sync: Arc::new(SleeperSync::new(config.external.sleeper_api_url.clone())),
            rate_limiter: Arc::new(SlidingWindowLimiter::from_config(&config.api)),
            config: Arc::new(config),
        }
    }
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(public::login_post))
        .route("/analytics/waiver-wire", get(public::waiver_wire_get))
        .route_layer(axum_middleware::from_fn(middleware::validate_id_middleware))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    use protected::{analytics, auth, players, teams, users};

    Router::new()
        .route("/auth/refresh", post(auth::refresh_post))
        .route("/users", get(users::users_get).post(users::user_post))
        .route("/users/:id", get(users::user_get))
        .route("/teams", get(teams::teams_get).post(teams::team_post))
        .route("/teams/:id", get(teams::team_get))
        .route("/teams/:id/sync", post(teams::team_sync_post))
        .route("/players", get(players::players_get))
        .route("/players/:id", get(players::player_get))
        .route("/players/:id/stats", get(players::player_stats_get))
        .route("/analytics/teams/:id/recommendations", get(analytics::team_recommendations_get))
        .route("/analytics/players/:id/projection", get(analytics::player_projection_get))
        .route("/analytics/waiver-wire", get(analytics::waiver_wire_get))
        // Last route_layer runs first: IDs are checked before the token.
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::jwt_auth_middleware,
        ))
        .route_layer(axum_middleware::from_fn(middleware::validate_id_middleware))
}

/// Build the full application router (used by main and tests).
///
/// Global layers, outermost first: CORS, request logging, query sanitizer, rate limit.
pub fn build_app(state: AppState) -> Router {
    let trust_forwarded_for = state.config.api.trust_forwarded_for;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(openapi::openapi_json))
        .nest("/api/v1/public", public_routes())
        .nest("/api/v1", protected_routes(&state))
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::sanitize_query_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request| logging::request_span(request, trust_forwarded_for))
                .on_request(())
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    logging::log_response(response, latency, span)
                }),
        )
        .layer(axum_middleware::from_fn_with_state(state.clone(), middleware::cors_middleware))
        .with_state(state)
}
