//! OpenAPI document for every route, served at `GET /openapi.json`.

use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::database::{NewTeam, Player, PlayerStats, Team, User};
use crate::error::ErrorBody;
use crate::handlers::{health, protected, public};
use crate::services::{PlayerProjection, PlayerRecommendation, TeamRecommendation};

#[derive(OpenApi)]
#[openapi(
    info(title = "Sleepr API", description = "Fantasy football users, teams, players and analytics"),
    paths(
        health::health,
        public::auth::login_post,
        public::analytics::waiver_wire_get,
        protected::auth::refresh_post,
        protected::users::users_get,
        protected::users::user_post,
        protected::users::user_get,
        protected::teams::teams_get,
        protected::teams::team_post,
        protected::teams::team_get,
        protected::teams::team_sync_post,
        protected::players::players_get,
        protected::players::player_get,
        protected::players::player_stats_get,
        protected::analytics::team_recommendations_get,
        protected::analytics::player_projection_get,
        protected::analytics::waiver_wire_get,
    ),
    components(schemas(
        ErrorBody,
        User,
        Team,
        NewTeam,
        Player,
        PlayerStats,
        TeamRecommendation,
        PlayerRecommendation,
        PlayerProjection,
        health::HealthResponse,
        public::auth::LoginRequest,
        public::auth::LoginResponse,
        protected::auth::RefreshResponse,
        protected::users::CreateUserRequest,
        protected::teams::CreateTeamRequest,
        protected::teams::SyncResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Login and token refresh"),
        (name = "users", description = "User accounts"),
        (name = "teams", description = "Fantasy teams"),
        (name = "players", description = "Players and weekly stats"),
        (name = "analytics", description = "Recommendations and projections"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
