pub mod analytics_service;
pub mod player_service;
pub mod sync_service;
pub mod team_service;
pub mod user_service;

pub use analytics_service::{
    AnalyticsError, PlayerProjection, PlayerRecommendation, RecommendationEngine, StaticRecommendationEngine,
    TeamRecommendation,
};
pub use player_service::{PgPlayerService, PlayerStore};
pub use sync_service::{ExternalSync, SleeperSync, SyncError};
pub use team_service::{PgTeamService, TeamStore};
pub use user_service::{PgUserService, UserStore};
