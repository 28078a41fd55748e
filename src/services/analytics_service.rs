use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Improvement suggestion for one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeamRecommendation {
    pub team_id: i64,
    /// "trade", "waiver" or "lineup"
    #[serde(rename = "type")]
    pub kind: String,
    /// "high", "medium" or "low"
    pub priority: String,
    pub description: String,
    pub players: Vec<PlayerRecommendation>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlayerRecommendation {
    pub player_id: i64,
    pub player_name: String,
    /// "add", "drop", "trade", "start" or "bench"
    pub action: String,
    pub reason: String,
    pub projected_pts: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlayerProjection {
    pub player_id: i64,
    pub player_name: String,
    pub week: i32,
    pub projected_pts: f64,
    pub confidence: f64,
    pub ceiling: f64,
    pub floor: f64,
    /// "up", "down" or "stable"
    pub trending: String,
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("analytics backend unavailable: {0}")]
    Unavailable(String),
}

/// Source of recommendations and projections.
#[async_trait]
pub trait RecommendationEngine: Send + Sync {
    async fn team_recommendations(&self, team_id: i64) -> Result<Vec<TeamRecommendation>, AnalyticsError>;
    async fn player_projection(&self, player_id: i64) -> Result<PlayerProjection, AnalyticsError>;
    async fn waiver_wire(&self) -> Result<Vec<PlayerRecommendation>, AnalyticsError>;
}

/// Placeholder engine: fixed values regardless of input.
// TODO: replace with a client for the Python projection service once it exposes an HTTP API.
#[derive(Debug, Default, Clone)]
pub struct StaticRecommendationEngine;

#[async_trait]
impl RecommendationEngine for StaticRecommendationEngine {
    async fn team_recommendations(&self, team_id: i64) -> Result<Vec<TeamRecommendation>, AnalyticsError> {
        Ok(vec![TeamRecommendation {
            team_id,
            kind: "waiver".to_string(),
            priority: "high".to_string(),
            description: "Consider picking up emerging RB handcuffs".to_string(),
            players: vec![PlayerRecommendation {
                player_id: 123,
                player_name: "Sample Player".to_string(),
                action: "add".to_string(),
                reason: "High upside handcuff with injury-prone starter".to_string(),
                projected_pts: 8.5,
            }],
            confidence: 0.85,
        }])
    }

    async fn player_projection(&self, player_id: i64) -> Result<PlayerProjection, AnalyticsError> {
        Ok(PlayerProjection {
            player_id,
            player_name: "Sample Player".to_string(),
            week: 1,
            projected_pts: 15.2,
            confidence: 0.78,
            ceiling: 22.5,
            floor: 8.1,
            trending: "up".to_string(),
        })
    }

    async fn waiver_wire(&self) -> Result<Vec<PlayerRecommendation>, AnalyticsError> {
        Ok(vec![
            PlayerRecommendation {
                player_id: 456,
                player_name: "Breakout Candidate".to_string(),
                action: "add".to_string(),
                reason: "Increasing snap count and target share".to_string(),
                projected_pts: 12.3,
            },
            PlayerRecommendation {
                player_id: 789,
                player_name: "Handcuff RB".to_string(),
                action: "add".to_string(),
                reason: "Starter dealing with injury concerns".to_string(),
                projected_pts: 8.7,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn team_recommendations_echo_the_team_id() {
        let recs = StaticRecommendationEngine.team_recommendations(42).await.unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].team_id, 42);
        assert_eq!(recs[0].players[0].player_name, "Sample Player");
    }

    #[tokio::test]
    async fn projection_bounds_bracket_the_estimate() {
        let p = StaticRecommendationEngine.player_projection(7).await.unwrap();
        assert_eq!(p.player_id, 7);
        assert!(p.floor <= p.projected_pts && p.projected_pts <= p.ceiling);
    }

    #[test]
    fn recommendation_kind_serializes_as_type() {
        let rec = TeamRecommendation {
            team_id: 1,
            kind: "trade".into(),
            priority: "low".into(),
            description: String::new(),
            players: vec![],
            confidence: 0.5,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "trade");
        assert!(json.get("kind").is_none());
    }
}
