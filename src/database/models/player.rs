use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub id: i64,
    #[sqlx(rename = "sleeper_id")]
    pub external_id: String,
    pub name: String,
    pub position: String,
    /// NFL team abbreviation, empty for free agents
    pub team: String,
    pub age: i32,
    pub years_exp: i32,
    pub fantasy_points: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One player's statistical line for a single week of a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlayerStats {
    pub id: i64,
    pub player_id: i64,
    pub week: i32,
    pub season: i32,
    pub fantasy_points: f64,
    pub passing_yards: i32,
    pub passing_tds: i32,
    pub rushing_yards: i32,
    pub rushing_tds: i32,
    pub receiving_yards: i32,
    pub receiving_tds: i32,
    pub receptions: i32,
}
