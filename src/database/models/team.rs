use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub id: i64,
    pub user_id: i64,
    #[sqlx(rename = "sleeper_id")]
    pub external_id: String,
    pub league_id: String,
    pub name: String,
    pub owner: String,
    pub is_dynasty: bool,
    /// League settings as mirrored from the external platform; opaque here.
    #[schema(value_type = Object)]
    pub settings: Value,
    /// Roster as mirrored from the external platform; opaque here.
    #[schema(value_type = Object)]
    pub roster: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new team row. `(external_id, league_id)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewTeam {
    pub user_id: i64,
    pub external_id: String,
    pub league_id: String,
    pub name: String,
    pub owner: String,
    pub is_dynasty: bool,
    #[schema(value_type = Object)]
    pub settings: Value,
    #[schema(value_type = Object)]
    pub roster: Value,
}
