use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{DatabaseError, Player, PlayerStats};

/// Read-only player access; rows are loaded by the data pipeline, not the API.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Active players ordered by fantasy points, best first.
    async fn list_active(&self) -> Result<Vec<Player>, DatabaseError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Player>, DatabaseError>;
    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<Player>, DatabaseError>;
    /// Weekly lines, most recent season and week first.
    async fn stats(&self, player_id: i64) -> Result<Vec<PlayerStats>, DatabaseError>;
}

const PLAYER_COLUMNS: &str = "id, sleeper_id, name, position, team, age, years_exp,
    fantasy_points, is_active, created_at, updated_at";

pub struct PgPlayerService {
    pool: PgPool,
}

impl PgPlayerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStore for PgPlayerService {
    async fn list_active(&self) -> Result<Vec<Player>, DatabaseError> {
        let query = format!(
            "SELECT {PLAYER_COLUMNS} FROM players
             WHERE is_active = true
             ORDER BY fantasy_points DESC"
        );
        let players = sqlx::query_as::<_, Player>(&query).fetch_all(&self.pool).await?;
        Ok(players)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Player>, DatabaseError> {
        let query = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1");
        let player = sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(player)
    }

    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<Player>, DatabaseError> {
        let query = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE sleeper_id = $1");
        let player = sqlx::query_as::<_, Player>(&query)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(player)
    }

    async fn stats(&self, player_id: i64) -> Result<Vec<PlayerStats>, DatabaseError> {
        let stats = sqlx::query_as::<_, PlayerStats>(
            "SELECT id, player_id, week, season, fantasy_points, passing_yards,
                    passing_tds, rushing_yards, rushing_tds, receiving_yards,
                    receiving_tds, receptions
             FROM player_stats
             WHERE player_id = $1
             ORDER BY season DESC, week DESC",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }
}
