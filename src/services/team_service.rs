use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{DatabaseError, NewTeam, Team};

#[async_trait]
pub trait TeamStore: Send + Sync {
    /// All teams, newest first.
    async fn list(&self) -> Result<Vec<Team>, DatabaseError>;
    /// Teams owned by one user, newest first.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Team>, DatabaseError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Team>, DatabaseError>;
    /// A team is identified externally by its platform id within one league.
    async fn get_by_external_id(&self, external_id: &str, league_id: &str) -> Result<Option<Team>, DatabaseError>;
    async fn create(&self, team: &NewTeam) -> Result<Team, DatabaseError>;
}

const TEAM_COLUMNS: &str = "id, user_id, sleeper_id, league_id, name, owner, is_dynasty,
    settings, roster, created_at, updated_at";

pub struct PgTeamService {
    pool: PgPool,
}

impl PgTeamService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamStore for PgTeamService {
    async fn list(&self) -> Result<Vec<Team>, DatabaseError> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY created_at DESC");
        let teams = sqlx::query_as::<_, Team>(&query).fetch_all(&self.pool).await?;
        Ok(teams)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Team>, DatabaseError> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE user_id = $1 ORDER BY created_at DESC");
        let teams = sqlx::query_as::<_, Team>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(teams)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Team>, DatabaseError> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1");
        let team = sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(team)
    }

    async fn get_by_external_id(&self, external_id: &str, league_id: &str) -> Result<Option<Team>, DatabaseError> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE sleeper_id = $1 AND league_id = $2");
        let team = sqlx::query_as::<_, Team>(&query)
            .bind(external_id)
            .bind(league_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(team)
    }

    async fn create(&self, team: &NewTeam) -> Result<Team, DatabaseError> {
        let query = format!(
            "INSERT INTO teams (user_id, sleeper_id, league_id, name, owner, is_dynasty, settings, roster)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {TEAM_COLUMNS}"
        );

        let created = sqlx::query_as::<_, Team>(&query)
            .bind(team.user_id)
            .bind(&team.external_id)
            .bind(&team.league_id)
            .bind(&team.name)
            .bind(&team.owner)
            .bind(team.is_dynasty)
            .bind(&team.settings)
            .bind(&team.roster)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, "Team"))?;

        tracing::info!(team_id = created.id, user_id = created.user_id, league_id = %created.league_id, "Created team");
        Ok(created)
    }
}
