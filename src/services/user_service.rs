use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{DatabaseError, NewUser, User};

/// User persistence. `external_id` is the unique upsert key.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, DatabaseError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;
    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<User>, DatabaseError>;
    /// All users, newest first.
    async fn list(&self) -> Result<Vec<User>, DatabaseError>;
}

const USER_COLUMNS: &str = "id, sleeper_id, username, display_name, email, created_at, updated_at";

pub struct PgUserService {
    pool: PgPool,
}

impl PgUserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserService {
    async fn create(&self, user: &NewUser) -> Result<User, DatabaseError> {
        let query = format!(
            "INSERT INTO users (sleeper_id, username, display_name, email)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );

        let created = sqlx::query_as::<_, User>(&query)
            .bind(&user.external_id)
            .bind(&user.username)
            .bind(&user.display_name)
            .bind(&user.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, "User"))?;

        tracing::info!(user_id = created.id, external_id = %created.external_id, "Created user");
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE sleeper_id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let users = sqlx::query_as::<_, User>(&query).fetch_all(&self.pool).await?;
        Ok(users)
    }
}
