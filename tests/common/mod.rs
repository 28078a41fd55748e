#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;

use sleepr_api::auth::TokenIssuer;
use sleepr_api::config::AppConfig;
use sleepr_api::database::{DatabaseError, NewTeam, NewUser, Player, PlayerStats, Team, User};
use sleepr_api::middleware::SlidingWindowLimiter;
use sleepr_api::services::{PlayerStore, SleeperSync, StaticRecommendationEngine, TeamStore, UserStore};
use sleepr_api::{build_app, AppState};

pub const JWT_SECRET: &str = "test-secret-key-for-middleware-testing";

// In-memory stores

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl MemoryUsers {
    pub async fn count(&self) -> usize {
        self.rows.lock().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn create(&self, user: &NewUser) -> Result<User, DatabaseError> {
        let mut rows = self.rows.lock().await;
        if rows.iter().any(|u| u.external_id == user.external_id) {
            return Err(DatabaseError::Conflict("User already exists".to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: rows.len() as i64 + 1,
            external_id: user.external_id.clone(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.rows.lock().await.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.rows.lock().await.iter().find(|u| u.external_id == external_id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        let mut users = self.rows.lock().await.clone();
        users.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(users)
    }
}

/// Loses the first lookup race: another writer inserts the same user between
/// the caller's read and its insert.
pub struct ContendedUsers {
    pub inner: MemoryUsers,
    rival: std::sync::Mutex<Option<NewUser>>,
}

impl ContendedUsers {
    pub fn new(rival: NewUser) -> Self {
        Self {
            inner: MemoryUsers::default(),
            rival: std::sync::Mutex::new(Some(rival)),
        }
    }
}

#[async_trait]
impl UserStore for ContendedUsers {
    async fn create(&self, user: &NewUser) -> Result<User, DatabaseError> {
        self.inner.create(user).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        self.inner.get_by_id(id).await
    }

    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<User>, DatabaseError> {
        let rival = self.rival.lock().expect("rival lock").take();
        if let Some(rival) = rival {
            self.inner.create(&rival).await?;
            return Ok(None);
        }
        self.inner.get_by_external_id(external_id).await
    }

    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        self.inner.list().await
    }
}

#[derive(Default)]
pub struct MemoryTeams {
    rows: Mutex<Vec<Team>>,
}

impl MemoryTeams {
    pub fn with_rows(rows: Vec<Team>) -> Self {
        Self { rows: Mutex::new(rows) }
    }
}

#[async_trait]
impl TeamStore for MemoryTeams {
    async fn list(&self) -> Result<Vec<Team>, DatabaseError> {
        let mut teams = self.rows.lock().await.clone();
        teams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(teams)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Team>, DatabaseError> {
        Ok(self.list().await?.into_iter().filter(|t| t.user_id == user_id).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Team>, DatabaseError> {
        Ok(self.rows.lock().await.iter().find(|t| t.id == id).cloned())
    }

    async fn get_by_external_id(&self, external_id: &str, league_id: &str) -> Result<Option<Team>, DatabaseError> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .find(|t| t.external_id == external_id && t.league_id == league_id)
            .cloned())
    }

    async fn create(&self, team: &NewTeam) -> Result<Team, DatabaseError> {
        let mut rows = self.rows.lock().await;
        if rows
            .iter()
            .any(|t| t.external_id == team.external_id && t.league_id == team.league_id)
        {
            return Err(DatabaseError::Conflict("Team already exists".to_string()));
        }

        let now = Utc::now();
        let created = Team {
            id: rows.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            user_id: team.user_id,
            external_id: team.external_id.clone(),
            league_id: team.league_id.clone(),
            name: team.name.clone(),
            owner: team.owner.clone(),
            is_dynasty: team.is_dynasty,
            settings: team.settings.clone(),
            roster: team.roster.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct MemoryPlayers {
    pub rows: Vec<Player>,
    pub stats: Vec<PlayerStats>,
}

#[async_trait]
impl PlayerStore for MemoryPlayers {
    async fn list_active(&self) -> Result<Vec<Player>, DatabaseError> {
        let mut players: Vec<Player> = self.rows.iter().filter(|p| p.is_active).cloned().collect();
        players.sort_by(|a, b| b.fantasy_points.total_cmp(&a.fantasy_points));
        Ok(players)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Player>, DatabaseError> {
        Ok(self.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn get_by_external_id(&self, external_id: &str) -> Result<Option<Player>, DatabaseError> {
        Ok(self.rows.iter().find(|p| p.external_id == external_id).cloned())
    }

    async fn stats(&self, player_id: i64) -> Result<Vec<PlayerStats>, DatabaseError> {
        let mut stats: Vec<PlayerStats> = self
            .stats
            .iter()
            .filter(|s| s.player_id == player_id)
            .cloned()
            .collect();
        stats.sort_by(|a, b| (b.season, b.week).cmp(&(a.season, a.week)));
        Ok(stats)
    }
}

// Fixtures

pub fn team(id: i64, user_id: i64, name: &str, age_minutes: i64) -> Team {
    let created = Utc::now() - chrono::Duration::minutes(age_minutes);
    Team {
        id,
        user_id,
        external_id: format!("sl-team-{id}"),
        league_id: "league-1".to_string(),
        name: name.to_string(),
        owner: format!("owner-{user_id}"),
        is_dynasty: false,
        settings: json!({}),
        roster: json!([]),
        created_at: created,
        updated_at: created,
    }
}

pub fn player(id: i64, name: &str, points: f64, is_active: bool) -> Player {
    let now = Utc::now();
    Player {
        id,
        external_id: format!("sl-player-{id}"),
        name: name.to_string(),
        position: "RB".to_string(),
        team: "KC".to_string(),
        age: 25,
        years_exp: 3,
        fantasy_points: points,
        is_active,
        created_at: now,
        updated_at: now,
    }
}

pub fn stat(id: i64, player_id: i64, season: i32, week: i32) -> PlayerStats {
    PlayerStats {
        id,
        player_id,
        week,
        season,
        fantasy_points: 10.0,
        passing_yards: 0,
        passing_tds: 0,
        rushing_yards: 80,
        rushing_tds: 1,
        receiving_yards: 20,
        receiving_tds: 0,
        receptions: 3,
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("JWT_SECRET".into(), JWT_SECRET.into());
    vars.insert("API_TRUST_FORWARDED_FOR".into(), "true".into());
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUsers>,
    pub tokens: TokenIssuer,
}

pub fn test_app() -> TestApp {
    test_app_with(test_config(&[]), MemoryTeams::default(), MemoryPlayers::default())
}

pub fn test_app_with(config: AppConfig, teams: MemoryTeams, players: MemoryPlayers) -> TestApp {
    let users = Arc::new(MemoryUsers::default());
    let router = router_with(config.clone(), users.clone(), teams, players);
    TestApp {
        router,
        users,
        tokens: TokenIssuer::from_config(&config.security),
    }
}

/// Router over any user store, for tests that need to control store behaviour.
pub fn router_with(config: AppConfig, users: Arc<dyn UserStore>, teams: MemoryTeams, players: MemoryPlayers) -> Router {
    let state = AppState {
        tokens: TokenIssuer::from_config(&config.security),
        users,
        teams: Arc::new(teams),
        players: Arc::new(players),
        recommendations: Arc::new(StaticRecommendationEngine),
        sync: Arc::new(SleeperSync::new(config.external.sleeper_api_url.clone())),
        rate_limiter: Arc::new(SlidingWindowLimiter::from_config(&config.api)),
        config: Arc::new(config),
    };

    build_app(state)
}

impl TestApp {
    pub fn bearer(&self, user_id: i64, username: &str) -> String {
        format!("Bearer {}", self.tokens.issue(user_id, username).expect("token"))
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<(StatusCode, HeaderMap, Value)> {
        send(self.router.clone(), method, uri, headers, body).await
    }
}

/// Drive one request through the router. Empty bodies decode to `Value::Null`.
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> Result<(StatusCode, HeaderMap, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }

    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json)?)
        }
        None => Body::empty(),
    };

    let mut request = builder.body(body)?;
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));

    let response = router.oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, headers, json))
}
