//! Store tests against a live Postgres. Run with
//! `DATABASE_URL=postgres://... cargo test --test 60_postgres -- --ignored`.

mod common;

use std::collections::HashMap;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

use sleepr_api::config::AppConfig;
use sleepr_api::database::{DatabaseError, DatabaseManager, NewTeam, NewUser};
use sleepr_api::services::{PgPlayerService, PgTeamService, PgUserService, PlayerStore, TeamStore, UserStore};
use sleepr_api::{build_app, AppState};

fn pg_config() -> Option<AppConfig> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let vars: HashMap<&str, String> = HashMap::from([
        ("DATABASE_URL", url),
        ("JWT_SECRET", common::JWT_SECRET.to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).ok()
}

async fn pool(config: &AppConfig) -> Result<PgPool> {
    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::apply_schema(&pool).await?;
    Ok(pool)
}

/// Suffix that keeps rows from separate runs apart in a shared database.
fn unique(prefix: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}-{}-{nanos}", std::process::id())
}

fn new_user(external_id: &str) -> NewUser {
    NewUser {
        external_id: external_id.to_string(),
        username: "pg-user".to_string(),
        display_name: "PG User".to_string(),
        email: Some("pg@example.com".to_string()),
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn user_service_round_trips_and_conflicts() -> Result<()> {
    let Some(config) = pg_config() else { return Ok(()) };
    let users = PgUserService::new(pool(&config).await?);
    let external_id = unique("pg-user");

    let created = users.create(&new_user(&external_id)).await?;
    assert!(created.id > 0);
    assert_eq!(created.external_id, external_id);

    assert_eq!(users.get_by_id(created.id).await?, Some(created.clone()));
    assert_eq!(users.get_by_external_id(&external_id).await?, Some(created.clone()));
    assert!(users.get_by_external_id(&unique("pg-missing")).await?.is_none());
    assert!(users.list().await?.iter().any(|u| u.id == created.id));

    let err = users.create(&new_user(&external_id)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn team_service_round_trips_and_rejects_bad_writes() -> Result<()> {
    let Some(config) = pg_config() else { return Ok(()) };
    let pool = pool(&config).await?;
    let owner = PgUserService::new(pool.clone()).create(&new_user(&unique("pg-owner"))).await?;
    let teams = PgTeamService::new(pool);

    let new_team = NewTeam {
        user_id: owner.id,
        external_id: unique("pg-team"),
        league_id: unique("pg-league"),
        name: "Postgres Pirates".to_string(),
        owner: owner.username.clone(),
        is_dynasty: true,
        settings: json!({ "teams": 12 }),
        roster: json!(["p1", "p2"]),
    };
    let created = teams.create(&new_team).await?;
    assert_eq!(created.settings, json!({ "teams": 12 }));
    assert_eq!(created.roster, json!(["p1", "p2"]));

    assert_eq!(teams.get_by_id(created.id).await?, Some(created.clone()));
    assert_eq!(
        teams.get_by_external_id(&new_team.external_id, &new_team.league_id).await?,
        Some(created.clone())
    );
    assert_eq!(teams.list_for_user(owner.id).await?, vec![created.clone()]);
    assert!(teams.list().await?.iter().any(|t| t.id == created.id));

    let err = teams.create(&new_team).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");

    let orphan = NewTeam {
        user_id: i64::MAX,
        external_id: unique("pg-orphan"),
        ..new_team
    };
    let err = teams.create(&orphan).await.unwrap_err();
    assert!(matches!(err, DatabaseError::MissingReference(_)), "{err:?}");
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn player_service_orders_and_filters() -> Result<()> {
    let Some(config) = pg_config() else { return Ok(()) };
    let pool = pool(&config).await?;
    let players = PgPlayerService::new(pool.clone());

    let mut ids = Vec::new();
    for (suffix, points, active) in [("bench", 1.5, true), ("star", 9_999.0, true), ("retired", 10_000.0, false)] {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO players (sleeper_id, name, position, team, fantasy_points, is_active)
             VALUES ($1, $2, 'WR', 'BUF', $3, $4)
             RETURNING id",
        )
        .bind(unique(suffix))
        .bind(suffix)
        .bind(points)
        .bind(active)
        .fetch_one(&pool)
        .await?;
        ids.push(id);
    }
    let (bench, star, retired) = (ids[0], ids[1], ids[2]);

    for (season, week) in [(2023, 17), (2024, 1), (2024, 2)] {
        sqlx::query("INSERT INTO player_stats (player_id, season, week, fantasy_points) VALUES ($1, $2, $3, 12.5)")
            .bind(star)
            .bind(season)
            .bind(week)
            .execute(&pool)
            .await?;
    }

    let active: Vec<i64> = players
        .list_active()
        .await?
        .into_iter()
        .map(|p| p.id)
        .filter(|id| ids.contains(id))
        .collect();
    assert_eq!(active, vec![star, bench]);

    let retired_row = players.get_by_id(retired).await?.expect("retired player");
    assert!(!retired_row.is_active);
    assert_eq!(players.get_by_external_id(&retired_row.external_id).await?, Some(retired_row));

    let weeks: Vec<(i32, i32)> = players.stats(star).await?.iter().map(|s| (s.season, s.week)).collect();
    assert_eq!(weeks, vec![(2024, 2), (2024, 1), (2023, 17)]);
    assert!(players.stats(bench).await?.is_empty());
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn login_against_postgres_is_idempotent() -> Result<()> {
    let Some(config) = pg_config() else { return Ok(()) };
    let pool = pool(&config).await?;
    let router = build_app(AppState::new(config, pool));
    let body = json!({ "username": "pg-login", "external_id": unique("pg-login") });

    let (status, _, first) =
        common::send(router.clone(), Method::POST, "/api/v1/public/auth/login", &[], Some(body.clone())).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _, second) =
        common::send(router, Method::POST, "/api/v1/public/auth/login", &[], Some(body)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["user"]["id"], second["user"]["id"]);
    Ok(())
}
