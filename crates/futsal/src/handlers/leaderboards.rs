//! Leaderboard handlers.
//!
//! Each handler resolves the geographic scope to an identity set, runs the
//! pure aggregation pipeline over the match corpus, and enriches the
//! surviving rows with entity details. A scope filter matching nothing
//! short-circuits to an empty list; rows whose enrichment lookup fails are
//! silently excluded rather than failing the request.

use std::collections::{HashMap, HashSet};

use axum::{Extension, extract::Query, response::Json};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    database::Database,
    errors::AppError,
    leaderboard,
    models::{PlayerLeaderboardEntry, PlayerStat, Scope, TeamLeaderboardEntry, TeamStat},
};

/// Default number of leaderboard rows returned.
pub const DEFAULT_LIMIT: usize = 20;

/// Returns the default leaderboard row limit.
pub fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct TeamLeaderboardQuery {
    #[serde(default)]
    pub scope: Scope,
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub stat: TeamStat,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Get the ranked team leaderboard.
#[utoipa::path(
    get,
    path = "/leaderboard/teams",
    tag = "leaderboards",
    params(TeamLeaderboardQuery),
    responses(
        (status = 200, description = "Teams ranked by the requested statistic", body = Vec<TeamLeaderboardEntry>)
    )
)]
pub async fn team_leaderboard(
    Extension(db): Extension<Database>,
    Query(query): Query<TeamLeaderboardQuery>,
) -> Result<Json<Vec<TeamLeaderboardEntry>>, AppError> {
    // Resolve the candidate team set. City scope narrows by both fields,
    // country scope by country alone.
    let scope_ids = match query.scope {
        Scope::Global => None,
        Scope::Country => Some(
            db.team_ids_in_scope(query.country.as_deref(), None)
                .await?,
        ),
        Scope::City => Some(
            db.team_ids_in_scope(query.country.as_deref(), query.city.as_deref())
                .await?,
        ),
    };
    if let Some(ids) = &scope_ids {
        if ids.is_empty() {
            return Ok(Json(Vec::new()));
        }
    }

    let matches = db.list_matches(scope_ids.as_deref()).await?;
    let ranked = leaderboard::rank_teams(&matches, query.stat, query.limit);

    let ids: Vec<Uuid> = ranked.iter().map(|t| t.team_id).collect();
    let teams: HashMap<Uuid, _> = db
        .teams_by_ids(&ids)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let entries = ranked
        .into_iter()
        .filter_map(|totals| {
            teams.get(&totals.team_id).map(|team| TeamLeaderboardEntry {
                team_id: team.id,
                team_name: team.name.clone(),
                country: team.country.clone(),
                city: team.city.clone(),
                goals: totals.goals,
                wins: totals.wins,
                points: totals.points(),
            })
        })
        .collect();

    Ok(Json(entries))
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PlayerLeaderboardQuery {
    #[serde(default)]
    pub scope: Scope,
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub stat: PlayerStat,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Get the ranked player leaderboard.
#[utoipa::path(
    get,
    path = "/leaderboard/players",
    tag = "leaderboards",
    params(PlayerLeaderboardQuery),
    responses(
        (status = 200, description = "Players ranked by the requested statistic", body = Vec<PlayerLeaderboardEntry>)
    )
)]
pub async fn player_leaderboard(
    Extension(db): Extension<Database>,
    Query(query): Query<PlayerLeaderboardQuery>,
) -> Result<Json<Vec<PlayerLeaderboardEntry>>, AppError> {
    // Player boards never pre-filter the match corpus; the scope resolves to
    // a player identity set applied to the grouped rows.
    let scope_ids: Option<HashSet<Uuid>> = match query.scope {
        Scope::Global => None,
        Scope::Country => match query.country.as_deref() {
            Some(country) => Some(
                db.player_ids_in_scope(Some(country), None)
                    .await?
                    .into_iter()
                    .collect(),
            ),
            None => None,
        },
        Scope::City => match query.city.as_deref() {
            Some(city) => Some(
                db.player_ids_in_scope(None, Some(city))
                    .await?
                    .into_iter()
                    .collect(),
            ),
            None => None,
        },
    };
    if let Some(ids) = &scope_ids {
        if ids.is_empty() {
            return Ok(Json(Vec::new()));
        }
    }

    let matches = db.list_matches(None).await?;
    let ranked = leaderboard::rank_players(&matches, query.stat, scope_ids.as_ref(), query.limit);

    let ids: Vec<Uuid> = ranked.iter().map(|r| r.player_id).collect();
    let players: HashMap<Uuid, _> = db
        .players_with_team_by_ids(&ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let entries = ranked
        .into_iter()
        .filter_map(|row| {
            players.get(&row.player_id).map(|player| PlayerLeaderboardEntry {
                player_id: player.id,
                player_name: player.name.clone(),
                team_name: player.team_name.clone(),
                count: row.count,
                country: player.country.clone(),
                city: player.city.clone(),
            })
        })
        .collect();

    Ok(Json(entries))
}
