use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub city: String,
    pub coach: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Primary playing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "player_position", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Gk,
    Def,
    Mid,
    Fwd,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub position: Position,
    /// None for free agents.
    pub team_id: Option<Uuid>,
    pub number: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    Assist,
    Yellow,
    Red,
    OwnGoal,
    Substitution,
}

/// A single in-match event, embedded in chronological insertion order inside
/// a match's JSONB event list. Not independently addressable.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchEvent {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub team_id: Option<Uuid>,
    /// Primary player involved (e.g. the goal scorer).
    pub player_id: Option<Uuid>,
    /// Secondary player involved (e.g. the assister on a goal).
    pub secondary_player_id: Option<Uuid>,
    pub minute: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Match {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub started_at: OffsetDateTime,
    /// None while the match is in progress.
    pub ended_at: Option<OffsetDateTime>,
    #[sqlx(json)]
    pub events: Vec<MatchEvent>,
    pub home_score: i32,
    pub away_score: i32,
    /// None until ended, and None after ending on equal scores (a draw).
    pub winner_team_id: Option<Uuid>,
}

/// One player placement on the formation board, as percentage coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, validator::Validate)]
pub struct FormationSlot {
    pub player_id: Uuid,
    #[validate(range(min = 0.0, max = 100.0))]
    pub x: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub y: f64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Formation {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    #[sqlx(json)]
    pub positions: Vec<FormationSlot>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Geographic restriction applied to a leaderboard query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Global,
    Country,
    City,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TeamStat {
    #[default]
    Goals,
    Wins,
    Points,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStat {
    #[default]
    Goals,
    Assists,
    Yellow,
    Red,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeamLeaderboardEntry {
    pub team_id: Uuid,
    pub team_name: String,
    pub country: String,
    pub city: String,
    pub goals: i64,
    pub wins: i64,
    pub points: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerLeaderboardEntry {
    pub player_id: Uuid,
    pub player_name: String,
    /// Current team assignment, looked up live at query time.
    pub team_name: Option<String>,
    pub count: i64,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Enrichment row for player leaderboards: player identity plus the live
/// team name from a join against teams.
#[derive(Debug, FromRow)]
pub struct PlayerRef {
    pub id: Uuid,
    pub name: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub team_name: Option<String>,
}

/// Platform-wide counters for the stats endpoint.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Stats {
    pub teams: i64,
    pub players: i64,
    pub matches: i64,
}
