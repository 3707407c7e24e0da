//! Match lifecycle handlers: start, event append, end, fetch.

use axum::{
    Extension,
    extract::Path,
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    database::Database,
    errors::AppError,
    models::{EventType, Match, MatchEvent},
    scoring,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct StartMatchRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/matches/start",
    tag = "matches",
    request_body = StartMatchRequest,
    responses(
        (status = 201, description = "Match started with zero scores and an empty event log", body = Match),
        (status = 404, description = "Home or away team not found")
    )
)]
/// Start a match between two teams.
pub async fn start_match(
    Extension(db): Extension<Database>,
    Json(req): Json<StartMatchRequest>,
) -> Result<(StatusCode, Json<Match>), AppError> {
    db.get_team(req.home_team_id).await?.ok_or(AppError::NotFound)?;
    db.get_team(req.away_team_id).await?.ok_or(AppError::NotFound)?;

    let m = db.start_match(req.home_team_id, req.away_team_id).await?;
    Ok((StatusCode::CREATED, Json(m)))
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddEventRequest {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub team_id: Option<Uuid>,
    pub player_id: Option<Uuid>,
    pub secondary_player_id: Option<Uuid>,
    /// Minute mark in the match (futsal plays 2x20 plus stoppage).
    #[validate(range(min = 0, max = 60))]
    pub minute: Option<i32>,
    pub notes: Option<String>,
}

#[utoipa::path(
    post,
    path = "/matches/{id}/event",
    tag = "matches",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    request_body = AddEventRequest,
    responses(
        (status = 200, description = "Updated match", body = Match),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Match not found")
    )
)]
/// Record an in-match event.
///
/// Goal and own-goal events move the running score; the event push and the
/// counter increment are applied as a single storage operation. Appends stay
/// allowed after the match has ended, which lets operators record late
/// corrections.
pub async fn add_event(
    Extension(db): Extension<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddEventRequest>,
) -> Result<Json<Match>, AppError> {
    req.validate()?;

    let m = db.get_match(id).await?.ok_or(AppError::NotFound)?;

    let delta = scoring::credit(req.event_type, req.team_id, m.home_team_id, m.away_team_id);
    let event = MatchEvent {
        timestamp: OffsetDateTime::now_utc(),
        event_type: req.event_type,
        team_id: req.team_id,
        player_id: req.player_id,
        secondary_player_id: req.secondary_player_id,
        minute: req.minute,
        notes: req.notes,
    };

    let updated = db
        .append_event(id, &event, delta)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}

#[utoipa::path(
    post,
    path = "/matches/{id}/end",
    tag = "matches",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    responses(
        (status = 200, description = "Ended match with winner computed from final scores", body = Match),
        (status = 404, description = "Match not found")
    )
)]
/// End a match. The winner is decided from the counters at this moment, not
/// recomputed from the event log; equal scores leave the winner unset.
pub async fn end_match(
    Extension(db): Extension<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Match>, AppError> {
    let m = db.get_match(id).await?.ok_or(AppError::NotFound)?;

    let winner = scoring::outcome(m.home_score, m.away_score, m.home_team_id, m.away_team_id);
    let updated = db
        .end_match(id, winner)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}

#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "matches",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    responses(
        (status = 200, description = "Match with its full event log", body = Match),
        (status = 404, description = "Match not found")
    )
)]
/// Get a match by ID.
pub async fn get_match(
    Extension(db): Extension<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Match>, AppError> {
    let m = db.get_match(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(m))
}
