//! Player management handlers.

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    database::Database,
    errors::AppError,
    models::{Player, Position},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePlayerRequest {
    #[validate(length(min = 1, message = "Player name cannot be empty"))]
    pub name: String,
    pub position: Position,
    /// Omit for free agents.
    pub team_id: Option<Uuid>,
    /// Jersey number.
    #[validate(range(min = 0, max = 99))]
    pub number: Option<i32>,
    /// Nationality, used for country-scoped player leaderboards.
    pub country: Option<String>,
    /// City for regional player leaderboards, independent of the team's.
    pub city: Option<String>,
    pub avatar_url: Option<String>,
}

#[utoipa::path(
    post,
    path = "/players",
    tag = "players",
    request_body = CreatePlayerRequest,
    responses(
        (status = 201, description = "Player created", body = Player),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced team not found")
    )
)]
/// Create a new player, optionally assigned to a team.
pub async fn create_player(
    Extension(db): Extension<Database>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<Player>), AppError> {
    req.validate()?;

    if let Some(team_id) = req.team_id {
        db.get_team(team_id).await?.ok_or(AppError::NotFound)?;
    }

    let player = db
        .create_player(
            &req.name,
            req.position,
            req.team_id,
            req.number,
            req.country.as_deref(),
            req.city.as_deref(),
            req.avatar_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(player)))
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ListPlayersQuery {
    /// Restrict to one team's roster
    pub team_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/players",
    tag = "players",
    params(ListPlayersQuery),
    responses(
        (status = 200, description = "Players ordered by name", body = Vec<Player>)
    )
)]
/// List players, optionally restricted to one team.
pub async fn list_players(
    Extension(db): Extension<Database>,
    Query(query): Query<ListPlayersQuery>,
) -> Result<Json<Vec<Player>>, AppError> {
    let players = db.list_players(query.team_id).await?;
    Ok(Json(players))
}
