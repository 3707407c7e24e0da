//! Team management handlers.

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{database::Database, errors::AppError, models::Team};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, message = "Team name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: String,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: String,
    pub coach: Option<String>,
    pub logo_url: Option<String>,
}

#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Team with the same name already exists in this city")
    )
)]
/// Create a new team. Teams are unique by (name, country, city).
pub async fn create_team(
    Extension(db): Extension<Database>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>), AppError> {
    req.validate()?;

    let team = db
        .create_team(
            &req.name,
            &req.country,
            &req.city,
            req.coach.as_deref(),
            req.logo_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(team)))
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ListTeamsQuery {
    /// Exact-match country filter
    pub country: Option<String>,
    /// Exact-match city filter
    pub city: Option<String>,
}

#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    params(ListTeamsQuery),
    responses(
        (status = 200, description = "Teams ordered by name", body = Vec<Team>)
    )
)]
/// List teams, optionally filtered by country and city.
pub async fn list_teams(
    Extension(db): Extension<Database>,
    Query(query): Query<ListTeamsQuery>,
) -> Result<Json<Vec<Team>>, AppError> {
    let teams = db
        .list_teams(query.country.as_deref(), query.city.as_deref())
        .await?;
    Ok(Json(teams))
}
