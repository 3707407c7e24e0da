//! Formation handlers.
//!
//! Each team has at most one stored formation; saving replaces it in place.
//! A team without a stored formation reads back as an implicit empty
//! default rather than a 404.

use axum::{
    Extension,
    extract::Path,
    response::Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    database::Database,
    errors::AppError,
    models::{Formation, FormationSlot},
};

fn default_formation_name() -> String {
    "Default".to_string()
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SaveFormationRequest {
    pub team_id: Uuid,
    /// Formation name, e.g. "2-2" or "3-1".
    #[serde(default = "default_formation_name")]
    pub name: String,
    #[validate(nested)]
    pub positions: Vec<FormationSlot>,
}

/// Stored formation, or the implicit default for teams that never saved one
/// (no row identity, no timestamp).
#[derive(Debug, Serialize, ToSchema)]
pub struct FormationResponse {
    pub id: Option<Uuid>,
    pub team_id: Uuid,
    pub name: String,
    pub positions: Vec<FormationSlot>,
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Formation> for FormationResponse {
    fn from(f: Formation) -> Self {
        Self {
            id: Some(f.id),
            team_id: f.team_id,
            name: f.name,
            positions: f.positions,
            updated_at: Some(f.updated_at),
        }
    }
}

impl FormationResponse {
    fn default_for(team_id: Uuid) -> Self {
        Self {
            id: None,
            team_id,
            name: default_formation_name(),
            positions: Vec::new(),
            updated_at: None,
        }
    }
}

#[utoipa::path(
    post,
    path = "/formations",
    tag = "formations",
    request_body = SaveFormationRequest,
    responses(
        (status = 200, description = "Upserted formation", body = FormationResponse),
        (status = 400, description = "Coordinates outside the 0-100 board"),
        (status = 404, description = "Team not found")
    )
)]
/// Save a team's formation, replacing any previously stored one.
pub async fn save_formation(
    Extension(db): Extension<Database>,
    Json(req): Json<SaveFormationRequest>,
) -> Result<Json<FormationResponse>, AppError> {
    req.validate()?;

    db.get_team(req.team_id).await?.ok_or(AppError::NotFound)?;

    let formation = db
        .upsert_formation(req.team_id, &req.name, &req.positions)
        .await?;

    Ok(Json(formation.into()))
}

#[utoipa::path(
    get,
    path = "/formations/{team_id}",
    tag = "formations",
    params(
        ("team_id" = Uuid, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Stored formation or the implicit empty default", body = FormationResponse)
    )
)]
/// Get a team's formation.
pub async fn get_formation(
    Extension(db): Extension<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<FormationResponse>, AppError> {
    let response = match db.get_formation(team_id).await? {
        Some(formation) => formation.into(),
        None => FormationResponse::default_for(team_id),
    };
    Ok(Json(response))
}
