pub mod database;
pub mod errors;
pub mod handlers;
pub mod leaderboard;
pub mod models;
pub mod query_builder;
pub mod request_id;
pub mod scoring;

use axum::{
    Extension, Router, middleware,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    database::Database,
    handlers::{
        add_event, create_player, create_team, end_match, get_formation, get_match, get_stats,
        health_check, list_players, list_teams, player_leaderboard, save_formation, start_match,
        team_leaderboard,
    },
    request_id::request_id_middleware,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::stats::health_check,
        handlers::stats::get_stats,
        handlers::teams::create_team,
        handlers::teams::list_teams,
        handlers::players::create_player,
        handlers::players::list_players,
        handlers::matches::start_match,
        handlers::matches::add_event,
        handlers::matches::end_match,
        handlers::matches::get_match,
        handlers::formations::save_formation,
        handlers::formations::get_formation,
        handlers::leaderboards::team_leaderboard,
        handlers::leaderboards::player_leaderboard,
    ),
    components(schemas(
        models::Team,
        models::Player,
        models::Position,
        models::Match,
        models::MatchEvent,
        models::EventType,
        models::FormationSlot,
        models::Scope,
        models::TeamStat,
        models::PlayerStat,
        models::TeamLeaderboardEntry,
        models::PlayerLeaderboardEntry,
        models::Stats,
        handlers::teams::CreateTeamRequest,
        handlers::players::CreatePlayerRequest,
        handlers::matches::StartMatchRequest,
        handlers::matches::AddEventRequest,
        handlers::formations::SaveFormationRequest,
        handlers::formations::FormationResponse,
    )),
    tags(
        (name = "teams", description = "Team management"),
        (name = "players", description = "Player management"),
        (name = "matches", description = "Match lifecycle and events"),
        (name = "formations", description = "Per-team formations"),
        (name = "leaderboards", description = "Ranked statistics"),
        (name = "stats", description = "Health and platform statistics"),
    )
)]
struct ApiDoc;

pub fn create_router(pool: PgPool) -> Router {
    let db = Database::new(pool);

    // The API is consumed by a separate frontend; CORS stays permissive.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        // Team routes
        .route("/teams", get(list_teams).post(create_team))
        // Player routes
        .route("/players", get(list_players).post(create_player))
        // Match routes
        .route("/matches/start", post(start_match))
        .route("/matches/{id}", get(get_match))
        .route("/matches/{id}/event", post(add_event))
        .route("/matches/{id}/end", post(end_match))
        // Formation routes
        .route("/formations", post(save_formation))
        .route("/formations/{team_id}", get(get_formation))
        // Leaderboards
        .route("/leaderboard/teams", get(team_leaderboard))
        .route("/leaderboard/players", get(player_leaderboard))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(Extension(db))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

pub async fn run_server(pool: PgPool, port: u16) -> anyhow::Result<()> {
    let app = create_router(pool);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    println!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
