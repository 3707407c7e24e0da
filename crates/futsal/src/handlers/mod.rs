//! HTTP request handlers for the futsal leaderboard API.
//!
//! This module re-exports handlers from focused submodules organized by domain.

pub mod formations;
pub mod leaderboards;
pub mod matches;
pub mod players;
pub mod stats;
pub mod teams;

// Re-export handlers from submodules (including utoipa __path types for OpenAPI)
pub use formations::{
    __path_get_formation, __path_save_formation, FormationResponse, SaveFormationRequest,
    get_formation, save_formation,
};
pub use leaderboards::{
    __path_player_leaderboard, __path_team_leaderboard, PlayerLeaderboardQuery,
    TeamLeaderboardQuery, player_leaderboard, team_leaderboard,
};
pub use matches::{
    __path_add_event, __path_end_match, __path_get_match, __path_start_match, AddEventRequest,
    StartMatchRequest, add_event, end_match, get_match, start_match,
};
pub use players::{
    __path_create_player, __path_list_players, CreatePlayerRequest, ListPlayersQuery,
    create_player, list_players,
};
pub use stats::{__path_get_stats, __path_health_check, get_stats, health_check};
pub use teams::{
    __path_create_team, __path_list_teams, CreateTeamRequest, ListTeamsQuery, create_team,
    list_teams,
};
