//! Seed data generation for the futsal leaderboard backend.
//!
//! This crate provides tools for generating realistic leagues (teams,
//! rosters, and matches with full event logs) to support manual
//! verification of the leaderboard aggregation and integration testing
//! against a development database.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let teams = TeamGenerator::new().generate_teams(8, &mut rng);
//! let players = PlayerGenerator::new().generate_rosters(&teams, &mut rng);
//! let matches = MatchGenerator::new().generate_matches(30, &teams, &players, &mut rng);
//!
//! let seeder = Seeder::new(pool);
//! seeder.seed_teams(&teams).await?;
//! seeder.seed_players(&players).await?;
//! seeder.seed_matches(&matches).await?;
//! ```

pub mod db;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::db::Seeder;
    pub use crate::generators::{
        GeneratedMatch, GeneratedPlayer, GeneratedTeam, MatchGenerator, PlayerGenerator,
        TeamGenerator,
    };
}
