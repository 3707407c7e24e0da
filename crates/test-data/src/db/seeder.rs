//! Database seeding utilities.

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::generators::{GeneratedMatch, GeneratedPlayer, GeneratedTeam};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Database seeder for inserting generated league data.
pub struct Seeder {
    pool: PgPool,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Seeds teams into the database. Regenerated tuples that already exist
    /// are skipped rather than failing the run.
    pub async fn seed_teams(&self, teams: &[GeneratedTeam]) -> Result<(), SeedError> {
        info!("Seeding {} teams...", teams.len());

        for team in teams {
            sqlx::query(
                r#"
                INSERT INTO teams (id, name, country, city, coach, logo_url, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (name, country, city) DO NOTHING
                "#,
            )
            .bind(team.id)
            .bind(&team.name)
            .bind(&team.country)
            .bind(&team.city)
            .bind(team.coach.as_deref())
            .bind(team.logo_url.as_deref())
            .bind(team.created_at)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Seeds players into the database.
    pub async fn seed_players(&self, players: &[GeneratedPlayer]) -> Result<(), SeedError> {
        info!("Seeding {} players...", players.len());

        for player in players {
            sqlx::query(
                r#"
                INSERT INTO players (id, name, position, team_id, number, country, city, avatar_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(player.id)
            .bind(&player.name)
            .bind(player.position)
            .bind(player.team_id)
            .bind(player.number)
            .bind(player.country.as_deref())
            .bind(player.city.as_deref())
            .bind(player.avatar_url.as_deref())
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Seeds matches with their full event logs and final counters.
    pub async fn seed_matches(&self, matches: &[GeneratedMatch]) -> Result<(), SeedError> {
        info!("Seeding {} matches...", matches.len());

        for m in matches {
            sqlx::query(
                r#"
                INSERT INTO matches (id, home_team_id, away_team_id, started_at, ended_at,
                                     events, home_score, away_score, winner_team_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(m.id)
            .bind(m.home_team_id)
            .bind(m.away_team_id)
            .bind(m.started_at)
            .bind(m.ended_at)
            .bind(sqlx::types::Json(&m.events))
            .bind(m.home_score)
            .bind(m.away_score)
            .bind(m.winner_team_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
