use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    Formation, FormationSlot, Match, MatchEvent, Player, PlayerRef, Position, Stats, Team,
};
use crate::query_builder::QueryBuilder;
use crate::scoring::ScoreDelta;

const MATCH_COLUMNS: &str = "id, home_team_id, away_team_id, started_at, ended_at, \
     events, home_score, away_score, winner_team_id";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Teams
    // ------------------------------------------------------------------

    /// Creates a team. The (name, country, city) tuple is unique; a
    /// duplicate surfaces as a conflict rather than a database error.
    pub async fn create_team(
        &self,
        name: &str,
        country: &str,
        city: &str,
        coach: Option<&str>,
        logo_url: Option<&str>,
    ) -> Result<Team, AppError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, country, city, coach, logo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, country, city, coach, logo_url, created_at
            "#,
        )
        .bind(name)
        .bind(country)
        .bind(city)
        .bind(coach)
        .bind(logo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                AppError::Conflict("Team already exists in this city".to_string())
            } else {
                AppError::from(err)
            }
        })?;

        Ok(team)
    }

    pub async fn get_team(&self, id: Uuid) -> Result<Option<Team>, AppError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, country, city, coach, logo_url, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    /// Lists teams with optional exact-match country/city filters, ordered
    /// by name.
    pub async fn list_teams(
        &self,
        country: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<Team>, AppError> {
        let mut qb = QueryBuilder::new();
        qb.add_optional(&country, |idx| format!("country = ${idx}"));
        qb.add_optional(&city, |idx| format!("city = ${idx}"));

        let sql = format!(
            "SELECT id, name, country, city, coach, logo_url, created_at FROM teams {} ORDER BY name",
            qb.build_where_clause()
        );

        let mut query = sqlx::query_as::<_, Team>(&sql);
        if let Some(country) = country {
            query = query.bind(country);
        }
        if let Some(city) = city {
            query = query.bind(city);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Resolves the team identity set for a geographic scope filter.
    pub async fn team_ids_in_scope(
        &self,
        country: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<Uuid>, AppError> {
        let mut qb = QueryBuilder::new();
        qb.add_optional(&country, |idx| format!("country = ${idx}"));
        qb.add_optional(&city, |idx| format!("city = ${idx}"));

        let sql = format!("SELECT id FROM teams {}", qb.build_where_clause());

        let mut query = sqlx::query_scalar::<_, Uuid>(&sql);
        if let Some(country) = country {
            query = query.bind(country);
        }
        if let Some(city) = city {
            query = query.bind(city);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Batch lookup for leaderboard enrichment.
    pub async fn teams_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Team>, AppError> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, country, city, coach, logo_url, created_at
            FROM teams
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    #[allow(clippy::too_many_arguments)]
    pub async fn create_player(
        &self,
        name: &str,
        position: Position,
        team_id: Option<Uuid>,
        number: Option<i32>,
        country: Option<&str>,
        city: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Player, AppError> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (name, position, team_id, number, country, city, avatar_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, position, team_id, number, country, city, avatar_url, created_at
            "#,
        )
        .bind(name)
        .bind(position)
        .bind(team_id)
        .bind(number)
        .bind(country)
        .bind(city)
        .bind(avatar_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(player)
    }

    pub async fn get_player(&self, id: Uuid) -> Result<Option<Player>, AppError> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT id, name, position, team_id, number, country, city, avatar_url, created_at
            FROM players
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    /// Lists players, optionally restricted to one team, ordered by name.
    pub async fn list_players(&self, team_id: Option<Uuid>) -> Result<Vec<Player>, AppError> {
        let mut qb = QueryBuilder::new();
        qb.add_optional(&team_id, |idx| format!("team_id = ${idx}"));

        let sql = format!(
            "SELECT id, name, position, team_id, number, country, city, avatar_url, created_at \
             FROM players {} ORDER BY name",
            qb.build_where_clause()
        );

        let mut query = sqlx::query_as::<_, Player>(&sql);
        if let Some(team_id) = team_id {
            query = query.bind(team_id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Resolves the player identity set for a geographic scope filter.
    /// Player country/city are independent of the team's location.
    pub async fn player_ids_in_scope(
        &self,
        country: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<Uuid>, AppError> {
        let mut qb = QueryBuilder::new();
        qb.add_optional(&country, |idx| format!("country = ${idx}"));
        qb.add_optional(&city, |idx| format!("city = ${idx}"));

        let sql = format!("SELECT id FROM players {}", qb.build_where_clause());

        let mut query = sqlx::query_scalar::<_, Uuid>(&sql);
        if let Some(country) = country {
            query = query.bind(country);
        }
        if let Some(city) = city {
            query = query.bind(city);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Batch enrichment lookup joining the player's current team name.
    pub async fn players_with_team_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<PlayerRef>, AppError> {
        let players = sqlx::query_as::<_, PlayerRef>(
            r#"
            SELECT p.id, p.name, p.country, p.city, t.name AS team_name
            FROM players p
            LEFT JOIN teams t ON t.id = p.team_id
            WHERE p.id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    // ------------------------------------------------------------------
    // Matches
    // ------------------------------------------------------------------

    /// Creates a match with zero scores, an empty event log and no end time.
    pub async fn start_match(&self, home_team_id: Uuid, away_team_id: Uuid) -> Result<Match, AppError> {
        let sql = format!(
            "INSERT INTO matches (home_team_id, away_team_id) VALUES ($1, $2) RETURNING {MATCH_COLUMNS}"
        );
        let m = sqlx::query_as::<_, Match>(&sql)
            .bind(home_team_id)
            .bind(away_team_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(m)
    }

    pub async fn get_match(&self, id: Uuid) -> Result<Option<Match>, AppError> {
        let sql = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1");
        let m = sqlx::query_as::<_, Match>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(m)
    }

    /// Appends an event and applies its score delta as one statement, so no
    /// reader can observe the event without its score effect or vice versa.
    pub async fn append_event(
        &self,
        match_id: Uuid,
        event: &MatchEvent,
        delta: ScoreDelta,
    ) -> Result<Option<Match>, AppError> {
        let sql = format!(
            "UPDATE matches \
             SET events = events || $2, \
                 home_score = home_score + $3, \
                 away_score = away_score + $4 \
             WHERE id = $1 \
             RETURNING {MATCH_COLUMNS}"
        );
        let m = sqlx::query_as::<_, Match>(&sql)
            .bind(match_id)
            .bind(sqlx::types::Json(event))
            .bind(delta.home)
            .bind(delta.away)
            .fetch_optional(&self.pool)
            .await?;

        Ok(m)
    }

    /// Seals the match: sets the end time and records the precomputed
    /// winner (None for a draw).
    pub async fn end_match(
        &self,
        match_id: Uuid,
        winner_team_id: Option<Uuid>,
    ) -> Result<Option<Match>, AppError> {
        let sql = format!(
            "UPDATE matches \
             SET ended_at = NOW(), winner_team_id = $2 \
             WHERE id = $1 \
             RETURNING {MATCH_COLUMNS}"
        );
        let m = sqlx::query_as::<_, Match>(&sql)
            .bind(match_id)
            .bind(winner_team_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(m)
    }

    /// Fetches the match corpus for aggregation, optionally restricted to
    /// matches where either side belongs to the given team set.
    pub async fn list_matches(&self, involving: Option<&[Uuid]>) -> Result<Vec<Match>, AppError> {
        let matches = match involving {
            Some(team_ids) => {
                let sql = format!(
                    "SELECT {MATCH_COLUMNS} FROM matches \
                     WHERE home_team_id = ANY($1) OR away_team_id = ANY($1) \
                     ORDER BY started_at"
                );
                sqlx::query_as::<_, Match>(&sql)
                    .bind(team_ids)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {MATCH_COLUMNS} FROM matches ORDER BY started_at");
                sqlx::query_as::<_, Match>(&sql).fetch_all(&self.pool).await?
            }
        };

        Ok(matches)
    }

    // ------------------------------------------------------------------
    // Formations
    // ------------------------------------------------------------------

    /// Creates or replaces the team's formation in place: one formation per
    /// team, same row identity on replacement, bumped updated_at.
    pub async fn upsert_formation(
        &self,
        team_id: Uuid,
        name: &str,
        positions: &[FormationSlot],
    ) -> Result<Formation, AppError> {
        let formation = sqlx::query_as::<_, Formation>(
            r#"
            INSERT INTO formations (team_id, name, positions)
            VALUES ($1, $2, $3)
            ON CONFLICT (team_id) DO UPDATE
            SET name = EXCLUDED.name,
                positions = EXCLUDED.positions,
                updated_at = NOW()
            RETURNING id, team_id, name, positions, created_at, updated_at
            "#,
        )
        .bind(team_id)
        .bind(name)
        .bind(sqlx::types::Json(positions))
        .fetch_one(&self.pool)
        .await?;

        Ok(formation)
    }

    pub async fn get_formation(&self, team_id: Uuid) -> Result<Option<Formation>, AppError> {
        let formation = sqlx::query_as::<_, Formation>(
            r#"
            SELECT id, team_id, name, positions, created_at, updated_at
            FROM formations
            WHERE team_id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(formation)
    }

    // ------------------------------------------------------------------
    // Stats
    // ------------------------------------------------------------------

    pub async fn get_stats(&self) -> Result<Stats, AppError> {
        let stats = sqlx::query_as::<_, Stats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM teams) AS teams,
                (SELECT COUNT(*) FROM players) AS players,
                (SELECT COUNT(*) FROM matches) AS matches
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
