//! Player generation: team rosters plus a free-agent pool.

use std::collections::HashSet;

use fake::{Fake, faker::name::en::Name};
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use uuid::Uuid;

use futsal::models::Position;

use super::team::GeneratedTeam;

/// Generated player data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedPlayer {
    pub id: Uuid,
    pub name: String,
    pub position: Position,
    pub team_id: Option<Uuid>,
    pub number: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
}

/// Configuration for player generation.
#[derive(Debug, Clone)]
pub struct PlayerGenConfig {
    /// Average roster size per team (futsal squads run small).
    pub avg_roster_size: f64,
    /// Probability distribution over positions [GK, DEF, MID, FWD].
    pub position_distribution: [f64; 4],
    /// How many unattached players to add on top of the rosters.
    pub free_agents: usize,
    /// Probability that a player's hometown fields are filled in.
    pub hometown_fill_rate: f64,
    /// Probability that a player has an avatar reference.
    pub avatar_probability: f64,
}

impl Default for PlayerGenConfig {
    fn default() -> Self {
        Self {
            avg_roster_size: 10.0,
            position_distribution: [0.2, 0.3, 0.3, 0.2],
            free_agents: 5,
            hometown_fill_rate: 0.8,
            avatar_probability: 0.3,
        }
    }
}

/// Generates players for team rosters and the free-agent pool.
pub struct PlayerGenerator {
    config: PlayerGenConfig,
}

impl PlayerGenerator {
    /// Creates a new player generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: PlayerGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: PlayerGenConfig) -> Self {
        Self { config }
    }

    /// Generates a Poisson-sized roster for every team plus the configured
    /// number of free agents. Every roster gets at least one keeper and
    /// jersey numbers are unique within a team.
    pub fn generate_rosters(
        &self,
        teams: &[GeneratedTeam],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedPlayer> {
        let mut players = Vec::new();
        let poisson = Poisson::new(self.config.avg_roster_size).unwrap();

        for team in teams {
            let roster_size = (poisson.sample(rng) as usize).max(5);
            let mut numbers_taken = HashSet::new();

            for slot in 0..roster_size {
                let position = if slot == 0 {
                    Position::Gk
                } else {
                    self.pick_position(rng)
                };
                players.push(self.generate_single_player(
                    Some(team),
                    position,
                    &mut numbers_taken,
                    rng,
                ));
            }
        }

        for _ in 0..self.config.free_agents {
            let position = self.pick_position(rng);
            players.push(self.generate_single_player(None, position, &mut HashSet::new(), rng));
        }

        players
    }

    fn generate_single_player(
        &self,
        team: Option<&GeneratedTeam>,
        position: Position,
        numbers_taken: &mut HashSet<i32>,
        rng: &mut impl Rng,
    ) -> GeneratedPlayer {
        let number = loop {
            let candidate = rng.gen_range(1..=99);
            if numbers_taken.insert(candidate) {
                break candidate;
            }
        };

        let (country, city) = if rng.r#gen::<f64>() < self.config.hometown_fill_rate {
            match team {
                // Most squad players come from the team's own region.
                Some(team) => (Some(team.country.clone()), Some(team.city.clone())),
                None => (None, None),
            }
        } else {
            (None, None)
        };

        let id = Uuid::new_v4();
        let avatar_url = (rng.r#gen::<f64>() < self.config.avatar_probability)
            .then(|| format!("https://img.example.com/avatars/{id}.png"));

        GeneratedPlayer {
            id,
            name: Name().fake_with_rng::<String, _>(rng),
            position,
            team_id: team.map(|t| t.id),
            number: Some(number),
            country,
            city,
            avatar_url,
        }
    }

    fn pick_position(&self, rng: &mut impl Rng) -> Position {
        let roll: f64 = rng.r#gen();
        let [gk, def, mid, _fwd] = self.config.position_distribution;
        if roll < gk {
            Position::Gk
        } else if roll < gk + def {
            Position::Def
        } else if roll < gk + def + mid {
            Position::Mid
        } else {
            Position::Fwd
        }
    }
}

impl Default for PlayerGenerator {
    fn default() -> Self {
        Self::new()
    }
}
