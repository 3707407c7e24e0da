//! Team generation for seed data.

use std::collections::HashSet;

use fake::{Fake, faker::name::en::Name};
use rand::Rng;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Generated team data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedTeam {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub city: String,
    pub coach: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Configuration for team generation.
#[derive(Debug, Clone)]
pub struct TeamGenConfig {
    /// Countries and the cities inside them that teams are spread over.
    pub regions: Vec<(String, Vec<String>)>,
    /// Probability that a team has a named coach.
    pub coach_probability: f64,
    /// Probability that a team has a logo reference.
    pub logo_probability: f64,
}

impl Default for TeamGenConfig {
    fn default() -> Self {
        Self {
            regions: vec![
                (
                    "Spain".to_string(),
                    vec!["Madrid".to_string(), "Barcelona".to_string(), "Sevilla".to_string()],
                ),
                (
                    "Brazil".to_string(),
                    vec!["Sao Paulo".to_string(), "Rio de Janeiro".to_string()],
                ),
                (
                    "Portugal".to_string(),
                    vec!["Lisbon".to_string(), "Porto".to_string()],
                ),
            ],
            coach_probability: 0.7,
            logo_probability: 0.4,
        }
    }
}

/// Team name templates.
const TEAM_MASCOTS: &[&str] = &[
    "Falcons", "Tigers", "Wolves", "Sharks", "Eagles", "Panthers", "Comets", "Rockets",
    "Thunder", "Lightning", "Titans", "Vipers",
];

const TEAM_SUFFIXES: &[&str] = &["Futsal", "FC", "Five", "Club", "United"];

/// Generates teams spread over the configured regions.
pub struct TeamGenerator {
    config: TeamGenConfig,
}

impl TeamGenerator {
    /// Creates a new team generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: TeamGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: TeamGenConfig) -> Self {
        Self { config }
    }

    /// Generates a batch of teams with unique (name, country, city) tuples.
    pub fn generate_teams(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedTeam> {
        let mut used: HashSet<(String, String, String)> = HashSet::new();
        let mut teams = Vec::with_capacity(count);

        while teams.len() < count {
            let team = self.generate_single_team(rng);
            let key = (team.name.clone(), team.country.clone(), team.city.clone());
            if used.insert(key) {
                teams.push(team);
            }
        }

        teams
    }

    fn generate_single_team(&self, rng: &mut impl Rng) -> GeneratedTeam {
        let (country, cities) = &self.config.regions[rng.gen_range(0..self.config.regions.len())];
        let city = &cities[rng.gen_range(0..cities.len())];

        let coach = if rng.r#gen::<f64>() < self.config.coach_probability {
            Some(Name().fake_with_rng::<String, _>(rng))
        } else {
            None
        };

        let name = self.generate_team_name(city, rng);
        let logo_url = if rng.r#gen::<f64>() < self.config.logo_probability {
            Some(format!(
                "https://img.example.com/logos/{}.png",
                name.to_lowercase().replace(' ', "-")
            ))
        } else {
            None
        };

        GeneratedTeam {
            id: Uuid::new_v4(),
            name,
            country: country.clone(),
            city: city.clone(),
            coach,
            logo_url,
            created_at: OffsetDateTime::now_utc() - Duration::days(rng.gen_range(0..365)),
        }
    }

    fn generate_team_name(&self, city: &str, rng: &mut impl Rng) -> String {
        let mascot = TEAM_MASCOTS[rng.gen_range(0..TEAM_MASCOTS.len())];
        let suffix = TEAM_SUFFIXES[rng.gen_range(0..TEAM_SUFFIXES.len())];
        // Half the teams carry their city in the name.
        if rng.r#gen::<bool>() {
            format!("{city} {mascot}")
        } else {
            format!("{mascot} {suffix}")
        }
    }
}

impl Default for TeamGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_teams() {
        let team_gen = TeamGenerator::new();
        let mut rng = rand::thread_rng();

        let teams = team_gen.generate_teams(10, &mut rng);

        assert_eq!(teams.len(), 10);
        for team in &teams {
            assert!(!team.name.is_empty());
            assert!(!team.country.is_empty());
            assert!(!team.city.is_empty());
        }
    }

    #[test]
    fn test_team_tuples_are_unique() {
        let team_gen = TeamGenerator::new();
        let mut rng = rand::thread_rng();

        let teams = team_gen.generate_teams(30, &mut rng);
        let tuples: HashSet<_> = teams
            .iter()
            .map(|t| (&t.name, &t.country, &t.city))
            .collect();

        assert_eq!(tuples.len(), teams.len());
    }

    #[test]
    fn test_cities_match_configured_regions() {
        let team_gen = TeamGenerator::new();
        let mut rng = rand::thread_rng();
        let config = TeamGenConfig::default();

        for team in team_gen.generate_teams(20, &mut rng) {
            let region = config.regions.iter().find(|(c, _)| *c == team.country);
            let (_, cities) = region.expect("Country should come from the config");
            assert!(cities.contains(&team.city));
        }
    }
}
