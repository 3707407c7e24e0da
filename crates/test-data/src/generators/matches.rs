//! Match generation: pairings played out into full event logs.
//!
//! Generated matches satisfy the same invariant the service maintains: the
//! stored scores equal the fold of the score rules over the event list, and
//! the winner of an ended match is the outcome of its final counters.

use std::collections::HashMap;

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use futsal::models::{EventType, MatchEvent};
use futsal::scoring;

use super::player::GeneratedPlayer;
use super::team::GeneratedTeam;

/// Generated match data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedMatch {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub started_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
    pub events: Vec<MatchEvent>,
    pub home_score: i32,
    pub away_score: i32,
    pub winner_team_id: Option<Uuid>,
}

/// Configuration for match generation.
#[derive(Debug, Clone)]
pub struct MatchGenConfig {
    /// Average goals per side (Poisson).
    pub avg_goals_per_side: f64,
    /// Probability that a goal carries its assister inline as the
    /// secondary player.
    pub inline_assist_probability: f64,
    /// Probability that a goal without an inline assister gets a
    /// standalone assist event instead.
    pub standalone_assist_probability: f64,
    /// Probability that a match contains an own goal.
    pub own_goal_probability: f64,
    /// Average yellow cards per match (Poisson).
    pub avg_yellows: f64,
    /// Probability that a match contains a red card.
    pub red_probability: f64,
    /// Average substitutions per match (Poisson).
    pub avg_substitutions: f64,
    /// Fraction of matches still in progress (no end time, no winner).
    pub unfinished_fraction: f64,
}

impl Default for MatchGenConfig {
    fn default() -> Self {
        Self {
            avg_goals_per_side: 2.5,
            inline_assist_probability: 0.6,
            standalone_assist_probability: 0.5,
            own_goal_probability: 0.08,
            avg_yellows: 1.2,
            red_probability: 0.06,
            avg_substitutions: 2.0,
            unfinished_fraction: 0.1,
        }
    }
}

/// Plays out matches between generated teams.
pub struct MatchGenerator {
    config: MatchGenConfig,
}

impl MatchGenerator {
    /// Creates a new match generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: MatchGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: MatchGenConfig) -> Self {
        Self { config }
    }

    /// Generates matches between random distinct team pairs.
    pub fn generate_matches(
        &self,
        count: usize,
        teams: &[GeneratedTeam],
        players: &[GeneratedPlayer],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedMatch> {
        if teams.len() < 2 {
            return Vec::new();
        }

        let rosters: HashMap<Uuid, Vec<Uuid>> = teams
            .iter()
            .map(|team| {
                let roster = players
                    .iter()
                    .filter(|p| p.team_id == Some(team.id))
                    .map(|p| p.id)
                    .collect();
                (team.id, roster)
            })
            .collect();

        (0..count)
            .map(|_| self.generate_single_match(teams, &rosters, rng))
            .collect()
    }

    fn generate_single_match(
        &self,
        teams: &[GeneratedTeam],
        rosters: &HashMap<Uuid, Vec<Uuid>>,
        rng: &mut impl Rng,
    ) -> GeneratedMatch {
        let home_idx = rng.gen_range(0..teams.len());
        let away_idx = loop {
            let idx = rng.gen_range(0..teams.len());
            if idx != home_idx {
                break idx;
            }
        };
        let home = teams[home_idx].id;
        let away = teams[away_idx].id;

        let started_at = OffsetDateTime::now_utc() - Duration::days(rng.gen_range(0..120));
        let mut events = Vec::new();

        let goal_poisson = Poisson::new(self.config.avg_goals_per_side).unwrap();
        for side in [home, away] {
            let goals = goal_poisson.sample(rng) as usize;
            for _ in 0..goals {
                self.push_goal(&mut events, side, &rosters[&side], rng);
            }
        }

        if rng.r#gen::<f64>() < self.config.own_goal_probability {
            let side = if rng.r#gen::<bool>() { home } else { away };
            events.push(event_at(
                rng.gen_range(0..=40),
                EventType::OwnGoal,
                Some(side),
                pick_player(&rosters[&side], rng),
                None,
            ));
        }

        let yellow_poisson = Poisson::new(self.config.avg_yellows).unwrap();
        for _ in 0..yellow_poisson.sample(rng) as usize {
            let side = if rng.r#gen::<bool>() { home } else { away };
            events.push(event_at(
                rng.gen_range(0..=40),
                EventType::Yellow,
                Some(side),
                pick_player(&rosters[&side], rng),
                None,
            ));
        }
        if rng.r#gen::<f64>() < self.config.red_probability {
            let side = if rng.r#gen::<bool>() { home } else { away };
            events.push(event_at(
                rng.gen_range(20..=40),
                EventType::Red,
                Some(side),
                pick_player(&rosters[&side], rng),
                None,
            ));
        }

        let sub_poisson = Poisson::new(self.config.avg_substitutions).unwrap();
        for _ in 0..sub_poisson.sample(rng) as usize {
            let side = if rng.r#gen::<bool>() { home } else { away };
            let roster = &rosters[&side];
            events.push(event_at(
                rng.gen_range(10..=40),
                EventType::Substitution,
                Some(side),
                pick_player(roster, rng),
                pick_player(roster, rng),
            ));
        }

        // Recorded chronologically; timestamps follow the minute marks.
        events.sort_by_key(|e| e.minute);
        for event in &mut events {
            let minute = event.minute.unwrap_or(0);
            event.timestamp = started_at + Duration::minutes(minute as i64);
        }

        let (home_score, away_score) = events.iter().fold((0, 0), |(h, a), event| {
            let delta = scoring::credit(event.event_type, event.team_id, home, away);
            (h + delta.home, a + delta.away)
        });

        let (ended_at, winner_team_id) = if rng.r#gen::<f64>() < self.config.unfinished_fraction {
            (None, None)
        } else {
            (
                Some(started_at + Duration::minutes(55)),
                scoring::outcome(home_score, away_score, home, away),
            )
        };

        GeneratedMatch {
            id: Uuid::new_v4(),
            home_team_id: home,
            away_team_id: away,
            started_at,
            ended_at,
            events,
            home_score,
            away_score,
            winner_team_id,
        }
    }

    fn push_goal(
        &self,
        events: &mut Vec<MatchEvent>,
        side: Uuid,
        roster: &[Uuid],
        rng: &mut impl Rng,
    ) {
        let minute = rng.gen_range(0..=40);
        let scorer = pick_player(roster, rng);
        let assister = pick_other(roster, scorer, rng);

        if assister.is_some() && rng.r#gen::<f64>() < self.config.inline_assist_probability {
            events.push(event_at(minute, EventType::Goal, Some(side), scorer, assister));
        } else {
            events.push(event_at(minute, EventType::Goal, Some(side), scorer, None));
            if assister.is_some() && rng.r#gen::<f64>() < self.config.standalone_assist_probability
            {
                events.push(event_at(minute, EventType::Assist, Some(side), assister, None));
            }
        }
    }
}

impl Default for MatchGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn event_at(
    minute: i32,
    event_type: EventType,
    team_id: Option<Uuid>,
    player_id: Option<Uuid>,
    secondary_player_id: Option<Uuid>,
) -> MatchEvent {
    MatchEvent {
        timestamp: OffsetDateTime::now_utc(),
        event_type,
        team_id,
        player_id,
        secondary_player_id,
        minute: Some(minute),
        notes: None,
    }
}

fn pick_player(roster: &[Uuid], rng: &mut impl Rng) -> Option<Uuid> {
    if roster.is_empty() {
        None
    } else {
        Some(roster[rng.gen_range(0..roster.len())])
    }
}

fn pick_other(roster: &[Uuid], excluded: Option<Uuid>, rng: &mut impl Rng) -> Option<Uuid> {
    let candidates: Vec<Uuid> = roster
        .iter()
        .copied()
        .filter(|id| Some(*id) != excluded)
        .collect();
    pick_player(&candidates, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{PlayerGenerator, TeamGenerator};

    fn generate_league(
        match_count: usize,
    ) -> (Vec<GeneratedTeam>, Vec<GeneratedPlayer>, Vec<GeneratedMatch>) {
        let mut rng = rand::thread_rng();
        let teams = TeamGenerator::new().generate_teams(4, &mut rng);
        let players = PlayerGenerator::new().generate_rosters(&teams, &mut rng);
        let matches = MatchGenerator::new().generate_matches(match_count, &teams, &players, &mut rng);
        (teams, players, matches)
    }

    #[test]
    fn test_scores_equal_credit_fold_over_events() {
        let (_, _, matches) = generate_league(25);
        assert_eq!(matches.len(), 25);

        for m in &matches {
            let (home, away) = m.events.iter().fold((0, 0), |(h, a), event| {
                let delta =
                    scoring::credit(event.event_type, event.team_id, m.home_team_id, m.away_team_id);
                (h + delta.home, a + delta.away)
            });
            assert_eq!((m.home_score, m.away_score), (home, away));
        }
    }

    #[test]
    fn test_ended_matches_have_consistent_winner() {
        let (_, _, matches) = generate_league(25);

        for m in &matches {
            match m.ended_at {
                Some(_) => assert_eq!(
                    m.winner_team_id,
                    scoring::outcome(m.home_score, m.away_score, m.home_team_id, m.away_team_id)
                ),
                None => assert!(m.winner_team_id.is_none()),
            }
        }
    }

    #[test]
    fn test_events_are_recorded_in_minute_order() {
        let (_, _, matches) = generate_league(10);

        for m in &matches {
            let minutes: Vec<i32> = m.events.iter().filter_map(|e| e.minute).collect();
            assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
            assert!(minutes.iter().all(|minute| (0..=60).contains(minute)));
        }
    }

    #[test]
    fn test_sides_are_distinct() {
        let (_, _, matches) = generate_league(15);
        assert!(matches.iter().all(|m| m.home_team_id != m.away_team_id));
    }
}
