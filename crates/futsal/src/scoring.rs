//! Pure score and outcome rules.
//!
//! These functions decide how an event moves the running score and which
//! side wins at the final whistle. They have no side effects; the caller is
//! responsible for applying the returned delta atomically with the event
//! append.

use uuid::Uuid;

use crate::models::EventType;

/// Score adjustment produced by a single event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreDelta {
    pub home: i32,
    pub away: i32,
}

impl ScoreDelta {
    pub const NONE: ScoreDelta = ScoreDelta { home: 0, away: 0 };
}

/// Maps an event to its score effect.
///
/// A goal credits the side named by `event_team`; an own goal credits the
/// opposing side. An event with no team, or a team matching neither side,
/// is still recorded but moves no counter.
pub fn credit(
    event_type: EventType,
    event_team: Option<Uuid>,
    home_team: Uuid,
    away_team: Uuid,
) -> ScoreDelta {
    let Some(team) = event_team else {
        return ScoreDelta::NONE;
    };

    match event_type {
        EventType::Goal => {
            if team == home_team {
                ScoreDelta { home: 1, away: 0 }
            } else if team == away_team {
                ScoreDelta { home: 0, away: 1 }
            } else {
                ScoreDelta::NONE
            }
        }
        EventType::OwnGoal => {
            if team == home_team {
                ScoreDelta { home: 0, away: 1 }
            } else if team == away_team {
                ScoreDelta { home: 1, away: 0 }
            } else {
                ScoreDelta::NONE
            }
        }
        _ => ScoreDelta::NONE,
    }
}

/// Decides the winner from final scores. Equal scores are a draw,
/// represented as `None` rather than an error.
pub fn outcome(
    home_score: i32,
    away_score: i32,
    home_team: Uuid,
    away_team: Uuid,
) -> Option<Uuid> {
    match home_score.cmp(&away_score) {
        std::cmp::Ordering::Greater => Some(home_team),
        std::cmp::Ordering::Less => Some(away_team),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> (Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn goal_credits_named_side() {
        let (home, away) = teams();
        assert_eq!(
            credit(EventType::Goal, Some(home), home, away),
            ScoreDelta { home: 1, away: 0 }
        );
        assert_eq!(
            credit(EventType::Goal, Some(away), home, away),
            ScoreDelta { home: 0, away: 1 }
        );
    }

    #[test]
    fn own_goal_credits_opposing_side() {
        let (home, away) = teams();
        assert_eq!(
            credit(EventType::OwnGoal, Some(home), home, away),
            ScoreDelta { home: 0, away: 1 }
        );
        assert_eq!(
            credit(EventType::OwnGoal, Some(away), home, away),
            ScoreDelta { home: 1, away: 0 }
        );
    }

    #[test]
    fn unmatched_or_missing_team_moves_no_counter() {
        let (home, away) = teams();
        assert_eq!(credit(EventType::Goal, None, home, away), ScoreDelta::NONE);
        assert_eq!(
            credit(EventType::Goal, Some(Uuid::new_v4()), home, away),
            ScoreDelta::NONE
        );
        assert_eq!(
            credit(EventType::OwnGoal, None, home, away),
            ScoreDelta::NONE
        );
    }

    #[test]
    fn non_scoring_events_move_no_counter() {
        let (home, away) = teams();
        for event_type in [
            EventType::Assist,
            EventType::Yellow,
            EventType::Red,
            EventType::Substitution,
        ] {
            assert_eq!(credit(event_type, Some(home), home, away), ScoreDelta::NONE);
        }
    }

    #[test]
    fn outcome_picks_higher_score() {
        let (home, away) = teams();
        assert_eq!(outcome(3, 1, home, away), Some(home));
        assert_eq!(outcome(0, 2, home, away), Some(away));
    }

    #[test]
    fn equal_scores_are_a_draw() {
        let (home, away) = teams();
        assert_eq!(outcome(2, 2, home, away), None);
        assert_eq!(outcome(0, 0, home, away), None);
    }

    #[test]
    fn outcome_is_deterministic_for_same_scores() {
        let (home, away) = teams();
        assert_eq!(outcome(4, 2, home, away), outcome(4, 2, home, away));
    }
}
