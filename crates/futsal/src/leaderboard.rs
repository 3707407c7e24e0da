//! Leaderboard aggregation pipeline.
//!
//! Ranked statistics are computed from the match corpus as an explicit
//! sequence of pure stages: map each match to per-side rows (teams) or
//! flatten its event list (players), fold into per-entity totals, sort by
//! the requested statistic, and truncate. Scope resolution and enrichment
//! are storage lookups and live in the handlers; everything here operates on
//! typed match records only.
//!
//! Ties on the ranked statistic break by entity id ascending, so identical
//! inputs always produce identical orderings regardless of storage iteration
//! order.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::models::{EventType, Match, MatchEvent, PlayerStat, TeamStat};

/// One side of one match: the home or away team's line for that match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideRow {
    pub team_id: Uuid,
    pub goals_for: i64,
    pub win: i64,
    pub draw: i64,
}

/// Accumulated totals for one team across all its matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamTotals {
    pub team_id: Uuid,
    pub goals: i64,
    pub wins: i64,
    pub draws: i64,
}

impl TeamTotals {
    /// Standard 3-1-0 scoring: a loss contributes nothing.
    pub fn points(&self) -> i64 {
        self.wins * 3 + self.draws
    }

    fn stat(&self, stat: TeamStat) -> i64 {
        match stat {
            TeamStat::Goals => self.goals,
            TeamStat::Wins => self.wins,
            TeamStat::Points => self.points(),
        }
    }
}

/// Maps a match to its two per-side rows. Win/draw are decided from the
/// stored counters, mirrored for the away side.
pub fn side_rows(m: &Match) -> [SideRow; 2] {
    let home = SideRow {
        team_id: m.home_team_id,
        goals_for: m.home_score as i64,
        win: (m.home_score > m.away_score) as i64,
        draw: (m.home_score == m.away_score) as i64,
    };
    let away = SideRow {
        team_id: m.away_team_id,
        goals_for: m.away_score as i64,
        win: (m.away_score > m.home_score) as i64,
        draw: (m.home_score == m.away_score) as i64,
    };
    [home, away]
}

/// Groups side rows by team, summing goals, wins and draws. Output order is
/// unspecified; the sort stage normalizes it.
pub fn fold_sides(rows: impl IntoIterator<Item = SideRow>) -> Vec<TeamTotals> {
    let mut totals: HashMap<Uuid, TeamTotals> = HashMap::new();
    for row in rows {
        let entry = totals.entry(row.team_id).or_insert(TeamTotals {
            team_id: row.team_id,
            goals: 0,
            wins: 0,
            draws: 0,
        });
        entry.goals += row.goals_for;
        entry.wins += row.win;
        entry.draws += row.draw;
    }
    totals.into_values().collect()
}

/// Full team pipeline: map -> fold -> sort -> truncate.
pub fn rank_teams(matches: &[Match], stat: TeamStat, limit: usize) -> Vec<TeamTotals> {
    let mut totals = fold_sides(matches.iter().flat_map(side_rows));
    totals.sort_by(|a, b| {
        b.stat(stat)
            .cmp(&a.stat(stat))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    totals.truncate(limit);
    totals
}

/// Resolves the player credited with an event for the given statistic.
///
/// Assists carry the dual-attribution rule: a goal event credits its
/// secondary player (the assister), while a standalone assist event credits
/// its primary player. Each event contributes at most one credit, so a
/// single goal's assist is never counted twice.
pub fn credited_player(event: &MatchEvent, stat: PlayerStat) -> Option<Uuid> {
    match stat {
        PlayerStat::Goals => (event.event_type == EventType::Goal)
            .then_some(event.player_id)
            .flatten(),
        PlayerStat::Assists => match event.event_type {
            EventType::Goal => event.secondary_player_id,
            EventType::Assist => event.player_id,
            _ => None,
        },
        PlayerStat::Yellow => (event.event_type == EventType::Yellow)
            .then_some(event.player_id)
            .flatten(),
        PlayerStat::Red => (event.event_type == EventType::Red)
            .then_some(event.player_id)
            .flatten(),
    }
}

/// Per-player occurrence count for one statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCount {
    pub player_id: Uuid,
    pub count: i64,
}

/// Full player pipeline: flatten -> credit -> count -> scope filter -> sort
/// -> truncate.
///
/// The match corpus is never pre-filtered for player boards; a scope
/// restriction arrives as the resolved `allowed` id set and is applied to
/// the grouped rows before ranking. Events whose credited player is absent
/// (e.g. a goal with no recorded assister) are excluded.
pub fn rank_players(
    matches: &[Match],
    stat: PlayerStat,
    allowed: Option<&HashSet<Uuid>>,
    limit: usize,
) -> Vec<PlayerCount> {
    let mut counts: HashMap<Uuid, i64> = HashMap::new();
    for event in matches.iter().flat_map(|m| m.events.iter()) {
        if let Some(player_id) = credited_player(event, stat) {
            *counts.entry(player_id).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<PlayerCount> = counts
        .into_iter()
        .filter(|(player_id, _)| allowed.is_none_or(|set| set.contains(player_id)))
        .map(|(player_id, count)| PlayerCount { player_id, count })
        .collect();

    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn match_between(home: Uuid, away: Uuid, home_score: i32, away_score: i32) -> Match {
        Match {
            id: Uuid::new_v4(),
            home_team_id: home,
            away_team_id: away,
            started_at: OffsetDateTime::UNIX_EPOCH,
            ended_at: None,
            events: Vec::new(),
            home_score,
            away_score,
            winner_team_id: None,
        }
    }

    fn event(event_type: EventType) -> MatchEvent {
        MatchEvent {
            timestamp: OffsetDateTime::UNIX_EPOCH,
            event_type,
            team_id: None,
            player_id: None,
            secondary_player_id: None,
            minute: None,
            notes: None,
        }
    }

    #[test]
    fn side_rows_mirror_the_comparison() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let [h, a] = side_rows(&match_between(home, away, 3, 1));
        assert_eq!(h.team_id, home);
        assert_eq!((h.goals_for, h.win, h.draw), (3, 1, 0));
        assert_eq!((a.goals_for, a.win, a.draw), (1, 0, 0));

        let [h, a] = side_rows(&match_between(home, away, 2, 2));
        assert_eq!((h.win, h.draw), (0, 1));
        assert_eq!((a.win, a.draw), (0, 1));
    }

    #[test]
    fn fold_sums_home_and_away_appearances() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let matches = vec![
            match_between(a, b, 2, 0),
            match_between(c, a, 1, 3),
        ];
        let totals = fold_sides(matches.iter().flat_map(side_rows));
        let for_a = totals.iter().find(|t| t.team_id == a).unwrap();
        assert_eq!(for_a.goals, 5);
        assert_eq!(for_a.wins, 2);
        assert_eq!(for_a.draws, 0);
    }

    #[test]
    fn points_are_three_one_zero() {
        let t = TeamTotals {
            team_id: Uuid::new_v4(),
            goals: 9,
            wins: 2,
            draws: 3,
        };
        assert_eq!(t.points(), 9);
    }

    #[test]
    fn rank_teams_sorts_by_requested_stat() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        // a wins 1-0, then b wins 5-4: b leads on goals, both have one win.
        let matches = vec![match_between(a, b, 1, 0), match_between(b, a, 5, 4)];

        let by_goals = rank_teams(&matches, TeamStat::Goals, 20);
        assert_eq!(by_goals[0].team_id, b);

        let by_wins = rank_teams(&matches, TeamStat::Wins, 20);
        assert_eq!(by_wins[0].wins, 1);
        assert_eq!(by_wins[1].wins, 1);
        // equal wins: deterministic id-ascending tie-break
        assert!(by_wins[0].team_id < by_wins[1].team_id);
    }

    #[test]
    fn rank_teams_truncates_to_limit() {
        let teams: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
        let matches: Vec<Match> = teams
            .chunks(2)
            .map(|pair| match_between(pair[0], pair[1], 1, 0))
            .collect();
        assert_eq!(rank_teams(&matches, TeamStat::Points, 2).len(), 2);
    }

    #[test]
    fn empty_corpus_ranks_empty() {
        assert!(rank_teams(&[], TeamStat::Goals, 20).is_empty());
        assert!(rank_players(&[], PlayerStat::Goals, None, 20).is_empty());
    }

    #[test]
    fn goals_credit_the_primary_player() {
        let scorer = Uuid::new_v4();
        let mut goal = event(EventType::Goal);
        goal.player_id = Some(scorer);
        assert_eq!(credited_player(&goal, PlayerStat::Goals), Some(scorer));
        assert_eq!(credited_player(&goal, PlayerStat::Yellow), None);
    }

    #[test]
    fn assist_dual_attribution_counts_both_forms_once() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let (scorer, p, q) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let mut m = match_between(home, away, 1, 0);
        let mut goal = event(EventType::Goal);
        goal.player_id = Some(scorer);
        goal.secondary_player_id = Some(p);
        let mut assist = event(EventType::Assist);
        assist.player_id = Some(q);
        m.events = vec![goal, assist];

        let ranked = rank_players(&[m], PlayerStat::Assists, None, 20);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.count == 1));
        let ids: HashSet<Uuid> = ranked.iter().map(|r| r.player_id).collect();
        assert!(ids.contains(&p) && ids.contains(&q));
        // The scorer gets no assist credit from their own goal.
        assert!(!ids.contains(&scorer));
    }

    #[test]
    fn goal_without_assister_is_excluded_from_assists() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let mut m = match_between(home, away, 1, 0);
        let mut goal = event(EventType::Goal);
        goal.player_id = Some(Uuid::new_v4());
        m.events = vec![goal];

        assert!(rank_players(&[m], PlayerStat::Assists, None, 20).is_empty());
    }

    #[test]
    fn card_counts_group_by_primary_player() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let offender = Uuid::new_v4();
        let mut m = match_between(home, away, 0, 0);
        let mut y1 = event(EventType::Yellow);
        y1.player_id = Some(offender);
        let mut y2 = event(EventType::Yellow);
        y2.player_id = Some(offender);
        let mut red = event(EventType::Red);
        red.player_id = Some(offender);
        m.events = vec![y1, y2, red];

        let yellows = rank_players(&[m.clone()], PlayerStat::Yellow, None, 20);
        assert_eq!(yellows, vec![PlayerCount { player_id: offender, count: 2 }]);
        let reds = rank_players(&[m], PlayerStat::Red, None, 20);
        assert_eq!(reds, vec![PlayerCount { player_id: offender, count: 1 }]);
    }

    #[test]
    fn scope_filter_drops_players_outside_the_set() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let (local, foreign) = (Uuid::new_v4(), Uuid::new_v4());
        let mut m = match_between(home, away, 2, 0);
        let mut g1 = event(EventType::Goal);
        g1.player_id = Some(local);
        let mut g2 = event(EventType::Goal);
        g2.player_id = Some(foreign);
        m.events = vec![g1, g2];

        let allowed: HashSet<Uuid> = [local].into_iter().collect();
        let ranked = rank_players(&[m], PlayerStat::Goals, Some(&allowed), 20);
        assert_eq!(ranked, vec![PlayerCount { player_id: local, count: 1 }]);
    }

    #[test]
    fn scope_filter_applies_before_truncation() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let heavy = Uuid::new_v4();
        let light = Uuid::new_v4();
        let mut m = match_between(home, away, 3, 0);
        let mut events = Vec::new();
        for _ in 0..2 {
            let mut g = event(EventType::Goal);
            g.player_id = Some(heavy);
            events.push(g);
        }
        let mut g = event(EventType::Goal);
        g.player_id = Some(light);
        events.push(g);
        m.events = events;

        // With limit 1 and the top scorer out of scope, the in-scope player
        // must still surface.
        let allowed: HashSet<Uuid> = [light].into_iter().collect();
        let ranked = rank_players(&[m], PlayerStat::Goals, Some(&allowed), 1);
        assert_eq!(ranked, vec![PlayerCount { player_id: light, count: 1 }]);
    }
}
