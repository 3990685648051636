//! Derived standings. Everything here is a pure fold over the match cache:
//! a decisive match is worth 10 points to the winner, a tie 5 points to
//! each participant, and only completed matches count.

use crate::roster::Roster;
use campa_api::{Base, Match, Team};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const WIN_POINTS: u32 = 10;
pub const TIE_POINTS: u32 = 5;

/// Total points per team id. Every known team appears, at zero when it has
/// no completed matches yet. Addition commutes, so the result does not
/// depend on match order.
pub fn calculate_scores(roster: &Roster, matches: &[Match]) -> BTreeMap<u32, u32> {
    let mut scores: BTreeMap<u32, u32> = roster.teams().iter().map(|t| (t.id, 0)).collect();

    for m in matches.iter().filter(|m| m.completed) {
        match m.winner_id {
            None => {
                for team_id in [m.team1_id, m.team2_id] {
                    if let Some(points) = scores.get_mut(&team_id) {
                        *points += TIE_POINTS;
                    }
                }
            }
            Some(winner_id) => {
                if let Some(points) = scores.get_mut(&winner_id) {
                    *points += WIN_POINTS;
                }
            }
        }
    }

    scores
}

/// One leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct StandingsRow {
    pub team: Team,
    pub points: u32,
    /// Distinct bases at which the team has a completed match, out of 10.
    pub bases_completed: usize,
}

/// Leaderboard, highest points first. The sort is stable, so teams tied on
/// points keep roster order.
pub fn standings(roster: &Roster, matches: &[Match]) -> Vec<StandingsRow> {
    let scores = calculate_scores(roster, matches);
    let mut rows: Vec<StandingsRow> = roster
        .teams()
        .iter()
        .map(|team| {
            let bases: BTreeSet<u32> = matches
                .iter()
                .filter(|m| m.completed && m.involves(team.id))
                .map(|m| m.base_id)
                .collect();
            StandingsRow {
                team: team.clone(),
                points: scores.get(&team.id).copied().unwrap_or(0),
                bases_completed: bases.len(),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

/// Per-base progress indicator.
#[derive(Debug, Clone, Serialize)]
pub struct BaseProgress {
    pub base: Base,
    /// Distinct teams that have played at this base, completed or not.
    pub teams_played: usize,
}

pub fn base_progress(roster: &Roster, matches: &[Match]) -> Vec<BaseProgress> {
    roster
        .bases()
        .iter()
        .map(|base| {
            let teams: BTreeSet<u32> = matches
                .iter()
                .filter(|m| m.base_id == base.id)
                .flat_map(|m| [m.team1_id, m.team2_id])
                .collect();
            BaseProgress {
                base: base.clone(),
                teams_played: teams.len(),
            }
        })
        .collect()
}
