//! Which teams may still play at a base. Re-derived by a full scan on every
//! call; the roster caps the match list at 100 entries, so no index is kept.

use crate::roster::Roster;
use campa_api::{Match, Team};

/// Whether any recorded match at the base involves the team, in either
/// slot, completed or not.
pub fn has_team_played_at_base(matches: &[Match], team_id: u32, base_id: u32) -> bool {
    matches
        .iter()
        .any(|m| m.base_id == base_id && m.involves(team_id))
}

/// Teams that have not yet played at the base, in roster order.
pub fn available_teams_for_base<'a>(
    roster: &'a Roster,
    matches: &[Match],
    base_id: u32,
) -> Vec<&'a Team> {
    roster
        .teams()
        .iter()
        .filter(|team| !has_team_played_at_base(matches, team.id, base_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use campa_api::Match;
    use chrono::Utc;

    fn recorded(base_id: u32, team1_id: u32, team2_id: u32, completed: bool) -> Match {
        Match {
            id: format!("{base_id}-{team1_id}-{team2_id}"),
            base_id,
            team1_id,
            team2_id,
            winner_id: Some(team1_id),
            completed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_store_makes_every_team_available() {
        let roster = Roster::new();
        let available = available_teams_for_base(&roster, &[], 1);
        assert_eq!(available.len(), 10);
        // Roster order, not score or id-reversed order.
        assert_eq!(available[0].name, "Team Alpha");
    }

    #[test]
    fn participants_at_a_base_are_excluded_there_only() {
        let roster = Roster::new();
        let matches = vec![recorded(1, 1, 2, true)];

        let at_base_1: Vec<u32> = available_teams_for_base(&roster, &matches, 1)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(at_base_1, (3..=10).collect::<Vec<_>>());

        let at_base_2 = available_teams_for_base(&roster, &matches, 2);
        assert_eq!(at_base_2.len(), 10);
    }

    #[test]
    fn uncompleted_matches_still_block_eligibility() {
        let roster = Roster::new();
        let matches = vec![recorded(4, 7, 8, false)];
        assert!(has_team_played_at_base(&matches, 7, 4));
        assert!(has_team_played_at_base(&matches, 8, 4));
        assert_eq!(available_teams_for_base(&roster, &matches, 4).len(), 8);
    }

    #[test]
    fn eligibility_only_shrinks_as_matches_accumulate() {
        let roster = Roster::new();
        let mut matches = Vec::new();
        let mut previous = available_teams_for_base(&roster, &matches, 2).len();
        for (t1, t2) in [(1, 2), (3, 4), (5, 6), (7, 8), (9, 10)] {
            matches.push(recorded(2, t1, t2, true));
            let now = available_teams_for_base(&roster, &matches, 2).len();
            assert!(now < previous);
            previous = now;
        }
        assert_eq!(previous, 0);
    }
}
