use campa_api::{Base, Role, Team};

pub const TEAM_COUNT: usize = 10;
pub const BASE_COUNT: usize = 10;

const TEAM_NAMES: [&str; TEAM_COUNT] = [
    "Team Alpha",
    "Team Beta",
    "Team Gamma",
    "Team Delta",
    "Team Epsilon",
    "Team Zeta",
    "Team Eta",
    "Team Theta",
    "Team Iota",
    "Team Kappa",
];

/// One row of the shared-secret table. Only the auth seam reads these.
#[derive(Debug, Clone)]
pub struct Credential {
    pub role: Role,
    pub id: u32,
    pub secret: String,
}

/// Immutable catalog of the event's teams and bases, built once at startup
/// and never mutated.
#[derive(Debug, Clone)]
pub struct Roster {
    teams: Vec<Team>,
    bases: Vec<Base>,
    credentials: Vec<Credential>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        let teams = TEAM_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| Team {
                id: i as u32 + 1,
                name: (*name).to_owned(),
            })
            .collect();

        let bases: Vec<Base> = (1..=BASE_COUNT as u32)
            .map(|id| Base {
                id,
                name: format!("Base {id}"),
            })
            .collect();

        let mut credentials = vec![Credential {
            role: Role::Admin,
            id: 0,
            secret: "adminpass".to_owned(),
        }];
        credentials.extend(bases.iter().map(|base| Credential {
            role: Role::Base,
            id: base.id,
            secret: format!("base{}pass", base.id),
        }));

        Self { teams, bases, credentials }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    pub fn team(&self, id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn base(&self, id: u32) -> Option<&Base> {
        self.bases.iter().find(|b| b.id == id)
    }

    /// Default secret for an identity. Exists so a local verifier can stand
    /// in for the remote auth service; everything outside the auth seam
    /// should ignore it.
    pub fn credential(&self, role: Role, id: u32) -> Option<&str> {
        self.credentials
            .iter()
            .find(|c| c.role == role && c.id == id)
            .map(|c| c.secret.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_ten_teams_and_ten_bases_in_id_order() {
        let roster = Roster::new();
        assert_eq!(roster.teams().len(), TEAM_COUNT);
        assert_eq!(roster.bases().len(), BASE_COUNT);
        let ids: Vec<u32> = roster.teams().iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(roster.teams()[0].name, "Team Alpha");
        assert_eq!(roster.teams()[9].name, "Team Kappa");
        assert_eq!(roster.bases()[4].name, "Base 5");
    }

    #[test]
    fn lookups_are_total() {
        let roster = Roster::new();
        assert_eq!(roster.team(7).map(|t| t.name.as_str()), Some("Team Eta"));
        assert_eq!(roster.base(10).map(|b| b.id), Some(10));
        assert!(roster.team(0).is_none());
        assert!(roster.team(11).is_none());
        assert!(roster.base(42).is_none());
    }

    #[test]
    fn credential_table_covers_admin_and_every_base() {
        let roster = Roster::new();
        assert_eq!(roster.credential(Role::Admin, 0), Some("adminpass"));
        assert_eq!(roster.credential(Role::Base, 1), Some("base1pass"));
        assert_eq!(roster.credential(Role::Base, 10), Some("base10pass"));
        assert!(roster.credential(Role::Base, 11).is_none());
        assert!(roster.credential(Role::Admin, 1).is_none());
    }
}
