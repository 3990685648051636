pub mod client;
pub mod supabase;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the Supabase wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Base {
    pub id: u32,
    pub name: String,
}

/// One recorded outcome between two teams at one base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Opaque identifier assigned by the store on creation.
    pub id: String,
    pub base_id: u32,
    pub team1_id: u32,
    pub team2_id: u32,
    /// `None` means the match was a tie.
    pub winner_id: Option<u32>,
    /// Only completed matches contribute to scores.
    pub completed: bool,
    /// Assigned by the store on creation.
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn is_tie(&self) -> bool {
        self.completed && self.winner_id.is_none()
    }

    /// Whether the team played in this match, in either slot.
    pub fn involves(&self, team_id: u32) -> bool {
        self.team1_id == team_id || self.team2_id == team_id
    }
}

/// A match outcome as submitted by a base operator, before the store has
/// assigned an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub base_id: u32,
    pub team1_id: u32,
    pub team2_id: u32,
    pub winner_id: Option<u32>,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Authentication types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Base,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Base => "base",
        }
    }
}

/// An authenticated principal. Admin always has id 0; base ids are 1–10.
/// Used only for authentication, never persisted as tournament data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub role: Role,
    pub id: u32,
}

/// Opaque authenticated-session token returned by the auth service.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    pub access_token: String,
    pub expires_in: u64,
}
