/// Wire types for the Supabase backing store.
/// REST rows: `{base}/rest/v1/matches` (PostgREST), auth tokens:
/// `{base}/auth/v1/token?grant_type=password` (GoTrue).
use crate::{Match, MatchCandidate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct MatchRow {
    pub id: String,
    pub base_id: u32,
    pub team1_id: u32,
    pub team2_id: u32,
    pub winner_id: Option<u32>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl MatchRow {
    pub fn into_match(self) -> Match {
        Match {
            id: self.id,
            base_id: self.base_id,
            team1_id: self.team1_id,
            team2_id: self.team2_id,
            winner_id: self.winner_id,
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}

/// Insert body; `id` and `created_at` are assigned server-side.
#[derive(Serialize, Debug)]
pub struct NewMatchRow {
    pub base_id: u32,
    pub team1_id: u32,
    pub team2_id: u32,
    pub winner_id: Option<u32>,
    pub completed: bool,
}

impl NewMatchRow {
    pub fn from_candidate(candidate: &MatchCandidate) -> Self {
        Self {
            base_id: candidate.base_id,
            team1_id: candidate.team1_id,
            team2_id: candidate.team2_id,
            winner_id: candidate.winner_id,
            completed: candidate.completed,
        }
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct AuthTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

/// GoTrue error payloads vary across versions; all three fields show up
/// in the wild.
#[derive(Deserialize, Default, Debug)]
pub struct AuthErrorBody {
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub msg: Option<String>,
}

impl AuthErrorBody {
    pub fn message(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.error)
            .unwrap_or_else(|| "invalid credentials".into())
    }
}
