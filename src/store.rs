use crate::eligibility::has_team_played_at_base;
use crate::error::{EngineError, EngineResult};
use campa_api::client::{ApiResult, StoreClient};
use campa_api::{Match, MatchCandidate};
use log::{debug, error};

/// Remote persistence seam for match records. `StoreClient` is the
/// production implementation; tests inject in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait MatchBackend {
    async fn fetch_matches(&self) -> ApiResult<Vec<Match>>;
    async fn insert_match(&self, candidate: &MatchCandidate) -> ApiResult<Match>;
    async fn delete_all_matches(&self) -> ApiResult<()>;
}

impl MatchBackend for StoreClient {
    async fn fetch_matches(&self) -> ApiResult<Vec<Match>> {
        StoreClient::fetch_matches(self).await
    }

    async fn insert_match(&self, candidate: &MatchCandidate) -> ApiResult<Match> {
        StoreClient::insert_match(self, candidate).await
    }

    async fn delete_all_matches(&self) -> ApiResult<()> {
        StoreClient::delete_all_matches(self).await
    }
}

/// Write-through cache of the authoritative match records. The store is the
/// single owner of the match collection; mutating operations take
/// `&mut self`, so two writes can never interleave on one instance.
pub struct MatchStore<B = StoreClient> {
    backend: B,
    matches: Vec<Match>,
}

impl<B: MatchBackend> MatchStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            matches: Vec::new(),
        }
    }

    /// Replace the cache with the remote contents (newest first) and return
    /// the new snapshot. On failure the previous cache is kept untouched,
    /// but the caller receives an empty list; the cause goes to the log.
    pub async fn refresh(&mut self) -> Vec<Match> {
        match self.backend.fetch_matches().await {
            Ok(matches) => {
                debug!("fetched {} matches", matches.len());
                self.matches = matches;
                self.matches.clone()
            }
            Err(e) => {
                error!("Error fetching matches: {e}");
                Vec::new()
            }
        }
    }

    /// Validate and record a new match. The duplicate-pair check runs here
    /// against the cache, not only in the eligibility query, so two
    /// submissions racing past the same eligibility snapshot cannot both
    /// land. On a remote failure the cache is left unchanged.
    pub async fn insert(&mut self, candidate: MatchCandidate) -> EngineResult<Match> {
        self.validate(&candidate)?;

        let stored = self.backend.insert_match(&candidate).await.map_err(|e| {
            error!("Error adding match: {e}");
            EngineError::RemoteWrite(e)
        })?;

        self.matches.push(stored.clone());
        Ok(stored)
    }

    /// Current cache snapshot. Synchronous and infallible.
    pub fn all(&self) -> &[Match] {
        &self.matches
    }

    /// Cached matches recorded at one base, for the operator's history view.
    pub fn matches_at_base(&self, base_id: u32) -> Vec<Match> {
        self.matches
            .iter()
            .filter(|m| m.base_id == base_id)
            .cloned()
            .collect()
    }

    /// Delete every remote match record, then clear the cache. The cache is
    /// untouched when the remote delete fails.
    pub async fn reset_all(&mut self) -> EngineResult<()> {
        self.backend.delete_all_matches().await.map_err(|e| {
            error!("Error resetting data: {e}");
            EngineError::RemoteWrite(e)
        })?;
        self.matches.clear();
        Ok(())
    }

    fn validate(&self, candidate: &MatchCandidate) -> EngineResult<()> {
        if candidate.team1_id == candidate.team2_id {
            return Err(EngineError::Validation(
                "Cannot select the same team twice".into(),
            ));
        }

        if let Some(winner_id) = candidate.winner_id
            && winner_id != candidate.team1_id
            && winner_id != candidate.team2_id
        {
            return Err(EngineError::Validation(
                "Winner must be one of the two participating teams".into(),
            ));
        }

        for team_id in [candidate.team1_id, candidate.team2_id] {
            if has_team_played_at_base(&self.matches, team_id, candidate.base_id) {
                return Err(EngineError::Validation(format!(
                    "Team {team_id} has already played at base {}",
                    candidate.base_id
                )));
            }
        }

        Ok(())
    }
}
