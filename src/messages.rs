use campa_api::{Identity, Match, MatchCandidate, Role};

#[derive(Debug, Clone)]
pub enum EngineRequest {
    Refresh,
    SubmitMatch { candidate: MatchCandidate },
    ResetAll,
    Login { id: u32, password: String, role: Role },
    Logout,
}

#[derive(Debug)]
pub enum EngineResponse {
    /// Full cache snapshot after a refresh (empty when the fetch failed).
    Matches { matches: Vec<Match> },
    MatchRecorded { stored: Match },
    ResetDone,
    /// Carries the new session epoch so consumers can re-anchor.
    LoggedIn { identity: Identity, epoch: u64 },
    LoggedOut { epoch: u64 },
    Error { message: String },
}

/// Response envelope. `epoch` is the session epoch observed when the
/// request started; a consumer that has since seen a `LoggedIn`/`LoggedOut`
/// with a newer epoch should discard the event — that is the orphaned
/// pending write from a logout racing an in-flight operation.
#[derive(Debug)]
pub struct EngineEvent {
    pub epoch: u64,
    pub response: EngineResponse,
}
