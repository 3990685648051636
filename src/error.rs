use campa_api::client::ApiError;
use std::fmt;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug)]
pub enum EngineError {
    /// Malformed or illegal input, caught before any remote call is made.
    Validation(String),
    RemoteRead(ApiError),
    RemoteWrite(ApiError),
    /// Generic authentication failure. Callers cannot tell a rejected
    /// password from an unreachable auth service; the distinguishing cause
    /// goes to the log.
    InvalidCredentials,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Validation(msg) => write!(f, "{msg}"),
            EngineError::RemoteRead(e) => write!(f, "Failed to read from the store: {e}"),
            EngineError::RemoteWrite(e) => write!(f, "Failed to write to the store: {e}"),
            EngineError::InvalidCredentials => write!(f, "Invalid credentials"),
        }
    }
}

impl EngineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}
