pub mod auth;
pub mod eligibility;
pub mod error;
pub mod messages;
pub mod roster;
pub mod scoring;
pub mod store;
pub mod worker;

pub use campa_api::{AuthSession, Base, Identity, Match, MatchCandidate, Role, Team};
pub use error::{EngineError, EngineResult};
