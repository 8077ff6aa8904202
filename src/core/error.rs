use crate::core::time_code::TimeCode;
use crate::services::RepositoryError;
use thiserror::Error;

/// Errors that can occur while matching counsellors to a session request
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Invalid time window: start {start} must be before end {end}")]
    InvalidTimeWindow { start: TimeCode, end: TimeCode },

    /// Raised by the ranker when a counsellor has no opening after the
    /// requested start. Recovered inside the matcher, never surfaced.
    #[error("Ranking degraded: counsellor {counsellor_id} has no later opening that day")]
    RankingDegraded { counsellor_id: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
