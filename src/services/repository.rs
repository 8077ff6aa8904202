use crate::core::conflict::ConflictWindow;
use crate::core::eligibility::EligibilityPredicate;
use crate::models::{BookedSession, CounsellorId, CounsellorProfile};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by repository collaborators; never retried by the matcher
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to decode record: {0}")]
    Decode(String),

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Read access to counsellor profiles
#[async_trait]
pub trait CounsellorRepository: Send + Sync {
    /// All profiles satisfying every clause of `predicate`.
    ///
    /// The order must be stable for unchanged contents: an unranked result
    /// is returned to the caller as read.
    async fn find_eligible(&self, predicate: &EligibilityPredicate) -> Result<Vec<CounsellorProfile>, RepositoryError>;
}

/// Read access to booked sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Sessions owned by any of `counsellor_ids` that start inside `window`,
    /// in a stable order
    async fn find_by_counsellors_in_window(
        &self,
        counsellor_ids: &[CounsellorId],
        window: &ConflictWindow,
    ) -> Result<Vec<BookedSession>, RepositoryError>;
}
