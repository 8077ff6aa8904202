use crate::core::conflict::ConflictWindow;
use crate::core::eligibility::EligibilityPredicate;
use crate::models::{BookedSession, CounsellorId, CounsellorProfile};
use crate::services::repository::{CounsellorRepository, RepositoryError, SessionRepository};
use async_trait::async_trait;
use std::collections::HashSet;

/// Repository over an in-memory snapshot of profiles and sessions.
///
/// Implements both repository traits so one value can back a matcher.
/// Results keep the insertion order of the snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    counsellors: Vec<CounsellorProfile>,
    sessions: Vec<BookedSession>,
}

impl InMemoryRepository {
    pub fn new(counsellors: Vec<CounsellorProfile>, sessions: Vec<BookedSession>) -> Self {
        Self { counsellors, sessions }
    }

    pub fn counsellors(&self) -> &[CounsellorProfile] {
        &self.counsellors
    }

    pub fn sessions(&self) -> &[BookedSession] {
        &self.sessions
    }
}

#[async_trait]
impl CounsellorRepository for InMemoryRepository {
    async fn find_eligible(&self, predicate: &EligibilityPredicate) -> Result<Vec<CounsellorProfile>, RepositoryError> {
        Ok(self
            .counsellors
            .iter()
            .filter(|profile| predicate.matches(profile))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn find_by_counsellors_in_window(
        &self,
        counsellor_ids: &[CounsellorId],
        window: &ConflictWindow,
    ) -> Result<Vec<BookedSession>, RepositoryError> {
        let wanted: HashSet<&str> = counsellor_ids.iter().map(String::as_str).collect();

        Ok(self
            .sessions
            .iter()
            .filter(|session| wanted.contains(session.counsellor_id.as_str()))
            .filter(|session| window.clashes_with(session))
            .cloned()
            .collect())
    }
}
