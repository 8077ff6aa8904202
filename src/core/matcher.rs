use crate::core::{
    conflict::{exclude_busy, ConflictWindow},
    eligibility::MatchTarget,
    error::MatchError,
    ranking::{rank, RankingStatus},
    time_code::TimeCode,
};
use crate::models::{CounsellorId, CounsellorProfile, MatchRequest, MatchingPolicy, Weekday};
use crate::services::{CounsellorRepository, SessionRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub counsellors: Vec<CounsellorProfile>,
    /// Eligible counsellors before conflict filtering
    pub total_candidates: usize,
    pub busy_excluded: usize,
    pub ranking: RankingStatus,
    pub weekday: Weekday,
    pub buffered_start: TimeCode,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Target derivation: UTC weekday, buffered start, eligibility predicate
/// 2. Candidate fetch from the counsellor repository
/// 3. Busy-session fetch and conflict exclusion
/// 4. Ranking by closest opening
///
/// Holds no state across calls. The two repository reads happen at
/// different moments, so a session booked in between is not seen.
#[derive(Clone)]
pub struct AvailabilityMatcher {
    counsellors: Arc<dyn CounsellorRepository>,
    sessions: Arc<dyn SessionRepository>,
    policy: MatchingPolicy,
}

impl AvailabilityMatcher {
    pub fn new(
        counsellors: Arc<dyn CounsellorRepository>,
        sessions: Arc<dyn SessionRepository>,
        policy: MatchingPolicy,
    ) -> Self {
        Self {
            counsellors,
            sessions,
            policy,
        }
    }

    pub fn policy(&self) -> &MatchingPolicy {
        &self.policy
    }

    /// Ordered counsellors available for `request`, as of the system clock
    pub async fn match_available_counsellors(
        &self,
        request: &MatchRequest,
    ) -> Result<Vec<CounsellorProfile>, MatchError> {
        self.find_matches(request, Utc::now())
            .await
            .map(|result| result.counsellors)
    }

    /// Run the full pipeline with an explicit "now".
    ///
    /// Deterministic for fixed repository contents. Repository errors are
    /// returned unchanged; a degraded ranking is not an error.
    #[tracing::instrument(skip(self, request), fields(start = %request.start_instant))]
    pub async fn find_matches(
        &self,
        request: &MatchRequest,
        now: DateTime<Utc>,
    ) -> Result<MatchResult, MatchError> {
        // Stage 1: Target derivation
        let target = MatchTarget::for_request(request, now, &self.policy);

        tracing::debug!(
            "Matching on {} from {} (requested {})",
            target.weekday,
            target.buffered_start,
            target.requested_start
        );

        // Stage 2: Eligible candidates
        let candidates = self.counsellors.find_eligible(&target.predicate).await?;
        let total_candidates = candidates.len();

        if candidates.is_empty() {
            tracing::info!("No eligible counsellors on {}", target.weekday);
            return Ok(MatchResult {
                counsellors: candidates,
                total_candidates,
                busy_excluded: 0,
                ranking: RankingStatus::Ranked,
                weekday: target.weekday,
                buffered_start: target.buffered_start,
            });
        }

        // Stage 3: Conflict exclusion
        let window = ConflictWindow::around(request, self.policy.conflict_buffer_minutes);
        let ids: Vec<CounsellorId> = candidates.iter().map(|c| c.id.clone()).collect();
        let sessions = self
            .sessions
            .find_by_counsellors_in_window(&ids, &window)
            .await?;

        let (mut available, busy_excluded) = exclude_busy(candidates, &sessions, &window);

        // Stage 4: Ranking
        let ranking = rank(
            &mut available,
            target.weekday,
            target.requested_start,
            self.policy.ranking,
        );

        tracing::info!(
            "Returning {} counsellors ({} candidates, {} busy, {:?})",
            available.len(),
            total_candidates,
            busy_excluded,
            ranking
        );

        Ok(MatchResult {
            counsellors: available,
            total_candidates,
            busy_excluded,
            ranking,
            weekday: target.weekday,
            buffered_start: target.buffered_start,
        })
    }
}
