use crate::core::error::MatchError;
use crate::core::time_code::TimeCode;
use crate::models::{CounsellorProfile, Weekday};
use serde::{Deserialize, Serialize};

/// What to do when a counsellor has no opening after the requested start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingPolicy {
    /// Legacy behaviour: a single counsellor without a later opening leaves
    /// the whole list in repository order.
    #[default]
    DegradeToUnsorted,
    /// Sort everyone with an opening, then append the rest in repository order.
    UnavailableLast,
}

/// Whether the returned list is actually ordered by next opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStatus {
    Ranked,
    Unsorted,
}

/// Start of the counsellor's earliest `weekday` window strictly after `after`
#[inline]
pub fn closest_opening(counsellor: &CounsellorProfile, weekday: Weekday, after: TimeCode) -> Option<TimeCode> {
    counsellor.schedule.earliest_opening_after(weekday, after)
}

/// Sort by closest opening, failing without touching the slice if any
/// counsellor has none.
///
/// A single counsellor is never compared, so it cannot fail.
pub fn try_rank(counsellors: &mut [CounsellorProfile], weekday: Weekday, after: TimeCode) -> Result<(), MatchError> {
    if counsellors.len() < 2 {
        return Ok(());
    }

    if let Some(missing) = counsellors
        .iter()
        .find(|c| closest_opening(c, weekday, after).is_none())
    {
        return Err(MatchError::RankingDegraded {
            counsellor_id: missing.id.clone(),
        });
    }

    // stable: ties keep repository order
    counsellors.sort_by_key(|c| closest_opening(c, weekday, after));
    Ok(())
}

/// Order counsellors most-imminently-available first under `policy`
pub fn rank(
    counsellors: &mut [CounsellorProfile],
    weekday: Weekday,
    after: TimeCode,
    policy: RankingPolicy,
) -> RankingStatus {
    match policy {
        RankingPolicy::DegradeToUnsorted => match try_rank(counsellors, weekday, after) {
            Ok(()) => RankingStatus::Ranked,
            Err(e) => {
                tracing::warn!("{}; returning {} counsellors unsorted", e, counsellors.len());
                RankingStatus::Unsorted
            }
        },
        RankingPolicy::UnavailableLast => {
            counsellors.sort_by_key(|c| match closest_opening(c, weekday, after) {
                Some(start) => (false, start),
                None => (true, TimeCode::MIDNIGHT),
            });
            RankingStatus::Ranked
        }
    }
}
