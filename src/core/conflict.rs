use crate::models::{BookedSession, CounsellorProfile, MatchRequest};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Absolute window around a request in which an existing booking counts as a clash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ConflictWindow {
    /// `[request start - buffer, request end + buffer]`
    pub fn around(request: &MatchRequest, buffer_minutes: u32) -> Self {
        let buffer = Duration::minutes(i64::from(buffer_minutes));
        Self {
            start: request.start_instant - buffer,
            end: request.end_instant + buffer,
        }
    }

    /// Inclusive on both ends
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Only the session's start is checked: a long session that began
    /// before the window and runs through it does not count.
    #[inline]
    pub fn clashes_with(&self, session: &BookedSession) -> bool {
        self.contains(session.start_instant)
    }
}

/// Drop candidates owning a session that clashes with `window`.
///
/// Returns the survivors in their original order and the number removed.
/// An empty result is a valid outcome, not an error.
pub fn exclude_busy(
    candidates: Vec<CounsellorProfile>,
    sessions: &[BookedSession],
    window: &ConflictWindow,
) -> (Vec<CounsellorProfile>, usize) {
    let busy: HashSet<&str> = sessions
        .iter()
        .filter(|session| window.clashes_with(session))
        .map(|session| session.counsellor_id.as_str())
        .collect();

    if busy.is_empty() {
        return (candidates, 0);
    }

    let before = candidates.len();
    let available: Vec<CounsellorProfile> = candidates
        .into_iter()
        .filter(|candidate| !busy.contains(candidate.id.as_str()))
        .collect();
    let excluded = before - available.len();

    tracing::debug!("Excluded {} busy counsellors", excluded);

    (available, excluded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenderPreference, Role, SessionStatus, WeeklySchedule};
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, hour, minute, 0).unwrap()
    }

    fn create_candidate(id: &str) -> CounsellorProfile {
        CounsellorProfile {
            id: id.to_string(),
            role: Role::Counsellor,
            gender_preference: GenderPreference::Both,
            preferred_category_ids: Default::default(),
            schedule: WeeklySchedule::new(),
        }
    }

    fn create_session(counsellor_id: &str, start: DateTime<Utc>, minutes: i64) -> BookedSession {
        BookedSession {
            id: format!("s-{}", counsellor_id),
            counsellor_id: counsellor_id.to_string(),
            start_instant: start,
            end_instant: start + Duration::minutes(minutes),
            status: SessionStatus::Confirmed,
        }
    }

    fn create_window() -> ConflictWindow {
        let request = MatchRequest {
            category_id: None,
            gender_preference: None,
            start_instant: at(14, 0),
            end_instant: at(15, 0),
        };
        ConflictWindow::around(&request, 30)
    }

    #[test]
    fn test_window_bounds() {
        let window = create_window();
        assert_eq!(window.start, at(13, 30));
        assert_eq!(window.end, at(15, 30));

        assert!(window.contains(at(13, 30)));
        assert!(window.contains(at(15, 30)));
        assert!(!window.contains(at(13, 29)));
        assert!(!window.contains(at(15, 31)));
    }

    #[test]
    fn test_only_session_start_is_checked() {
        let window = create_window();

        // began before the window, still running during the request
        assert!(!window.clashes_with(&create_session("a", at(12, 0), 180)));
        assert!(window.clashes_with(&create_session("a", at(14, 10), 50)));
    }

    #[test]
    fn test_exclude_busy_removes_by_id() {
        let window = create_window();
        let candidates = vec![create_candidate("a"), create_candidate("b"), create_candidate("c")];
        let sessions = vec![
            create_session("b", at(14, 10), 50),
            create_session("c", at(9, 0), 60),   // outside the window
            create_session("zz", at(14, 0), 60), // not a candidate
        ];

        let (available, excluded) = exclude_busy(candidates, &sessions, &window);

        let ids: Vec<&str> = available.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(excluded, 1);
    }

    #[test]
    fn test_everyone_busy_is_empty_not_error() {
        let window = create_window();
        let candidates = vec![create_candidate("a")];
        let sessions = vec![
            create_session("a", at(13, 45), 30),
            create_session("a", at(15, 0), 30),
        ];

        let (available, excluded) = exclude_busy(candidates, &sessions, &window);
        assert!(available.is_empty());
        assert_eq!(excluded, 1);
    }
}
