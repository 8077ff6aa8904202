use crate::core::time_code::TimeCode;
use crate::models::{CategoryId, CounsellorProfile, GenderPreference, MatchRequest, MatchingPolicy, Role, Weekday};
use chrono::{DateTime, Duration, Timelike, Utc};

/// Typed eligibility predicate for the counsellor repository.
///
/// A counsellor is eligible when all clauses hold:
/// - role is `counsellor`
/// - gender preference is one of `accepted_genders`
/// - `category_id` (when set) is among their preferred categories
/// - their `weekday` schedule has a window starting at or after `earliest_start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityPredicate {
    pub role: Role,
    pub accepted_genders: &'static [GenderPreference],
    pub category_id: Option<CategoryId>,
    pub weekday: Weekday,
    pub earliest_start: TimeCode,
}

impl EligibilityPredicate {
    /// Evaluate every clause against a profile
    #[inline]
    pub fn matches(&self, profile: &CounsellorProfile) -> bool {
        self.matches_static_clauses(profile) && self.matches_schedule(profile)
    }

    /// Role, gender and category clauses only
    #[inline]
    pub fn matches_static_clauses(&self, profile: &CounsellorProfile) -> bool {
        if profile.role != self.role {
            return false;
        }

        if !self.accepted_genders.contains(&profile.gender_preference) {
            return false;
        }

        if let Some(category_id) = &self.category_id {
            if !profile.preferred_category_ids.contains(category_id) {
                return false;
            }
        }

        true
    }

    /// Schedule clause only
    #[inline]
    pub fn matches_schedule(&self, profile: &CounsellorProfile) -> bool {
        profile.schedule.has_opening_from(self.weekday, self.earliest_start)
    }
}

/// Counsellor gender preferences compatible with a requested one.
///
/// Asymmetric: a request without a preference (or asking for "both") only
/// reaches counsellors who themselves accept both.
pub fn accepted_genders(requested: Option<GenderPreference>) -> &'static [GenderPreference] {
    match requested {
        Some(GenderPreference::Male) => &[GenderPreference::Male, GenderPreference::Both],
        Some(GenderPreference::Female) => &[GenderPreference::Female, GenderPreference::Both],
        Some(GenderPreference::Both) | None => &[GenderPreference::Both],
    }
}

/// Requested start time, pushed forward when it is less than
/// `preparation_minutes` away from `now`.
///
/// A pushed start is rounded up to the next whole minute, so it always leaves
/// at least `preparation_minutes` of notice. A start that is already far
/// enough ahead is returned as its own time of day.
///
/// Works on the UTC time of day and inherits [`TimeCode::add_minutes`]
/// clamping, so a push past midnight yields 23:59 rather than the next day.
pub fn buffered_start(start: DateTime<Utc>, now: DateTime<Utc>, preparation_minutes: u32) -> TimeCode {
    let requested = TimeCode::from_instant(start);
    let earliest = now + Duration::minutes(i64::from(preparation_minutes));

    if start >= earliest {
        return requested;
    }

    // `requested` has no seconds, so measure the shortfall from its minute
    let minute_start = start
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(start);
    let shortfall = earliest - minute_start;
    let mut minutes = shortfall.num_minutes();
    if shortfall > Duration::minutes(minutes) {
        minutes += 1;
    }

    requested.add_minutes(u32::try_from(minutes).unwrap_or(u32::MAX))
}

/// Everything derived from a request before touching any repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTarget {
    pub weekday: Weekday,
    /// Unbuffered UTC start time, used for ranking
    pub requested_start: TimeCode,
    pub buffered_start: TimeCode,
    pub predicate: EligibilityPredicate,
}

impl MatchTarget {
    pub fn for_request(request: &MatchRequest, now: DateTime<Utc>, policy: &MatchingPolicy) -> Self {
        let weekday = Weekday::of_instant(request.start_instant);
        let buffered_start = buffered_start(request.start_instant, now, policy.preparation_minutes);

        let predicate = EligibilityPredicate {
            role: Role::Counsellor,
            accepted_genders: accepted_genders(request.gender_preference),
            category_id: request.category_id.clone(),
            weekday,
            earliest_start: buffered_start,
        };

        Self {
            weekday,
            requested_start: TimeCode::from_instant(request.start_instant),
            buffered_start,
            predicate,
        }
    }
}
