// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod schedule;

pub use domain::{BookedSession, CategoryId, CounsellorId, CounsellorProfile, GenderPreference, MatchingPolicy, Role, SessionStatus};
pub use requests::MatchRequest;
pub use responses::MatchResponse;
pub use schedule::{TimeWindow, WeeklySchedule, Weekday};
