//! Counsel Match - counsellor availability matching engine
//!
//! Given a requested session, selects the counsellors whose recurring weekly
//! schedule and preferences fit, drops those already booked around that time,
//! and orders the rest by how soon their next opening comes up.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{AvailabilityMatcher, MatchError, MatchResult, RankingPolicy, TimeCode};
pub use crate::models::{BookedSession, CounsellorProfile, MatchRequest, MatchResponse, MatchingPolicy, WeeklySchedule, Weekday};
