// Core algorithm exports
pub mod conflict;
pub mod eligibility;
pub mod error;
pub mod matcher;
pub mod ranking;
pub mod time_code;

pub use conflict::{exclude_busy, ConflictWindow};
pub use eligibility::{accepted_genders, buffered_start, EligibilityPredicate, MatchTarget};
pub use error::MatchError;
pub use matcher::{AvailabilityMatcher, MatchResult};
pub use ranking::{rank, try_rank, RankingPolicy, RankingStatus};
pub use time_code::{RawTimeCode, TimeCode};
