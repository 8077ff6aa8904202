use crate::core::ranking::RankingPolicy;
use crate::models::schedule::WeeklySchedule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub type CounsellorId = String;
pub type CategoryId = String;

/// Account role of a user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Counsellor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Counsellor => "counsellor",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "counsellor" => Ok(Role::Counsellor),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Gender a counsellor prefers to work with, or a requester prefers in a counsellor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderPreference {
    Male,
    Female,
    Both,
}

impl GenderPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            GenderPreference::Male => "male",
            GenderPreference::Female => "female",
            GenderPreference::Both => "both",
        }
    }
}

impl FromStr for GenderPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(GenderPreference::Male),
            "female" => Ok(GenderPreference::Female),
            "both" => Ok(GenderPreference::Both),
            other => Err(format!("unknown gender preference '{}'", other)),
        }
    }
}

impl fmt::Display for GenderPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counsellor record as supplied by the user store (read-only here)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounsellorProfile {
    pub id: CounsellorId,
    pub role: Role,
    #[serde(rename = "genderPreference")]
    pub gender_preference: GenderPreference,
    #[serde(rename = "preferredCategoryIds", default)]
    pub preferred_category_ids: HashSet<CategoryId>,
    #[serde(default)]
    pub schedule: WeeklySchedule,
}

/// Lifecycle state of a booked session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SessionStatus::Pending),
            "confirmed" => Ok(SessionStatus::Confirmed),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            other => Err(format!("unknown session status '{}'", other)),
        }
    }
}

/// Session already booked with a counsellor (read-only here)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedSession {
    pub id: String,
    #[serde(rename = "counsellorId")]
    pub counsellor_id: CounsellorId,
    #[serde(rename = "startInstant")]
    pub start_instant: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "endInstant")]
    pub end_instant: chrono::DateTime<chrono::Utc>,
    pub status: SessionStatus,
}

/// Tunable matching policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingPolicy {
    /// Minimum notice, in minutes, between now and a counsellor's opening
    pub preparation_minutes: u32,
    /// Padding, in minutes, on both sides of the request when looking for clashes
    pub conflict_buffer_minutes: u32,
    pub ranking: RankingPolicy,
}

impl Default for MatchingPolicy {
    fn default() -> Self {
        Self {
            preparation_minutes: 30,
            conflict_buffer_minutes: 30,
            ranking: RankingPolicy::default(),
        }
    }
}
