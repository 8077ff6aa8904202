use crate::models::domain::{CategoryId, GenderPreference};
use serde::{Deserialize, Serialize};

/// Session a requester wants a counsellor for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(rename = "categoryId", default)]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "genderPreference", default)]
    pub gender_preference: Option<GenderPreference>,
    #[serde(rename = "startInstant")]
    pub start_instant: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "endInstant")]
    pub end_instant: chrono::DateTime<chrono::Utc>,
}
