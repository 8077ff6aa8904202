use crate::core::matcher::MatchResult;
use crate::core::ranking::RankingStatus;
use crate::models::domain::CounsellorProfile;
use serde::{Deserialize, Serialize};

/// Ordered counsellor availability for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub counsellors: Vec<CounsellorProfile>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "busyExcluded")]
    pub busy_excluded: usize,
    /// False when ranking degraded and `counsellors` is in repository order
    pub ranked: bool,
}

impl From<MatchResult> for MatchResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            ranked: result.ranking == RankingStatus::Ranked,
            counsellors: result.counsellors,
            total_candidates: result.total_candidates,
            busy_excluded: result.busy_excluded,
        }
    }
}
