use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::dialogue::ConversationState;
use crate::models::domain::{MatchResult, ProgramRecord, UserProfile};

/// Response for the matching endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub matches: Vec<MatchResult>,
    pub total_programs: usize,
}

/// Catalog search result with summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSearchResponse {
    pub programs: Vec<ProgramRecord>,
    pub count: usize,
    /// Mean per-applicant amount in KRW, absent when nothing matched
    pub average_max_amount: Option<f64>,
}

/// Reply to a conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub session_id: Uuid,
    pub reply: String,
    pub state: ConversationState,
    pub profile: UserProfile,
    pub is_complete: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub programs: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
