// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{UserProfile, Stage, Sector, BusinessScale, SupportNeed, Slot, ProgramRecord, MatchResult, ScoringWeights, BUDGET_UNIT_KRW};
pub use requests::{MessageRequest, SessionMatchesRequest, FindMatchesRequest, ProgramSearchQuery};
pub use responses::{FindMatchesResponse, ProgramSearchResponse, TurnResponse, HealthResponse, ErrorResponse};
