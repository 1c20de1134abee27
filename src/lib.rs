//! Support Match - sports-industry support program matching service
//!
//! A rule-based dialogue collects a structured applicant profile, and a
//! content-based engine ranks the program catalog against it by text
//! relevance, budget scale and participation requirements.

pub mod config;
pub mod core;
pub mod dialogue;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{find_matches, CorpusError, MatchingEngine};
pub use dialogue::{collect_turn, ConversationState, DialogueContext, ProfileCollector};
pub use models::{MatchResult, ProgramRecord, ScoringWeights, UserProfile};
