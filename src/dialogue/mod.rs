// Dialogue exports
pub mod collector;
pub mod keywords;
pub mod state;
pub mod templates;

pub use collector::{collect_turn, CompletionPolicy, ConversationSummary, ProfileCollector, TurnOutcome};
pub use state::{ConversationState, ConversationTurn, DialogueContext, Role};
