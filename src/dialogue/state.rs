use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::{Slot, UserProfile};

/// Position of a conversation in the slot-filling sequence
///
/// Greeting → AskStage → AskSector → AskScale → AskSupport → Confirming → Completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConversationState {
    Greeting,
    AskStage,
    AskSector,
    AskScale,
    AskSupport,
    Confirming,
    Completed,
}

impl ConversationState {
    /// Slot elicited in this state, if any
    pub fn target_slot(self) -> Option<Slot> {
        match self {
            ConversationState::AskStage => Some(Slot::Stage),
            ConversationState::AskSector => Some(Slot::Sector),
            ConversationState::AskScale => Some(Slot::Scale),
            ConversationState::AskSupport => Some(Slot::SupportNeeds),
            ConversationState::Greeting
            | ConversationState::Confirming
            | ConversationState::Completed => None,
        }
    }

    pub fn asking(slot: Slot) -> Self {
        match slot {
            Slot::Stage => ConversationState::AskStage,
            Slot::Sector => ConversationState::AskSector,
            Slot::Scale => ConversationState::AskScale,
            Slot::SupportNeeds => ConversationState::AskSupport,
        }
    }

    /// First ask state whose slot is still empty, in dialogue order
    pub fn next_unfilled(profile: &UserProfile) -> Self {
        SLOT_ORDER
            .iter()
            .copied()
            .find(|slot| !profile.is_filled(*slot))
            .map(Self::asking)
            .unwrap_or(ConversationState::Confirming)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::Greeting => "greeting",
            ConversationState::AskStage => "askStage",
            ConversationState::AskSector => "askSector",
            ConversationState::AskScale => "askScale",
            ConversationState::AskSupport => "askSupport",
            ConversationState::Confirming => "confirming",
            ConversationState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order in which slots are asked for
pub const SLOT_ORDER: [Slot; 4] = [Slot::Stage, Slot::Sector, Slot::Scale, Slot::SupportNeeds];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

/// One recorded utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub state: ConversationState,
    pub at: DateTime<Utc>,
}

/// Most recent turns kept per session; older ones are dropped
pub const HISTORY_LIMIT: usize = 64;

/// Session-scoped dialogue state
///
/// Owned by exactly one session and passed by `&mut` into every turn.
#[derive(Debug, Clone)]
pub struct DialogueContext {
    pub profile: UserProfile,
    pub state: ConversationState,
    history: Vec<ConversationTurn>,
    turn_count: usize,
}

impl DialogueContext {
    pub fn new() -> Self {
        Self {
            profile: UserProfile::default(),
            state: ConversationState::Greeting,
            history: Vec::new(),
            turn_count: 0,
        }
    }

    /// Clear profile, state and history in one step
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn record(&mut self, role: Role, text: &str) {
        self.history.push(ConversationTurn {
            role,
            text: text.to_string(),
            state: self.state,
            at: Utc::now(),
        });
        self.turn_count += 1;

        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    /// Turns recorded since the last reset, including dropped ones
    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    /// Whether `text` repeats one of the last two user turns
    pub fn repeats_recent_input(&self, text: &str) -> bool {
        self.history
            .iter()
            .rev()
            .filter(|turn| turn.role == Role::User)
            .take(2)
            .any(|turn| turn.text == text)
    }

    /// The most recent turns, at most `HISTORY_LIMIT`
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }
}

impl Default for DialogueContext {
    fn default() -> Self {
        Self::new()
    }
}
