use serde::{Deserialize, Serialize};
use crate::dialogue::{
    keywords::extract_into,
    state::{ConversationState, DialogueContext, Role, SLOT_ORDER},
    templates,
};
use crate::models::{Slot, UserProfile};

/// Which slots must be filled before the profile counts as complete
///
/// Stage, sector and support needs are always mandatory; scale is optional
/// unless `require_scale` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CompletionPolicy {
    #[serde(default)]
    pub require_scale: bool,
}

impl CompletionPolicy {
    pub fn is_mandatory(&self, slot: Slot) -> bool {
        match slot {
            Slot::Stage | Slot::Sector | Slot::SupportNeeds => true,
            Slot::Scale => self.require_scale,
        }
    }

    pub fn missing_slots(&self, profile: &UserProfile) -> Vec<Slot> {
        SLOT_ORDER
            .iter()
            .copied()
            .filter(|slot| self.is_mandatory(*slot) && !profile.is_filled(*slot))
            .collect()
    }

    pub fn is_complete(&self, profile: &UserProfile) -> bool {
        self.missing_slots(profile).is_empty()
    }
}

/// Result of one user turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: String,
    pub state: ConversationState,
    pub is_complete: bool,
}

/// Snapshot of a conversation for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub profile: UserProfile,
    pub state: ConversationState,
    pub conversation_length: usize,
    pub is_complete: bool,
    pub missing_fields: Vec<String>,
}

/// Dialogue driver turning free text into a structured profile
///
/// Holds no per-session data, so a single collector serves every session;
/// all mutable state lives in the `DialogueContext` passed to each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileCollector {
    policy: CompletionPolicy,
}

impl ProfileCollector {
    pub fn new(policy: CompletionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    /// Opening message of a conversation
    pub fn greet(&self, context: &mut DialogueContext) -> String {
        let greeting = templates::prompt(ConversationState::Greeting);
        context.record(Role::System, &greeting);
        greeting
    }

    /// Handle one user message and return the system reply
    ///
    /// Never fails: unmatched or repeated input leaves the state unchanged
    /// and yields a re-prompt.
    pub fn process(&self, context: &mut DialogueContext, user_text: &str) -> String {
        if user_text.trim().is_empty() {
            return templates::RETRY.to_string();
        }

        let duplicate = context.repeats_recent_input(user_text);
        context.record(Role::User, user_text);

        let reply = if duplicate {
            tracing::debug!("Duplicate input in state {}, re-prompting", context.state);
            templates::alternate_prompt(context.state)
        } else {
            self.advance(context, user_text)
        };

        context.record(Role::System, &reply);
        reply
    }

    fn advance(&self, context: &mut DialogueContext, user_text: &str) -> String {
        match context.state {
            ConversationState::Greeting => {
                let filled: Vec<Slot> = SLOT_ORDER
                    .iter()
                    .copied()
                    .filter(|slot| extract_into(*slot, user_text, &mut context.profile))
                    .collect();
                context.profile.description = user_text.to_string();

                tracing::debug!("Opening message filled slots: {:?}", filled);
                self.move_forward(context)
            }
            ConversationState::AskStage => self.fill_slot(context, Slot::Stage, user_text),
            ConversationState::AskSector => self.fill_slot(context, Slot::Sector, user_text),
            ConversationState::AskScale => self.fill_slot(context, Slot::Scale, user_text),
            ConversationState::AskSupport => self.fill_slot(context, Slot::SupportNeeds, user_text),
            ConversationState::Confirming => self.confirm(context),
            ConversationState::Completed => templates::ALREADY_COMPLETE.to_string(),
        }
    }

    fn fill_slot(&self, context: &mut DialogueContext, slot: Slot, user_text: &str) -> String {
        if extract_into(slot, user_text, &mut context.profile) {
            tracing::debug!("Filled slot {:?}", slot);
            self.move_forward(context)
        } else {
            tracing::debug!("No trigger for slot {:?}, asking again", slot);
            templates::prompt(context.state)
        }
    }

    fn move_forward(&self, context: &mut DialogueContext) -> String {
        if self.policy.is_complete(&context.profile) {
            context.state = ConversationState::Confirming;
            return self.confirm(context);
        }

        context.state = ConversationState::next_unfilled(&context.profile);
        templates::prompt(context.state)
    }

    fn confirm(&self, context: &mut DialogueContext) -> String {
        let summary = templates::render_summary(&context.profile);
        context.state = ConversationState::Completed;
        summary
    }

    /// Start over with an empty profile and a fresh greeting
    pub fn reset(&self, context: &mut DialogueContext) -> String {
        context.reset();
        tracing::info!("Conversation reset completed");
        self.greet(context)
    }

    pub fn is_complete(&self, context: &DialogueContext) -> bool {
        self.policy.is_complete(&context.profile)
    }

    /// Display names of mandatory slots still empty
    pub fn missing_fields(&self, context: &DialogueContext) -> Vec<String> {
        self.policy
            .missing_slots(&context.profile)
            .into_iter()
            .map(|slot| slot.display_name().to_string())
            .collect()
    }

    pub fn summary(&self, context: &DialogueContext) -> ConversationSummary {
        ConversationSummary {
            profile: context.profile.clone(),
            state: context.state,
            conversation_length: context.turn_count(),
            is_complete: self.is_complete(context),
            missing_fields: self.missing_fields(context),
        }
    }
}

/// Run one turn and report the resulting state
pub fn collect_turn(
    collector: &ProfileCollector,
    context: &mut DialogueContext,
    user_text: &str,
) -> TurnOutcome {
    let reply = collector.process(context, user_text);
    TurnOutcome {
        reply,
        state: context.state,
        is_complete: collector.is_complete(context),
    }
}
