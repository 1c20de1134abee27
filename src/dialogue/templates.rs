use rand::seq::SliceRandom;
use crate::dialogue::state::ConversationState;
use crate::models::{Slot, UserProfile};

pub const GREETING: &[&str] = &[
    "안녕하세요! 스포츠산업 지원사업 매칭을 도와드리겠습니다. 어떤 사업을 구상하고 계신가요?",
    "스포츠산업 지원사업 매칭 시스템입니다. 어떤 계획을 가지고 계신지 편하게 말씀해 주세요.",
];

pub const STAGE_QUESTION: &[&str] = &[
    "현재 사업이 어느 단계에 있으신가요? (예: 아이디어 단계, 초기 창업, 성장 단계)",
    "구체적으로 어느 단계까지 진행되었나요? (아이디어/초기/성장/안정)",
];

pub const SECTOR_QUESTION: &[&str] = &[
    "스포츠 분야에서 어떤 영역을 생각하고 계신가요? (예: 용품 제조, 서비스, 시설 운영)",
    "구체적으로 어떤 스포츠 분야를 고려하고 계신가요? (제조/서비스/시설)",
];

pub const SCALE_QUESTION: &[&str] = &[
    "예상하시는 사업 규모는 어느 정도인가요? (예: 소규모, 중규모, 대규모)",
    "사업 규모를 어느 정도로 계획하고 계신가요? (소규모/중규모/대규모)",
];

pub const NEEDS_QUESTION: &[&str] = &[
    "어떤 종류의 지원이 가장 필요하신가요? (예: 자금, 공간, 멘토링, 마케팅)",
    "현재 가장 필요하신 지원은 무엇인가요? (자금/공간/멘토링/마케팅)",
];

pub const CONFIRM_HEADER: &str = "지금까지 말씀해 주신 내용을 정리해보겠습니다:";
pub const CONFIRM_FOOTER: &str = "이 내용이 맞으시다면, 적합한 지원사업을 찾아드리겠습니다.";
pub const RETRY: &str = "죄송합니다. 다시 한 번 말씀해 주시겠어요?";
pub const DUPLICATE: &str = "앞서 주신 답변과 동일합니다. 조금 더 구체적으로 말씀해 주시겠어요?";
pub const ALREADY_COMPLETE: &str =
    "필요한 정보를 모두 확인했습니다. 새로 시작하시려면 대화를 초기화해 주세요.";

/// Phrasing variants for the prompt shown in `state`
pub fn variants(state: ConversationState) -> &'static [&'static str] {
    match state {
        ConversationState::Greeting => GREETING,
        ConversationState::AskStage => STAGE_QUESTION,
        ConversationState::AskSector => SECTOR_QUESTION,
        ConversationState::AskScale => SCALE_QUESTION,
        ConversationState::AskSupport => NEEDS_QUESTION,
        ConversationState::Confirming | ConversationState::Completed => &[ALREADY_COMPLETE],
    }
}

/// Randomly chosen prompt for `state`
pub fn prompt(state: ConversationState) -> String {
    variants(state)
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(RETRY)
        .to_string()
}

/// Second phrasing for ask states, used when the user repeats themselves
pub fn alternate_prompt(state: ConversationState) -> String {
    match state.target_slot() {
        Some(_) => variants(state).get(1).copied().unwrap_or(DUPLICATE).to_string(),
        None => DUPLICATE.to_string(),
    }
}

/// Summary of every filled slot, by display name
pub fn render_summary(profile: &UserProfile) -> String {
    let mut lines = Vec::new();

    if let Some(stage) = profile.stage {
        lines.push(format!("- {}: {}", Slot::Stage.display_name(), stage.display_name()));
    }
    if let Some(sector) = profile.sector {
        lines.push(format!("- {}: {}", Slot::Sector.display_name(), sector.display_name()));
    }
    if let Some(scale) = profile.scale {
        lines.push(format!("- {}: {}", Slot::Scale.display_name(), scale.display_name()));
    }
    if let Some(needs) = profile.support_needs {
        lines.push(format!("- {}: {}", Slot::SupportNeeds.display_name(), needs.display_name()));
    }

    format!("{}\n\n{}\n\n{}", CONFIRM_HEADER, lines.join("\n"), CONFIRM_FOOTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessScale, Sector, Stage, SupportNeed};

    #[test]
    fn test_every_prompt_state_has_two_variants() {
        for state in [
            ConversationState::Greeting,
            ConversationState::AskStage,
            ConversationState::AskSector,
            ConversationState::AskScale,
            ConversationState::AskSupport,
        ] {
            assert!(variants(state).len() >= 2, "{} has a single phrasing", state);
            assert!(variants(state).contains(&prompt(state).as_str()));
        }
    }

    #[test]
    fn test_alternate_prompt() {
        assert_eq!(alternate_prompt(ConversationState::AskSector), SECTOR_QUESTION[1]);
        assert_eq!(alternate_prompt(ConversationState::Greeting), DUPLICATE);
        assert_eq!(alternate_prompt(ConversationState::Completed), DUPLICATE);
    }

    #[test]
    fn test_summary_lists_filled_slots() {
        let profile = UserProfile {
            stage: Some(Stage::Initial),
            sector: Some(Sector::Manufacturing),
            scale: Some(BusinessScale::Small),
            support_needs: Some(SupportNeed::Funding),
            ..UserProfile::default()
        };

        let summary = render_summary(&profile);

        assert!(summary.starts_with(CONFIRM_HEADER));
        assert!(summary.contains("- 사업 단계: 초기 창업"));
        assert!(summary.contains("- 사업 분야: 용품 제조"));
        assert!(summary.contains("- 사업 규모: 소규모"));
        assert!(summary.contains("- 필요한 지원: 자금 지원"));
        assert!(summary.ends_with(CONFIRM_FOOTER));
    }

    #[test]
    fn test_summary_omits_missing_scale() {
        let profile = UserProfile {
            stage: Some(Stage::Growth),
            sector: Some(Sector::Service),
            support_needs: Some(SupportNeed::Marketing),
            ..UserProfile::default()
        };

        let summary = render_summary(&profile);

        assert!(!summary.contains(Slot::Scale.display_name()));
        assert_eq!(summary, render_summary(&profile));
    }
}
