use crate::models::{BusinessScale, Sector, Slot, Stage, SupportNeed, UserProfile};

/// Ordered trigger table: the first value with a matching trigger wins
pub type TriggerTable<T> = &'static [(T, &'static [&'static str])];

pub const STAGE_TRIGGERS: TriggerTable<Stage> = &[
    (Stage::Ideation, &["아이디어", "구상", "계획", "준비"]),
    (Stage::Initial, &["초기", "시작", "창업"]),
    (Stage::Growth, &["성장", "확장", "도약"]),
    (Stage::Stable, &["안정", "성숙", "정착"]),
];

pub const SECTOR_TRIGGERS: TriggerTable<Sector> = &[
    (Sector::Manufacturing, &["제조", "용품", "장비"]),
    (Sector::Service, &["서비스", "교육", "컨설팅"]),
    (Sector::Facility, &["시설", "공간", "센터"]),
];

pub const SCALE_TRIGGERS: TriggerTable<BusinessScale> = &[
    (BusinessScale::Small, &["소규모", "작은", "1인"]),
    (BusinessScale::Medium, &["중규모", "중간"]),
    (BusinessScale::Large, &["대규모", "큰"]),
];

pub const NEEDS_TRIGGERS: TriggerTable<SupportNeed> = &[
    (SupportNeed::Funding, &["자금", "투자", "금융"]),
    (SupportNeed::Space, &["공간", "시설", "장소"]),
    (SupportNeed::Mentoring, &["멘토링", "교육", "컨설팅"]),
    (SupportNeed::Marketing, &["마케팅", "홍보", "영업"]),
];

/// First value in `table` with a trigger contained in `message`
#[inline]
pub fn match_first<T: Copy>(table: TriggerTable<T>, message: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|trigger| message.contains(trigger)))
        .map(|(value, _)| *value)
}

/// Fill `slot` from `message` if the slot is empty and a trigger matches
///
/// Returns whether the slot was written.
pub fn extract_into(slot: Slot, message: &str, profile: &mut UserProfile) -> bool {
    match slot {
        Slot::Stage => fill(&mut profile.stage, STAGE_TRIGGERS, message),
        Slot::Sector => fill(&mut profile.sector, SECTOR_TRIGGERS, message),
        Slot::Scale => fill(&mut profile.scale, SCALE_TRIGGERS, message),
        Slot::SupportNeeds => fill(&mut profile.support_needs, NEEDS_TRIGGERS, message),
    }
}

fn fill<T: Copy>(field: &mut Option<T>, table: TriggerTable<T>, message: &str) -> bool {
    if field.is_some() {
        return false;
    }
    match match_first(table, message) {
        Some(value) => {
            *field = Some(value);
            true
        }
        None => false,
    }
}
