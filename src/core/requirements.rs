use crate::models::UserProfile;

/// Credit for a stage token found in the condition text
pub const STAGE_CREDIT: f64 = 0.4;
/// Credit for a scale token found in the condition text
pub const SCALE_CREDIT: f64 = 0.3;
/// Credit for a sector token found in the condition text
pub const SECTOR_CREDIT: f64 = 0.3;

/// Score how well a profile fits a program's participation conditions (0-1)
///
/// Each known profile field earns partial credit when its condition token
/// occurs in the text. Unknown fields earn nothing.
#[inline]
pub fn requirement_score(profile: &UserProfile, condition_text: &str) -> f64 {
    let mut score = 0.0;

    if let Some(stage) = profile.stage {
        if condition_text.contains(stage.condition_token()) {
            score += STAGE_CREDIT;
        }
    }

    if let Some(scale) = profile.scale {
        if condition_text.contains(scale.condition_token()) {
            score += SCALE_CREDIT;
        }
    }

    if let Some(sector) = profile.sector {
        if condition_text.contains(sector.condition_token()) {
            score += SECTOR_CREDIT;
        }
    }

    f64::min(score, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessScale, Sector, Stage};

    fn create_profile() -> UserProfile {
        UserProfile {
            stage: Some(Stage::Initial),
            sector: Some(Sector::Manufacturing),
            scale: Some(BusinessScale::Medium),
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_full_match() {
        let score = requirement_score(&create_profile(), "초기창업 중소기업 중 스포츠 용품 제조업체");
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stage_only() {
        let score = requirement_score(&create_profile(), "업력 3년 이내 초기창업 기업");
        assert!((score - STAGE_CREDIT).abs() < 1e-12);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(requirement_score(&create_profile(), "해당 없음"), 0.0);
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let score = requirement_score(&UserProfile::default(), "초기창업 중소기업 제조");
        assert_eq!(score, 0.0);
    }
}
