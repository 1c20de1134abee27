use serde::{Deserialize, Serialize};
use validator::Validate;

/// KRW per normalized budget unit (budgets are compared in millions of won)
pub const BUDGET_UNIT_KRW: f64 = 1_000_000.0;

/// Business stage of the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Ideation,
    Initial,
    Growth,
    Stable,
}

impl Stage {
    pub fn display_name(self) -> &'static str {
        match self {
            Stage::Ideation => "아이디어 단계",
            Stage::Initial => "초기 창업",
            Stage::Growth => "성장 단계",
            Stage::Stable => "안정화 단계",
        }
    }

    /// Token looked up in a program's participation-condition text
    pub fn condition_token(self) -> &'static str {
        match self {
            Stage::Ideation => "예비창업",
            Stage::Initial => "초기창업",
            Stage::Growth => "성장",
            Stage::Stable => "안정화",
        }
    }
}

/// Industry sector of the business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Manufacturing,
    Service,
    Facility,
}

impl Sector {
    pub fn display_name(self) -> &'static str {
        match self {
            Sector::Manufacturing => "용품 제조",
            Sector::Service => "서비스",
            Sector::Facility => "시설 운영",
        }
    }

    pub fn condition_token(self) -> &'static str {
        match self {
            Sector::Manufacturing => "제조",
            Sector::Service => "서비스",
            Sector::Facility => "시설",
        }
    }
}

/// Size of the business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessScale {
    Small,
    Medium,
    Large,
}

impl BusinessScale {
    pub fn display_name(self) -> &'static str {
        match self {
            BusinessScale::Small => "소규모",
            BusinessScale::Medium => "중규모",
            BusinessScale::Large => "대규모",
        }
    }

    pub fn condition_token(self) -> &'static str {
        match self {
            BusinessScale::Small => "소상공인",
            BusinessScale::Medium => "중소기업",
            BusinessScale::Large => "중견기업",
        }
    }
}

/// Kind of support the applicant is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportNeed {
    Funding,
    Space,
    Mentoring,
    Marketing,
}

impl SupportNeed {
    pub fn display_name(self) -> &'static str {
        match self {
            SupportNeed::Funding => "자금 지원",
            SupportNeed::Space => "공간 지원",
            SupportNeed::Mentoring => "멘토링",
            SupportNeed::Marketing => "마케팅 지원",
        }
    }
}

/// A profile field elicited through dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Stage,
    Sector,
    Scale,
    SupportNeeds,
}

impl Slot {
    pub fn display_name(self) -> &'static str {
        match self {
            Slot::Stage => "사업 단계",
            Slot::Sector => "사업 분야",
            Slot::Scale => "사업 규모",
            Slot::SupportNeeds => "필요한 지원",
        }
    }
}

/// Structured applicant profile
///
/// Built turn by turn by the profile collector and handed to the matcher as
/// an immutable snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub stage: Option<Stage>,
    #[serde(default)]
    pub sector: Option<Sector>,
    #[serde(default)]
    pub scale: Option<BusinessScale>,
    #[serde(default)]
    pub support_needs: Option<SupportNeed>,
    #[serde(default)]
    pub description: String,
    /// Desired support amount in millions of KRW
    #[serde(default)]
    pub desired_support_scale: Option<f64>,
}

impl UserProfile {
    /// Stage, sector and support needs are all known
    pub fn is_complete(&self) -> bool {
        self.stage.is_some() && self.sector.is_some() && self.support_needs.is_some()
    }

    pub fn is_filled(&self, slot: Slot) -> bool {
        match slot {
            Slot::Stage => self.stage.is_some(),
            Slot::Sector => self.sector.is_some(),
            Slot::Scale => self.scale.is_some(),
            Slot::SupportNeeds => self.support_needs.is_some(),
        }
    }

    /// Desired amount used for scale scoring
    ///
    /// Missing, negative or non-finite values count as zero.
    pub fn desired_scale(&self) -> f64 {
        match self.desired_support_scale {
            Some(value) if value.is_finite() && value >= 0.0 => value,
            Some(value) => {
                tracing::warn!("Ignoring malformed desired support scale: {}", value);
                0.0
            }
            None => 0.0,
        }
    }
}

/// Support program from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRecord {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    /// Support area the program belongs to
    #[serde(default)]
    pub realm: Option<String>,
    pub purpose_text: String,
    pub target_text: String,
    pub condition_text: String,
    /// Total budget in KRW
    #[validate(range(min = 0.0))]
    pub total_budget: f64,
    /// Maximum amount per applicant in KRW
    #[validate(range(min = 0.0))]
    pub max_unit_amount: f64,
}

impl ProgramRecord {
    /// Total budget in millions of KRW
    pub fn budget_normalized(&self) -> f64 {
        self.total_budget / BUDGET_UNIT_KRW
    }

    /// Text describing what the program is for and who it targets
    pub fn descriptive_text(&self) -> String {
        format!("{} {}", self.purpose_text, self.target_text)
    }
}

/// Scored program for a single query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub program_id: String,
    pub program_name: String,
    pub composite_score: f64,
    pub relevance_score: f64,
    pub scale_score: f64,
    pub requirement_score: f64,
}

/// Weights of the composite score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub relevance: f64,
    pub scale: f64,
    pub requirement: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.relevance + self.scale + self.requirement
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            relevance: 0.4,
            scale: 0.3,
            requirement: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_completeness() {
        let mut profile = UserProfile::default();
        assert!(!profile.is_complete());

        profile.stage = Some(Stage::Initial);
        profile.sector = Some(Sector::Manufacturing);
        assert!(!profile.is_complete());

        profile.support_needs = Some(SupportNeed::Funding);
        assert!(profile.is_complete());
        assert!(!profile.is_filled(Slot::Scale));
    }

    #[test]
    fn test_desired_scale_clamps_malformed_values() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.desired_scale(), 0.0);

        profile.desired_support_scale = Some(-10.0);
        assert_eq!(profile.desired_scale(), 0.0);

        profile.desired_support_scale = Some(f64::NAN);
        assert_eq!(profile.desired_scale(), 0.0);

        profile.desired_support_scale = Some(90.0);
        assert_eq!(profile.desired_scale(), 90.0);
    }

    #[test]
    fn test_budget_normalized_to_millions() {
        let record = ProgramRecord {
            id: "p1".to_string(),
            name: "Program".to_string(),
            realm: None,
            purpose_text: String::new(),
            target_text: String::new(),
            condition_text: String::new(),
            total_budget: 250_000_000.0,
            max_unit_amount: 50_000_000.0,
        };

        assert_eq!(record.budget_normalized(), 250.0);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_profile_wire_format() {
        let json = r#"{"stage":"initial","sector":"manufacturing","supportNeeds":"funding","desiredSupportScale":90.0}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.stage, Some(Stage::Initial));
        assert_eq!(profile.support_needs, Some(SupportNeed::Funding));
        assert_eq!(profile.scale, None);
        assert!(profile.description.is_empty());
    }
}
