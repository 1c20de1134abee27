use std::collections::HashSet;
use thiserror::Error;
use validator::Validate;
use crate::models::{MatchResult, ProgramRecord, ScoringWeights, UserProfile};
use crate::core::{
    relevance::{RelevanceIndex, DEFAULT_MAX_FEATURES},
    requirements::requirement_score,
    scale::scale_scores,
    scoring::{composite_score, rank, ComponentScores},
};

/// Default number of matches returned per query
pub const DEFAULT_TOP_N: usize = 5;

/// Catalog records that cannot be matched against
///
/// Any of these aborts corpus construction, since a bad record would skew
/// the normalization shared by every query.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Invalid program record #{index} ({id}): {source}")]
    InvalidRecord {
        index: usize,
        id: String,
        source: validator::ValidationErrors,
    },

    #[error("Program record {id} has a non-finite {field}")]
    NonFiniteAmount { id: String, field: &'static str },

    #[error("Duplicate program id: {0}")]
    DuplicateId(String),
}

/// Matching engine over a fixed program corpus
///
/// # Pipeline Stages
/// 1. Relevance: TF-IDF cosine similarity of the profile description
/// 2. Scale: budget closeness to the desired support amount
/// 3. Requirements: profile tokens found in the condition text
/// 4. Weighted aggregation and ranking
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    programs: Vec<ProgramRecord>,
    budgets: Vec<f64>,
    index: RelevanceIndex,
    weights: ScoringWeights,
}

impl MatchingEngine {
    /// Validate the corpus and build the relevance index
    pub fn build(programs: Vec<ProgramRecord>, max_features: usize) -> Result<Self, CorpusError> {
        validate_corpus(&programs)?;

        let texts: Vec<String> = programs.iter().map(ProgramRecord::descriptive_text).collect();
        let index = RelevanceIndex::build(&texts, max_features);
        let budgets = programs.iter().map(ProgramRecord::budget_normalized).collect();

        tracing::info!(
            "Matching engine built over {} programs ({} vocabulary terms)",
            programs.len(),
            index.vocabulary_size()
        );

        Ok(Self {
            programs,
            budgets,
            index,
            weights: ScoringWeights::default(),
        })
    }

    pub fn with_default_features(programs: Vec<ProgramRecord>) -> Result<Self, CorpusError> {
        Self::build(programs, DEFAULT_MAX_FEATURES)
    }

    /// Score every program against the profile and return the best `top_n`
    ///
    /// Incomplete profiles are scored as-is: missing fields simply earn no
    /// requirement credit. An empty corpus yields an empty list.
    pub fn find_matches(&self, profile: &UserProfile, top_n: usize) -> Vec<MatchResult> {
        if self.programs.is_empty() {
            return Vec::new();
        }

        let relevance = self.index.similarities(&profile.description);
        let scale = scale_scores(&self.budgets, profile.desired_scale());

        let results: Vec<MatchResult> = self
            .programs
            .iter()
            .enumerate()
            .map(|(i, program)| {
                let scores = ComponentScores {
                    relevance: relevance[i],
                    scale: scale[i],
                    requirement: requirement_score(profile, &program.condition_text),
                };

                MatchResult {
                    program_id: program.id.clone(),
                    program_name: program.name.clone(),
                    composite_score: composite_score(&scores, &self.weights),
                    relevance_score: scores.relevance,
                    scale_score: scores.scale,
                    requirement_score: scores.requirement,
                }
            })
            .collect();

        let ranked = rank(results, top_n);

        tracing::debug!(
            "Ranked {} programs, returning {} (top score {:?})",
            self.programs.len(),
            ranked.len(),
            ranked.first().map(|r| r.composite_score)
        );

        ranked
    }

    /// Catalog records in a support area whose per-applicant amount falls
    /// within `[min_amount, max_amount]` (KRW, both bounds inclusive)
    ///
    /// Absent criteria do not filter. Corpus order is preserved.
    pub fn filter_programs(
        &self,
        realm: Option<&str>,
        min_amount: Option<f64>,
        max_amount: Option<f64>,
    ) -> Vec<&ProgramRecord> {
        self.programs
            .iter()
            .filter(|program| realm.map_or(true, |realm| program.realm.as_deref() == Some(realm)))
            .filter(|program| min_amount.map_or(true, |min| program.max_unit_amount >= min))
            .filter(|program| max_amount.map_or(true, |max| program.max_unit_amount <= max))
            .collect()
    }

    pub fn program(&self, id: &str) -> Option<&ProgramRecord> {
        self.programs.iter().find(|program| program.id == id)
    }

    pub fn programs(&self) -> &[ProgramRecord] {
        &self.programs
    }

    pub fn index(&self) -> &RelevanceIndex {
        &self.index
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

/// Match a profile against an ad-hoc corpus
pub fn find_matches(
    profile: &UserProfile,
    corpus: &[ProgramRecord],
    top_n: usize,
) -> Result<Vec<MatchResult>, CorpusError> {
    let engine = MatchingEngine::with_default_features(corpus.to_vec())?;
    Ok(engine.find_matches(profile, top_n))
}

/// Mean per-applicant amount of `programs`, `None` when there are none
pub fn average_max_amount(programs: &[&ProgramRecord]) -> Option<f64> {
    if programs.is_empty() {
        return None;
    }
    let total: f64 = programs.iter().map(|program| program.max_unit_amount).sum();
    Some(total / programs.len() as f64)
}

fn validate_corpus(programs: &[ProgramRecord]) -> Result<(), CorpusError> {
    let mut seen_ids = HashSet::new();

    for (index, program) in programs.iter().enumerate() {
        if !program.total_budget.is_finite() {
            return Err(CorpusError::NonFiniteAmount {
                id: program.id.clone(),
                field: "totalBudget",
            });
        }
        if !program.max_unit_amount.is_finite() {
            return Err(CorpusError::NonFiniteAmount {
                id: program.id.clone(),
                field: "maxUnitAmount",
            });
        }

        program.validate().map_err(|source| CorpusError::InvalidRecord {
            index,
            id: program.id.clone(),
            source,
        })?;

        if !seen_ids.insert(program.id.as_str()) {
            return Err(CorpusError::DuplicateId(program.id.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sector, Stage, SupportNeed};

    fn create_program(id: &str, budget_millions: f64, text: &str, condition: &str) -> ProgramRecord {
        ProgramRecord {
            id: id.to_string(),
            name: format!("Program {}", id),
            realm: None,
            purpose_text: text.to_string(),
            target_text: String::new(),
            condition_text: condition.to_string(),
            total_budget: budget_millions * 1_000_000.0,
            max_unit_amount: 50_000_000.0,
        }
    }

    fn create_profile(description: &str, desired: f64) -> UserProfile {
        UserProfile {
            stage: Some(Stage::Initial),
            sector: Some(Sector::Manufacturing),
            scale: None,
            support_needs: Some(SupportNeed::Funding),
            description: description.to_string(),
            desired_support_scale: Some(desired),
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let engine = MatchingEngine::with_default_features(vec![
            create_program("a", 100.0, "스포츠 제조 지원", "초기창업 제조 기업"),
            create_program("b", 10_000.0, "무관한 내용", "해당 없음"),
        ])
        .unwrap();

        let matches = engine.find_matches(&create_profile("스포츠 제조", 90.0), DEFAULT_TOP_N);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].program_id, "a");
        assert!(matches[0].scale_score > matches[1].scale_score);
        assert!(matches[0].relevance_score > matches[1].relevance_score);
        assert!((matches[0].requirement_score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_respects_top_n() {
        let programs = (0..12)
            .map(|i| create_program(&i.to_string(), 10.0 * i as f64, "스포츠 지원", ""))
            .collect();
        let engine = MatchingEngine::with_default_features(programs).unwrap();

        assert_eq!(engine.find_matches(&create_profile("스포츠", 50.0), 5).len(), 5);
    }

    #[test]
    fn test_empty_corpus_returns_empty() {
        let engine = MatchingEngine::with_default_features(vec![]).unwrap();
        assert!(engine.find_matches(&create_profile("스포츠", 90.0), 5).is_empty());
    }

    #[test]
    fn test_incomplete_profile_still_scored() {
        let engine = MatchingEngine::with_default_features(vec![
            create_program("a", 100.0, "스포츠 제조 지원", "초기창업"),
        ])
        .unwrap();

        let matches = engine.find_matches(&UserProfile::default(), 5);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].requirement_score, 0.0);
        assert_eq!(matches[0].relevance_score, 0.0);
        assert_eq!(matches[0].scale_score, 1.0);
    }

    #[test]
    fn test_rejects_blank_id() {
        let result = MatchingEngine::with_default_features(vec![create_program("", 1.0, "", "")]);
        assert!(matches!(result, Err(CorpusError::InvalidRecord { index: 0, .. })));
    }

    #[test]
    fn test_rejects_negative_budget() {
        let result = MatchingEngine::with_default_features(vec![create_program("a", -1.0, "", "")]);
        assert!(matches!(result, Err(CorpusError::InvalidRecord { .. })));
    }

    #[test]
    fn test_rejects_non_finite_budget() {
        let result =
            MatchingEngine::with_default_features(vec![create_program("a", f64::NAN, "", "")]);
        assert!(matches!(result, Err(CorpusError::NonFiniteAmount { field: "totalBudget", .. })));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = MatchingEngine::with_default_features(vec![
            create_program("a", 1.0, "", ""),
            create_program("a", 2.0, "", ""),
        ]);
        assert!(matches!(result, Err(CorpusError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_program_lookup() {
        let engine = MatchingEngine::with_default_features(vec![create_program("a", 1.0, "", "")]).unwrap();
        assert!(engine.program("a").is_some());
        assert!(engine.program("missing").is_none());
    }

    #[test]
    fn test_filter_programs() {
        let mut funding = create_program("funding", 100.0, "", "");
        funding.realm = Some("창업".to_string());
        funding.max_unit_amount = 70_000_000.0;
        let mut space = create_program("space", 100.0, "", "");
        space.realm = Some("공간".to_string());
        space.max_unit_amount = 10_000_000.0;
        let mut loan = create_program("loan", 100.0, "", "");
        loan.realm = Some("창업".to_string());
        loan.max_unit_amount = 500_000_000.0;
        let engine = MatchingEngine::with_default_features(vec![funding, space, loan]).unwrap();

        let ids = |programs: Vec<&ProgramRecord>| -> Vec<String> {
            programs.into_iter().map(|p| p.id.clone()).collect()
        };

        assert_eq!(engine.filter_programs(None, None, None).len(), 3);
        assert_eq!(ids(engine.filter_programs(Some("창업"), None, None)), vec!["funding", "loan"]);
        assert_eq!(
            ids(engine.filter_programs(None, Some(10_000_000.0), Some(70_000_000.0))),
            vec!["funding", "space"]
        );
        assert_eq!(
            ids(engine.filter_programs(Some("창업"), None, Some(100_000_000.0))),
            vec!["funding"]
        );
        assert!(engine.filter_programs(Some("금융"), None, None).is_empty());
    }

    #[test]
    fn test_average_max_amount() {
        let mut a = create_program("a", 1.0, "", "");
        a.max_unit_amount = 20_000_000.0;
        let mut b = create_program("b", 1.0, "", "");
        b.max_unit_amount = 70_000_000.0;

        assert_eq!(average_max_amount(&[&a, &b]), Some(45_000_000.0));
        assert_eq!(average_max_amount(&[]), None);
    }
}
