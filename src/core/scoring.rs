use crate::models::{MatchResult, ScoringWeights};

/// Per-program sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub relevance: f64,
    pub scale: f64,
    pub requirement: f64,
}

/// Weighted combination of the sub-scores (0-1)
///
/// Scoring formula:
/// composite = (
///     relevance * 0.4 +     # TF-IDF cosine similarity of the description
///     scale * 0.3 +         # Budget closeness to the desired amount
///     requirement * 0.3     # Condition text mentions profile tokens
/// )
#[inline]
pub fn composite_score(scores: &ComponentScores, weights: &ScoringWeights) -> f64 {
    let total = scores.relevance * weights.relevance
        + scores.scale * weights.scale
        + scores.requirement * weights.requirement;

    total.clamp(0.0, 1.0)
}

/// Order results by composite score and keep the best `top_n`
///
/// The sort is stable, so programs with equal scores keep corpus order.
pub fn rank(mut results: Vec<MatchResult>, top_n: usize) -> Vec<MatchResult> {
    results.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(top_n);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_result(id: &str, composite: f64) -> MatchResult {
        MatchResult {
            program_id: id.to_string(),
            program_name: format!("Program {}", id),
            composite_score: composite,
            relevance_score: 0.0,
            scale_score: 0.0,
            requirement_score: 0.0,
        }
    }

    #[test]
    fn test_composite_score() {
        let scores = ComponentScores {
            relevance: 1.0,
            scale: 0.5,
            requirement: 0.0,
        };
        let composite = composite_score(&scores, &ScoringWeights::default());
        assert!((composite - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_scores_reach_one() {
        let scores = ComponentScores {
            relevance: 1.0,
            scale: 1.0,
            requirement: 1.0,
        };
        let composite = composite_score(&scores, &ScoringWeights::default());
        assert!(composite <= 1.0 && composite > 0.999_999);
    }

    #[test]
    fn test_rank_sorts_descending() {
        let ranked = rank(
            vec![create_result("a", 0.2), create_result("b", 0.9), create_result("c", 0.5)],
            10,
        );
        let ids: Vec<&str> = ranked.iter().map(|r| r.program_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_ties_keep_corpus_order() {
        let ranked = rank(
            vec![create_result("first", 0.5), create_result("second", 0.5), create_result("third", 0.7)],
            10,
        );
        let ids: Vec<&str> = ranked.iter().map(|r| r.program_id.as_str()).collect();
        assert_eq!(ids, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_rank_truncates() {
        let results = (0..8).map(|i| create_result(&i.to_string(), i as f64 / 10.0)).collect();
        assert_eq!(rank(results, 5).len(), 5);
    }
}
