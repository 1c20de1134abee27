/// Differences closer than this count as equal
const EQUAL_DISTANCE_TOLERANCE: f64 = 1e-9;

/// Score how close each program budget is to the desired amount (0-1)
///
/// Differences are normalized by the largest difference seen for this
/// query, so the farthest program scores 0. When every program is equally
/// distant (a single program, identical budgets, or budgets mirrored around
/// the desired amount) all of them score 1.
pub fn scale_scores(budgets: &[f64], desired: f64) -> Vec<f64> {
    let differences: Vec<f64> = budgets.iter().map(|budget| (budget - desired).abs()).collect();
    let max_difference = differences.iter().copied().fold(0.0_f64, f64::max);
    let min_difference = differences.iter().copied().fold(f64::INFINITY, f64::min);

    if max_difference - min_difference <= EQUAL_DISTANCE_TOLERANCE * max_difference.max(1.0) {
        return vec![1.0; budgets.len()];
    }

    differences
        .into_iter()
        .map(|difference| (1.0 - difference / max_difference).clamp(0.0, 1.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closer_budget_scores_higher() {
        let scores = scale_scores(&[100.0, 10_000.0], 90.0);

        assert!(scores[0] > scores[1]);
        assert_eq!(scores[1], 0.0);
        assert!(scores[0] > 0.99);
    }

    #[test]
    fn test_identical_budgets_score_one() {
        assert_eq!(scale_scores(&[50.0, 50.0, 50.0], 10.0), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_single_program_scores_one() {
        assert_eq!(scale_scores(&[500.0], 0.0), vec![1.0]);
    }

    #[test]
    fn test_mirrored_budgets_score_one() {
        assert_eq!(scale_scores(&[0.0, 20.0], 10.0), vec![1.0, 1.0]);
    }

    #[test]
    fn test_unequal_distances_still_normalized() {
        let scores = scale_scores(&[80.0, 100.0, 130.0], 90.0);
        assert_eq!(scores[2], 0.0);
        assert!((scores[0] - 0.75).abs() < 1e-12);
        assert_eq!(scores[0], scores[1]);
    }

    #[test]
    fn test_empty_corpus() {
        assert!(scale_scores(&[], 90.0).is_empty());
    }

    #[test]
    fn test_scores_within_bounds() {
        let scores = scale_scores(&[0.0, 25.0, 90.0, 400.0, 1_200.0], 90.0);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }
}
