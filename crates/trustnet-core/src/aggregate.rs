// crates/trustnet-core/src/aggregate.rs
//
// The single weighted-aggregation path shared by every domain scorer and the
// cross-domain orchestrator, plus the unweighted intra-platform mean.

use crate::score::WeightedComponent;

/// Neutral default returned whenever there is nothing valid to aggregate.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Lower bound of every score.
pub const MIN_SCORE: f64 = 0.0;

/// Upper bound of every score.
pub const MAX_SCORE: f64 = 100.0;

/// Whether `score` is a usable sub-score (finite and within [0, 100]).
pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score)
}

/// Clamp a score into [0, 100]. NaN maps to the neutral default.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        NEUTRAL_SCORE
    } else {
        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// Outcome of a weighted aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    /// The aggregated score in [0, 100].
    pub score: f64,
    /// Sum of the weights that took part.
    pub total_weight: f64,
    /// Names of components left out for an invalid score or weight.
    pub excluded: Vec<String>,
}

/// Weighted mean of the valid components.
///
/// - Empty input → 50.0.
/// - Components with a score outside [0, 100] (or NaN) are excluded, as are
///   components with a negative or non-finite weight.
/// - Zero total weight after filtering → 50.0.
/// - Otherwise `clamp(sum(score * weight) / sum(weight), 0, 100)`.
pub fn aggregate(components: &[WeightedComponent]) -> f64 {
    aggregate_with_report(components).score
}

/// Same as [`aggregate`], also reporting which components were excluded.
pub fn aggregate_with_report(components: &[WeightedComponent]) -> AggregateReport {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut excluded = Vec::new();

    for component in components {
        if !is_valid_score(component.score) {
            tracing::warn!(
                component = %component.name,
                score = component.score,
                "Excluding component with out-of-range score"
            );
            excluded.push(component.name.clone());
            continue;
        }
        if !(component.weight.is_finite() && component.weight >= 0.0) {
            tracing::warn!(
                component = %component.name,
                weight = component.weight,
                "Excluding component with invalid weight"
            );
            excluded.push(component.name.clone());
            continue;
        }
        weighted_sum += component.score * component.weight;
        total_weight += component.weight;
    }

    let score = if total_weight > 0.0 {
        clamp_score(weighted_sum / total_weight)
    } else {
        NEUTRAL_SCORE
    };

    AggregateReport {
        score,
        total_weight,
        excluded,
    }
}

/// Unweighted arithmetic mean of the valid scores.
///
/// Used inside a platform/domain where every feature has the same influence.
/// This is intentionally a separate operation from [`aggregate`]. Invalid
/// values are skipped; no valid value → 50.0.
pub fn unweighted_mean(scores: &[f64]) -> f64 {
    let valid: Vec<f64> = scores.iter().copied().filter(|s| is_valid_score(*s)).collect();
    if valid.is_empty() {
        return NEUTRAL_SCORE;
    }
    clamp_score(valid.iter().sum::<f64>() / valid.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn components(pairs: &[(f64, f64)]) -> Vec<WeightedComponent> {
        pairs.iter().map(|&p| WeightedComponent::from(p)).collect()
    }

    #[test]
    fn empty_is_neutral() {
        assert_eq!(aggregate(&[]), 50.0);
    }

    #[test]
    fn equal_scores_average_to_themselves() {
        assert!((aggregate(&components(&[(90.0, 1.0), (90.0, 1.0)])) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn heavier_component_dominates() {
        assert!((aggregate(&components(&[(100.0, 1.0), (0.0, 3.0)])) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_score_is_excluded() {
        let report = aggregate_with_report(&[
            WeightedComponent::new("bogus", 150.0, 1.0),
            WeightedComponent::new("ok", 60.0, 1.0),
        ]);
        assert!((report.score - 60.0).abs() < 1e-12);
        assert_eq!(report.excluded, vec!["bogus".to_string()]);
    }

    #[test]
    fn nan_score_is_excluded() {
        assert!((aggregate(&components(&[(f64::NAN, 1.0), (40.0, 1.0)])) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn zero_total_weight_is_neutral() {
        assert_eq!(aggregate(&components(&[(80.0, 0.0), (20.0, 0.0)])), 50.0);
    }

    #[test]
    fn all_invalid_is_neutral() {
        assert_eq!(aggregate(&components(&[(-1.0, 1.0), (101.0, 2.0)])), 50.0);
    }

    #[test]
    fn negative_weight_is_excluded() {
        assert!((aggregate(&components(&[(10.0, -1.0), (70.0, 0.5)])) - 70.0).abs() < 1e-12);
    }

    #[test]
    fn single_component_renormalises_to_its_own_score() {
        assert!((aggregate(&components(&[(63.5, 0.4)])) - 63.5).abs() < 1e-12);
    }

    #[test]
    fn unweighted_mean_skips_invalid_values() {
        assert_eq!(unweighted_mean(&[]), 50.0);
        assert!((unweighted_mean(&[100.0, 50.0, f64::NAN]) - 75.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn aggregate_stays_in_bounds(
            pairs in proptest::collection::vec((0.0f64..=100.0, 0.001f64..=1.0), 0..16)
        ) {
            let score = aggregate(&components(&pairs));
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn aggregate_lies_between_min_and_max(
            pairs in proptest::collection::vec((0.0f64..=100.0, 0.001f64..=1.0), 1..16)
        ) {
            let score = aggregate(&components(&pairs));
            let lo = pairs.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
            let hi = pairs.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(score >= lo - 1e-9 && score <= hi + 1e-9);
        }
    }
}
