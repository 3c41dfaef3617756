// crates/trustnet-scoring/src/orchestrator.rs
//
// Cross-domain combination of domain scores into the final trust score.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use trustnet_core::{
    aggregate_with_report, Domain, DomainScore, DomainWeights, TrustError, TrustScoreResult,
    WeightedComponent,
};

/// Base weights renormalised over `present` so they sum to 1.0.
///
/// When every present domain has a zero base weight they share equally.
pub fn effective_weights(weights: &DomainWeights, present: &[Domain]) -> BTreeMap<Domain, f64> {
    let valid = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = present.iter().map(|d| valid(weights.weight(*d))).sum();
    present
        .iter()
        .map(|d| {
            let w = if total > 0.0 {
                valid(weights.weight(*d)) / total
            } else {
                1.0 / present.len() as f64
            };
            (*d, w)
        })
        .collect()
}

/// Combine the present domain scores.
///
/// Fails with `Validation` when no domain is present or a domain appears twice.
/// Domain errors are carried into the result prefixed with the domain name.
pub fn combine(
    scores: Vec<DomainScore>,
    weights: &DomainWeights,
    request_id: Uuid,
) -> Result<TrustScoreResult, TrustError> {
    if scores.is_empty() {
        return Err(TrustError::Validation("no evidence supplied for any domain".to_string()));
    }

    let mut details = BTreeMap::new();
    for score in scores {
        let domain = score.domain;
        if details.insert(domain, score).is_some() {
            return Err(TrustError::Validation(format!("domain {} scored twice", domain)));
        }
    }

    let present: Vec<Domain> = details.keys().copied().collect();
    let effective = effective_weights(weights, &present);
    let components: Vec<WeightedComponent> = details
        .values()
        .map(|d| WeightedComponent::new(d.domain.as_str(), d.score, effective[&d.domain]))
        .collect();
    let report = aggregate_with_report(&components);

    let mut errors: Vec<String> = details
        .values()
        .flat_map(|d| d.errors.iter().map(move |e| format!("{}: {}", d.domain, e)))
        .collect();
    errors.extend(report.excluded.iter().map(|name| format!("excluded from aggregate: {}", name)));

    tracing::info!(
        request_id = %request_id,
        overall = report.score,
        domains = present.len(),
        errors = errors.len(),
        "Trust score combined"
    );

    Ok(TrustScoreResult {
        request_id,
        overall: report.score,
        details,
        effective_weights: effective,
        errors,
        computed_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_domains_is_validation_error() {
        let err = combine(vec![], &DomainWeights::default(), Uuid::now_v7()).unwrap_err();
        assert!(matches!(err, TrustError::Validation(_)));
    }

    #[test]
    fn single_domain_gets_full_weight() {
        let social = DomainScore::new(Domain::Social, 63.25);
        let result = combine(vec![social], &DomainWeights::default(), Uuid::now_v7()).unwrap();
        assert_eq!(result.effective_weights[&Domain::Social], 1.0);
        assert_eq!(result.overall, 63.25);
    }

    #[test]
    fn weights_renormalise_over_present_domains() {
        let scores = vec![
            DomainScore::new(Domain::Financial, 80.0),
            DomainScore::new(Domain::Social, 40.0),
        ];
        let result = combine(scores, &DomainWeights::default(), Uuid::now_v7()).unwrap();
        let wf = 0.35 / 0.6;
        let ws = 0.25 / 0.6;
        assert!((result.effective_weights[&Domain::Financial] - wf).abs() < 1e-12);
        assert!((result.overall - (80.0 * wf + 40.0 * ws)).abs() < 1e-9);
    }

    #[test]
    fn zero_base_weights_share_equally() {
        let weights = DomainWeights {
            financial: 0.0,
            social: 0.0,
            document: 0.0,
            reference: 0.0,
        };
        let scores = vec![
            DomainScore::new(Domain::Document, 30.0),
            DomainScore::new(Domain::Reference, 70.0),
        ];
        let result = combine(scores, &weights, Uuid::now_v7()).unwrap();
        assert_eq!(result.overall, 50.0);
        assert_eq!(result.effective_weights[&Domain::Document], 0.5);
    }

    #[test]
    fn duplicate_domain_is_rejected() {
        let scores = vec![
            DomainScore::new(Domain::Social, 10.0),
            DomainScore::new(Domain::Social, 20.0),
        ];
        assert!(combine(scores, &DomainWeights::default(), Uuid::now_v7()).is_err());
    }

    #[test]
    fn domain_errors_are_prefixed() {
        let mut doc = DomainScore::new(Domain::Document, 55.0);
        doc.push_error("sentiment: Collaborator error: offline");
        let result = combine(vec![doc], &DomainWeights::default(), Uuid::now_v7()).unwrap();
        assert_eq!(
            result.errors,
            vec!["document: sentiment: Collaborator error: offline".to_string()]
        );
    }
}
