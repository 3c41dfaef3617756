// crates/trustnet-scoring/src/social/mod.rs
//
// Social domain scorer.
//
// Each present platform gets an unweighted mean of its features; platforms are
// then combined with `aggregate` using base weights twitter 0.4 / linkedin 0.6,
// renormalised over the platforms that have data.

pub mod cache;
pub mod linkedin;
pub mod posts;
pub mod twitter;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use trustnet_core::{
    aggregate_with_report, bounded, unweighted_mean, Domain, DomainScore, ProfileFetcher,
    SocialEvidence, TextClassifier, TrustError, WeightedComponent,
};

pub use cache::CachedProfileFetcher;

/// Base weight of the Twitter platform score.
pub const TWITTER_WEIGHT: f64 = 0.4;

/// Base weight of the LinkedIn platform score.
pub const LINKEDIN_WEIGHT: f64 = 0.6;

/// One platform's score with the features that went into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformScore {
    pub score: f64,
    pub features: BTreeMap<String, f64>,
}

impl PlatformScore {
    fn push(&mut self, name: &str, value: f64) {
        self.features.insert(name.to_string(), value);
    }

    fn finish(mut self) -> Self {
        let values: Vec<f64> = self.features.values().copied().collect();
        self.score = unweighted_mean(&values);
        self
    }
}

/// Scores social evidence.
#[derive(Clone)]
pub struct SocialScorer {
    classifier: Arc<dyn TextClassifier>,
    timeout: Duration,
}

impl SocialScorer {
    pub fn new(classifier: Arc<dyn TextClassifier>, timeout: Duration) -> Self {
        Self { classifier, timeout }
    }

    /// Score the social domain.
    ///
    /// Fails with `Validation` when neither platform is present.
    pub async fn score(&self, evidence: &SocialEvidence) -> Result<DomainScore, TrustError> {
        evidence.validate()?;
        let current_year = Utc::now().year();
        let classifier = self.classifier.as_ref();

        let mut twitter_errors = Vec::new();
        let mut linkedin_errors = Vec::new();
        let (twitter, linkedin) = tokio::join!(
            async {
                match &evidence.twitter {
                    Some(profile) => {
                        let errors = &mut twitter_errors;
                        Some(twitter::score(classifier, self.timeout, profile, errors).await)
                    }
                    None => None,
                }
            },
            async {
                match &evidence.linkedin {
                    Some(profile) => Some(
                        linkedin::score(
                            classifier,
                            self.timeout,
                            profile,
                            current_year,
                            &mut linkedin_errors,
                        )
                        .await,
                    ),
                    None => None,
                }
            },
        );

        let mut components = Vec::new();
        if let Some(t) = &twitter {
            components.push(WeightedComponent::new("twitter", t.score, TWITTER_WEIGHT));
        }
        if let Some(l) = &linkedin {
            components.push(WeightedComponent::new("linkedin", l.score, LINKEDIN_WEIGHT));
        }
        let report = aggregate_with_report(&components);

        let mut domain_score = DomainScore::new(Domain::Social, report.score);
        if let Some(t) = twitter {
            domain_score.insert_detail("twitter", t);
        }
        if let Some(l) = linkedin {
            domain_score.insert_detail("linkedin", l);
        }
        for e in twitter_errors {
            domain_score.push_error(format!("twitter: {}", e));
        }
        for e in linkedin_errors {
            domain_score.push_error(format!("linkedin: {}", e));
        }
        for name in report.excluded {
            domain_score.push_error(format!("excluded from aggregate: {}", name));
        }

        tracing::info!(
            score = domain_score.score,
            platforms = components.len(),
            "Social domain scored"
        );
        Ok(domain_score)
    }
}

/// Build social evidence by fetching profiles from a `ProfileFetcher`.
///
/// A profile that is not found is skipped; a fetch failure is recorded in the
/// returned error list. Fails with `Validation` when no profile resolves.
pub async fn resolve_profiles(
    fetcher: &dyn ProfileFetcher,
    timeout: Duration,
    twitter_username: Option<&str>,
    linkedin_profile_id: Option<&str>,
) -> Result<(SocialEvidence, Vec<String>), TrustError> {
    let mut evidence = SocialEvidence::default();
    let mut errors = Vec::new();

    let username = twitter_username.map(twitter::normalize_handle).filter(|u| !u.is_empty());
    if let Some(username) = username {
        match bounded(timeout, "twitter fetch", fetcher.fetch_twitter(&username)).await {
            Ok(Some(profile)) => evidence.twitter = Some(profile),
            Ok(None) => tracing::info!(username = %username, "Twitter profile not found"),
            Err(e) => errors.push(format!("twitter fetch: {}", e)),
        }
    }
    if let Some(id) = linkedin_profile_id.filter(|id| !id.trim().is_empty()) {
        match bounded(timeout, "linkedin fetch", fetcher.fetch_linkedin(id)).await {
            Ok(Some(profile)) => evidence.linkedin = Some(profile),
            Ok(None) => tracing::info!(profile_id = %id, "LinkedIn profile not found"),
            Err(e) => errors.push(format!("linkedin fetch: {}", e)),
        }
    }

    if evidence.twitter.is_none() && evidence.linkedin.is_none() {
        let mut message = "at least one profile required (twitter or linkedin)".to_string();
        if !errors.is_empty() {
            message = format!("{}; {}", message, errors.join("; "));
        }
        return Err(TrustError::Validation(message));
    }
    Ok((evidence, errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustnet_core::{LinkedInProfile, TwitterProfile};
    use trustnet_reputation::KeywordClassifier;

    fn scorer() -> SocialScorer {
        SocialScorer::new(Arc::new(KeywordClassifier::new()), Duration::from_secs(1))
    }

    fn twitter_profile() -> TwitterProfile {
        TwitterProfile {
            username: "jane".into(),
            followers: 1000,
            account_age_years: 5.0,
            engagement_rate: 0.001,
            influence_score: Some(100.0),
            ..Default::default()
        }
    }

    fn linkedin_profile() -> LinkedInProfile {
        LinkedInProfile {
            connections: 250,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn no_profile_is_validation_error() {
        let err = scorer().score(&SocialEvidence::default()).await.unwrap_err();
        assert!(matches!(err, TrustError::Validation(_)));
        assert!(err.to_string().contains("at least one profile required"));
    }

    #[tokio::test]
    async fn single_platform_gets_full_weight() {
        let evidence = SocialEvidence {
            twitter: Some(twitter_profile()),
            linkedin: None,
        };
        let score = scorer().score(&evidence).await.unwrap();
        assert_eq!(score.score, 100.0);
    }

    #[tokio::test]
    async fn platforms_weighted_forty_sixty() {
        let evidence = SocialEvidence {
            twitter: Some(twitter_profile()),
            linkedin: Some(linkedin_profile()),
        };
        let score = scorer().score(&evidence).await.unwrap();
        // twitter 100; linkedin mean(connections 50, skills 0, endorsements 0,
        // recommendations 0) = 12.5
        assert!((score.score - (100.0 * 0.4 + 12.5 * 0.6)).abs() < 1e-9);
        assert!(score.details.contains_key("twitter"));
        assert!(score.details.contains_key("linkedin"));
    }
}
