// crates/trustnet-scoring/src/social/twitter.rs
//
// Twitter/X platform score.

use std::time::Duration;

use trustnet_core::features::{saturating_ratio, saturating_score, social};
use trustnet_core::{TextClassifier, TwitterProfile};

use super::posts;
use super::PlatformScore;
use crate::stage::recover;

/// Strip a profile URL or `@` prefix down to the bare handle.
pub fn normalize_handle(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    let handle = if trimmed.contains("twitter.com/") || trimmed.contains("x.com/") {
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    } else {
        trimmed
    };
    handle.replace('@', "")
}

/// Influence score in [0, 100] from audience size, follower ratio,
/// engagement, and account age. Used when the fetcher supplies none.
pub fn influence_score(profile: &TwitterProfile) -> f64 {
    let followers = profile.followers as f64;
    let ratio = followers / (profile.following as f64 + 1.0);
    (saturating_ratio(followers, social::INFLUENCE_FOLLOWERS) * 0.4
        + saturating_ratio(ratio, social::FOLLOWING_RATIO) * 0.1
        + saturating_ratio(profile.engagement_rate * 100.0, 1.0) * 0.4
        + saturating_ratio(profile.account_age_years, social::ACCOUNT_AGE_YEARS) * 0.1)
        * 100.0
}

/// Score a Twitter profile as the unweighted mean of its features.
///
/// Sentiment and content quality only count when the profile has tweets.
pub async fn score(
    classifier: &dyn TextClassifier,
    timeout: Duration,
    profile: &TwitterProfile,
    errors: &mut Vec<String>,
) -> PlatformScore {
    let mut platform = PlatformScore::default();

    platform.push("followers", saturating_score(profile.followers as f64, social::FOLLOWERS));

    if !profile.recent_tweets.is_empty() {
        let sentiment =
            posts::sentiment_share(classifier, timeout, &profile.recent_tweets, errors).await;
        platform.push("sentiment", recover("twitter sentiment", sentiment, errors));
        let quality =
            posts::content_quality(classifier, timeout, &profile.recent_tweets, errors).await;
        platform.push("content_quality", recover("twitter content quality", quality, errors));
    }

    platform.push(
        "account_age",
        saturating_score(profile.account_age_years, social::ACCOUNT_AGE_YEARS),
    );
    platform.push(
        "engagement",
        saturating_score(profile.engagement_rate, social::ENGAGEMENT_RATE),
    );
    let influence = profile.influence_score.unwrap_or_else(|| influence_score(profile));
    platform.push("influence", influence.clamp(0.0, 100.0));

    platform.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustnet_reputation::KeywordClassifier;

    #[test]
    fn handles_are_normalised() {
        assert_eq!(normalize_handle("@jane"), "jane");
        assert_eq!(normalize_handle("https://twitter.com/jane"), "jane");
        assert_eq!(normalize_handle("https://x.com/jane/"), "jane");
        assert_eq!(normalize_handle("jane"), "jane");
    }

    #[test]
    fn influence_saturates() {
        let profile = TwitterProfile {
            followers: 50_000,
            following: 10,
            engagement_rate: 0.05,
            account_age_years: 9.0,
            ..Default::default()
        };
        assert!((influence_score(&profile) - 100.0).abs() < 1e-9);
        assert_eq!(influence_score(&TwitterProfile::default()), 0.0);
    }

    #[tokio::test]
    async fn profile_without_tweets_uses_four_features() {
        let profile = TwitterProfile {
            username: "jane".into(),
            followers: 500,
            account_age_years: 5.0,
            engagement_rate: 0.002,
            influence_score: Some(40.0),
            ..Default::default()
        };
        let mut errors = Vec::new();
        let result =
            score(&KeywordClassifier::new(), Duration::from_secs(1), &profile, &mut errors).await;
        // followers 50, age 100, engagement 100, influence 40
        assert!((result.score - 72.5).abs() < 1e-9);
        assert_eq!(result.features.len(), 4);
        assert!(errors.is_empty());
    }
}
