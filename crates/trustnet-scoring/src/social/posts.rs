// crates/trustnet-scoring/src/social/posts.rs
//
// Classifier-backed sub-scores over a platform's recent posts: recency-weighted
// content quality and the share of positive posts.

use std::time::Duration;

use trustnet_core::{aggregate, bounded, TextClassifier, TrustError, WeightedComponent};

use crate::stage::StageResult;

/// Candidate labels for post quality; the first two are desirable.
pub const POST_LABELS: &[&str] = &["informative", "professional", "spam", "offensive"];

/// Only the newest posts are analysed.
pub const MAX_POSTS: usize = 10;

/// Weight multiplier per step back in time (newest post has weight 1).
pub const RECENCY_FACTOR: f64 = 0.9;

async fn post_quality(
    classifier: &dyn TextClassifier,
    timeout: Duration,
    post: &str,
) -> StageResult<f64> {
    let classification =
        bounded(timeout, "post classification", classifier.classify(post, POST_LABELS)).await?;
    let top = classification
        .top()
        .ok_or_else(|| TrustError::Computation("classifier returned no labels".to_string()))?;
    let confidence = top.score.clamp(0.0, 1.0);
    if POST_LABELS[..2].contains(&top.label.as_str()) {
        Ok(confidence * 100.0)
    } else {
        Ok((1.0 - confidence) * 100.0)
    }
}

/// Recency-weighted mean post quality over the newest posts (newest first).
///
/// Posts the classifier fails on are left out and recorded in `errors`; if
/// none could be classified the stage fails.
pub async fn content_quality(
    classifier: &dyn TextClassifier,
    timeout: Duration,
    posts: &[String],
    errors: &mut Vec<String>,
) -> StageResult<f64> {
    let mut components = Vec::new();
    let mut weight = 1.0;
    for (i, post) in posts.iter().take(MAX_POSTS).enumerate() {
        match post_quality(classifier, timeout, post).await {
            Ok(score) => {
                components.push(WeightedComponent::new(format!("post[{}]", i), score, weight))
            }
            Err(e) => errors.push(format!("post[{}] quality: {}", i, e)),
        }
        weight *= RECENCY_FACTOR;
    }
    if components.is_empty() {
        return Err(TrustError::Computation("no post could be classified".to_string()));
    }
    Ok(aggregate(&components))
}

/// Percentage of the newest posts with POSITIVE sentiment.
pub async fn sentiment_share(
    classifier: &dyn TextClassifier,
    timeout: Duration,
    posts: &[String],
    errors: &mut Vec<String>,
) -> StageResult<f64> {
    let mut analysed = 0usize;
    let mut positive = 0usize;
    for (i, post) in posts.iter().take(MAX_POSTS).enumerate() {
        match bounded(timeout, "post sentiment", classifier.sentiment(post)).await {
            Ok(s) => {
                analysed += 1;
                if s.positive {
                    positive += 1;
                }
            }
            Err(e) => errors.push(format!("post[{}] sentiment: {}", i, e)),
        }
    }
    if analysed == 0 {
        return Err(TrustError::Computation("no post sentiment available".to_string()));
    }
    Ok(positive as f64 / analysed as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use trustnet_core::{Classification, LabelScore, Sentiment};

    /// Labels a post by its first word with confidence 0.8.
    struct FirstWordClassifier;

    #[async_trait]
    impl TextClassifier for FirstWordClassifier {
        async fn classify(
            &self,
            text: &str,
            labels: &[&str],
        ) -> Result<Classification, TrustError> {
            let first = text.split_whitespace().next().unwrap_or_default();
            if first == "fail" {
                return Err(TrustError::Collaborator("boom".into()));
            }
            Ok(Classification::new(
                labels
                    .iter()
                    .map(|l| LabelScore::new(*l, if *l == first { 0.8 } else { 0.2 / 3.0 }))
                    .collect(),
            ))
        }

        async fn sentiment(&self, text: &str) -> Result<Sentiment, TrustError> {
            Ok(Sentiment {
                positive: !text.starts_with("offensive"),
                score: 0.9,
            })
        }
    }

    fn posts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn newest_post_weighs_most() {
        let mut errors = Vec::new();
        let good_first = content_quality(
            &FirstWordClassifier,
            Duration::from_secs(1),
            &posts(&["informative a", "spam b"]),
            &mut errors,
        )
        .await
        .unwrap();
        let spam_first = content_quality(
            &FirstWordClassifier,
            Duration::from_secs(1),
            &posts(&["spam b", "informative a"]),
            &mut errors,
        )
        .await
        .unwrap();
        // informative → 80, spam → 20
        assert!((good_first - (80.0 + 20.0 * 0.9) / 1.9).abs() < 1e-9);
        assert!(good_first > spam_first);
    }

    #[tokio::test]
    async fn failed_posts_are_skipped() {
        let mut errors = Vec::new();
        let score = content_quality(
            &FirstWordClassifier,
            Duration::from_secs(1),
            &posts(&["fail x", "professional y"]),
            &mut errors,
        )
        .await
        .unwrap();
        assert!((score - 80.0).abs() < 1e-9);
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn all_failed_is_stage_error() {
        let mut errors = Vec::new();
        let result = content_quality(
            &FirstWordClassifier,
            Duration::from_secs(1),
            &posts(&["fail"]),
            &mut errors,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn sentiment_share_counts_positive() {
        let mut errors = Vec::new();
        let share = sentiment_share(
            &FirstWordClassifier,
            Duration::from_secs(1),
            &posts(&["informative", "offensive", "professional", "offensive"]),
            &mut errors,
        )
        .await
        .unwrap();
        assert_eq!(share, 50.0);
    }
}
