// crates/trustnet-daemon/src/inference.rs
//
// HTTP clients for a remote inference service:
//   POST /classify          {text, labels}  -> {labels: [{label, score}]}
//   POST /sentiment         {text}          -> {label: "POSITIVE"|"NEGATIVE", score}
//   POST /financial/predict {features}      -> {probability}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use trustnet_core::{
    Classification, FinancialModel, LabelScore, Sentiment, TextClassifier, TrustError,
};

use crate::http::HttpCollaborator;

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
    labels: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    labels: Vec<LabelScore>,
}

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    label: String,
    score: f64,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a [f64; 10],
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    probability: f64,
}

/// Remote zero-shot classifier and sentiment model.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    http: HttpCollaborator,
}

impl HttpClassifier {
    pub fn new(http: HttpCollaborator) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TextClassifier for HttpClassifier {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Classification, TrustError> {
        let response: ClassifyResponse = self
            .http
            .post_json(&["classify"], &ClassifyRequest { text, labels: candidate_labels })
            .await?;
        let known: Vec<LabelScore> = response
            .labels
            .into_iter()
            .filter(|l| candidate_labels.contains(&l.label.as_str()))
            .collect();
        if known.is_empty() {
            return Err(TrustError::Computation(
                "classifier returned none of the candidate labels".to_string(),
            ));
        }
        Ok(Classification::new(known))
    }

    async fn sentiment(&self, text: &str) -> Result<Sentiment, TrustError> {
        let response: SentimentResponse =
            self.http.post_json(&["sentiment"], &SentimentRequest { text }).await?;
        let positive = match response.label.to_ascii_uppercase().as_str() {
            "POSITIVE" => true,
            "NEGATIVE" => false,
            other => {
                return Err(TrustError::Computation(format!(
                    "unknown sentiment label '{}'",
                    other
                )))
            }
        };
        Ok(Sentiment {
            positive,
            score: response.score,
        })
    }
}

/// Remote financial prediction model.
#[derive(Debug, Clone)]
pub struct HttpFinancialModel {
    http: HttpCollaborator,
}

impl HttpFinancialModel {
    pub fn new(http: HttpCollaborator) -> Self {
        Self { http }
    }
}

#[async_trait]
impl FinancialModel for HttpFinancialModel {
    async fn predict(&self, features: &[f64; 10]) -> Result<f64, TrustError> {
        let response: PredictResponse = self
            .http
            .post_json(&["financial", "predict"], &PredictRequest { features })
            .await?;
        Ok(response.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn http(server: &MockServer) -> HttpCollaborator {
        HttpCollaborator::new("inference", &server.base_url(), Duration::from_secs(2))
    }

    #[tokio::test]
    async fn classification_keeps_only_candidate_labels() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/classify");
                then.status(200).json_body(json!({"labels": [
                    {"label": "professional", "score": 0.7},
                    {"label": "unrelated", "score": 0.2},
                    {"label": "casual", "score": 0.1}
                ]}));
            })
            .await;

        let classifier = HttpClassifier::new(http(&server));
        let c = classifier.classify("quarterly report", &["professional", "casual"]).await.unwrap();
        assert_eq!(c.top().unwrap().label, "professional");
        assert_eq!(c.score_of("unrelated"), 0.0);
    }

    #[tokio::test]
    async fn sentiment_label_is_parsed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/sentiment");
                then.status(200).json_body(json!({"label": "NEGATIVE", "score": 0.83}));
            })
            .await;

        let s = HttpClassifier::new(http(&server)).sentiment("terrible").await.unwrap();
        assert!(!s.positive);
        assert_eq!(s.score, 0.83);
    }

    #[tokio::test]
    async fn financial_model_returns_probability() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/financial/predict");
                then.status(200).json_body(json!({"probability": 0.61}));
            })
            .await;

        let p = HttpFinancialModel::new(http(&server)).predict(&[0.5; 10]).await.unwrap();
        assert_eq!(p, 0.61);
    }
}
