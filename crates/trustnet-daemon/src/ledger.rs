// crates/trustnet-daemon/src/ledger.rs
//
// HTTP ledger writer: POST {ledger_url}/scores with the four integer scores.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use trustnet_core::{LedgerScores, LedgerWriter, TrustError};

use crate::http::HttpCollaborator;

#[derive(Debug, Serialize)]
struct SubmitScores<'a> {
    address: &'a str,
    #[serde(flatten)]
    scores: &'a LedgerScores,
}

#[derive(Debug, Deserialize)]
struct SubmitReceipt {
    submitted: bool,
    #[serde(default)]
    transaction: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpLedgerWriter {
    http: HttpCollaborator,
}

impl HttpLedgerWriter {
    pub fn new(http: HttpCollaborator) -> Self {
        Self { http }
    }
}

#[async_trait]
impl LedgerWriter for HttpLedgerWriter {
    async fn submit(&self, address: &str, scores: &LedgerScores) -> Result<bool, TrustError> {
        let receipt: SubmitReceipt =
            self.http.post_json(&["scores"], &SubmitScores { address, scores }).await?;
        tracing::info!(
            address,
            submitted = receipt.submitted,
            transaction = receipt.transaction.as_deref().unwrap_or("-"),
            "Ledger receipt"
        );
        Ok(receipt.submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn posts_integer_scores() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/scores").json_body(json!({
                    "address": "0xabc",
                    "overall": 71,
                    "financial": 65,
                    "professional": 80,
                    "social": 0,
                }));
                then.status(200).json_body(json!({"submitted": true, "transaction": "0xdead"}));
            })
            .await;

        let writer = HttpLedgerWriter::new(HttpCollaborator::new(
            "ledger",
            &server.base_url(),
            Duration::from_secs(2),
        ));
        let scores = LedgerScores {
            overall: 71,
            financial: 65,
            professional: 80,
            social: 0,
        };
        assert!(writer.submit("0xabc", &scores).await.unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_is_collaborator_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/scores");
                then.status(503);
            })
            .await;

        let writer = HttpLedgerWriter::new(HttpCollaborator::new(
            "ledger",
            &server.base_url(),
            Duration::from_secs(2),
        ));
        let scores = LedgerScores {
            overall: 1,
            financial: 2,
            professional: 3,
            social: 4,
        };
        let err = writer.submit("0xabc", &scores).await.unwrap_err();
        assert!(matches!(err, TrustError::Collaborator(_)));
    }
}
