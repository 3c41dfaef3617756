// crates/trustnet-daemon/src/http.rs
//
// Shared JSON-over-HTTP client for the remote collaborators.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use trustnet_core::TrustError;

/// A base URL plus a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    name: &'static str,
    base_url: String,
    client: reqwest::Client,
}

impl HttpCollaborator {
    pub fn new(name: &'static str, base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, TrustError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| self.failure(e))?;
        url.path_segments_mut()
            .map_err(|_| self.failure("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn failure(&self, what: impl std::fmt::Display) -> TrustError {
        TrustError::Collaborator(format!("{}: {}", self.name, what))
    }

    /// POST `body` as JSON and decode a JSON response.
    pub async fn post_json<Req, Resp>(
        &self,
        segments: &[&str],
        body: &Req,
    ) -> Result<Resp, TrustError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(segments)?)
            .json(body)
            .send()
            .await
            .map_err(|e| self.failure(e))?;
        if !response.status().is_success() {
            return Err(self.failure(format!(
                "/{} returned status {}",
                segments.join("/"),
                response.status()
            )));
        }
        response.json::<Resp>().await.map_err(|e| self.failure(e))
    }

    /// GET a JSON document. A 404 is `Ok(None)`.
    pub async fn get_optional<Resp>(&self, segments: &[&str]) -> Result<Option<Resp>, TrustError>
    where
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.url(segments)?)
            .send()
            .await
            .map_err(|e| self.failure(e))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(self.failure(format!(
                "/{} returned status {}",
                segments.join("/"),
                response.status()
            )));
        }
        response.json::<Resp>().await.map(Some).map_err(|e| self.failure(e))
    }
}
