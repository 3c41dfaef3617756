// crates/trustnet-daemon/src/profiles.rs
//
// HTTP profile source: GET {profile_source_url}/twitter/{username} and
// /linkedin/{profile_id}. A 404 means the profile does not exist.

use async_trait::async_trait;

use trustnet_core::{LinkedInProfile, ProfileFetcher, TrustError, TwitterProfile};

use crate::http::HttpCollaborator;

#[derive(Debug, Clone)]
pub struct HttpProfileFetcher {
    http: HttpCollaborator,
}

impl HttpProfileFetcher {
    pub fn new(http: HttpCollaborator) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch_twitter(&self, username: &str) -> Result<Option<TwitterProfile>, TrustError> {
        let profile: Option<TwitterProfile> = self.http.get_optional(&["twitter", username]).await?;
        if let Some(p) = &profile {
            tracing::debug!(username, followers = p.followers, "Fetched Twitter profile");
        }
        Ok(profile)
    }

    async fn fetch_linkedin(
        &self,
        profile_id: &str,
    ) -> Result<Option<LinkedInProfile>, TrustError> {
        let mut profile: Option<LinkedInProfile> =
            self.http.get_optional(&["linkedin", profile_id]).await?;
        if let Some(p) = profile.as_mut() {
            p.profile_id.get_or_insert_with(|| profile_id.to_string());
            tracing::debug!(profile_id, connections = p.connections, "Fetched LinkedIn profile");
        }
        Ok(profile)
    }
}
