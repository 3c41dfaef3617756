// crates/trustnet-rpc/src/handlers/social.rs
//
// Social analysis handler: AnalyzeSocial.
//
// Profiles are taken inline when supplied; otherwise the usernames are
// resolved through the configured profile fetcher.

use serde::{Deserialize, Serialize};

use trustnet_core::{DomainScore, LinkedInProfile, SocialEvidence, TrustError, TwitterProfile};
use trustnet_scoring::social::resolve_profiles;
use trustnet_scoring::TrustEngine;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeSocialRequest {
    pub twitter: Option<TwitterProfile>,
    pub linkedin: Option<LinkedInProfile>,
    pub twitter_username: Option<String>,
    pub linkedin_profile_id: Option<String>,
}

impl AnalyzeSocialRequest {
    fn has_inline_profiles(&self) -> bool {
        self.twitter.is_some() || self.linkedin.is_some()
    }
}

pub async fn handle_analyze_social(
    engine: &TrustEngine,
    request: AnalyzeSocialRequest,
) -> Result<DomainScore, TrustError> {
    if request.has_inline_profiles() {
        let evidence = SocialEvidence {
            twitter: request.twitter,
            linkedin: request.linkedin,
        };
        return engine.social().score(&evidence).await;
    }

    if request.twitter_username.is_none() && request.linkedin_profile_id.is_none() {
        return Err(TrustError::Validation(
            "at least one profile required (twitter or linkedin)".to_string(),
        ));
    }
    let fetcher = engine
        .handles()
        .fetcher
        .as_ref()
        .ok_or_else(|| TrustError::Collaborator("no profile fetcher configured".to_string()))?;

    let (evidence, fetch_errors) = resolve_profiles(
        fetcher.as_ref(),
        engine.config().collaborator_timeout(),
        request.twitter_username.as_deref(),
        request.linkedin_profile_id.as_deref(),
    )
    .await?;

    let mut score = engine.social().score(&evidence).await?;
    for e in fetch_errors {
        score.push_error(e);
    }
    tracing::info!(score = score.score, errors = score.errors.len(), "Social profiles analyzed");
    Ok(score)
}
