// crates/trustnet-daemon/src/handles.rs
//
// Process-scoped collaborator handles: built once at startup from the
// configuration and torn down explicitly at shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use trustnet_scoring::{CachedProfileFetcher, ScoringHandles};

use crate::config::DaemonConfig;
use crate::http::HttpCollaborator;
use crate::inference::{HttpClassifier, HttpFinancialModel};
use crate::ledger::HttpLedgerWriter;
use crate::profiles::HttpProfileFetcher;

/// Collaborator handles plus the background tasks that maintain them.
pub struct DaemonHandles {
    pub scoring: ScoringHandles,
    cache_purge: Option<JoinHandle<()>>,
}

/// Build the handles described by `config`.
///
/// Collaborators without a configured URL fall back to the in-process
/// implementations; the ledger and profile source are simply absent.
pub fn init(config: &DaemonConfig) -> DaemonHandles {
    let http_timeout = Duration::from_secs(config.http_timeout_secs);
    let mut scoring = ScoringHandles::offline();

    if let Some(url) = &config.inference_url {
        let http = HttpCollaborator::new("inference", url, http_timeout);
        scoring = scoring
            .with_classifier(Arc::new(HttpClassifier::new(http.clone())))
            .with_model(Arc::new(HttpFinancialModel::new(http)));
        tracing::info!("Using remote inference at {}", url);
    } else {
        tracing::info!(
            "No inference_url configured; using the keyword classifier and logistic model"
        );
    }

    if let Some(url) = &config.ledger_url {
        scoring = scoring.with_ledger(Arc::new(HttpLedgerWriter::new(HttpCollaborator::new(
            "ledger",
            url,
            http_timeout,
        ))));
        tracing::info!("Ledger writes go to {}", url);
    } else {
        tracing::warn!("No ledger_url configured; ledger submissions will be refused");
    }

    let mut cache_purge = None;
    if let Some(url) = &config.profile_source_url {
        let ttl = Duration::from_secs(config.profile_cache_ttl_secs);
        let source = HttpProfileFetcher::new(HttpCollaborator::new("profiles", url, http_timeout));
        let cache = Arc::new(CachedProfileFetcher::new(Arc::new(source), ttl));
        cache_purge = Some(spawn_cache_purge(cache.clone(), ttl));
        scoring = scoring.with_fetcher(cache);
        tracing::info!("Profile source at {} (cache ttl {}s)", url, config.profile_cache_ttl_secs);
    }

    DaemonHandles { scoring, cache_purge }
}

/// Drop expired profile-cache entries once per `period`.
fn spawn_cache_purge(cache: Arc<CachedProfileFetcher>, period: Duration) -> JoinHandle<()> {
    let period = period.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            cache.purge_expired().await;
            let entries = cache.len().await;
            tracing::debug!(entries, "Profile cache purged");
        }
    })
}

impl DaemonHandles {
    /// Stop background tasks and release the collaborators.
    pub fn shutdown(self) {
        if let Some(task) = self.cache_purge {
            task.abort();
        }
        self.scoring.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn defaults_are_offline() {
        let handles = init(&DaemonConfig::default());
        assert!(handles.scoring.ledger.is_none());
        assert!(handles.scoring.fetcher.is_none());
        assert!(handles.cache_purge.is_none());
        handles.shutdown();
    }

    #[tokio::test]
    async fn configured_urls_install_remote_collaborators() {
        let config = DaemonConfig {
            ledger_url: Some("http://127.0.0.1:9".to_string()),
            profile_source_url: Some("http://127.0.0.1:9".to_string()),
            ..Default::default()
        };
        let handles = init(&config);
        assert!(handles.scoring.ledger.is_some());
        assert!(handles.scoring.fetcher.is_some());
        assert!(handles.cache_purge.is_some());
        handles.shutdown();
    }
}
