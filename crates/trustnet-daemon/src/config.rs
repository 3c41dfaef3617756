// crates/trustnet-daemon/src/config.rs
//
// Runtime configuration for the TrustNet daemon.
// Loaded from a TOML file or populated with defaults.

use serde::Deserialize;
use std::fs;

use trustnet_core::ScoringConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Host address for the RPC server.
    #[serde(default = "default_rpc_host")]
    pub rpc_host: String,

    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Base URL of the ledger service. No ledger writes when unset.
    #[serde(default)]
    pub ledger_url: Option<String>,

    /// Base URL of the inference service. The in-process keyword classifier
    /// and logistic model are used when unset.
    #[serde(default)]
    pub inference_url: Option<String>,

    /// Base URL of the profile source. Username lookups are disabled when unset.
    #[serde(default)]
    pub profile_source_url: Option<String>,

    #[serde(default = "default_profile_cache_ttl_secs")]
    pub profile_cache_ttl_secs: u64,

    /// Timeout for outbound HTTP requests to collaborators.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_rpc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    50061
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_profile_cache_ttl_secs() -> u64 {
    300
}

fn default_http_timeout_secs() -> u64 {
    10
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            rpc_host: default_rpc_host(),
            rpc_port: default_rpc_port(),
            log_level: default_log_level(),
            ledger_url: None,
            inference_url: None,
            profile_source_url: None,
            profile_cache_ttl_secs: default_profile_cache_ttl_secs(),
            http_timeout_secs: default_http_timeout_secs(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path (`~` expanded).
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: DaemonConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        let w = &self.scoring.domain_weights;
        for (name, value) in [
            ("financial", w.financial),
            ("social", w.social),
            ("document", w.document),
            ("reference", w.reference),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "scoring.domain_weights.{} must be a non-negative number",
                    name
                ));
            }
        }
        if self.scoring.collaborator_timeout_ms == 0 {
            return Err("scoring.collaborator_timeout_ms must be positive".to_string());
        }
        Ok(())
    }
}

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DaemonConfig::parse("").unwrap();
        assert_eq!(config.rpc_host, "127.0.0.1");
        assert_eq!(config.rpc_port, 50061);
        assert_eq!(config.profile_cache_ttl_secs, 300);
        assert_eq!(config.scoring, ScoringConfig::default());
        assert!(config.ledger_url.is_none());
    }

    #[test]
    fn scoring_section_overrides_weights() {
        let config = DaemonConfig::parse(
            r#"
            rpc_port = 6000
            ledger_url = "http://127.0.0.1:8545"

            [scoring]
            collaborator_timeout_ms = 1500

            [scoring.domain_weights]
            financial = 0.5
            social = 0.1
            document = 0.2
            reference = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.rpc_port, 6000);
        assert_eq!(config.scoring.collaborator_timeout_ms, 1500);
        assert_eq!(config.scoring.domain_weights.financial, 0.5);
        assert_eq!(config.ledger_url.as_deref(), Some("http://127.0.0.1:8545"));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let result = DaemonConfig::parse(
            r#"
            [scoring.domain_weights]
            financial = -1.0
            social = 0.25
            document = 0.2
            reference = 0.2
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn tilde_paths_expand() {
        assert_eq!(expand_tilde("/etc/trustnet.toml"), "/etc/trustnet.toml");
        if dirs::home_dir().is_some() {
            assert!(!expand_tilde("~/trustnet.toml").starts_with('~'));
        }
    }
}
