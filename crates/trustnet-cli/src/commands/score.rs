// crates/trustnet-cli/src/commands/score.rs
//
// `trustnet score`: run the full pipeline over an evidence file in-process.
//
// The file is JSON: either an object keyed by domain (`social`, `document`,
// `references`, `financial`) or an array of `{domain, evidence}` bundles.
// Relative document paths resolve against the evidence file's directory.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Deserialize;
use tabled::Tabled;

use trustnet_core::{EvidenceBundle, EvidenceSet, ScoringConfig, TrustScoreResult};
use trustnet_scoring::{ScoringHandles, TrustEngine};

use crate::output::{format_json, format_score, format_table, OutputFormat};

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Path to the evidence JSON file.
    pub evidence: PathBuf,

    /// TOML file with `[domain_weights]` and `collaborator_timeout_ms`.
    #[arg(long)]
    pub weights: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EvidenceFile {
    Bundles(Vec<EvidenceBundle>),
    Set(EvidenceSet),
}

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Errors")]
    errors: String,
}

pub async fn run(
    args: &ScoreArgs,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.weights {
        Some(path) => load_config(path)?,
        None => ScoringConfig::default(),
    };
    let evidence = load_evidence(&args.evidence)?;

    let engine = TrustEngine::new(ScoringHandles::offline(), config);
    let result = engine.score(&evidence).await?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&result)),
        OutputFormat::Table => {
            println!("{}", format_table(&domain_rows(&result)));
            println!("Overall: {}", format_score(result.overall));
            for error in &result.errors {
                println!("  ! {}", error);
            }
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<ScoringConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

fn load_evidence(path: &Path) -> Result<EvidenceSet, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    parse_evidence(&contents, base)
}

fn parse_evidence(contents: &str, base: &Path) -> Result<EvidenceSet, Box<dyn std::error::Error>> {
    let file: EvidenceFile = serde_json::from_str(contents)?;
    let mut set = match file {
        EvidenceFile::Bundles(bundles) => EvidenceSet::from_bundles(bundles)?,
        EvidenceFile::Set(set) => set,
    };
    if let Some(document) = set.document.as_mut() {
        if document.path.is_relative() {
            document.path = base.join(&document.path);
        }
    }
    Ok(set)
}

fn domain_rows(result: &TrustScoreResult) -> Vec<DomainRow> {
    result
        .details
        .iter()
        .map(|(domain, score)| DomainRow {
            domain: domain.as_str().to_string(),
            score: format_score(score.score),
            weight: result
                .effective_weights
                .get(domain)
                .map(|w| format!("{:.3}", w))
                .unwrap_or_else(|| "-".to_string()),
            errors: score.errors.join("; "),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustnet_core::Domain;

    #[test]
    fn parses_object_form() {
        let json = r#"{"financial": {"credit_score": 700.0}, "references": []}"#;
        let set = parse_evidence(json, Path::new(".")).unwrap();
        assert_eq!(set.domains(), vec![Domain::Reference, Domain::Financial]);
    }

    #[test]
    fn parses_bundle_form_and_resolves_document_path() {
        let json = r#"[
            {"domain": "document", "evidence": {"file_name": "cv.txt", "path": "docs/cv.txt"}},
            {"domain": "financial", "evidence": {}}
        ]"#;
        let set = parse_evidence(json, Path::new("/data")).unwrap();
        assert_eq!(set.document.unwrap().path, PathBuf::from("/data/docs/cv.txt"));
        assert!(set.financial.is_some());
    }

    #[test]
    fn duplicate_bundles_are_rejected() {
        let json = r#"[
            {"domain": "financial", "evidence": {}},
            {"domain": "financial", "evidence": {}}
        ]"#;
        assert!(parse_evidence(json, Path::new(".")).is_err());
    }

    #[test]
    fn weights_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.toml");
        std::fs::write(&path, "[domain_weights]\nfinancial = 0.5\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.domain_weights.financial, 0.5);
        assert_eq!(config.domain_weights.social, 0.25);
    }

    #[tokio::test]
    async fn rows_follow_result_details() {
        let json = r#"{"financial": {"credit_score": 650.0}}"#;
        let set = parse_evidence(json, Path::new(".")).unwrap();
        let engine = TrustEngine::new(ScoringHandles::offline(), ScoringConfig::default());
        let result = engine.score(&set).await.unwrap();
        let rows = domain_rows(&result);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].domain, "financial");
        assert_eq!(rows[0].weight, "1.000");
    }
}
