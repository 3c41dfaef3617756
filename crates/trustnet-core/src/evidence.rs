// crates/trustnet-core/src/evidence.rs
//
// Evidence bundles: the raw, per-domain metrics handed to the scorers.
//
// Bundles are produced by external collaborators (profile fetchers, document
// uploads, reference forms, financial data providers) and validated here at
// the boundary before entering the scoring core.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrustError;
use crate::score::Domain;

/// One raw evidence bundle, tagged by domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", content = "evidence", rename_all = "lowercase")]
pub enum EvidenceBundle {
    Social(SocialEvidence),
    Document(DocumentEvidence),
    Reference(ReferenceEvidence),
    Financial(FinancialEvidence),
}

impl EvidenceBundle {
    pub fn domain(&self) -> Domain {
        match self {
            EvidenceBundle::Social(_) => Domain::Social,
            EvidenceBundle::Document(_) => Domain::Document,
            EvidenceBundle::Reference(_) => Domain::Reference,
            EvidenceBundle::Financial(_) => Domain::Financial,
        }
    }

    /// Check the per-variant required/optional field rules.
    pub fn validate(&self) -> Result<(), TrustError> {
        match self {
            EvidenceBundle::Social(e) => e.validate(),
            EvidenceBundle::Document(e) => e.format().map(|_| ()),
            EvidenceBundle::Reference(e) => e.validate(),
            EvidenceBundle::Financial(e) => e.validate(),
        }
    }
}

/// At most one bundle per domain for a single scoring request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSet {
    #[serde(default)]
    pub social: Option<SocialEvidence>,
    #[serde(default)]
    pub document: Option<DocumentEvidence>,
    #[serde(default)]
    pub references: Option<ReferenceEvidence>,
    #[serde(default)]
    pub financial: Option<FinancialEvidence>,
}

impl EvidenceSet {
    /// Collect bundles into a set. A domain supplied twice is a validation error.
    pub fn from_bundles(
        bundles: impl IntoIterator<Item = EvidenceBundle>,
    ) -> Result<Self, TrustError> {
        let mut set = EvidenceSet::default();
        for bundle in bundles {
            let domain = bundle.domain();
            let duplicate = match bundle {
                EvidenceBundle::Social(e) => set.social.replace(e).is_some(),
                EvidenceBundle::Document(e) => set.document.replace(e).is_some(),
                EvidenceBundle::Reference(e) => set.references.replace(e).is_some(),
                EvidenceBundle::Financial(e) => set.financial.replace(e).is_some(),
            };
            if duplicate {
                return Err(TrustError::Validation(format!(
                    "evidence for domain '{}' supplied more than once",
                    domain
                )));
            }
        }
        Ok(set)
    }

    /// Domains that have a bundle.
    pub fn domains(&self) -> Vec<Domain> {
        let mut domains = Vec::new();
        if self.social.is_some() {
            domains.push(Domain::Social);
        }
        if self.document.is_some() {
            domains.push(Domain::Document);
        }
        if self.references.is_some() {
            domains.push(Domain::Reference);
        }
        if self.financial.is_some() {
            domains.push(Domain::Financial);
        }
        domains
    }

    pub fn is_empty(&self) -> bool {
        self.domains().is_empty()
    }

    /// Financial and document evidence tied to an on-chain identity must be signed.
    pub fn requires_signature(&self) -> bool {
        self.financial.is_some() || self.document.is_some()
    }

    /// Validate every present bundle. An empty set is a validation error.
    pub fn validate(&self) -> Result<(), TrustError> {
        if self.is_empty() {
            return Err(TrustError::Validation(
                "at least one evidence domain is required".to_string(),
            ));
        }
        if let Some(social) = &self.social {
            social.validate()?;
        }
        if let Some(document) = &self.document {
            document.format()?;
        }
        if let Some(references) = &self.references {
            references.validate()?;
        }
        if let Some(financial) = &self.financial {
            financial.validate()?;
        }
        Ok(())
    }
}

fn check_metric(field: &str, value: f64) -> Result<(), TrustError> {
    if !value.is_finite() || value < 0.0 {
        return Err(TrustError::Validation(format!(
            "{} must be a finite, non-negative number (got {})",
            field, value
        )));
    }
    Ok(())
}

fn check_optional(field: &str, value: Option<f64>) -> Result<(), TrustError> {
    match value {
        Some(v) => check_metric(field, v),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

/// Social-media presence. At least one platform must be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialEvidence {
    #[serde(default)]
    pub twitter: Option<TwitterProfile>,
    #[serde(default)]
    pub linkedin: Option<LinkedInProfile>,
}

impl SocialEvidence {
    pub fn validate(&self) -> Result<(), TrustError> {
        if self.twitter.is_none() && self.linkedin.is_none() {
            return Err(TrustError::Validation(
                "at least one profile required (twitter or linkedin)".to_string(),
            ));
        }
        if let Some(t) = &self.twitter {
            check_metric("twitter.account_age_years", t.account_age_years)?;
            check_metric("twitter.engagement_rate", t.engagement_rate)?;
            check_optional("twitter.influence_score", t.influence_score)?;
        }
        if let Some(l) = &self.linkedin {
            check_optional("linkedin.experience_years", l.experience_years)?;
            check_optional("linkedin.activity_score", l.activity_score)?;
            check_optional("linkedin.profile_completion", l.profile_completion)?;
        }
        Ok(())
    }
}

/// Raw Twitter/X metrics as returned by the profile fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwitterProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub tweet_count: u64,
    #[serde(default)]
    pub account_age_years: f64,
    /// Interactions per follower per tweet.
    #[serde(default)]
    pub engagement_rate: f64,
    /// Fetcher-side influence score in [0, 100]; computed by the scorer when absent.
    pub influence_score: Option<f64>,
    /// Most recent tweets, newest first.
    #[serde(default)]
    pub recent_tweets: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

/// A past or current position, in calendar years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub start_year: i32,
    /// `None` for a current position.
    pub end_year: Option<i32>,
}

/// Activity counts over the last 90 days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityCounts {
    #[serde(default)]
    pub posts: u32,
    #[serde(default)]
    pub articles: u32,
    #[serde(default)]
    pub activities: u32,
}

/// Raw LinkedIn metrics as returned by the profile fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedInProfile {
    pub profile_id: Option<String>,
    #[serde(default)]
    pub connections: u64,
    /// Pre-computed years of experience; derived from `experiences` when absent.
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    /// One of "PhD", "Master's", "Bachelor's", "High School"; derived from `degrees` when absent.
    pub education_level: Option<String>,
    #[serde(default)]
    pub degrees: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub endorsements: u64,
    #[serde(default)]
    pub recommendations: u64,
    /// Pre-computed activity score in [0, 100]; derived from `recent_activity` when absent.
    pub activity_score: Option<f64>,
    pub recent_activity: Option<ActivityCounts>,
    /// Pre-computed completion percentage; derived from `profile_sections` when absent.
    pub profile_completion: Option<f64>,
    /// Names of the filled-in profile sections (e.g. "summary", "headline").
    #[serde(default)]
    pub profile_sections: Vec<String>,
    /// Most recent post texts, newest first.
    #[serde(default)]
    pub recent_posts: Vec<String>,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Resolve the format from a file name's extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, TrustError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            other => Err(TrustError::UnsupportedFormat(format!(
                "'{}' (expected pdf, docx or txt)",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }
}

/// An uploaded document stored at `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEvidence {
    /// Original file name; its extension selects the format.
    pub file_name: String,
    pub path: PathBuf,
}

impl DocumentEvidence {
    pub fn new(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            path: path.into(),
        }
    }

    pub fn format(&self) -> Result<DocumentFormat, TrustError> {
        DocumentFormat::from_file_name(&self.file_name)
    }
}

// ---------------------------------------------------------------------------
// Reference
// ---------------------------------------------------------------------------

/// Peer references. An empty list is valid and scores neutral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceEvidence {
    pub references: Vec<ReferenceRecord>,
}

impl ReferenceEvidence {
    pub fn validate(&self) -> Result<(), TrustError> {
        for (i, r) in self.references.iter().enumerate() {
            if let Some(d) = r.relationship_duration_years {
                if !d.is_finite() {
                    return Err(TrustError::Validation(format!(
                        "references[{}].relationship_duration_years must be finite",
                        i
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One reference attestation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub social_profiles: Vec<String>,
    pub position: Option<String>,
    /// "manager", "direct_supervisor", "colleague", "client", or "other".
    pub relationship_type: Option<String>,
    pub relationship_duration_years: Option<f64>,
    /// Free-text description of how the referee knows the subject.
    pub context: Option<String>,
    pub mutual_connections: Option<u32>,
    /// The reference text itself.
    pub content: Option<String>,
    /// Date the reference was given (YYYY-MM-DD).
    pub date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Financial
// ---------------------------------------------------------------------------

/// Raw financial metrics. Every field is optional and has a neutral default
/// in the financial feature extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialEvidence {
    pub credit_score: Option<f64>,
    pub payment_history: Option<f64>,
    pub income_stability: Option<f64>,
    pub debt_to_income: Option<f64>,
    /// Years since the oldest account was opened.
    pub account_age: Option<f64>,
    pub transaction_consistency: Option<f64>,
    pub default_risk: Option<f64>,
    pub fraud_risk: Option<f64>,
    pub savings_ratio: Option<f64>,
    pub investment_diversity: Option<f64>,
}

impl FinancialEvidence {
    fn fields(&self) -> [(&'static str, Option<f64>); 10] {
        [
            ("credit_score", self.credit_score),
            ("payment_history", self.payment_history),
            ("income_stability", self.income_stability),
            ("debt_to_income", self.debt_to_income),
            ("account_age", self.account_age),
            ("transaction_consistency", self.transaction_consistency),
            ("default_risk", self.default_risk),
            ("fraud_risk", self.fraud_risk),
            ("savings_ratio", self.savings_ratio),
            ("investment_diversity", self.investment_diversity),
        ]
    }

    /// No metric supplied at all.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_none())
    }

    pub fn validate(&self) -> Result<(), TrustError> {
        for (name, value) in self.fields() {
            check_optional(name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_requires_a_profile() {
        let err = SocialEvidence::default().validate().unwrap_err();
        assert!(matches!(err, TrustError::Validation(_)));
        assert!(err.to_string().contains("at least one profile required"));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_file_name("cv.PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_file_name("a.b.docx").unwrap(), DocumentFormat::Docx);
        assert!(matches!(
            DocumentFormat::from_file_name("notes.md"),
            Err(TrustError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentFormat::from_file_name("README"),
            Err(TrustError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn financial_rejects_non_finite_metrics() {
        let evidence = FinancialEvidence {
            credit_score: Some(f64::INFINITY),
            ..Default::default()
        };
        assert!(evidence.validate().is_err());
        assert!(FinancialEvidence::default().validate().is_ok());
        assert!(FinancialEvidence::default().is_empty());
    }

    #[test]
    fn duplicate_domain_is_rejected() {
        let bundles = vec![
            EvidenceBundle::Financial(FinancialEvidence::default()),
            EvidenceBundle::Financial(FinancialEvidence::default()),
        ];
        assert!(EvidenceSet::from_bundles(bundles).is_err());
    }

    #[test]
    fn empty_set_is_invalid() {
        assert!(EvidenceSet::default().validate().is_err());
    }

    #[test]
    fn bundle_json_is_tagged_by_domain() {
        let json =
            r#"{"domain":"reference","evidence":[{"email":"a@acme.com","date":"2022-03-01"}]}"#;
        let bundle: EvidenceBundle = serde_json::from_str(json).unwrap();
        match bundle {
            EvidenceBundle::Reference(r) => {
                assert_eq!(r.references.len(), 1);
                assert_eq!(r.references[0].date, NaiveDate::from_ymd_opt(2022, 3, 1));
            }
            other => panic!("unexpected bundle {:?}", other),
        }
    }

    #[test]
    fn signature_required_for_financial_and_document() {
        let mut set = EvidenceSet {
            social: Some(SocialEvidence {
                twitter: Some(TwitterProfile::default()),
                linkedin: None,
            }),
            ..Default::default()
        };
        assert!(!set.requires_signature());
        set.financial = Some(FinancialEvidence::default());
        assert!(set.requires_signature());
    }
}
