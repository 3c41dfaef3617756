// crates/trustnet-reputation/src/verification.rs
//
// Per-reference verification checks: identity, relationship, and content.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use trustnet_core::features::{reference as thresholds, saturating_ratio, saturating_score};
use trustnet_core::{
    aggregate, bounded, unweighted_mean, ReferenceRecord, TextClassifier, WeightedComponent,
    NEUTRAL_SCORE,
};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@([A-Za-z0-9-]+\.)+[A-Za-z]{2,}$").expect("email regex")
});

const DISPOSABLE_DOMAINS: &[&str] = &[
    "mailinator.com",
    "guerrillamail.com",
    "10minutemail.com",
    "tempmail.com",
    "temp-mail.org",
    "trashmail.com",
    "yopmail.com",
    "throwawaymail.com",
    "sharklasers.com",
    "getnada.com",
];

const FREE_MAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "aol.com",
    "icloud.com",
    "mail.com",
    "protonmail.com",
    "gmx.com",
    "yandex.com",
];

const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("linkedin.com", "linkedin"),
    ("twitter.com", "twitter"),
    ("x.com", "twitter"),
    ("github.com", "github"),
];

const EXECUTIVE_TITLES: &[&str] = &[
    "ceo", "cto", "cfo", "coo", "cio", "chief", "president", "vp", "founder", "director", "partner",
];
const SENIOR_TITLES: &[&str] = &["manager", "lead", "senior", "head", "principal", "supervisor"];

const WORK_TERMS: &[&str] = &[
    "project", "delivered", "led", "built", "designed", "implemented", "managed", "launched",
    "team", "client", "deadline", "budget", "revenue", "customers", "migration", "release",
    "initiative", "improved",
];

pub const CONTEXT_LABELS: &[&str] = &[
    "worked together directly",
    "professional collaboration",
    "personal acquaintance",
    "unknown relationship",
];
pub const AUTHENTICITY_LABELS: &[&str] = &[
    "genuine", "detailed", "authentic", "generic", "template", "fabricated",
];
pub const RELEVANCE_LABELS: &[&str] = &[
    "professional skills",
    "work performance",
    "leadership",
    "personal life",
    "unrelated",
];

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Plausibility of the referee's email address.
///
/// Malformed → 0, disposable → 10, free-mail → 40, corporate → 90,
/// academic or government → 100.
pub fn email_score(email: &str) -> f64 {
    let email = email.trim();
    if !EMAIL_RE.is_match(email) {
        return 0.0;
    }
    let domain = match email.rsplit_once('@') {
        Some((_, domain)) => domain.to_lowercase(),
        None => return 0.0,
    };
    if DISPOSABLE_DOMAINS.contains(&domain.as_str()) {
        10.0
    } else if FREE_MAIL_DOMAINS.contains(&domain.as_str()) {
        40.0
    } else if is_institutional(&domain) {
        100.0
    } else {
        90.0
    }
}

fn is_institutional(domain: &str) -> bool {
    [".edu", ".gov", ".mil"].iter().any(|tld| domain.ends_with(tld))
        || [".edu.", ".gov.", ".ac."].iter().any(|part| domain.contains(part))
}

fn profile_host(url: &str) -> String {
    let lower = url.trim().to_lowercase();
    let without_scheme = lower.split_once("://").map(|(_, rest)| rest).unwrap_or(lower.as_str());
    let host = without_scheme.split(['/', '?', '#']).next().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// Distinct recognised platforms among the referee's profile URLs, saturating at 2.
pub fn social_presence_score(profiles: &[String]) -> f64 {
    let mut platforms: Vec<&str> = profiles
        .iter()
        .filter_map(|url| {
            let host = profile_host(url);
            SOCIAL_PLATFORMS
                .iter()
                .find(|(domain, _)| host == *domain || host.ends_with(&format!(".{}", domain)))
                .map(|(_, platform)| *platform)
        })
        .collect();
    platforms.sort_unstable();
    platforms.dedup();
    saturating_score(platforms.len() as f64, thresholds::SOCIAL_PROFILES)
}

/// Seniority of the referee's position. `None` for a blank position.
pub fn position_score(position: &str) -> Option<f64> {
    let lower = position.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let has = |titles: &[&str]| words.iter().any(|w| titles.contains(w));
    if has(EXECUTIVE_TITLES) || lower.contains("vice president") {
        Some(90.0)
    } else if has(SENIOR_TITLES) {
        Some(80.0)
    } else {
        Some(60.0)
    }
}

/// Unweighted mean of the identity checks that have data; none → 50.
pub fn identity_score(record: &ReferenceRecord) -> f64 {
    let mut scores = Vec::new();
    if let Some(email) = record.email.as_deref().filter(|e| !e.trim().is_empty()) {
        scores.push(email_score(email));
    }
    if !record.social_profiles.is_empty() {
        scores.push(social_presence_score(&record.social_profiles));
    }
    if let Some(score) = record.position.as_deref().and_then(position_score) {
        scores.push(score);
    }
    unweighted_mean(&scores)
}

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

/// Plausibility of the claimed relationship length.
pub fn duration_score(years: f64) -> f64 {
    if !years.is_finite() || years < 0.0 || years > thresholds::MAX_RELATIONSHIP_YEARS {
        return 0.0;
    }
    40.0 + 60.0 * saturating_ratio(years, thresholds::RELATIONSHIP_YEARS)
}

pub fn mutual_connections_score(count: u32) -> f64 {
    saturating_score(count as f64, thresholds::MUTUAL_CONNECTIONS)
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// How concrete a reference text is, from numbers, proper terms, work
/// vocabulary, and length. 0 for empty text.
pub fn specificity_score(text: &str) -> f64 {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let numbers = tokens.iter().filter(|t| t.chars().any(|c| c.is_ascii_digit())).count();
    let proper_terms = tokens
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(i, t)| {
            let after_sentence_end = tokens[i - 1].ends_with(['.', '!', '?']);
            !after_sentence_end && t.chars().next().is_some_and(char::is_uppercase)
        })
        .count();
    let work_terms = tokens
        .iter()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|t| WORK_TERMS.contains(&t.as_str()))
        .count();

    let factors = [
        saturating_ratio(numbers as f64, 3.0),
        saturating_ratio(proper_terms as f64, 5.0),
        saturating_ratio(work_terms as f64, 5.0),
        saturating_ratio(tokens.len() as f64, 100.0),
    ];
    factors.iter().sum::<f64>() / factors.len() as f64 * 100.0
}

/// Classifier-backed relationship and content checks.
///
/// Every collaborator call is time-bounded; a failed call scores 50 for that
/// sub-check and records the error.
pub struct ContentChecks<'a> {
    classifier: &'a dyn TextClassifier,
    timeout: Duration,
}

impl<'a> ContentChecks<'a> {
    pub fn new(classifier: &'a dyn TextClassifier, timeout: Duration) -> Self {
        Self { classifier, timeout }
    }

    async fn label_share(
        &self,
        what: &str,
        text: &str,
        labels: &[&str],
        positive: usize,
        errors: &mut Vec<String>,
    ) -> f64 {
        match bounded(self.timeout, what, self.classifier.classify(text, labels)).await {
            Ok(classification) => {
                classification.sum_of(&labels[..positive]).clamp(0.0, 1.0) * 100.0
            }
            Err(e) => {
                tracing::warn!(
                    check = what,
                    error = %e,
                    "Reference check fell back to neutral score"
                );
                errors.push(format!("{}: {}", what, e));
                NEUTRAL_SCORE
            }
        }
    }

    /// Context classification over `context`, falling back to the reference text.
    pub async fn context_score(&self, record: &ReferenceRecord, errors: &mut Vec<String>) -> f64 {
        let text = record
            .context
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| record.content.as_deref().filter(|t| !t.trim().is_empty()));
        match text {
            Some(text) => {
                self.label_share("context classification", text, CONTEXT_LABELS, 2, errors)
                    .await
            }
            None => NEUTRAL_SCORE,
        }
    }

    pub async fn relationship_score(
        &self,
        record: &ReferenceRecord,
        errors: &mut Vec<String>,
    ) -> f64 {
        let mut scores = Vec::new();
        if let Some(years) = record.relationship_duration_years {
            scores.push(duration_score(years));
        }
        scores.push(self.context_score(record, errors).await);
        if let Some(count) = record.mutual_connections {
            scores.push(mutual_connections_score(count));
        }
        unweighted_mean(&scores)
    }

    /// Weighted 0.2 sentiment, 0.3 authenticity, 0.25 specificity, 0.25 relevance.
    /// No reference text → 50.
    pub async fn content_score(&self, record: &ReferenceRecord, errors: &mut Vec<String>) -> f64 {
        let text = match record.content.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(text) => text,
            None => return NEUTRAL_SCORE,
        };

        let sentiment = bounded(self.timeout, "sentiment", self.classifier.sentiment(text)).await;
        let sentiment = match sentiment {
            Ok(s) if s.positive => 100.0 * s.score,
            Ok(_) => 0.0,
            Err(e) => {
                tracing::warn!(error = %e, "Reference sentiment fell back to neutral score");
                errors.push(format!("sentiment: {}", e));
                NEUTRAL_SCORE
            }
        };
        let authenticity =
            self.label_share("authenticity", text, AUTHENTICITY_LABELS, 3, errors).await;
        let specificity = specificity_score(text);
        let relevance = self.label_share("relevance", text, RELEVANCE_LABELS, 3, errors).await;

        tracing::debug!(
            sentiment,
            authenticity,
            specificity,
            relevance,
            "Reference content sub-scores"
        );

        aggregate(&[
            WeightedComponent::new("sentiment", sentiment, 0.2),
            WeightedComponent::new("authenticity", authenticity, 0.3),
            WeightedComponent::new("specificity", specificity, 0.25),
            WeightedComponent::new("relevance", relevance, 0.25),
        ])
    }
}
