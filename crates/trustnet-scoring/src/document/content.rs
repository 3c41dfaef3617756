// crates/trustnet-scoring/src/document/content.rs
//
// Content scores of a document: internal quality, and the classifier-backed
// professionalism, credibility, and sentiment scores blended with it.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use trustnet_core::features::{document, saturating_ratio};
use trustnet_core::{bounded, TextClassifier, TrustError};

use super::stats::{self, DocumentStats};
use crate::stage::{recover, StageResult};

/// Characters per classified section.
pub const SECTION_CHARS: usize = 512;

/// Sections classified per document; text past the cap is not classified.
/// Keeps a document's classifier time under `3 * MAX_SECTIONS` timeouts.
pub const MAX_SECTIONS: usize = 16;

/// Weight of the classifier score in each blended content score.
pub const CLASSIFIER_BLEND: f64 = 0.7;

/// Weight of the internal quality score in each blended content score.
pub const QUALITY_BLEND: f64 = 0.3;

pub const PROFESSIONALISM_LABELS: &[&str] = &[
    "professional", "academic", "technical", "formal", "casual", "informal",
];
const PROFESSIONALISM_POSITIVE: usize = 4;

pub const CREDIBILITY_LABELS: &[&str] = &[
    "objective",
    "evidence-based",
    "verifiable",
    "subjective",
    "biased",
    "speculative",
];
const CREDIBILITY_POSITIVE: usize = 3;

const TECHNICAL_TERMS: &[&str] = &[
    "analysis",
    "research",
    "methodology",
    "data",
    "results",
    "findings",
    "evidence",
    "study",
    "report",
    "hypothesis",
    "investigation",
    "conclusion",
    "method",
    "process",
    "evaluation",
    "assessment",
    "review",
    "examination",
    "observation",
    "theory",
];

static CITATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"\(\d{4}\)", r"\[[\d,\s]+\]", r"et al\.", r"see\.", r"cf\."]
        .iter()
        .map(|p| Regex::new(p).expect("citation regex"))
        .collect()
});

/// Internal quality of the text, every factor in [0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    pub word_diversity: f64,
    pub sentence_complexity: f64,
    pub technical_score: f64,
    pub citation_count: usize,
    pub citation_score: f64,
    /// 0.3 diversity + 0.2 complexity + 0.3 technical + 0.2 citations.
    pub score: f64,
}

pub fn count_citations(text: &str) -> usize {
    CITATION_PATTERNS.iter().map(|re| re.find_iter(text).count()).sum()
}

impl QualityBreakdown {
    pub fn compute(text: &str, doc: &DocumentStats) -> Self {
        let meaningful: Vec<String> = stats::words(text)
            .into_iter()
            .filter(|w| !stats::is_stop_word(w))
            .collect();
        let technical = meaningful.iter().filter(|w| TECHNICAL_TERMS.contains(&w.as_str())).count();

        let word_diversity = doc.vocabulary_richness;
        let sentence_complexity =
            saturating_ratio(doc.avg_sentence_length, document::IDEAL_SENTENCE_WORDS);
        let technical_score = saturating_ratio(
            technical as f64,
            meaningful.len() as f64 * document::TECHNICAL_DENSITY,
        );
        let citation_count = count_citations(text);
        let citation_score = saturating_ratio(citation_count as f64, document::CITATIONS);

        Self {
            word_diversity,
            sentence_complexity,
            technical_score,
            citation_count,
            citation_score,
            score: word_diversity * 0.3
                + sentence_complexity * 0.2
                + technical_score * 0.3
                + citation_score * 0.2,
        }
    }
}

/// Blended content scores, each in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentScores {
    pub professionalism: f64,
    pub credibility: f64,
    pub sentiment: f64,
}

impl ContentScores {
    pub fn mean(&self) -> f64 {
        (self.professionalism + self.credibility + self.sentiment) / 3.0
    }
}

/// Split text into at most `MAX_SECTIONS` sections of at most `SECTION_CHARS`
/// characters each.
pub fn sections(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len().div_ceil(SECTION_CHARS);
    if total > MAX_SECTIONS {
        tracing::debug!(
            sections = total,
            kept = MAX_SECTIONS,
            "Document truncated for classification"
        );
    }
    chars
        .chunks(SECTION_CHARS)
        .take(MAX_SECTIONS)
        .map(|c| c.iter().collect())
        .collect()
}

fn blend(classifier_share: f64, quality: f64) -> f64 {
    ((classifier_share * CLASSIFIER_BLEND + quality * QUALITY_BLEND) * 100.0).clamp(0.0, 100.0)
}

async fn label_share(
    classifier: &dyn TextClassifier,
    timeout: Duration,
    what: &str,
    sections: &[String],
    labels: &[&str],
    positive: usize,
    errors: &mut Vec<String>,
) -> StageResult<f64> {
    let mut shares = Vec::with_capacity(sections.len());
    for (i, section) in sections.iter().enumerate() {
        match bounded(timeout, what, classifier.classify(section, labels)).await {
            Ok(c) => shares.push(c.sum_of(&labels[..positive]).clamp(0.0, 1.0)),
            Err(e) => errors.push(format!("{} section[{}]: {}", what, i, e)),
        }
    }
    if shares.is_empty() {
        return Err(TrustError::Computation(format!("{}: no section could be classified", what)));
    }
    Ok(shares.iter().sum::<f64>() / shares.len() as f64)
}

async fn positive_share(
    classifier: &dyn TextClassifier,
    timeout: Duration,
    sections: &[String],
    errors: &mut Vec<String>,
) -> StageResult<f64> {
    let mut analysed = 0usize;
    let mut positive = 0usize;
    for (i, section) in sections.iter().enumerate() {
        match bounded(timeout, "sentiment", classifier.sentiment(section)).await {
            Ok(s) => {
                analysed += 1;
                if s.positive {
                    positive += 1;
                }
            }
            Err(e) => errors.push(format!("sentiment section[{}]: {}", i, e)),
        }
    }
    if analysed == 0 {
        return Err(TrustError::Computation("sentiment: no section could be analysed".to_string()));
    }
    Ok(positive as f64 / analysed as f64)
}

/// Classify every section and blend each share with the quality score.
///
/// A content score whose classifier calls all fail falls back to 50.
pub async fn analyze(
    classifier: &dyn TextClassifier,
    timeout: Duration,
    text: &str,
    quality: &QualityBreakdown,
    errors: &mut Vec<String>,
) -> ContentScores {
    let sections = sections(text);

    let professionalism = label_share(
        classifier,
        timeout,
        "professionalism",
        &sections,
        PROFESSIONALISM_LABELS,
        PROFESSIONALISM_POSITIVE,
        errors,
    )
    .await
    .map(|share| blend(share, quality.score));
    let credibility = label_share(
        classifier,
        timeout,
        "credibility",
        &sections,
        CREDIBILITY_LABELS,
        CREDIBILITY_POSITIVE,
        errors,
    )
    .await
    .map(|share| blend(share, quality.score));
    let sentiment = positive_share(classifier, timeout, &sections, errors)
        .await
        .map(|share| blend(share, quality.score));

    ContentScores {
        professionalism: recover("professionalism", professionalism, errors),
        credibility: recover("credibility", credibility, errors),
        sentiment: recover("sentiment", sentiment, errors),
    }
}
