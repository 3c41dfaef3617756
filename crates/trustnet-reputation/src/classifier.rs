// crates/trustnet-reputation/src/classifier.rs
//
// Deterministic keyword classifier implementing the `TextClassifier`
// contract. Used when no hosted inference endpoint is configured, and by the
// CLI for offline scoring.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use trustnet_core::{Classification, LabelScore, Sentiment, TextClassifier, TrustError};

/// A rule mapping keywords to a label.
#[derive(Debug, Clone)]
struct LabelRule {
    label: &'static str,
    keywords: &'static [&'static str],
}

const LABEL_RULES: &[LabelRule] = &[
    // Tweet / post quality
    LabelRule {
        label: "informative",
        keywords: &[
            "how to", "learn", "guide", "data", "report", "released", "announce", "update", "study",
            "thread", "insight", "tips",
        ],
    },
    LabelRule {
        label: "professional",
        keywords: &[
            "team", "project", "client", "conference", "hiring", "career", "business", "industry",
            "engineering", "product", "launch", "colleague",
        ],
    },
    LabelRule {
        label: "spam",
        keywords: &[
            "click here", "free", "giveaway", "win ", "promo", "discount", "follow back", "dm me",
            "crypto pump", "buy now", "limited offer",
        ],
    },
    LabelRule {
        label: "offensive",
        keywords: &["idiot", "stupid", "hate", "shut up", "moron", "trash", "loser", "disgusting"],
    },
    // Document register
    LabelRule {
        label: "academic",
        keywords: &[
            "et al", "hypothesis", "literature", "methodology", "university", "journal", "abstract",
            "thesis",
        ],
    },
    LabelRule {
        label: "technical",
        keywords: &[
            "system", "implementation", "architecture", "algorithm", "configuration", "performance",
            "protocol", "software",
        ],
    },
    LabelRule {
        label: "formal",
        keywords: &[
            "therefore", "furthermore", "moreover", "hereby", "respectfully", "accordingly",
            "pursuant", "regards",
        ],
    },
    LabelRule {
        label: "casual",
        keywords: &["hey", "gonna", "wanna", "cool", "awesome", "stuff", "kinda", "lol"],
    },
    LabelRule {
        label: "informal",
        keywords: &["yeah", "btw", "omg", "u ", "thx", "ya ", "dunno"],
    },
    // Document credibility
    LabelRule {
        label: "objective",
        keywords: &["measured", "observed", "according to", "percent", "%", "data", "statistics"],
    },
    LabelRule {
        label: "evidence-based",
        keywords: &["evidence", "results", "findings", "study", "analysis", "experiment", "survey"],
    },
    LabelRule {
        label: "verifiable",
        keywords: &["source", "reference", "available at", "http", "doi", "published", "record"],
    },
    LabelRule {
        label: "subjective",
        keywords: &["i think", "i feel", "in my opinion", "i believe", "personally"],
    },
    LabelRule {
        label: "biased",
        keywords: &["always", "never", "everyone knows", "obviously", "the best", "the worst"],
    },
    LabelRule {
        label: "speculative",
        keywords: &["might", "maybe", "perhaps", "could be", "possibly", "rumor"],
    },
    // Reference relationship context
    LabelRule {
        label: "worked together directly",
        keywords: &[
            "reported to me", "my team", "worked with", "worked together", "managed", "supervised",
            "same team", "side by side",
        ],
    },
    LabelRule {
        label: "professional collaboration",
        keywords: &[
            "project", "client", "partner", "collaborat", "vendor", "consult", "contract",
            "engagement",
        ],
    },
    LabelRule {
        label: "personal acquaintance",
        keywords: &[
            "friend", "neighbor", "family", "school", "known him", "known her", "known them",
            "met at",
        ],
    },
    LabelRule {
        label: "unknown relationship",
        keywords: &["not sure", "heard of", "briefly", "once", "online"],
    },
    // Reference authenticity
    LabelRule {
        label: "genuine",
        keywords: &[
            "i have seen", "i watched", "in my experience", "firsthand", "personally saw",
            "when we",
        ],
    },
    LabelRule {
        label: "detailed",
        keywords: &[
            "for example", "specifically", "in 20", "delivered", "reduced", "increased", "led the",
            "%",
        ],
    },
    LabelRule {
        label: "authentic",
        keywords: &["honest", "candid", "sincerely", "genuinely", "truly"],
    },
    LabelRule {
        label: "generic",
        keywords: &[
            "great person", "hard worker", "team player", "highly recommend", "good guy",
            "nice person",
        ],
    },
    LabelRule {
        label: "template",
        keywords: &[
            "to whom it may concern", "[name]", "insert", "lorem ipsum", "dear sir or madam",
        ],
    },
    LabelRule {
        label: "fabricated",
        keywords: &[
            "best ever", "perfect in every", "never made a mistake", "flawless", "100% perfect",
        ],
    },
    // Reference relevance
    LabelRule {
        label: "professional skills",
        keywords: &[
            "skill", "expertise", "technical", "knowledge", "competent", "proficient", "engineer",
            "analysis",
        ],
    },
    LabelRule {
        label: "work performance",
        keywords: &[
            "deliver", "deadline", "result", "performance", "quality", "reliable", "productive",
            "exceeded",
        ],
    },
    LabelRule {
        label: "leadership",
        keywords: &[
            "led", "lead", "mentor", "managed", "leadership", "vision", "initiative", "coached",
        ],
    },
    LabelRule {
        label: "personal life",
        keywords: &["family", "hobby", "weekend", "vacation", "party", "friend"],
    },
    LabelRule {
        label: "unrelated",
        keywords: &["weather", "sports", "movie", "game", "recipe"],
    },
];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "outstanding", "reliable", "trustworthy", "recommend", "happy",
    "love", "success", "successful", "impressive", "talented", "dedicated", "professional",
    "helpful", "strong", "best", "amazing", "thank", "thanks", "proud", "excited", "exceptional",
    "skilled", "positive", "recommended", "recommends", "trusted", "dependable",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "terrible", "awful", "unreliable", "dishonest", "fail", "failed", "late",
    "angry", "hate", "worst", "problem", "lazy", "rude", "disappointing", "negative", "sad",
    "wrong", "scam", "fraud", "weak", "careless", "incompetent", "never again",
];

/// Rule keywords match at the start of a word, so stems like "collaborat" still
/// cover their inflections. Keywords starting with punctuation match anywhere.
fn keyword_pattern(keyword: &str) -> Option<Regex> {
    let boundary = if keyword.starts_with(|c: char| c.is_alphanumeric()) { r"\b" } else { "" };
    Regex::new(&format!("{}{}", boundary, regex::escape(keyword))).ok()
}

/// Lexicon words match whole words only: "unreliable" is not "reliable".
fn whole_word_pattern(word: &str) -> Option<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(word))).ok()
}

static RULE_PATTERNS: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    LABEL_RULES
        .iter()
        .map(|r| (r.label, r.keywords.iter().filter_map(|kw| keyword_pattern(kw)).collect()))
        .collect()
});

static POSITIVE_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| POSITIVE_WORDS.iter().filter_map(|w| whole_word_pattern(w)).collect());

static NEGATIVE_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| NEGATIVE_WORDS.iter().filter_map(|w| whole_word_pattern(w)).collect());

/// Classifies text by counting keyword matches per candidate label.
///
/// Scores are Laplace-smoothed match counts normalised to sum to 1.0, so an
/// unmatched text spreads its mass uniformly over the candidate labels.
/// Labels without a rule match on their own words.
#[derive(Debug, Default, Clone)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn matches(lower: &str, label: &str) -> usize {
        match RULE_PATTERNS.iter().find(|(l, _)| *l == label) {
            Some((_, patterns)) => patterns.iter().filter(|re| re.is_match(lower)).count(),
            None => label
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| w.len() > 2)
                .filter_map(|w| keyword_pattern(&w.to_lowercase()))
                .filter(|re| re.is_match(lower))
                .count(),
        }
    }

    /// Synchronous classification used by the async trait methods.
    pub fn rank(&self, text: &str, candidate_labels: &[&str]) -> Classification {
        let lower = text.to_lowercase();
        let counts: Vec<(String, f64)> = candidate_labels
            .iter()
            .map(|label| (label.to_string(), Self::matches(&lower, label) as f64 + 1.0))
            .collect();
        let total: f64 = counts.iter().map(|(_, c)| c).sum();
        Classification::new(
            counts
                .into_iter()
                .map(|(label, c)| LabelScore::new(label, c / total))
                .collect(),
        )
    }

    /// Lexicon sentiment. Ties (including no sentiment words) count as positive at 0.5.
    pub fn polarity(&self, text: &str) -> Sentiment {
        let lower = text.to_lowercase();
        let pos = POSITIVE_PATTERNS.iter().filter(|re| re.is_match(&lower)).count() as f64;
        let neg = NEGATIVE_PATTERNS.iter().filter(|re| re.is_match(&lower)).count() as f64;
        let positive_share = (pos + 1.0) / (pos + neg + 2.0);
        if pos >= neg {
            Sentiment {
                positive: true,
                score: positive_share,
            }
        } else {
            Sentiment {
                positive: false,
                score: 1.0 - positive_share,
            }
        }
    }
}

#[async_trait]
impl TextClassifier for KeywordClassifier {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Classification, TrustError> {
        if candidate_labels.is_empty() {
            return Err(TrustError::Computation("no candidate labels supplied".to_string()));
        }
        Ok(self.rank(text, candidate_labels))
    }

    async fn sentiment(&self, text: &str) -> Result<Sentiment, TrustError> {
        Ok(self.polarity(text))
    }
}
