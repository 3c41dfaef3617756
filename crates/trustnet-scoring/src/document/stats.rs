// crates/trustnet-scoring/src/document/stats.rs
//
// Lexical statistics of a document: tokenisation, stop-word filtering,
// part-of-speech ratios, and word frequencies.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word regex"));
static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence regex"));
static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").expect("paragraph regex"));

/// Number of most frequent meaningful words reported.
pub const TOP_WORDS: usize = 10;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "would", "you", "your", "yours", "yourself", "yourselves",
];

const TURKISH_STOP_WORDS: &[&str] = &[
    "acaba", "ama", "aslında", "az", "bazı", "belki", "biri", "birkaç", "birşey", "biz", "bu",
    "çok", "çünkü", "da", "daha", "de", "defa", "diye", "eğer", "en", "gibi", "hem", "hep", "hepsi",
    "her", "hiç", "için", "ile", "ise", "kez", "ki", "kim", "mı", "mu", "mü", "nasıl", "ne",
    "neden", "nerde", "nerede", "nereye", "niçin", "niye", "o", "sanki", "şey", "siz", "şu", "tüm",
    "ve", "veya", "ya", "yani",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().chain(TURKISH_STOP_WORDS).copied().collect());

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lower-cased alphanumeric word tokens.
pub fn words(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.chars().all(char::is_alphanumeric))
        .map(str::to_lowercase)
        .collect()
}

/// Non-empty sentences, split on runs of `.`, `!`, `?`.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_RE
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}

/// Non-empty paragraphs, split on blank lines.
pub fn paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_RE.split(text).map(str::trim).filter(|p| !p.is_empty()).collect()
}

/// Coarse part-of-speech classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Number,
}

const COMMON_VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "have", "has", "had", "do", "does", "did", "make", "makes",
    "made", "build", "builds", "built", "develop", "develops", "manage", "manages", "lead", "leads",
    "led", "provide", "provides", "use", "uses", "create", "creates", "improve", "improves",
    "support", "supports", "design", "designs", "deliver", "delivers", "implement", "implements",
    "analyze", "analyse", "work", "works", "show", "shows", "help", "helps", "increase",
    "increases", "reduce", "reduces", "ensure", "ensures", "include", "includes", "require",
    "requires", "describe", "describes", "present", "presents", "propose", "proposes", "find",
    "found", "give", "gave", "take", "took", "get", "got", "see", "saw", "know", "knew", "run",
    "ran", "write", "wrote",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ship", "ance", "ence", "ism", "ist",
];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "ic", "less", "al",
];
const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify", "ate"];

/// Heuristic lexicon-and-suffix tagger for one lower-cased word.
pub fn tag(word: &str) -> PosTag {
    if word.chars().all(|c| c.is_ascii_digit()) {
        return PosTag::Number;
    }
    if COMMON_VERBS.contains(&word) {
        return PosTag::Verb;
    }
    let long = word.chars().count() > 4;
    if long && NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return PosTag::Noun;
    }
    if long && word.ends_with("ly") {
        return PosTag::Adverb;
    }
    if long && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return PosTag::Adjective;
    }
    if long && VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return PosTag::Verb;
    }
    PosTag::Noun
}

/// Lexical statistics of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub word_count: usize,
    pub unique_words: usize,
    pub meaningful_word_count: usize,
    /// Unique meaningful words over meaningful words, in [0, 1].
    pub vocabulary_richness: f64,
    pub avg_word_length: f64,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub paragraph_count: usize,
    pub noun_ratio: f64,
    pub verb_ratio: f64,
    pub most_common_words: Vec<String>,
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Most frequent words, ties broken by first occurrence.
pub fn most_common(words: &[String], n: usize) -> Vec<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (i, w) in words.iter().enumerate() {
        counts.entry(w.as_str()).or_insert((0, i)).0 += 1;
    }
    let mut ranked: Vec<(&str, usize, usize)> =
        counts.into_iter().map(|(w, (c, first))| (w, c, first)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(n).map(|(w, _, _)| w.to_string()).collect()
}

impl DocumentStats {
    pub fn compute(text: &str) -> Self {
        let words = words(text);
        let meaningful: Vec<String> = words.iter().filter(|w| !is_stop_word(w)).cloned().collect();
        let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
        let unique_meaningful: HashSet<&str> = meaningful.iter().map(String::as_str).collect();
        let sentence_count = sentences(text).len();
        let paragraph_count = paragraphs(text).len();

        let tags: Vec<PosTag> = meaningful.iter().map(|w| tag(w)).collect();
        let nouns = tags.iter().filter(|t| **t == PosTag::Noun).count();
        let verbs = tags.iter().filter(|t| **t == PosTag::Verb).count();
        let letters: usize = words.iter().map(|w| w.chars().count()).sum();

        Self {
            word_count: words.len(),
            unique_words: unique.len(),
            meaningful_word_count: meaningful.len(),
            vocabulary_richness: ratio(unique_meaningful.len(), meaningful.len()),
            avg_word_length: ratio(letters, words.len()),
            sentence_count,
            avg_sentence_length: ratio(words.len(), sentence_count),
            paragraph_count,
            noun_ratio: ratio(nouns, meaningful.len()),
            verb_ratio: ratio(verbs, meaningful.len()),
            most_common_words: most_common(&meaningful, TOP_WORDS),
        }
    }
}
