// crates/trustnet-scoring/src/document/reliability.rs
//
// Structural reliability and statistics scores, and the overall document score.

use trustnet_core::features::{document, saturating_score};
use trustnet_core::{aggregate, WeightedComponent};

use super::stats::DocumentStats;

/// Paragraph organisation score of a single-paragraph document.
pub const SINGLE_PARAGRAPH_SCORE: f64 = 50.0;

/// Sentence-length score: 100 at the ideal length, minus 2 per word of deviation.
pub fn sentence_length_score(avg_sentence_length: f64) -> f64 {
    let deviation = (avg_sentence_length - document::IDEAL_SENTENCE_WORDS).abs();
    (100.0 - deviation * document::SENTENCE_DEVIATION_PENALTY).clamp(0.0, 100.0)
}

pub fn paragraph_organisation_score(paragraph_count: usize) -> f64 {
    if paragraph_count > 1 {
        saturating_score(paragraph_count as f64, document::RELIABILITY_PARAGRAPHS)
    } else {
        SINGLE_PARAGRAPH_SCORE
    }
}

/// Unweighted mean of word count, vocabulary richness, sentence length, and
/// paragraph organisation.
pub fn reliability_score(stats: &DocumentStats) -> f64 {
    let factors = [
        saturating_score(stats.word_count as f64, document::RELIABILITY_WORDS),
        stats.vocabulary_richness * 100.0,
        sentence_length_score(stats.avg_sentence_length),
        paragraph_organisation_score(stats.paragraph_count),
    ];
    factors.iter().sum::<f64>() / factors.len() as f64
}

/// 0.4 word count (saturating at 500) + 0.3 richness + 0.3 paragraphs (saturating at 10).
pub fn stats_score(stats: &DocumentStats) -> f64 {
    saturating_score(stats.word_count as f64, document::STATS_WORDS) * 0.4
        + stats.vocabulary_richness * 100.0 * 0.3
        + saturating_score(stats.paragraph_count as f64, document::STATS_PARAGRAPHS) * 0.3
}

/// 0.4 content + 0.3 reliability + 0.3 statistics.
pub fn overall_score(content_mean: f64, reliability: f64, stats: f64) -> f64 {
    aggregate(&[
        WeightedComponent::new("content", content_mean, 0.4),
        WeightedComponent::new("reliability", reliability, 0.3),
        WeightedComponent::new("stats", stats, 0.3),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_length_band() {
        assert_eq!(sentence_length_score(20.0), 100.0);
        assert_eq!(sentence_length_score(10.0), 80.0);
        assert_eq!(sentence_length_score(30.0), 80.0);
        assert_eq!(sentence_length_score(80.0), 0.0);
    }

    #[test]
    fn single_paragraph_gets_fixed_score() {
        assert_eq!(paragraph_organisation_score(1), 50.0);
        assert_eq!(paragraph_organisation_score(0), 50.0);
        assert_eq!(paragraph_organisation_score(3), 60.0);
        assert_eq!(paragraph_organisation_score(9), 100.0);
    }

    #[test]
    fn reliability_and_stats_of_known_document() {
        let stats = DocumentStats {
            word_count: 120,
            vocabulary_richness: 0.5,
            avg_sentence_length: 15.0,
            paragraph_count: 3,
            ..Default::default()
        };
        // mean(100, 50, 90, 60)
        assert!((reliability_score(&stats) - 75.0).abs() < 1e-9);
        // 24 * 0.4 + 50 * 0.3 + 30 * 0.3
        assert!((stats_score(&stats) - (9.6 + 15.0 + 9.0)).abs() < 1e-9);
    }

    #[test]
    fn overall_weights() {
        assert!((overall_score(100.0, 0.0, 0.0) - 40.0).abs() < 1e-9);
        assert!((overall_score(50.0, 50.0, 50.0) - 50.0).abs() < 1e-9);
    }
}
