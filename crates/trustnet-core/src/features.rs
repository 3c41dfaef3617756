// crates/trustnet-core/src/features.rs
//
// Saturating-ratio feature normalisation and the reference thresholds used by
// the domain scorers. Thresholds sit at "excellent" evidence levels rather
// than theoretical maxima, so they directly set score magnitudes.

/// `clamp(value / threshold, 0, 1)`.
///
/// NaN values, negative values, and non-positive thresholds yield 0.0.
pub fn saturating_ratio(value: f64, threshold: f64) -> f64 {
    if threshold.is_nan() || threshold <= 0.0 || value.is_nan() {
        return 0.0;
    }
    (value / threshold).clamp(0.0, 1.0)
}

/// Saturating ratio scaled to [0, 100].
pub fn saturating_score(value: f64, threshold: f64) -> f64 {
    saturating_ratio(value, threshold) * 100.0
}

/// Social thresholds.
pub mod social {
    /// Twitter followers at which the follower sub-score saturates.
    pub const FOLLOWERS: f64 = 1000.0;
    /// Followers used by the influence score (fetcher-side formula).
    pub const INFLUENCE_FOLLOWERS: f64 = 10_000.0;
    /// Follower/following ratio at which the influence ratio term saturates.
    pub const FOLLOWING_RATIO: f64 = 2.0;
    /// Account age in years.
    pub const ACCOUNT_AGE_YEARS: f64 = 5.0;
    /// Engagement rate (interactions per follower per tweet): 0.1%.
    pub const ENGAGEMENT_RATE: f64 = 0.001;
    /// LinkedIn connections.
    pub const CONNECTIONS: f64 = 500.0;
    /// Years of professional experience.
    pub const EXPERIENCE_YEARS: f64 = 10.0;
    /// Listed skills.
    pub const SKILLS: f64 = 10.0;
    /// Skill endorsements.
    pub const ENDORSEMENTS: f64 = 50.0;
    /// Written recommendations.
    pub const RECOMMENDATIONS: f64 = 5.0;
    /// Posts in the last 90 days.
    pub const RECENT_POSTS: f64 = 12.0;
    /// Articles in the last 90 days.
    pub const RECENT_ARTICLES: f64 = 3.0;
    /// Other activities (comments, reactions) in the last 90 days.
    pub const RECENT_ACTIVITIES: f64 = 10.0;
}

/// Document thresholds.
pub mod document {
    /// Words for the reliability word-count factor.
    pub const RELIABILITY_WORDS: f64 = 100.0;
    /// Words for the statistics word-count ratio.
    pub const STATS_WORDS: f64 = 500.0;
    /// Paragraphs for the reliability organisation factor.
    pub const RELIABILITY_PARAGRAPHS: f64 = 5.0;
    /// Paragraphs for the statistics paragraph ratio.
    pub const STATS_PARAGRAPHS: f64 = 10.0;
    /// Average sentence length treated as optimal.
    pub const IDEAL_SENTENCE_WORDS: f64 = 20.0;
    /// Reliability points lost per word of deviation from the ideal sentence length.
    pub const SENTENCE_DEVIATION_PENALTY: f64 = 2.0;
    /// Share of meaningful words that are technical terms: 5%.
    pub const TECHNICAL_DENSITY: f64 = 0.05;
    /// Citation pattern matches.
    pub const CITATIONS: f64 = 5.0;
}

/// Reference thresholds.
pub mod reference {
    /// Years a relationship must last for a full duration sub-score.
    pub const RELATIONSHIP_YEARS: f64 = 3.0;
    /// Relationship durations above this are implausible.
    pub const MAX_RELATIONSHIP_YEARS: f64 = 50.0;
    /// Mutual connections.
    pub const MUTUAL_CONNECTIONS: f64 = 10.0;
    /// Recognised social profiles.
    pub const SOCIAL_PROFILES: f64 = 2.0;
}

/// Financial normalisers.
pub mod financial {
    /// Top of the credit score range.
    pub const CREDIT_SCORE_MAX: f64 = 850.0;
    /// Account age in years at which the feature saturates.
    pub const ACCOUNT_AGE_YEARS: f64 = 20.0;
}
