// crates/trustnet-scoring/src/social/linkedin.rs
//
// LinkedIn platform score and the profile-derived features the fetcher may
// leave uncomputed (experience years, education level, activity, completion).

use std::time::Duration;

use trustnet_core::features::{saturating_ratio, saturating_score, social};
use trustnet_core::evidence::ActivityCounts;
use trustnet_core::{LinkedInProfile, TextClassifier};

use super::posts;
use super::PlatformScore;
use crate::stage::recover;

const REQUIRED_SECTIONS: &[&str] = &[
    "summary",
    "experience",
    "education",
    "skills",
    "profile_picture",
    "industry",
    "location",
    "headline",
];

const OPTIONAL_SECTIONS: &[&str] = &[
    "certifications",
    "languages",
    "volunteer_experience",
    "publications",
    "honors_awards",
];

/// Ordinal education levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EducationLevel {
    HighSchool,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationLevel {
    pub fn score(&self) -> f64 {
        match self {
            EducationLevel::Doctorate => 100.0,
            EducationLevel::Master => 90.0,
            EducationLevel::Bachelor => 80.0,
            EducationLevel::HighSchool => 60.0,
        }
    }

    /// Recognise a level from a degree or level label.
    ///
    /// Case, separators and apostrophes are ignored, so `HighSchool`,
    /// `high school` and `Master's` all match.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower: String = label
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-' | '.' | '\'' | '\u{2019}'))
            .collect();
        if lower.contains("phd") || lower.contains("doctorate") {
            Some(EducationLevel::Doctorate)
        } else if lower.contains("master") || lower.contains("mba") {
            Some(EducationLevel::Master)
        } else if lower.contains("bachelor") {
            Some(EducationLevel::Bachelor)
        } else if lower.contains("highschool") {
            Some(EducationLevel::HighSchool)
        } else {
            None
        }
    }
}

/// Education sub-score. An explicit but unrecognised level scores 50; degrees
/// that match no level count as high school. `None` without any education data.
pub fn education_score(profile: &LinkedInProfile) -> Option<f64> {
    if let Some(level) = profile.education_level.as_deref() {
        return Some(EducationLevel::from_label(level).map(|l| l.score()).unwrap_or(50.0));
    }
    if profile.degrees.is_empty() {
        return None;
    }
    let highest = profile
        .degrees
        .iter()
        .filter_map(|d| EducationLevel::from_label(d))
        .max()
        .unwrap_or(EducationLevel::HighSchool);
    Some(highest.score())
}

/// Years of experience, summed over positions when not supplied.
pub fn experience_years(profile: &LinkedInProfile, current_year: i32) -> Option<f64> {
    if let Some(years) = profile.experience_years {
        return Some(years);
    }
    if profile.experiences.is_empty() {
        return None;
    }
    let total: i32 = profile
        .experiences
        .iter()
        .map(|e| (e.end_year.unwrap_or(current_year) - e.start_year).max(0))
        .sum();
    Some(total as f64)
}

/// Activity score from recent posts (40), articles (40), and other activity (20).
pub fn activity_from_counts(counts: &ActivityCounts) -> f64 {
    saturating_ratio(counts.posts as f64, social::RECENT_POSTS) * 40.0
        + saturating_ratio(counts.articles as f64, social::RECENT_ARTICLES) * 40.0
        + saturating_ratio(counts.activities as f64, social::RECENT_ACTIVITIES) * 20.0
}

pub fn activity_score(profile: &LinkedInProfile) -> Option<f64> {
    profile
        .activity_score
        .or_else(|| profile.recent_activity.as_ref().map(activity_from_counts))
}

/// Completion percentage: required sections share 70 points, optional 30.
pub fn completion_from_sections(sections: &[String]) -> f64 {
    let normalized: Vec<String> = sections
        .iter()
        .map(|s| s.trim().to_lowercase().replace([' ', '-'], "_"))
        .collect();
    let has = |name: &str| normalized.iter().any(|s| s == name);
    let required = REQUIRED_SECTIONS.iter().filter(|s| has(s)).count() as f64;
    let optional = OPTIONAL_SECTIONS.iter().filter(|s| has(s)).count() as f64;
    (required * 70.0 / REQUIRED_SECTIONS.len() as f64
        + optional * 30.0 / OPTIONAL_SECTIONS.len() as f64)
        .round()
}

pub fn profile_completion(profile: &LinkedInProfile) -> Option<f64> {
    profile.profile_completion.or_else(|| {
        (!profile.profile_sections.is_empty())
            .then(|| completion_from_sections(&profile.profile_sections))
    })
}

/// Score a LinkedIn profile as the unweighted mean of its features.
///
/// Optional features without data are left out rather than scored as 0.
pub async fn score(
    classifier: &dyn TextClassifier,
    timeout: Duration,
    profile: &LinkedInProfile,
    current_year: i32,
    errors: &mut Vec<String>,
) -> PlatformScore {
    let mut platform = PlatformScore::default();

    platform.push(
        "connections",
        saturating_score(profile.connections as f64, social::CONNECTIONS),
    );
    if let Some(years) = experience_years(profile, current_year) {
        platform.push("experience", saturating_score(years, social::EXPERIENCE_YEARS));
    }
    if let Some(education) = education_score(profile) {
        platform.push("education", education);
    }
    platform.push("skills", saturating_score(profile.skills.len() as f64, social::SKILLS));
    platform.push(
        "endorsements",
        saturating_score(profile.endorsements as f64, social::ENDORSEMENTS),
    );
    platform.push(
        "recommendations",
        saturating_score(profile.recommendations as f64, social::RECOMMENDATIONS),
    );
    if let Some(activity) = activity_score(profile) {
        platform.push("activity", activity.clamp(0.0, 100.0));
    }
    if let Some(completion) = profile_completion(profile) {
        platform.push("profile_completion", completion.clamp(0.0, 100.0));
    }
    if !profile.recent_posts.is_empty() {
        let quality =
            posts::content_quality(classifier, timeout, &profile.recent_posts, errors).await;
        platform.push("content_quality", recover("linkedin content quality", quality, errors));
    }

    platform.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustnet_core::evidence::Experience;
    use trustnet_reputation::KeywordClassifier;

    #[test]
    fn education_level_labels() {
        let cases = [
            ("PhD", Some(100.0)),
            ("Master's", Some(90.0)),
            ("Bachelor's", Some(80.0)),
            ("HighSchool", Some(60.0)),
            ("high_school", Some(60.0)),
            ("Kindergarten", Some(50.0)),
        ];
        for (label, expected) in cases {
            let p = LinkedInProfile {
                education_level: Some(label.into()),
                ..Default::default()
            };
            assert_eq!(education_score(&p), expected, "label {}", label);
        }
        assert_eq!(EducationLevel::from_label("HighSchool"), Some(EducationLevel::HighSchool));
        assert_eq!(EducationLevel::from_label("Ph.D."), Some(EducationLevel::Doctorate));
    }

    #[test]
    fn education_levels() {
        let mut p = LinkedInProfile {
            education_level: Some("Master's".into()),
            ..Default::default()
        };
        assert_eq!(education_score(&p), Some(90.0));
        p.education_level = Some("Bootcamp".into());
        assert_eq!(education_score(&p), Some(50.0));

        let p = LinkedInProfile {
            degrees: vec!["BSc Bachelor of Science".into(), "PhD in Physics".into()],
            ..Default::default()
        };
        assert_eq!(education_score(&p), Some(100.0));

        let p = LinkedInProfile {
            degrees: vec!["Certificate".into()],
            ..Default::default()
        };
        assert_eq!(education_score(&p), Some(60.0));
        assert_eq!(education_score(&LinkedInProfile::default()), None);
    }

    #[test]
    fn experience_sums_positions() {
        let p = LinkedInProfile {
            experiences: vec![
                Experience {
                    start_year: 2015,
                    end_year: Some(2019),
                },
                Experience {
                    start_year: 2020,
                    end_year: None,
                },
            ],
            ..Default::default()
        };
        assert_eq!(experience_years(&p, 2024), Some(8.0));
        assert_eq!(experience_years(&LinkedInProfile::default(), 2024), None);
    }

    #[test]
    fn activity_and_completion() {
        let counts = ActivityCounts {
            posts: 6,
            articles: 3,
            activities: 20,
        };
        assert!((activity_from_counts(&counts) - 80.0).abs() < 1e-9);

        let sections: Vec<String> = REQUIRED_SECTIONS.iter().map(|s| s.to_string()).collect();
        assert_eq!(completion_from_sections(&sections), 70.0);
        let mut all = sections.clone();
        all.extend(OPTIONAL_SECTIONS.iter().map(|s| s.to_string()));
        assert_eq!(completion_from_sections(&all), 100.0);
        assert_eq!(completion_from_sections(&["Profile Picture".to_string()]), 9.0);
    }

    #[tokio::test]
    async fn absent_features_are_not_counted_as_zero() {
        let profile = LinkedInProfile {
            connections: 500,
            skills: (0..10).map(|i| format!("skill{}", i)).collect(),
            endorsements: 50,
            recommendations: 5,
            ..Default::default()
        };
        let mut errors = Vec::new();
        let result =
            score(&KeywordClassifier::new(), Duration::from_secs(1), &profile, 2024, &mut errors)
                .await;
        assert_eq!(result.score, 100.0);
        assert_eq!(result.features.len(), 4);
    }
}
