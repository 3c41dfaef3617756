// crates/trustnet-scoring/src/stage.rs
//
// Per-stage results. A scoring stage returns `StageResult`; the caller decides
// the fallback and records the error.

use trustnet_core::aggregate::clamp_score;
use trustnet_core::{TrustError, NEUTRAL_SCORE};

pub type StageResult<T> = Result<T, TrustError>;

/// Unwrap a stage score, falling back to 50 on error.
///
/// The error is logged and appended to `errors` as `"{stage}: {error}"`.
pub fn recover(stage: &str, result: StageResult<f64>, errors: &mut Vec<String>) -> f64 {
    recover_with(stage, result, NEUTRAL_SCORE, errors)
}

/// Like [`recover`] with an explicit fallback value.
pub fn recover_with(
    stage: &str,
    result: StageResult<f64>,
    fallback: f64,
    errors: &mut Vec<String>,
) -> f64 {
    match result {
        Ok(score) => clamp_score(score),
        Err(e) => {
            tracing::warn!(stage, error = %e, fallback, "Scoring stage fell back");
            errors.push(format!("{}: {}", stage, e));
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_passes_through() {
        let mut errors = Vec::new();
        assert_eq!(recover("x", Ok(72.5), &mut errors), 72.5);
        assert!(errors.is_empty());
    }

    #[test]
    fn error_becomes_neutral_and_is_recorded() {
        let mut errors = Vec::new();
        let score = recover("sentiment", Err(TrustError::Collaborator("down".into())), &mut errors);
        assert_eq!(score, 50.0);
        assert_eq!(errors, vec!["sentiment: Collaborator error: down".to_string()]);
    }
}
