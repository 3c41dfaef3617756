// crates/trustnet-reputation/src/decay.rs
//
// Time-decay of reference evidence.
//
// Older references carry less weight: the decay factor is exp(-age / tau),
// so a reference loses ~63% of its weight every `mean_life_years`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Average length of a year in days, leap years included.
const DAYS_PER_YEAR: f64 = 365.25;

/// Exponential recency decay for evidence items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecencyDecay {
    /// Time constant tau of the decay, in years.
    pub mean_life_years: f64,
}

impl Default for RecencyDecay {
    fn default() -> Self {
        Self { mean_life_years: 5.0 }
    }
}

impl RecencyDecay {
    /// Decay factor in (0, 1] for evidence `age_years` old.
    ///
    /// Negative ages (future dates) are treated as brand new. A non-positive
    /// time constant means evidence never decays.
    pub fn factor(&self, age_years: f64) -> f64 {
        if !age_years.is_finite() {
            return if age_years > 0.0 { 0.0 } else { 1.0 };
        }
        if self.mean_life_years <= 0.0 {
            return 1.0;
        }
        (-age_years.max(0.0) / self.mean_life_years).exp()
    }

    /// Apply the decay to a value.
    pub fn apply(&self, value: f64, age_years: f64) -> f64 {
        value * self.factor(age_years)
    }
}

/// Age of a dated item in fractional years, as seen on `today`.
pub fn age_years(date: NaiveDate, today: NaiveDate) -> f64 {
    (today - date).num_days() as f64 / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_decay_at_age_zero() {
        let decay = RecencyDecay::default();
        assert!((decay.factor(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_time_constant() {
        let decay = RecencyDecay::default();
        assert!((decay.factor(5.0) - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_future_dates_do_not_boost() {
        let decay = RecencyDecay::default();
        assert!((decay.factor(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_time_constant_never_decays() {
        let decay = RecencyDecay { mean_life_years: 0.0 };
        assert!((decay.apply(0.7, 30.0) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_age_years_from_dates() {
        let given = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let age = age_years(given, today);
        assert!((age - 1461.0 / 365.25).abs() < 1e-12);
    }
}
