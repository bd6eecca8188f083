//! Concentration Threshold Tables
//!
//! Buckets a raw concentration into a severity level when the upstream did
//! not supply its own grade. Bounds are inclusive upper limits:
//!
//! | Pollutant       | Good | Moderate | Unhealthy | Very Unhealthy |
//! |-----------------|------|----------|-----------|----------------|
//! | PM2.5 (µg/m³)   | ≤15  | ≤35      | ≤75       | >75            |
//! | PM10 (µg/m³)    | ≤30  | ≤80      | ≤150      | >150           |
//! | Composite index | ≤50  | ≤100     | ≤150      | >150           |

use super::severity::SeverityLevel;

/// Inclusive upper bounds of the first three levels; anything above
/// `unhealthy_max` is VeryUnhealthy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub good_max: f64,
    pub moderate_max: f64,
    pub unhealthy_max: f64,
}

pub const PM25_THRESHOLDS: Thresholds = Thresholds {
    good_max: 15.0,
    moderate_max: 35.0,
    unhealthy_max: 75.0,
};

pub const PM10_THRESHOLDS: Thresholds = Thresholds {
    good_max: 30.0,
    moderate_max: 80.0,
    unhealthy_max: 150.0,
};

pub const COMPOSITE_THRESHOLDS: Thresholds = Thresholds {
    good_max: 50.0,
    moderate_max: 100.0,
    unhealthy_max: 150.0,
};

impl Thresholds {
    /// Bucket a concentration
    ///
    /// # Returns
    /// The severity level, or `None` for negative / NaN / infinite input
    pub fn bucket(&self, value: f64) -> Option<SeverityLevel> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }

        let level = if value <= self.good_max {
            SeverityLevel::Good
        } else if value <= self.moderate_max {
            SeverityLevel::Moderate
        } else if value <= self.unhealthy_max {
            SeverityLevel::Unhealthy
        } else {
            SeverityLevel::VeryUnhealthy
        };

        Some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pm25_boundaries() {
        let t = PM25_THRESHOLDS;
        assert_eq!(t.bucket(0.0), Some(SeverityLevel::Good));
        assert_eq!(t.bucket(15.0), Some(SeverityLevel::Good));
        assert_eq!(t.bucket(15.01), Some(SeverityLevel::Moderate));
        assert_eq!(t.bucket(35.0), Some(SeverityLevel::Moderate));
        assert_eq!(t.bucket(35.01), Some(SeverityLevel::Unhealthy));
        assert_eq!(t.bucket(75.0), Some(SeverityLevel::Unhealthy));
        assert_eq!(t.bucket(75.01), Some(SeverityLevel::VeryUnhealthy));
    }

    #[test]
    fn test_pm10_boundaries() {
        let t = PM10_THRESHOLDS;
        assert_eq!(t.bucket(30.0), Some(SeverityLevel::Good));
        assert_eq!(t.bucket(30.5), Some(SeverityLevel::Moderate));
        assert_eq!(t.bucket(80.0), Some(SeverityLevel::Moderate));
        assert_eq!(t.bucket(150.0), Some(SeverityLevel::Unhealthy));
        assert_eq!(t.bucket(160.0), Some(SeverityLevel::VeryUnhealthy));
    }

    #[test]
    fn test_composite_boundaries() {
        let t = COMPOSITE_THRESHOLDS;
        assert_eq!(t.bucket(50.0), Some(SeverityLevel::Good));
        assert_eq!(t.bucket(85.0), Some(SeverityLevel::Moderate));
        assert_eq!(t.bucket(101.0), Some(SeverityLevel::Unhealthy));
        assert_eq!(t.bucket(151.0), Some(SeverityLevel::VeryUnhealthy));
    }

    #[test]
    fn test_invalid_values_are_not_bucketed() {
        let t = PM25_THRESHOLDS;
        assert_eq!(t.bucket(-0.5), None);
        assert_eq!(t.bucket(f64::NAN), None);
        assert_eq!(t.bucket(f64::INFINITY), None);
        assert_eq!(t.bucket(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_monotonic_across_range() {
        let t = PM10_THRESHOLDS;
        let mut previous = SeverityLevel::Good;
        for step in 0..400 {
            let level = t.bucket(step as f64 * 0.5).unwrap();
            assert!(level >= previous, "level dropped at {}", step as f64 * 0.5);
            previous = level;
        }
    }
}
