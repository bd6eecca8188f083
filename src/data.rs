//! Measurement Data Model
//!
//! Normalized shape of one polling snapshot for one station. Built once per
//! poll by the fetcher, immutable afterwards, consumed by the classifier.
//!
//! Invalid numbers (negative, NaN, infinite) and out-of-range grades are
//! representable. The accessors below filter them; nothing downstream
//! rejects a record.

use serde::{Deserialize, Serialize};

/// One measured pollutant
///
/// Either field may be absent. A reading with neither a valid concentration
/// nor a valid grade is treated as not measured at all (never as zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    /// Raw concentration (µg/m³) or index value
    pub value: Option<f64>,
    /// Upstream pre-classified grade, 1 = best .. 4 = worst
    pub grade: Option<i32>,
}

/// The composite index uses the same value/grade pair as a pollutant
pub type CompositeIndex = PollutantReading;

impl PollutantReading {
    pub fn new(value: Option<f64>, grade: Option<i32>) -> Self {
        Self { value, grade }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_value(value: f64) -> Self {
        Self { value: Some(value), grade: None }
    }

    pub fn from_grade(grade: i32) -> Self {
        Self { value: None, grade: Some(grade) }
    }

    /// Concentration, only if finite and non-negative
    pub fn valid_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite() && *v >= 0.0)
    }

    /// Grade, only if inside 1..=4
    pub fn valid_grade(&self) -> Option<i32> {
        self.grade.filter(|g| (1..=4).contains(g))
    }

    pub fn is_present(&self) -> bool {
        self.valid_value().is_some() || self.valid_grade().is_some()
    }
}

/// One polling snapshot for one station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub station_name: String,
    /// Upstream timestamp, kept opaque
    pub observed_at: Option<String>,
    pub pm10: Option<PollutantReading>,
    pub pm25: Option<PollutantReading>,
    pub composite_index: Option<CompositeIndex>,
}

impl MeasurementRecord {
    /// Empty record for a station; classifies to "no data"
    pub fn new(station_name: impl Into<String>) -> Self {
        Self {
            station_name: station_name.into(),
            ..Self::default()
        }
    }

    pub fn with_observed_at(mut self, observed_at: impl Into<String>) -> Self {
        self.observed_at = Some(observed_at.into());
        self
    }

    pub fn with_pm10(mut self, reading: PollutantReading) -> Self {
        self.pm10 = Some(reading);
        self
    }

    pub fn with_pm25(mut self, reading: PollutantReading) -> Self {
        self.pm25 = Some(reading);
        self
    }

    pub fn with_composite_index(mut self, index: CompositeIndex) -> Self {
        self.composite_index = Some(index);
        self
    }

    /// Build a record from bare PM concentrations (no grades, no index)
    ///
    /// For callers that only ever had the two raw numbers.
    pub fn from_concentrations(
        station_name: impl Into<String>,
        pm10: Option<f64>,
        pm25: Option<f64>,
    ) -> Self {
        Self {
            station_name: station_name.into(),
            observed_at: None,
            pm10: pm10.map(PollutantReading::from_value),
            pm25: pm25.map(PollutantReading::from_value),
            composite_index: None,
        }
    }

    /// True when PM10 or PM2.5 carries a usable concentration
    pub fn has_particulate_data(&self) -> bool {
        [self.pm10, self.pm25]
            .iter()
            .flatten()
            .any(|reading| reading.valid_value().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_value_filters_garbage() {
        assert_eq!(PollutantReading::from_value(12.5).valid_value(), Some(12.5));
        assert_eq!(PollutantReading::from_value(0.0).valid_value(), Some(0.0));
        assert_eq!(PollutantReading::from_value(-1.0).valid_value(), None);
        assert_eq!(PollutantReading::from_value(f64::NAN).valid_value(), None);
        assert_eq!(PollutantReading::from_value(f64::INFINITY).valid_value(), None);
    }

    #[test]
    fn test_valid_grade_range() {
        assert_eq!(PollutantReading::from_grade(1).valid_grade(), Some(1));
        assert_eq!(PollutantReading::from_grade(4).valid_grade(), Some(4));
        assert_eq!(PollutantReading::from_grade(0).valid_grade(), None);
        assert_eq!(PollutantReading::from_grade(7).valid_grade(), None);
    }

    #[test]
    fn test_presence() {
        assert!(!PollutantReading::empty().is_present());
        assert!(!PollutantReading::new(Some(-3.0), Some(9)).is_present());
        assert!(PollutantReading::new(Some(-3.0), Some(2)).is_present());
        assert!(PollutantReading::new(Some(3.0), Some(9)).is_present());
    }

    #[test]
    fn test_from_concentrations() {
        let record = MeasurementRecord::from_concentrations("중구", Some(45.0), None);
        assert_eq!(record.station_name, "중구");
        assert_eq!(record.pm10, Some(PollutantReading::from_value(45.0)));
        assert!(record.pm25.is_none());
        assert!(record.composite_index.is_none());
    }

    #[test]
    fn test_has_particulate_data() {
        assert!(!MeasurementRecord::new("종로구").has_particulate_data());

        let grades_only = MeasurementRecord::new("종로구")
            .with_pm10(PollutantReading::from_grade(2))
            .with_composite_index(PollutantReading::from_value(85.0));
        assert!(!grades_only.has_particulate_data());

        let with_pm25 = MeasurementRecord::new("종로구").with_pm25(PollutantReading::from_value(28.0));
        assert!(with_pm25.has_particulate_data());
    }
}
