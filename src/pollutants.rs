//! Pollutant Resolution
//!
//! Turns one pollutant reading into one severity level (or nothing).
//! The upstream grade wins when valid; otherwise the concentration is
//! bucketed through the pollutant's threshold table.

use serde::Serialize;

use crate::data::{MeasurementRecord, PollutantReading};
use crate::utils::{SeverityLevel, Thresholds, COMPOSITE_THRESHOLDS, PM10_THRESHOLDS, PM25_THRESHOLDS};

/// Pollutants considered by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pollutant {
    Pm25,
    Pm10,
    Composite,
}

impl Pollutant {
    /// Display priority: PM2.5, then PM10, then the composite index
    pub const PRIORITY: [Pollutant; 3] = [Pollutant::Pm25, Pollutant::Pm10, Pollutant::Composite];

    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::Composite => "통합지수",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => "㎍/㎥",
            Pollutant::Composite => "",
        }
    }

    pub fn thresholds(self) -> &'static Thresholds {
        match self {
            Pollutant::Pm25 => &PM25_THRESHOLDS,
            Pollutant::Pm10 => &PM10_THRESHOLDS,
            Pollutant::Composite => &COMPOSITE_THRESHOLDS,
        }
    }

    /// The reading for this pollutant in a record, if any
    pub fn reading(self, record: &MeasurementRecord) -> Option<&PollutantReading> {
        match self {
            Pollutant::Pm25 => record.pm25.as_ref(),
            Pollutant::Pm10 => record.pm10.as_ref(),
            Pollutant::Composite => record.composite_index.as_ref(),
        }
    }
}

/// Where a resolved level came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBasis {
    /// Upstream authority's own grade
    Grade,
    /// Local threshold table
    Threshold,
}

/// One pollutant's resolved contribution to the verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resolution {
    pub pollutant: Pollutant,
    pub level: SeverityLevel,
    /// Valid raw value, if the reading carried one
    pub value: Option<f64>,
    pub basis: SeverityBasis,
}

impl Resolution {
    /// `"<label>: <value><unit>"`, or `"<label>: 등급 <n>"` for grade-only readings
    pub fn describe(&self) -> String {
        match self.value {
            Some(value) => format!("{}: {}{}", self.pollutant.label(), value, self.pollutant.unit()),
            None => format!("{}: 등급 {}", self.pollutant.label(), self.level.ordinal()),
        }
    }
}

/// Resolve a single pollutant reading to a severity level
///
/// # Rules
/// 1. Valid grade (1..=4) → that level, regardless of the value
/// 2. Else valid value (finite, ≥ 0) → threshold bucket
/// 3. Else → `None` (pollutant skipped, not counted as zero)
pub fn resolve(pollutant: Pollutant, reading: &PollutantReading) -> Option<Resolution> {
    let value = reading.valid_value();

    if let Some(level) = reading.valid_grade().and_then(SeverityLevel::from_grade) {
        return Some(Resolution {
            pollutant,
            level,
            value,
            basis: SeverityBasis::Grade,
        });
    }

    let level = pollutant.thresholds().bucket(value?)?;
    Some(Resolution {
        pollutant,
        level,
        value,
        basis: SeverityBasis::Threshold,
    })
}
