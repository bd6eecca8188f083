//! Classification Engine
//!
//! Maps a measurement snapshot to one overall verdict. Total and pure: every
//! record, however incomplete or malformed, yields a status, with "no data"
//! as the universal fallback.
//!
//! Steps:
//! 1. Resolve PM2.5, PM10 and the composite index (in that order)
//! 2. Nothing resolved → "no data"
//! 3. Overall level = worst resolved level
//! 4. Dominant pollutant = first pollutant in priority order with a valid
//!    value, independent of which one set the worst level
//! 5. Explanation lists every resolved pollutant in priority order

use smallvec::SmallVec;

use crate::data::MeasurementRecord;
use crate::pollutants::{resolve, Pollutant, Resolution};
use crate::utils::StatusLevel;

/// Explanation attached to a "no data" verdict
pub const NO_DATA_EXPLANATION: &str = "유효한 대기질 데이터가 없습니다";

/// Separator between explanation entries
pub const EXPLANATION_SEPARATOR: &str = ", ";

/// Overall verdict for one snapshot
///
/// Recomputed on every call; never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallStatus {
    pub level: StatusLevel,
    /// Pollutant shown on the display (not necessarily the worst one)
    pub dominant_pollutant: Option<Pollutant>,
    pub dominant_value: Option<f64>,
    pub explanation: String,
    /// Every resolved pollutant, in priority order
    pub contributions: SmallVec<[Resolution; 3]>,
}

impl OverallStatus {
    pub fn no_data() -> Self {
        Self {
            level: StatusLevel::NoData,
            dominant_pollutant: None,
            dominant_value: None,
            explanation: NO_DATA_EXPLANATION.to_string(),
            contributions: SmallVec::new(),
        }
    }

    /// Dominant pollutant and value together, when both exist
    pub fn dominant(&self) -> Option<(Pollutant, f64)> {
        self.dominant_pollutant.zip(self.dominant_value)
    }
}

/// Classify one measurement snapshot
pub fn classify(record: &MeasurementRecord) -> OverallStatus {
    let contributions: SmallVec<[Resolution; 3]> = Pollutant::PRIORITY
        .iter()
        .filter_map(|&pollutant| {
            pollutant
                .reading(record)
                .and_then(|reading| resolve(pollutant, reading))
        })
        .collect();

    let worst = match contributions.iter().map(|r| r.level).max() {
        Some(level) => level,
        None => {
            tracing::debug!(station = %record.station_name, "no valid measurements");
            return OverallStatus::no_data();
        }
    };

    let dominant = contributions
        .iter()
        .find_map(|r| r.value.map(|value| (r.pollutant, value)));

    let explanation = contributions
        .iter()
        .map(Resolution::describe)
        .collect::<Vec<_>>()
        .join(EXPLANATION_SEPARATOR);

    tracing::debug!(
        station = %record.station_name,
        level = worst.ordinal(),
        resolved = contributions.len(),
        "classified snapshot"
    );

    OverallStatus {
        level: StatusLevel::Graded(worst),
        dominant_pollutant: dominant.map(|(p, _)| p),
        dominant_value: dominant.map(|(_, v)| v),
        explanation,
        contributions,
    }
}
