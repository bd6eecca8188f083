//! Utility modules for air quality classification
//!
//! Contains the fixed scales shared by every pollutant:
//! - Severity: the 1-4 ordinal scale and the "no data" sentinel
//! - Thresholds: concentration bucketing tables

pub mod severity;
pub mod thresholds;

// Re-export commonly used types
pub use severity::{SeverityLevel, StatusLevel};
pub use thresholds::{Thresholds, COMPOSITE_THRESHOLDS, PM10_THRESHOLDS, PM25_THRESHOLDS};
