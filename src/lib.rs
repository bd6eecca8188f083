//! Air Quality Display Bridge
//!
//! Classifies government open-data air quality snapshots into one overall
//! verdict and renders it as short text + icon frames for a single-line
//! display device.
//!
//! Layout:
//! - `data`: normalized measurement record
//! - `utils/`: severity scale and concentration threshold tables
//! - `pollutants`: per-pollutant severity resolution
//! - `classifier`: worst-wins overall classification
//! - `display/`: frame formatting, icons, JSON/markdown output
//! - `config`: start-up configuration
//!
//! With the `api` feature:
//! - `fetcher`: AirKorea API client
//! - `api_server`: Axum HTTP server for the device
//! - `rate_limiter`: per-client request spacing
//! - `publisher`: static JSON/README generation

pub mod utils;
pub mod data;
pub mod pollutants;
pub mod classifier;
pub mod display;
pub mod config;
pub mod fetcher;

#[cfg(feature = "api")]
pub mod rate_limiter;

#[cfg(feature = "api")]
pub mod api_server;

#[cfg(feature = "api")]
pub mod publisher;

// Re-export commonly used types
pub use utils::{SeverityLevel, StatusLevel};
pub use data::{CompositeIndex, MeasurementRecord, PollutantReading};
pub use pollutants::{Pollutant, Resolution, SeverityBasis};
pub use classifier::{classify, OverallStatus};
pub use display::{format, icon_for, render_payload, DisplayFrame, DisplayPayload};
pub use config::{AppConfig, ConfigError};
pub use fetcher::{FetchError, StationInfo};

#[cfg(feature = "api")]
pub use fetcher::{AirKoreaClient, MeasurementSource};

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
