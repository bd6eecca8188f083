//! Static File Publisher
//!
//! Fetches every configured station once and writes the device payloads as
//! static JSON files (for GitHub Pages or any plain file host), plus a
//! combined summary and a README. One station failing never aborts the run.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::classifier::classify;
use crate::config::AppConfig;
use crate::data::MeasurementRecord;
use crate::display::{format, JsonFormatter, MarkdownFormatter, DisplayPayload, PublishReport};
use crate::fetcher::MeasurementSource;

/// Everything published for one station
#[derive(Debug, Clone, Serialize)]
pub struct StationResult {
    pub station: String,
    pub raw: MeasurementRecord,
    pub lametric: DisplayPayload,
    pub lametric_simple: DisplayPayload,
    pub level: u8,
    pub level_label: String,
    pub explanation: String,
    pub advice: String,
}

impl StationResult {
    fn from_record(record: MeasurementRecord) -> Self {
        let status = classify(&record);
        let station = record.station_name.as_str();

        Self {
            station: record.station_name.clone(),
            lametric: DisplayPayload::single(format(&status, station, true)),
            lametric_simple: DisplayPayload::single(format(&status, station, false)),
            level: status.level.ordinal(),
            level_label: status.level.label().to_string(),
            explanation: status.explanation.clone(),
            advice: status.level.advice().to_string(),
            raw: record,
        }
    }
}

/// `all-stations.json` document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishSummary {
    pub last_updated: String,
    pub total_stations: usize,
    pub success_count: usize,
    pub error_count: usize,
    /// Published stations in configured order
    pub stations: Vec<String>,
    /// Station results keyed by station name
    pub data: BTreeMap<String, StationResult>,
}

impl PublishSummary {
    pub fn result(&self, station: &str) -> Option<&StationResult> {
        self.data.get(station)
    }

    /// Results in configured order
    pub fn ordered(&self) -> impl Iterator<Item = &StationResult> {
        self.stations.iter().filter_map(|s| self.data.get(s))
    }
}

/// Fetch, classify and write every configured station into `out_dir`
pub async fn publish(
    config: &AppConfig,
    source: &dyn MeasurementSource,
    out_dir: &Path,
) -> Result<PublishSummary> {
    tracing::info!("Publishing {} stations to {}", config.stations.len(), out_dir.display());

    if !out_dir.exists() {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("creating output directory {}", out_dir.display()))?;
        tracing::info!("Created {}", out_dir.display());
    }

    let mut stations = Vec::with_capacity(config.stations.len());
    let mut data = BTreeMap::new();
    let mut error_count = 0;

    for (idx, station) in config.stations.iter().enumerate() {
        if idx > 0 && !config.request_delay.is_zero() {
            tokio::time::sleep(config.request_delay).await;
        }

        let record = match source.fetch_station(station).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("{} fetch failed: {}", station, e);
                error_count += 1;
                continue;
            }
        };

        let mut result = StationResult::from_record(record);
        result.station = station.clone();
        if let Err(e) = write_station_files(out_dir, &result) {
            tracing::error!("{} write failed: {:#}", station, e);
            error_count += 1;
            continue;
        }

        tracing::info!("{}: {}", station, result.lametric.headline().unwrap_or_default());
        stations.push(station.clone());
        data.insert(station.clone(), result);
    }

    let last_updated = chrono::Utc::now().to_rfc3339();
    let summary = PublishSummary {
        last_updated: last_updated.clone(),
        total_stations: config.stations.len(),
        success_count: stations.len(),
        error_count,
        stations,
        data,
    };

    let summary_json = serde_json::to_string_pretty(&summary)?;
    write_file(&out_dir.join("all-stations.json"), &summary_json)?;

    if let Some(result) = summary.result(&config.default_station) {
        write_json(&out_dir.join("index.json"), &result.lametric)?;
    } else {
        tracing::warn!("Default station {} missing; index.json not updated", config.default_station);
    }

    let report = PublishReport {
        last_updated,
        total_stations: summary.total_stations,
        success_count: summary.success_count,
        error_count: summary.error_count,
        entries: summary
            .ordered()
            .filter_map(|r| r.lametric.frames.first().map(|f| (r.station.clone(), f.clone())))
            .collect(),
        default_station: config.default_station.clone(),
        update_interval_mins: config.update_interval.as_secs() / 60,
    };
    let readme = MarkdownFormatter::format(&report, config.public_base_url.as_deref());
    write_file(&out_dir.join("README.md"), &readme)?;

    tracing::info!(
        "Publish complete: {} ok, {} failed ({})",
        summary.success_count,
        summary.error_count,
        out_dir.display()
    );
    if summary.error_count > 0 {
        tracing::warn!("Some stations could not be fetched");
    }

    Ok(summary)
}

/// Default output directory from config
pub fn output_dir(config: &AppConfig) -> PathBuf {
    PathBuf::from(&config.output_dir)
}

/// `<station>.json` (detailed) and `<station>-simple.json`
fn write_station_files(out_dir: &Path, result: &StationResult) -> Result<()> {
    write_json(&out_dir.join(format!("{}.json", result.station)), &result.lametric)?;
    write_json(&out_dir.join(format!("{}-simple.json", result.station)), &result.lametric_simple)
}

fn write_json(path: &Path, payload: &DisplayPayload) -> Result<()> {
    let json = JsonFormatter::format(payload)?;
    write_file(path, &json)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}
