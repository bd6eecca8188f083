//! Upstream Fetcher
//!
//! Pulls real-time station measurements from the AirKorea open-data API
//! (data.go.kr) and normalizes the first returned item into a
//! `MeasurementRecord`. Unparseable fields become absent; only transport and
//! envelope problems are errors.

#[cfg(feature = "api")]
use async_trait::async_trait;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::data::{MeasurementRecord, PollutantReading};

/// Real-time measurement endpoint (per station)
pub const AIR_KOREA_ENDPOINT: &str =
    "http://apis.data.go.kr/B552584/ArpltnInforInqireSvc/getMsrstnAcctoRltmMesureDnsty";

/// Station directory endpoint (lookup by address)
pub const AIR_KOREA_STATION_LIST_ENDPOINT: &str =
    "http://apis.data.go.kr/B552584/MsrstnInfoInqireSvc/getMsrstnList";

/// Result code the API uses for success
const SUCCESS_CODE: &str = "00";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("AirKorea API key is not configured (set AIR_KOREA_API_KEY)")]
    MissingApiKey,

    #[cfg(feature = "api")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error status {0}")]
    Status(u16),

    #[error("API error code {code}: {message}")]
    Api { code: String, message: String },

    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    #[error("no data for station {0:?}")]
    NoData(String),
}

/// One entry of the upstream station directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
    pub station_name: String,
    pub addr: Option<String>,
    /// Latitude
    pub dm_x: Option<String>,
    /// Longitude
    pub dm_y: Option<String>,
    /// Measured items, as listed upstream
    pub items: Option<String>,
}

impl StationInfo {
    /// Entry for a locally configured station without upstream details
    pub fn configured(station_name: &str, region: &str) -> Self {
        Self {
            station_name: station_name.to_string(),
            addr: Some(format!("{} {}", region, station_name)),
            dm_x: None,
            dm_y: None,
            items: None,
        }
    }
}

/// Source of measurement snapshots
///
/// The HTTP server and the publisher only see this trait, so tests and
/// alternative feeds can stand in for the real API.
#[cfg(feature = "api")]
#[async_trait]
pub trait MeasurementSource: Send + Sync {
    async fn fetch_station(&self, station: &str) -> Result<MeasurementRecord, FetchError>;

    /// Stations whose address matches `addr`
    ///
    /// Sources without a directory report no data; callers fall back to
    /// their configured list.
    async fn list_stations(&self, addr: &str) -> Result<Vec<StationInfo>, FetchError> {
        Err(FetchError::NoData(addr.to_string()))
    }
}

/// HTTP client for the AirKorea real-time API
#[cfg(feature = "api")]
pub struct AirKoreaClient {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    station_list_endpoint: String,
}

#[cfg(feature = "api")]
impl AirKoreaClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            api_key,
            endpoint: AIR_KOREA_ENDPOINT.to_string(),
            station_list_endpoint: AIR_KOREA_STATION_LIST_ENDPOINT.to_string(),
        }
    }

    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        Self::new(config.api_key.clone())
    }

    /// Point the client at another endpoint (mirrors, local stubs)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_station_list_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.station_list_endpoint = endpoint.into();
        self
    }

    fn request_url(&self, api_key: &str, station: &str) -> String {
        format!(
            "{}?serviceKey={}&returnType=json&numOfRows=1&pageNo=1&stationName={}&dataTerm=DAILY&ver=1.3",
            self.endpoint,
            urlencoding::encode(api_key),
            urlencoding::encode(station),
        )
    }

    fn station_list_url(&self, api_key: &str, addr: &str) -> String {
        format!(
            "{}?serviceKey={}&returnType=json&numOfRows=100&pageNo=1&addr={}",
            self.station_list_endpoint,
            urlencoding::encode(api_key),
            urlencoding::encode(addr),
        )
    }

    async fn get_json(&self, url: String) -> Result<Value, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(feature = "api")]
#[async_trait]
impl MeasurementSource for AirKoreaClient {
    async fn fetch_station(&self, station: &str) -> Result<MeasurementRecord, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;

        // Key stays out of the logs
        tracing::info!(station, endpoint = %self.endpoint, "calling AirKorea API");

        let body = self.get_json(self.request_url(api_key, station)).await?;
        let record = normalize_response(station, &body)?;

        if !record.has_particulate_data() {
            tracing::warn!(station, "snapshot carries no PM10/PM2.5 concentration");
        }

        Ok(record)
    }

    async fn list_stations(&self, addr: &str) -> Result<Vec<StationInfo>, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;

        tracing::info!(addr, "looking up AirKorea stations");

        let body = self.get_json(self.station_list_url(api_key, addr)).await?;
        normalize_station_list(addr, &body)
    }
}

/// Normalize an API response body into a record
///
/// Expects `response.header.resultCode == "00"` and at least one item in
/// `response.body.items`; only the first item is used.
pub fn normalize_response(station: &str, body: &Value) -> Result<MeasurementRecord, FetchError> {
    check_header(body)?;

    let item = body
        .pointer("/response/body/items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .ok_or_else(|| FetchError::NoData(station.to_string()))?;

    Ok(normalize_item(station, item))
}

/// Normalize a station directory response
///
/// Items without a station name are skipped. An empty directory is
/// `NoData(addr)`.
pub fn normalize_station_list(addr: &str, body: &Value) -> Result<Vec<StationInfo>, FetchError> {
    check_header(body)?;

    let stations: Vec<StationInfo> = body
        .pointer("/response/body/items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let station_name = item.get("stationName").and_then(text).filter(|n| !n.is_empty())?;
                    let field = |key: &str| item.get(key).and_then(text).filter(|v| !v.is_empty() && v != "-");
                    Some(StationInfo {
                        station_name,
                        addr: field("addr"),
                        dm_x: field("dmX"),
                        dm_y: field("dmY"),
                        items: field("item"),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if stations.is_empty() {
        return Err(FetchError::NoData(addr.to_string()));
    }
    Ok(stations)
}

/// `response.header.resultCode` must be the success code
fn check_header(body: &Value) -> Result<(), FetchError> {
    let header = body
        .pointer("/response/header")
        .ok_or_else(|| FetchError::MalformedResponse("missing response.header".to_string()))?;

    let code = header.get("resultCode").and_then(text).unwrap_or_default();
    if code != SUCCESS_CODE {
        let message = header.get("resultMsg").and_then(text).unwrap_or_default();
        return Err(FetchError::Api { code, message });
    }
    Ok(())
}

/// Normalize one measurement item
pub fn normalize_item(station: &str, item: &Value) -> MeasurementRecord {
    let reading = |value_key: &str, grade_key: &str| {
        PollutantReading::new(
            item.get(value_key).and_then(number),
            item.get(grade_key).and_then(grade),
        )
    };

    MeasurementRecord {
        station_name: station.to_string(),
        observed_at: item.get("dataTime").and_then(text).filter(|t| !t.is_empty()),
        pm10: Some(reading("pm10Value", "pm10Grade")).filter(PollutantReading::is_present),
        pm25: Some(reading("pm25Value", "pm25Grade")).filter(PollutantReading::is_present),
        composite_index: Some(reading("khaiValue", "khaiGrade")).filter(PollutantReading::is_present),
    }
}

/// String or number field as text
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric field; the API sends numbers as strings and "-" for missing
fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn grade(value: &Value) -> Option<i32> {
    let n = number(value)?;
    (n.fract() == 0.0 && n >= i32::MIN as f64 && n <= i32::MAX as f64).then_some(n as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(items: Value) -> Value {
        json!({
            "response": {
                "header": { "resultCode": "00", "resultMsg": "NORMAL_CODE" },
                "body": { "items": items, "totalCount": 1 }
            }
        })
    }

    #[test]
    fn test_normalize_full_item() {
        let body = envelope(json!([{
            "dataTime": "2024-01-15 14:00",
            "pm10Value": "45", "pm10Grade": "2",
            "pm25Value": "28", "pm25Grade": "2",
            "khaiValue": "85", "khaiGrade": "2"
        }]));

        let record = normalize_response("종로구", &body).unwrap();
        assert_eq!(record.station_name, "종로구");
        assert_eq!(record.observed_at.as_deref(), Some("2024-01-15 14:00"));
        assert_eq!(record.pm10, Some(PollutantReading::new(Some(45.0), Some(2))));
        assert_eq!(record.pm25, Some(PollutantReading::new(Some(28.0), Some(2))));
        assert_eq!(record.composite_index, Some(PollutantReading::new(Some(85.0), Some(2))));
    }

    #[test]
    fn test_dashes_and_nulls_become_absent() {
        let body = envelope(json!([{
            "dataTime": "2024-01-15 14:00",
            "pm10Value": "-", "pm10Grade": null,
            "pm25Value": "31", "pm25Grade": "",
            "khaiValue": "-", "khaiGrade": "-"
        }]));

        let record = normalize_response("중구", &body).unwrap();
        assert_eq!(record.pm10, None);
        assert_eq!(record.pm25, Some(PollutantReading::from_value(31.0)));
        assert_eq!(record.composite_index, None);
    }

    #[test]
    fn test_zero_concentration_is_kept() {
        let record = normalize_item("중구", &json!({ "pm25Value": "0" }));
        assert_eq!(record.pm25, Some(PollutantReading::from_value(0.0)));
    }

    #[test]
    fn test_numeric_fields_accepted() {
        let record = normalize_item("중구", &json!({ "pm10Value": 52.5, "pm10Grade": 2 }));
        assert_eq!(record.pm10, Some(PollutantReading::new(Some(52.5), Some(2))));
    }

    #[test]
    fn test_fractional_grade_is_dropped() {
        let record = normalize_item("중구", &json!({ "pm10Value": "52", "pm10Grade": "2.5" }));
        assert_eq!(record.pm10, Some(PollutantReading::from_value(52.0)));
    }

    #[test]
    fn test_api_error_code() {
        let body = json!({
            "response": { "header": { "resultCode": "30", "resultMsg": "SERVICE_KEY_IS_NOT_REGISTERED_ERROR" } }
        });

        match normalize_response("종로구", &body) {
            Err(FetchError::Api { code, message }) => {
                assert_eq!(code, "30");
                assert_eq!(message, "SERVICE_KEY_IS_NOT_REGISTERED_ERROR");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_items_is_no_data() {
        let body = envelope(json!([]));
        assert!(matches!(normalize_response("종로구", &body), Err(FetchError::NoData(s)) if s == "종로구"));
    }

    #[test]
    fn test_station_list() {
        let body = envelope(json!([
            {
                "stationName": "종로구", "addr": "서울 종로구 종로35가길 19",
                "dmX": "37.572016", "dmY": "127.005007", "item": "SO2, CO, O3, NO2, PM10, PM2.5"
            },
            { "stationName": "중구", "addr": "서울 중구 덕수궁길 15", "dmX": "-" },
            { "addr": "이름 없는 측정소" }
        ]));

        let stations = normalize_station_list("서울", &body).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].station_name, "종로구");
        assert_eq!(stations[0].dm_x.as_deref(), Some("37.572016"));
        assert_eq!(stations[0].items.as_deref(), Some("SO2, CO, O3, NO2, PM10, PM2.5"));
        assert_eq!(stations[1].dm_x, None);
        assert_eq!(stations[1].dm_y, None);

        let json = serde_json::to_value(&stations[0]).unwrap();
        assert_eq!(json["stationName"], "종로구");
        assert_eq!(json["dmY"], "127.005007");
    }

    #[test]
    fn test_empty_station_list_is_no_data() {
        let body = envelope(json!([]));
        assert!(matches!(normalize_station_list("부산", &body), Err(FetchError::NoData(a)) if a == "부산"));
    }

    #[test]
    fn test_station_list_api_error() {
        let body = json!({ "response": { "header": { "resultCode": "22", "resultMsg": "LIMITED" } } });
        assert!(matches!(normalize_station_list("서울", &body), Err(FetchError::Api { code, .. }) if code == "22"));
    }

    #[test]
    fn test_configured_station_info() {
        let info = StationInfo::configured("중구", "서울");
        assert_eq!(info.addr.as_deref(), Some("서울 중구"));
        assert_eq!(info.dm_x, None);
    }

    #[test]
    fn test_missing_header_is_malformed() {
        let body = json!({ "unexpected": true });
        assert!(matches!(normalize_response("종로구", &body), Err(FetchError::MalformedResponse(_))));
    }
}
