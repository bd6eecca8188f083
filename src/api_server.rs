// Axum API Server Module
//
// Purpose: serve display payloads for the air quality device over HTTP
// Endpoints: /api/air-quality, /api/air-quality/:station, /api/stations, /health, /

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use moka::future::Cache;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{AppConfig, DEFAULT_REGION};
use crate::display::{render_payload, DisplayFrame, DisplayPayload};
use crate::fetcher::{AirKoreaClient, MeasurementSource, StationInfo};
use crate::rate_limiter::RateLimiter;

/// Paths listed in the usage document and the 404 body
const ENDPOINTS: [(&str, &str); 4] = [
    ("/api/air-quality", "기본 대기질 데이터 (쿼리: station, detailed)"),
    ("/api/air-quality/:station", "특정 측정소 대기질 데이터"),
    ("/api/stations", "측정소 목록 (쿼리: addr)"),
    ("/health", "서버 상태 확인"),
];

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub source: Arc<dyn MeasurementSource>,
    /// Rendered payloads keyed by `<station>_<detailed>`
    pub cache: Cache<String, DisplayPayload>,
    pub rate_limiter: Arc<RateLimiter>,
    pub started_at: Instant,
}

impl AppState {
    /// State backed by the real AirKorea API
    pub fn new(config: AppConfig) -> Self {
        let source = Arc::new(AirKoreaClient::from_config(&config));
        Self::with_source(config, source)
    }

    /// State backed by any measurement source
    pub fn with_source(config: AppConfig, source: Arc<dyn MeasurementSource>) -> Self {
        tracing::info!("Initializing Moka cache (ttl {:?})...", config.cache_ttl);
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(config.cache_ttl)
            .build();

        let rate_limiter = Arc::new(RateLimiter::new(config.min_poll_interval));

        Self {
            config: Arc::new(config),
            source,
            cache,
            rate_limiter,
            started_at: Instant::now(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(usage))
        .route("/health", get(health_check))
        .route("/api/stations", get(list_stations))
        .route("/api/air-quality", get(air_quality))
        .route("/api/air-quality/:station", get(air_quality_for_station))
        .fallback(not_found)
        // Middleware (applied in reverse order)
        .layer(cors)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

fn cors_layer(allowed_origins: &str) -> CorsLayer {
    if allowed_origins.trim() == "*" {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[derive(Debug, serde::Deserialize)]
pub struct AirQualityQuery {
    station: Option<String>,
    detailed: Option<String>,
}

/// Only the literal `false` turns detail off
fn detailed_flag(raw: Option<&str>) -> bool {
    raw != Some("false")
}

async fn air_quality(
    State(state): State<AppState>,
    client: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<AirQualityQuery>,
) -> Result<Json<DisplayPayload>, AppError> {
    let station = params
        .station
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| state.config.default_station.clone());
    let detailed = detailed_flag(params.detailed.as_deref());

    serve_payload(&state, client, &station, detailed).await
}

async fn air_quality_for_station(
    State(state): State<AppState>,
    client: Option<ConnectInfo<SocketAddr>>,
    Path(station): Path<String>,
    Query(params): Query<AirQualityQuery>,
) -> Result<Json<DisplayPayload>, AppError> {
    let detailed = detailed_flag(params.detailed.as_deref());
    serve_payload(&state, client, &station, detailed).await
}

/// Shared body of both air quality endpoints
///
/// Fetch failures still answer 200 with the failure frame; the device
/// treats any other status as broken.
async fn serve_payload(
    state: &AppState,
    client: Option<ConnectInfo<SocketAddr>>,
    station: &str,
    detailed: bool,
) -> Result<Json<DisplayPayload>, AppError> {
    tracing::info!("Air quality request: {} (detailed: {})", station, detailed);

    if state.config.production {
        let client_id = client
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "default".to_string());
        if !state.rate_limiter.check(&client_id).await {
            tracing::warn!("Rate limit exceeded for {}", client_id);
            return Err(AppError::RateLimited);
        }
    }

    let cache_key = format!("{}_{}", station, detailed);
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {}", cache_key);
        return Ok(Json(cached));
    }

    let payload = match state.source.fetch_station(station).await {
        Ok(record) => render_payload(&record, detailed),
        Err(e) => {
            tracing::error!("Fetching {} failed: {}", station, e);
            return Ok(Json(DisplayPayload::single(DisplayFrame::failure())));
        }
    };

    state.cache.insert(cache_key, payload.clone()).await;
    tracing::debug!("Serving fresh payload: {:?}", payload.headline());

    Ok(Json(payload))
}

#[derive(Debug, serde::Deserialize)]
pub struct StationsQuery {
    addr: Option<String>,
}

/// Upstream station directory for `addr`, or the configured list on failure
async fn list_stations(
    State(state): State<AppState>,
    Query(params): Query<StationsQuery>,
) -> Json<Vec<StationInfo>> {
    let addr = params
        .addr
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    match state.source.list_stations(&addr).await {
        Ok(stations) => Json(stations),
        Err(e) => {
            tracing::warn!("Station lookup for {} failed, serving configured list: {}", addr, e);
            Json(
                state
                    .config
                    .stations
                    .iter()
                    .map(|name| StationInfo::configured(name, DEFAULT_REGION))
                    .collect(),
            )
        }
    }
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "environment": state.config.environment(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn usage(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("localhost:{}", state.config.port));
    let base = format!("http://{}", host);

    let endpoints: serde_json::Map<String, serde_json::Value> = ENDPOINTS
        .iter()
        .map(|(path, description)| (path.to_string(), serde_json::json!(description)))
        .collect();

    Json(serde_json::json!({
        "name": "LaMetric 미세먼지 서버",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints,
        "usage": {
            "lametric_url": format!("{}/api/air-quality?station={}&detailed=true", base, state.config.default_station),
            "examples": [
                format!("{}/api/air-quality?station=강남구", base),
                format!("{}/api/air-quality/{}?detailed=false", base, state.config.default_station),
            ],
        },
    }))
}

async fn not_found() -> AppError {
    AppError::NotFound
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    RateLimited,
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = match self {
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                serde_json::json!({
                    "error": "너무 자주 요청하고 있습니다. 잠시 후 다시 시도해주세요."
                }),
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({
                    "error": "엔드포인트를 찾을 수 없습니다.",
                    "available_endpoints": ENDPOINTS.iter().map(|(path, _)| *path).collect::<Vec<_>>(),
                }),
            ),
        };

        let (status, json) = body;
        (status, Json(json)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detailed_flag() {
        assert!(detailed_flag(None));
        assert!(detailed_flag(Some("true")));
        assert!(detailed_flag(Some("")));
        assert!(detailed_flag(Some("FALSE")));
        assert!(!detailed_flag(Some("false")));
    }
}
