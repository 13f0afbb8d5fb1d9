//! HTTP gateway in front of [`PrayerTimeService`].

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use prayer_core::{
    DEFAULT_METHOD, InvalidArgument, MonthlyEntry, Outcome, PrayerTimeService, PrayerTimings,
    ServerConfig,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

const DAILY_NOT_FOUND: &str =
    "Could not fetch prayer times. Check city/country name or try again later.";
const MONTHLY_NOT_FOUND: &str = "Could not fetch monthly prayer times. Try again later.";
const COORDINATES_NOT_FOUND: &str = "Could not fetch prayer times for given coordinates.";

/// Error responses of the gateway.
#[derive(Debug)]
pub enum ApiError {
    /// 400 `{ message }`
    InvalidArgument(InvalidArgument),
    /// 404 `{ message }`
    NotFound(&'static str),
    /// 400 `{ error }`
    BadRequest(String),
}

impl From<InvalidArgument> for ApiError {
    fn from(err: InvalidArgument) -> Self {
        ApiError::InvalidArgument(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidArgument(err) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": err.message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CoordinatesParams {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_method")]
    pub method: i32,
}

#[derive(Debug, Deserialize)]
pub struct DailyByCoordinatesParams {
    pub latitude: f64,
    pub longitude: f64,
}

fn default_method() -> i32 {
    DEFAULT_METHOD
}

pub fn router(service: PrayerTimeService) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/daily/{city}/{country}", get(daily))
        .route("/monthly/{city}/{country}/{month}/{year}", get(monthly))
        .route("/coordinates", get(coordinates))
        .route("/daily-by-coordinates", get(daily_by_coordinates))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind and serve until Ctrl+C.
pub async fn run(config: &ServerConfig, service: PrayerTimeService) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Prayer times gateway listening on http://{addr}");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for Ctrl+C");
        return;
    }
    info!("Shutting down");
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn daily(
    State(service): State<PrayerTimeService>,
    Path((city, country)): Path<(String, String)>,
) -> Result<Json<PrayerTimings>, ApiError> {
    match service.daily_by_city(&city, &country).await? {
        Outcome::Success(timings) => Ok(Json(timings)),
        Outcome::Failure(_) => Err(ApiError::NotFound(DAILY_NOT_FOUND)),
    }
}

async fn monthly(
    State(service): State<PrayerTimeService>,
    Path((city, country, month, year)): Path<(String, String, u32, i32)>,
) -> Result<Json<Vec<MonthlyEntry>>, ApiError> {
    match service.monthly(&city, &country, month, year).await? {
        Outcome::Success(entries) if !entries.is_empty() => Ok(Json(entries)),
        Outcome::Success(_) => {
            warn!(%city, %country, month, year, "Upstream returned an empty calendar");
            Err(ApiError::NotFound(MONTHLY_NOT_FOUND))
        }
        Outcome::Failure(_) => Err(ApiError::NotFound(MONTHLY_NOT_FOUND)),
    }
}

async fn coordinates(
    State(service): State<PrayerTimeService>,
    Query(params): Query<CoordinatesParams>,
) -> Result<Json<PrayerTimings>, ApiError> {
    match service.daily_by_coordinates(params.lat, params.lon, params.method).await? {
        Outcome::Success(timings) => Ok(Json(timings)),
        Outcome::Failure(_) => Err(ApiError::NotFound(COORDINATES_NOT_FOUND)),
    }
}

async fn daily_by_coordinates(
    State(service): State<PrayerTimeService>,
    Query(params): Query<DailyByCoordinatesParams>,
) -> Result<Json<PrayerTimings>, ApiError> {
    let outcome = service
        .daily_by_coordinates(params.latitude, params.longitude, DEFAULT_METHOD)
        .await
        .map_err(|err| ApiError::BadRequest(err.message))?;

    match outcome {
        Outcome::Success(timings) => Ok(Json(timings)),
        Outcome::Failure(err) => Err(ApiError::BadRequest(err.to_string())),
    }
}
