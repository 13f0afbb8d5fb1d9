use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::{
    config::UpstreamConfig,
    error::FetchError,
    model::{MonthlyEntry, Outcome, PrayerTimings},
    query::UpstreamQuery,
};

use super::PrayerTimesProvider;

/// Client for the Aladhan prayer times API (`https://api.aladhan.com/v1`).
#[derive(Debug, Clone)]
pub struct AladhanProvider {
    base_url: String,
    http: Client,
}

impl AladhanProvider {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Url::parse(base_url)
            .with_context(|| format!("Invalid upstream base URL '{base_url}'"))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("prayer-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    pub fn from_config(config: &UpstreamConfig) -> anyhow::Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    /// Single GET against the upstream; returns the body of a 2xx response.
    async fn fetch(&self, query: &UpstreamQuery) -> Result<String, FetchError> {
        let path = query.path_and_query();
        debug!(%path, "Sending request to prayer times service");

        let res = self
            .http
            .get(format!("{}/{path}", self.base_url))
            .send()
            .await
            .map_err(|e| FetchError::from_transport(&e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(FetchError::Upstream { status: status.as_u16(), body: truncate_body(&body) });
        }

        res.text().await.map_err(|e| FetchError::from_transport(&e))
    }
}

#[async_trait]
impl PrayerTimesProvider for AladhanProvider {
    async fn timings(&self, query: &UpstreamQuery) -> Outcome<PrayerTimings> {
        let result = self.fetch(query).await.and_then(|body| parse_daily(&body));

        if let Err(err) = &result {
            error!(
                path = %query.path_and_query(),
                status = err.status(),
                error = %err,
                "Failed to fetch daily prayer times"
            );
        }
        result.into()
    }

    async fn calendar(&self, query: &UpstreamQuery) -> Outcome<Vec<MonthlyEntry>> {
        let result = self.fetch(query).await.and_then(|body| parse_calendar(&body));

        if let Err(err) = &result {
            error!(
                path = %query.path_and_query(),
                status = err.status(),
                error = %err,
                "Failed to fetch monthly prayer times"
            );
        }
        result.into()
    }
}

#[derive(Debug, Deserialize)]
struct DailyEnvelope {
    data: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    timings: Option<PrayerTimings>,
}

#[derive(Debug, Deserialize)]
struct CalendarEnvelope {
    data: Option<Vec<CalendarDay>>,
}

#[derive(Debug, Deserialize)]
struct CalendarDay {
    date: Option<DateInfo>,
    timings: Option<PrayerTimings>,
}

#[derive(Debug, Deserialize)]
struct DateInfo {
    #[serde(default)]
    readable: String,
    #[serde(default)]
    timestamp: String,
}

/// Unwrap `{ data: { timings: {...} } }`.
fn parse_daily(body: &str) -> Result<PrayerTimings, FetchError> {
    let envelope: DailyEnvelope = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("invalid daily JSON: {e}")))?;

    envelope
        .data
        .ok_or_else(|| FetchError::malformed("missing 'data' object"))?
        .timings
        .ok_or_else(|| FetchError::malformed("missing 'data.timings' object"))
}

/// Unwrap `{ data: [ { date: {...}, timings: {...} } ] }`, keeping upstream order.
fn parse_calendar(body: &str) -> Result<Vec<MonthlyEntry>, FetchError> {
    let envelope: CalendarEnvelope = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("invalid calendar JSON: {e}")))?;

    let days = envelope.data.ok_or_else(|| FetchError::malformed("missing 'data' array"))?;

    days.into_iter()
        .enumerate()
        .map(|(i, day)| -> Result<MonthlyEntry, FetchError> {
            let date =
                day.date.ok_or_else(|| FetchError::malformed(format!("day {i} has no 'date'")))?;
            let timings = day
                .timings
                .ok_or_else(|| FetchError::malformed(format!("day {i} has no 'timings'")))?;

            Ok(MonthlyEntry { date: date.readable, timestamp: date.timestamp, timings })
        })
        .collect()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
