use crate::{
    Config, MonthlyEntry, Outcome, PrayerTimings, UpstreamQuery,
    provider::aladhan::AladhanProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod aladhan;

/// A source of prayer times reachable through [`UpstreamQuery`] descriptors.
///
/// Implementations perform exactly one upstream call per invocation and
/// report every operational failure as [`Outcome::Failure`].
#[async_trait]
pub trait PrayerTimesProvider: Send + Sync + Debug {
    /// Timings for a single day (`timingsByCity`, `timings`).
    async fn timings(&self, query: &UpstreamQuery) -> Outcome<PrayerTimings>;

    /// Timings for every day of a month (`calendarByCity`).
    async fn calendar(&self, query: &UpstreamQuery) -> Outcome<Vec<MonthlyEntry>>;
}

/// Construct the upstream provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn PrayerTimesProvider>> {
    let provider = AladhanProvider::from_config(&config.upstream)?;
    Ok(Arc::new(provider))
}
