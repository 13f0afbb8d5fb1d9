use std::sync::Arc;

use crate::{
    error::InvalidArgument,
    model::{MonthlyEntry, Outcome, PrayerTimings},
    provider::PrayerTimesProvider,
    query::UpstreamQuery,
};

/// Validates caller input, then forwards it to the upstream provider.
///
/// The outer `Result` carries caller mistakes, the inner [`Outcome`]
/// carries what happened upstream.
#[derive(Debug, Clone)]
pub struct PrayerTimeService {
    provider: Arc<dyn PrayerTimesProvider>,
}

impl PrayerTimeService {
    pub fn new(provider: Arc<dyn PrayerTimesProvider>) -> Self {
        Self { provider }
    }

    pub async fn daily_by_city(
        &self,
        city: &str,
        country: &str,
    ) -> Result<Outcome<PrayerTimings>, InvalidArgument> {
        let query = UpstreamQuery::daily_by_city(city, country)?;
        Ok(self.provider.timings(&query).await)
    }

    pub async fn daily_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        method: i32,
    ) -> Result<Outcome<PrayerTimings>, InvalidArgument> {
        let query = UpstreamQuery::daily_by_coordinates(latitude, longitude, method)?;
        Ok(self.provider.timings(&query).await)
    }

    pub async fn monthly(
        &self,
        city: &str,
        country: &str,
        month: u32,
        year: i32,
    ) -> Result<Outcome<Vec<MonthlyEntry>>, InvalidArgument> {
        let query = UpstreamQuery::monthly(city, country, month, year)?;
        Ok(self.provider.calendar(&query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every query and answers with canned outcomes.
    #[derive(Debug, Default)]
    struct RecordingProvider {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingProvider {
        fn calls(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PrayerTimesProvider for RecordingProvider {
        async fn timings(&self, query: &UpstreamQuery) -> Outcome<PrayerTimings> {
            self.seen.lock().unwrap().push(query.to_string());
            if self.fail {
                return Outcome::Failure(FetchError::Upstream { status: 500, body: String::new() });
            }
            Outcome::Success(PrayerTimings { fajr: "05:30".into(), ..Default::default() })
        }

        async fn calendar(&self, query: &UpstreamQuery) -> Outcome<Vec<MonthlyEntry>> {
            self.seen.lock().unwrap().push(query.to_string());
            Outcome::Success(Vec::new())
        }
    }

    fn service() -> (Arc<RecordingProvider>, PrayerTimeService) {
        let provider = Arc::new(RecordingProvider::default());
        (provider.clone(), PrayerTimeService::new(provider))
    }

    #[tokio::test]
    async fn daily_by_city_forwards_valid_query() {
        let (provider, service) = service();

        let outcome = service.daily_by_city("Bergen", "Norway").await.unwrap();

        assert_eq!(outcome.payload().unwrap().fajr, "05:30");
        assert_eq!(provider.calls(), ["timingsByCity?city=Bergen&country=Norway"]);
    }

    #[tokio::test]
    async fn invalid_city_never_reaches_provider() {
        let (provider, service) = service();

        assert!(service.daily_by_city("", "Norway").await.is_err());
        assert!(service.daily_by_city("Bergen", " ").await.is_err());
        assert!(service.monthly("", "Norway", 3, 2025).await.is_err());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_coordinates_never_reach_provider() {
        let (provider, service) = service();

        assert!(service.daily_by_coordinates(100.0, 5.32, 2).await.is_err());
        assert!(service.daily_by_coordinates(60.39, 200.0, 2).await.is_err());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_is_returned_as_outcome() {
        let provider = Arc::new(RecordingProvider { fail: true, ..Default::default() });
        let service = PrayerTimeService::new(provider);

        let outcome = service.daily_by_coordinates(60.39, 5.32, 2).await.unwrap();
        assert!(!outcome.is_success());
        assert!(outcome.error_message().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn monthly_uses_calendar_endpoint() {
        let (provider, service) = service();

        let outcome = service.monthly("Bergen", "Norway", 3, 2025).await.unwrap();

        assert_eq!(outcome, Outcome::Success(Vec::new()));
        assert_eq!(
            provider.calls(),
            ["calendarByCity?city=Bergen&country=Norway&month=3&year=2025"]
        );
    }
}
