use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// The five daily prayer clock-times, as reported upstream ("HH:MM").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrayerTimings {
    #[serde(default)]
    pub fajr: String,
    #[serde(default)]
    pub dhuhr: String,
    #[serde(default)]
    pub asr: String,
    #[serde(default)]
    pub maghrib: String,
    #[serde(default)]
    pub isha: String,
}

impl PrayerTimings {
    /// `(name, time)` pairs in daily order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Fajr", self.fajr.as_str()),
            ("Dhuhr", self.dhuhr.as_str()),
            ("Asr", self.asr.as_str()),
            ("Maghrib", self.maghrib.as_str()),
            ("Isha", self.isha.as_str()),
        ]
        .into_iter()
    }
}

/// Timings for one calendar day of a monthly listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyEntry {
    /// Human-readable date, e.g. "01 Mar 2025".
    pub date: String,
    /// Unix timestamp as the upstream string.
    pub timestamp: String,
    pub timings: PrayerTimings,
}

/// Result of a single upstream round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(FetchError),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Outcome::Success(payload) => Some(payload),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }

    /// Human-readable failure message, `None` on success.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn into_result(self) -> Result<T, FetchError> {
        self.into()
    }
}

impl<T> From<Result<T, FetchError>> for Outcome<T> {
    fn from(value: Result<T, FetchError>) -> Self {
        match value {
            Ok(payload) => Outcome::Success(payload),
            Err(err) => Outcome::Failure(err),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, FetchError> {
    fn from(value: Outcome<T>) -> Self {
        match value {
            Outcome::Success(payload) => Ok(payload),
            Outcome::Failure(err) => Err(err),
        }
    }
}
