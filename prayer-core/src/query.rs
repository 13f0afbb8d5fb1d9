//! Validation of caller input and construction of upstream queries.
//!
//! Everything here is pure: no I/O happens until a built [`UpstreamQuery`]
//! is handed to a [`PrayerTimesProvider`](crate::PrayerTimesProvider).

use std::fmt;

use crate::error::InvalidArgument;

/// Calculation method used when the caller does not pick one.
pub const DEFAULT_METHOD: i32 = 2;

/// Upstream endpoint a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    TimingsByCity,
    Timings,
    CalendarByCity,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::TimingsByCity => "timingsByCity",
            Endpoint::Timings => "timings",
            Endpoint::CalendarByCity => "calendarByCity",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request against the upstream service.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamQuery {
    endpoint: Endpoint,
    params: Vec<(&'static str, String)>,
}

impl UpstreamQuery {
    /// Daily timings for a city.
    pub fn daily_by_city(city: &str, country: &str) -> Result<Self, InvalidArgument> {
        let (city, country) = validate_place(city, country)?;

        Ok(Self {
            endpoint: Endpoint::TimingsByCity,
            params: vec![("city", city), ("country", country)],
        })
    }

    /// Daily timings for a point; `method` is passed through as-is.
    pub fn daily_by_coordinates(
        latitude: f64,
        longitude: f64,
        method: i32,
    ) -> Result<Self, InvalidArgument> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidArgument::new(format!(
                "Latitude must be between -90 and 90, got {latitude}"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidArgument::new(format!(
                "Longitude must be between -180 and 180, got {longitude}"
            )));
        }

        Ok(Self {
            endpoint: Endpoint::Timings,
            params: vec![
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("method", method.to_string()),
            ],
        })
    }

    /// Calendar of a whole month for a city. Month and year are not checked.
    pub fn monthly(
        city: &str,
        country: &str,
        month: u32,
        year: i32,
    ) -> Result<Self, InvalidArgument> {
        let (city, country) = validate_place(city, country)?;

        Ok(Self {
            endpoint: Endpoint::CalendarByCity,
            params: vec![
                ("city", city),
                ("country", country),
                ("month", month.to_string()),
                ("year", year.to_string()),
            ],
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Percent-encoded `endpoint?key=value&...`, relative to the upstream base URL.
    pub fn path_and_query(&self) -> String {
        let query = self
            .params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.endpoint)
    }
}

/// Renders as `endpoint?key=value&...`, unencoded.
impl fmt::Display for UpstreamQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.endpoint)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

fn validate_place(city: &str, country: &str) -> Result<(String, String), InvalidArgument> {
    let city = city.trim();
    let country = country.trim();

    if city.is_empty() {
        return Err(InvalidArgument::new("City cannot be empty"));
    }
    if country.is_empty() {
        return Err(InvalidArgument::new("Country cannot be empty"));
    }

    Ok((city.to_string(), country.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_by_city_builds_query() {
        let q = UpstreamQuery::daily_by_city("Bergen", "Norway").unwrap();
        assert_eq!(q.endpoint(), Endpoint::TimingsByCity);
        assert_eq!(q.to_string(), "timingsByCity?city=Bergen&country=Norway");
    }

    #[test]
    fn daily_by_city_trims_input() {
        let q = UpstreamQuery::daily_by_city("  Bergen ", "Norway\t").unwrap();
        assert_eq!(q.to_string(), "timingsByCity?city=Bergen&country=Norway");
    }

    #[test]
    fn daily_by_city_rejects_blank_input() {
        for (city, country) in [("", "Norway"), ("Bergen", ""), ("   ", "Norway"), ("Bergen", "\t\n")] {
            let err = UpstreamQuery::daily_by_city(city, country).unwrap_err();
            assert!(err.message.contains("cannot be empty"), "{city:?}/{country:?}");
        }
    }

    #[test]
    fn coordinates_build_query_with_method() {
        let q = UpstreamQuery::daily_by_coordinates(60.39, 5.32, DEFAULT_METHOD).unwrap();
        assert_eq!(q.to_string(), "timings?latitude=60.39&longitude=5.32&method=2");
    }

    #[test]
    fn coordinates_pass_method_through() {
        let q = UpstreamQuery::daily_by_coordinates(0.0, 0.0, 99).unwrap();
        assert!(q.to_string().ends_with("&method=99"));

        let q = UpstreamQuery::daily_by_coordinates(0.0, 0.0, -1).unwrap();
        assert!(q.to_string().ends_with("&method=-1"));
    }

    #[test]
    fn coordinates_accept_boundaries() {
        assert!(UpstreamQuery::daily_by_coordinates(90.0, 180.0, 2).is_ok());
        assert!(UpstreamQuery::daily_by_coordinates(-90.0, -180.0, 2).is_ok());
    }

    #[test]
    fn coordinates_reject_out_of_range() {
        for (lat, lon) in [
            (100.0, 5.32),
            (-90.01, 5.32),
            (60.39, 200.0),
            (60.39, -180.5),
            (f64::NAN, 0.0),
            (0.0, f64::INFINITY),
        ] {
            assert!(
                UpstreamQuery::daily_by_coordinates(lat, lon, 2).is_err(),
                "{lat}/{lon} should be rejected"
            );
        }
    }

    #[test]
    fn latitude_error_names_the_field() {
        let err = UpstreamQuery::daily_by_coordinates(100.0, 5.32, 2).unwrap_err();
        assert!(err.message.contains("Latitude"));

        let err = UpstreamQuery::daily_by_coordinates(60.0, 200.0, 2).unwrap_err();
        assert!(err.message.contains("Longitude"));
    }

    #[test]
    fn monthly_builds_query() {
        let q = UpstreamQuery::monthly("Bergen", "Norway", 3, 2025).unwrap();
        assert_eq!(q.endpoint(), Endpoint::CalendarByCity);
        assert_eq!(
            q.to_string(),
            "calendarByCity?city=Bergen&country=Norway&month=3&year=2025"
        );
    }

    #[test]
    fn monthly_passes_month_and_year_through() {
        let q = UpstreamQuery::monthly("Bergen", "Norway", 13, 0).unwrap();
        assert!(q.to_string().ends_with("&month=13&year=0"));
    }

    #[test]
    fn path_and_query_percent_encodes_values() {
        let q = UpstreamQuery::daily_by_city("New York", "United States").unwrap();
        assert_eq!(q.path_and_query(), "timingsByCity?city=New%20York&country=United%20States");

        let q = UpstreamQuery::monthly("Sao Paulo", "Brazil & Co", 1, 2025).unwrap();
        assert_eq!(
            q.path_and_query(),
            "calendarByCity?city=Sao%20Paulo&country=Brazil%20%26%20Co&month=1&year=2025"
        );
    }

    #[test]
    fn path_and_query_keeps_numbers_readable() {
        let q = UpstreamQuery::daily_by_coordinates(-33.87, 151.21, 2).unwrap();
        assert_eq!(q.path_and_query(), "timings?latitude=-33.87&longitude=151.21&method=2");
    }

    #[test]
    fn monthly_rejects_blank_place() {
        assert!(UpstreamQuery::monthly(" ", "Norway", 3, 2025).is_err());
        assert!(UpstreamQuery::monthly("Bergen", "", 3, 2025).is_err());
    }
}
