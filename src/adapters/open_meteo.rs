//! Open-Meteo Archive Client
//!
//! Live [`ClimateSource`] backed by the Open-Meteo historical weather API.
//! Requests whole calendar years ending last December 31st.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::climate::{DailyRecord, DailySeries};
use super::AdapterError;

pub const DEFAULT_BASE_URL: &str = "https://archive-api.open-meteo.com";

const DAILY_VARIABLES: &str =
    "temperature_2m_mean,temperature_2m_min,temperature_2m_max,precipitation_sum";

/// `daily` block of an archive response; arrays are index-aligned with `time`
#[derive(Debug, Deserialize)]
pub struct ArchiveDaily {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveResponse {
    pub daily: ArchiveDaily,
}

impl ArchiveResponse {
    /// Check alignment and convert into a daily series
    pub fn into_series(self) -> Result<DailySeries, AdapterError> {
        let daily = self.daily;
        let len = daily.time.len();

        let first = daily
            .time
            .first()
            .ok_or_else(|| AdapterError::Malformed("archive response has no days".to_string()))?;
        let start = NaiveDate::parse_from_str(first, "%Y-%m-%d")
            .map_err(|e| AdapterError::Malformed(format!("bad date '{}': {}", first, e)))?;

        let columns = [
            ("temperature_2m_mean", daily.temperature_2m_mean.len()),
            ("temperature_2m_min", daily.temperature_2m_min.len()),
            ("temperature_2m_max", daily.temperature_2m_max.len()),
            ("precipitation_sum", daily.precipitation_sum.len()),
        ];
        if let Some((name, found)) = columns.iter().find(|(_, n)| *n != len) {
            return Err(AdapterError::Malformed(format!(
                "column {} has {} values for {} days",
                name, found, len
            )));
        }

        let days = (0..len)
            .map(|i| DailyRecord {
                precipitation: daily.precipitation_sum[i],
                temp_mean: daily.temperature_2m_mean[i],
                temp_min: daily.temperature_2m_min[i],
                temp_max: daily.temperature_2m_max[i],
            })
            .collect();

        Ok(DailySeries { start, days })
    }
}

/// First and last day of the `years` complete calendar years before `today`
pub fn history_window(today: NaiveDate, years: u32) -> Option<(NaiveDate, NaiveDate)> {
    if years == 0 {
        return None;
    }
    let last_year = today.year() - 1;
    let first_year = last_year - (years as i32 - 1);
    Some((
        NaiveDate::from_ymd_opt(first_year, 1, 1)?,
        NaiveDate::from_ymd_opt(last_year, 12, 31)?,
    ))
}

#[cfg(feature = "live")]
pub use client::OpenMeteoArchive;

#[cfg(feature = "live")]
mod client {
    use super::*;
    use crate::adapters::climate::ClimateSource;
    use crate::config::Config;

    pub struct OpenMeteoArchive {
        client: reqwest::Client,
        base_url: String,
        history_years: u32,
    }

    impl OpenMeteoArchive {
        pub fn new(config: &Config) -> Result<Self, AdapterError> {
            let client = reqwest::Client::builder()
                .timeout(config.http_timeout)
                .build()
                .map_err(|e| AdapterError::Transport(e.to_string()))?;

            Ok(Self {
                client,
                base_url: config.climate_api_url.trim_end_matches('/').to_string(),
                history_years: config.climate_history_years,
            })
        }
    }

    impl ClimateSource for OpenMeteoArchive {
        async fn daily_series(&self, lat: f64, lng: f64) -> Result<DailySeries, AdapterError> {
            let today = chrono::Utc::now().date_naive();
            let (start, end) = history_window(today, self.history_years).ok_or_else(|| {
                AdapterError::InvalidRequest(format!("history of {} years", self.history_years))
            })?;

            let url = format!("{}/v1/archive", self.base_url);
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("latitude", lat.to_string()),
                    ("longitude", lng.to_string()),
                    ("start_date", start.format("%Y-%m-%d").to_string()),
                    ("end_date", end.format("%Y-%m-%d").to_string()),
                    ("daily", DAILY_VARIABLES.to_string()),
                    ("timezone", "UTC".to_string()),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(AdapterError::Status(status.as_u16()));
            }

            let body: ArchiveResponse = response.json().await?;
            tracing::debug!("Open-Meteo returned {} days for ({}, {})", body.daily.time.len(), lat, lng);
            body.into_series()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_archive_response() {
        let json = r#"{
            "latitude": 14.7, "longitude": -17.45,
            "daily_units": {"time": "iso8601"},
            "daily": {
                "time": ["2023-01-01", "2023-01-02", "2023-01-03"],
                "temperature_2m_mean": [22.1, 23.0, null],
                "temperature_2m_min": [18.0, 19.2, 18.5],
                "temperature_2m_max": [27.4, 28.0, 29.1],
                "precipitation_sum": [0.0, 1.5, 0.0]
            }
        }"#;
        let response: ArchiveResponse = serde_json::from_str(json).unwrap();
        let series = response.into_series().unwrap();
        assert_eq!(series.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(series.days.len(), 3);
        assert_eq!(series.days[1].precipitation, Some(1.5));
        assert_eq!(series.days[2].temp_mean, None);
    }

    #[test]
    fn test_misaligned_columns_are_malformed() {
        let json = r#"{"daily": {
            "time": ["2023-01-01", "2023-01-02"],
            "temperature_2m_mean": [22.1],
            "temperature_2m_min": [18.0, 19.2],
            "temperature_2m_max": [27.4, 28.0],
            "precipitation_sum": [0.0, 1.5]
        }}"#;
        let response: ArchiveResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(response.into_series(), Err(AdapterError::Malformed(_))));
    }

    #[test]
    fn test_history_window() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let (start, end) = history_window(today, 3).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert!(history_window(today, 0).is_none());
    }
}
