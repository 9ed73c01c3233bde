//! Climate Data Adapter
//!
//! Turns a multi-year daily weather series into a [`ClimateData`] profile.
//! A 5xx answer is retried exactly once after a fixed delay; any other
//! failure, or a failed retry, degrades to the fallback profile.
//!
//! The fixed delay has no backoff or jitter.

use chrono::{Datelike, NaiveDate};
use std::future::Future;
use std::time::Duration;

use super::cache::ClimateCache;
use super::{AdapterError, Sourced};
use crate::conditions::{ClimateData, TemperatureRange, MONTHS};

/// Base temperature for degree-days (°C)
pub const BASE_TEMPERATURE: f64 = 10.0;

/// Non-leap days per month, used to bucket daily values
const DAYS_PER_MONTH: [u32; MONTHS] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const DAYS_PER_YEAR: usize = 365;

/// One day of observations; providers report gaps as `None`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyRecord {
    /// mm
    pub precipitation: Option<f64>,
    /// °C
    pub temp_mean: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
}

/// Consecutive daily records starting at `start`
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub start: NaiveDate,
    pub days: Vec<DailyRecord>,
}

/// Provider of daily weather history for a coordinate
pub trait ClimateSource: Send + Sync {
    fn daily_series(
        &self,
        lat: f64,
        lng: f64,
    ) -> impl Future<Output = Result<DailySeries, AdapterError>> + Send;
}

/// Aggregate a daily series into a climate profile.
///
/// Rainfall totals are divided by the number of whole years covered (at
/// least one); degree-days are the raw sum over the whole series. Monthly
/// buckets walk the non-leap table, so multi-year windows drift by one day per
/// leap year crossed.
/// Fails with [`AdapterError::Malformed`] when no day carries a usable mean
/// temperature or precipitation value.
pub fn summarize_daily_series(series: &DailySeries) -> Result<ClimateData, AdapterError> {
    if series.days.is_empty() {
        return Err(AdapterError::Malformed("empty daily series".to_string()));
    }

    let years = (series.days.len() / DAYS_PER_YEAR).max(1) as f64;

    let mut total_rain = 0.0;
    let mut rain_days = 0usize;
    let mut monthly_totals = [0.0; MONTHS];

    let mut month = series.start.month0() as usize;
    let mut day_of_month = series.start.day0().min(DAYS_PER_MONTH[month] - 1);

    let mut mean_sum = 0.0;
    let mut mean_count = 0usize;
    let mut min_sum = 0.0;
    let mut min_count = 0usize;
    let mut max_sum = 0.0;
    let mut max_count = 0usize;
    let mut degree_days = 0.0;

    for day in &series.days {
        if let Some(rain) = day.precipitation {
            total_rain += rain;
            monthly_totals[month] += rain;
            rain_days += 1;
        }
        if let Some(mean) = day.temp_mean {
            mean_sum += mean;
            mean_count += 1;
            degree_days += (mean - BASE_TEMPERATURE).max(0.0);
        }
        if let Some(min) = day.temp_min {
            min_sum += min;
            min_count += 1;
        }
        if let Some(max) = day.temp_max {
            max_sum += max;
            max_count += 1;
        }

        // Advance through the fixed calendar
        day_of_month += 1;
        if day_of_month >= DAYS_PER_MONTH[month] {
            day_of_month = 0;
            month = (month + 1) % MONTHS;
        }
    }

    if mean_count == 0 || rain_days == 0 {
        return Err(AdapterError::Malformed(format!(
            "no usable days in series of {} (temperature: {}, precipitation: {})",
            series.days.len(),
            mean_count,
            rain_days
        )));
    }

    let average_temperature = mean_sum / mean_count as f64;
    let temperature_range = TemperatureRange {
        min: if min_count > 0 { min_sum / min_count as f64 } else { average_temperature },
        max: if max_count > 0 { max_sum / max_count as f64 } else { average_temperature },
    };

    Ok(ClimateData {
        annual_rainfall: total_rain / years,
        average_temperature,
        temperature_range,
        monthly_rainfall: monthly_totals.map(|total| total / years),
        degree_days,
    })
}

pub struct ClimateAdapter<S> {
    source: S,
    retry_delay: Duration,
    cache: Option<ClimateCache>,
}

impl<S: ClimateSource> ClimateAdapter<S> {
    pub fn new(source: S, retry_delay: Duration) -> Self {
        Self {
            source,
            retry_delay,
            cache: None,
        }
    }

    /// Serve repeated lookups of nearby coordinates from `cache`
    pub fn with_cache(mut self, cache: ClimateCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Climate profile for a coordinate; never fails
    pub async fn fetch_climate(&self, lat: f64, lng: f64) -> ClimateData {
        self.fetch_climate_sourced(lat, lng).await.data
    }

    /// Climate profile plus its provenance
    pub async fn fetch_climate_sourced(&self, lat: f64, lng: f64) -> Sourced<ClimateData> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(lat, lng).await {
                tracing::debug!("Climate cache hit for ({}, {})", lat, lng);
                return Sourced::cached(hit);
            }
        }

        let series = match self.source.daily_series(lat, lng).await {
            Err(e) if e.is_server_error() => {
                tracing::warn!(
                    "Climate provider error for ({}, {}): {}; retrying in {:?}",
                    lat,
                    lng,
                    e,
                    self.retry_delay
                );
                tokio::time::sleep(self.retry_delay).await;
                self.source.daily_series(lat, lng).await
            }
            other => other,
        };

        match series.and_then(|series| summarize_daily_series(&series)) {
            Ok(climate) => {
                if let Some(cache) = &self.cache {
                    cache.insert(lat, lng, climate.clone()).await;
                }
                Sourced::live(climate)
            }
            Err(e) => {
                tracing::warn!("Climate data unavailable for ({}, {}): {}", lat, lng, e);
                Sourced::fallback(ClimateData::fallback(), e)
            }
        }
    }
}
