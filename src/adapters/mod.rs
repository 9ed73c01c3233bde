//! Soil / Climate Data Adapters
//!
//! Fetch site conditions from external providers. Adapters never fail: any
//! upstream problem (HTTP error, timeout, unparsable body, provider switched
//! off) resolves to the documented fallback profile, and the result records
//! where the data came from.
//!
//! ## Architecture
//! - `soil.rs` - SoilSource seam + SoilAdapter (disabled by default)
//! - `climate.rs` - ClimateSource seam, daily series aggregation, ClimateAdapter (one retry on 5xx)
//! - `cache.rs` - Short-TTL climate cache keyed by rounded coordinates
//! - `soilgrids.rs` - Live SoilGrids v2 client
//! - `open_meteo.rs` - Live Open-Meteo archive client

pub mod soil;
pub mod climate;
pub mod cache;
pub mod soilgrids;
pub mod open_meteo;

pub use soil::{DisabledSoilSource, SoilAdapter, SoilSource};
pub use climate::{summarize_daily_series, ClimateAdapter, ClimateSource, DailyRecord, DailySeries};
pub use cache::ClimateCache;
#[cfg(feature = "live")]
pub use open_meteo::OpenMeteoArchive;
#[cfg(feature = "live")]
pub use soilgrids::SoilGridsClient;

use serde::Serialize;
use thiserror::Error;

use crate::conditions::{ClimateData, SoilData};

/// Why live data could not be used
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AdapterError {
    #[error("provider disabled")]
    Disabled,

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AdapterError {
    /// 5xx responses are the only ones worth retrying
    pub fn is_server_error(&self) -> bool {
        matches!(self, AdapterError::Status(status) if (500..=599).contains(status))
    }

    /// The provider answered, but with something unusable
    pub fn is_structural(&self) -> bool {
        matches!(self, AdapterError::Malformed(_))
    }
}

#[cfg(feature = "live")]
impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AdapterError::Timeout
        } else if e.is_decode() {
            AdapterError::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            AdapterError::Status(status.as_u16())
        } else {
            AdapterError::Transport(e.to_string())
        }
    }
}

/// Provenance of a soil or climate profile
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "origin", rename_all = "camelCase")]
pub enum DataOrigin {
    /// Fetched from the provider for this request
    Live,
    /// Served from the climate cache
    Cached,
    /// Fallback profile substituted
    Fallback { reason: AdapterError },
}

impl DataOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataOrigin::Fallback { .. })
    }
}

/// A profile plus where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub origin: DataOrigin,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self { data, origin: DataOrigin::Live }
    }

    pub fn cached(data: T) -> Self {
        Self { data, origin: DataOrigin::Cached }
    }

    pub fn fallback(data: T, reason: AdapterError) -> Self {
        Self {
            data,
            origin: DataOrigin::Fallback { reason },
        }
    }

    /// Fallback caused by a malformed provider response
    pub fn is_structural_failure(&self) -> bool {
        matches!(&self.origin, DataOrigin::Fallback { reason } if reason.is_structural())
    }
}

/// Soil and climate for one site, fetched together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteConditions {
    pub soil: Sourced<SoilData>,
    pub climate: Sourced<ClimateData>,
}

impl SiteConditions {
    /// Conditions built from fallback profiles only (no providers)
    pub fn fallback(reason: AdapterError) -> Self {
        Self {
            soil: Sourced::fallback(SoilData::fallback(), reason.clone()),
            climate: Sourced::fallback(ClimateData::fallback(), reason),
        }
    }

    /// At least one profile is a fallback
    pub fn is_degraded(&self) -> bool {
        self.soil.origin.is_fallback() || self.climate.origin.is_fallback()
    }

    /// A provider answered with an unusable body; callers may offer a retry
    pub fn has_structural_failure(&self) -> bool {
        self.soil.is_structural_failure() || self.climate.is_structural_failure()
    }
}

/// Fetch soil and climate for a coordinate concurrently.
///
/// Both fetches always resolve; no timeout is added on top of the adapters'.
pub async fn fetch_conditions<S, C>(
    soil: &SoilAdapter<S>,
    climate: &ClimateAdapter<C>,
    lat: f64,
    lng: f64,
) -> SiteConditions
where
    S: SoilSource,
    C: ClimateSource,
{
    let (soil, climate) = tokio::join!(
        soil.fetch_soil_sourced(lat, lng),
        climate.fetch_climate_sourced(lat, lng),
    );

    SiteConditions { soil, climate }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_5xx_is_retryable() {
        assert!(AdapterError::Status(503).is_server_error());
        assert!(AdapterError::Status(500).is_server_error());
        assert!(!AdapterError::Status(404).is_server_error());
        assert!(!AdapterError::Timeout.is_server_error());
    }

    #[test]
    fn test_structural_failure_detection() {
        let malformed = Sourced::fallback(SoilData::fallback(), AdapterError::Malformed("bad json".into()));
        assert!(malformed.is_structural_failure());
        let disabled = Sourced::fallback(SoilData::fallback(), AdapterError::Disabled);
        assert!(!disabled.is_structural_failure());
        assert!(!Sourced::live(SoilData::fallback()).is_structural_failure());
    }

    #[test]
    fn test_origin_serialization() {
        let origin = DataOrigin::Fallback { reason: AdapterError::Status(502) };
        let json = serde_json::to_value(&origin).unwrap();
        assert_eq!(json["origin"], "fallback");
        assert_eq!(json["reason"]["kind"], "status");
        assert_eq!(json["reason"]["detail"], 502);
    }
}
