//! Soil Data Adapter
//!
//! The upstream soil provider is administratively disabled by default: the
//! adapter then skips network I/O and returns the fallback profile for every
//! coordinate.

use std::future::Future;

use super::{AdapterError, Sourced};
use crate::conditions::{SoilData, SoilMeasurements};

/// Provider of raw soil measurements for a coordinate
pub trait SoilSource: Send + Sync {
    fn measurements(
        &self,
        lat: f64,
        lng: f64,
    ) -> impl Future<Output = Result<SoilMeasurements, AdapterError>> + Send;
}

/// Source used when no soil provider is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSoilSource;

impl SoilSource for DisabledSoilSource {
    async fn measurements(&self, _lat: f64, _lng: f64) -> Result<SoilMeasurements, AdapterError> {
        Err(AdapterError::Disabled)
    }
}

pub struct SoilAdapter<S> {
    source: S,
    enabled: bool,
}

impl SoilAdapter<DisabledSoilSource> {
    /// Adapter that always answers with the fallback profile
    pub fn disabled() -> Self {
        Self {
            source: DisabledSoilSource,
            enabled: false,
        }
    }
}

impl<S: SoilSource> SoilAdapter<S> {
    pub fn new(source: S, enabled: bool) -> Self {
        Self { source, enabled }
    }

    /// Soil profile for a coordinate; never fails
    pub async fn fetch_soil(&self, lat: f64, lng: f64) -> SoilData {
        self.fetch_soil_sourced(lat, lng).await.data
    }

    /// Soil profile plus its provenance
    pub async fn fetch_soil_sourced(&self, lat: f64, lng: f64) -> Sourced<SoilData> {
        if !self.enabled {
            tracing::debug!("Soil provider disabled, using fallback profile for ({}, {})", lat, lng);
            return Sourced::fallback(SoilData::fallback(), AdapterError::Disabled);
        }

        match self.source.measurements(lat, lng).await {
            Ok(raw) => Sourced::live(SoilData::from_measurements(&raw)),
            Err(e) => {
                tracing::warn!("Soil data unavailable for ({}, {}): {}", lat, lng, e);
                Sourced::fallback(SoilData::fallback(), e)
            }
        }
    }
}
