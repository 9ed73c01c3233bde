//! Climate Cache
//!
//! Process-wide cache of live climate profiles keyed by coordinates rounded
//! to two decimals (~1 km). Entries expire after a fixed TTL; a later insert
//! for the same key replaces the earlier one. Fallback profiles are never
//! stored.

use moka::future::Cache;
use std::time::Duration;

use crate::conditions::ClimateData;

/// Default time-to-live for cached profiles
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

const MAX_ENTRIES: u64 = 10_000;

/// Rounded coordinate key (hundredths of a degree)
pub type CoordinateKey = (i64, i64);

pub fn coordinate_key(lat: f64, lng: f64) -> CoordinateKey {
    ((lat * 100.0).round() as i64, (lng * 100.0).round() as i64)
}

/// Cheap to clone; clones share the same entries
#[derive(Clone)]
pub struct ClimateCache {
    inner: Cache<CoordinateKey, ClimateData>,
}

impl ClimateCache {
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    pub async fn get(&self, lat: f64, lng: f64) -> Option<ClimateData> {
        self.inner.get(&coordinate_key(lat, lng)).await
    }

    pub async fn insert(&self, lat: f64, lng: f64, climate: ClimateData) {
        self.inner.insert(coordinate_key(lat, lng), climate).await;
    }
}

impl Default for ClimateCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_key_rounds_to_hundredths() {
        assert_eq!(coordinate_key(14.6937, -17.4441), (1469, -1744));
        assert_eq!(coordinate_key(14.6949, -17.4449), (1469, -1744));
        assert_ne!(coordinate_key(14.70, -17.44), coordinate_key(14.69, -17.44));
    }

    #[tokio::test]
    async fn test_nearby_coordinates_share_an_entry() {
        let cache = ClimateCache::default();
        cache.insert(14.6937, -17.4441, ClimateData::fallback()).await;
        assert!(cache.get(14.6941, -17.4438).await.is_some());
        assert!(cache.get(14.75, -17.44).await.is_none());
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let cache = ClimateCache::default();
        let mut wet = ClimateData::fallback();
        wet.annual_rainfall = 1500.0;
        cache.insert(12.0, -16.0, ClimateData::fallback()).await;
        cache.insert(12.0, -16.0, wet).await;
        let hit = cache.get(12.0, -16.0).await.unwrap();
        assert_eq!(hit.annual_rainfall, 1500.0);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = ClimateCache::new(Duration::from_millis(50));
        cache.insert(12.0, -16.0, ClimateData::fallback()).await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.get(12.0, -16.0).await.is_none());
    }
}
