//! Observed climate profile at a site

use serde::{Deserialize, Serialize};

/// Months per year in the monthly rainfall series
pub const MONTHS: usize = 12;

/// Mean daily minimum / maximum temperature (°C)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// Climate profile for one coordinate.
///
/// Same lifecycle as [`super::SoilData`]: built per request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateData {
    /// Mean annual precipitation (mm)
    pub annual_rainfall: f64,

    /// Mean daily temperature (°C)
    pub average_temperature: f64,

    pub temperature_range: TemperatureRange,

    /// Mean rainfall per calendar month, January first (mm/month)
    pub monthly_rainfall: [f64; MONTHS],

    /// Annual growing degree-days above 10°C
    pub degree_days: f64,
}

impl ClimateData {
    /// Profile substituted whenever live climate data is unavailable
    pub fn fallback() -> Self {
        Self {
            annual_rainfall: 800.0,
            average_temperature: 28.0,
            temperature_range: TemperatureRange { min: 20.0, max: 38.0 },
            monthly_rainfall: [67.0; MONTHS],
            degree_days: 2000.0,
        }
    }
}

impl Default for ClimateData {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_profile() {
        let climate = ClimateData::fallback();
        assert_eq!(climate.annual_rainfall, 800.0);
        assert_eq!(climate.average_temperature, 28.0);
        assert_eq!(climate.temperature_range, TemperatureRange { min: 20.0, max: 38.0 });
        assert!(climate.monthly_rainfall.iter().all(|&mm| mm == 67.0));
        assert_eq!(climate.degree_days, 2000.0);
    }
}
