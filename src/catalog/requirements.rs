//! Crop Requirement Profiles
//!
//! Soil and climate bands a crop is known to grow in. Optional bands are
//! `Option`s: an absent band means the corresponding check is skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::conditions::PreferredTexture;

/// Inclusive numeric band `min..=max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `true` when `value` lies in the band, bounds included
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Drainage a crop needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drainage {
    Bon,
    Moyen,
    Faible,
}

/// Water-need class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterNeeds {
    #[serde(rename = "faible")]
    Faible,
    #[serde(rename = "moyen")]
    Moyen,
    #[serde(rename = "élevé", alias = "eleve")]
    Eleve,
}

impl WaterNeeds {
    pub fn label(&self) -> &'static str {
        match self {
            WaterNeeds::Faible => "faible",
            WaterNeeds::Moyen => "moyen",
            WaterNeeds::Eleve => "élevé",
        }
    }
}

impl fmt::Display for WaterNeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilRequirements {
    pub ph_min: f64,
    pub ph_max: f64,
    pub preferred_texture: PreferredTexture,
    pub drainage: Drainage,
}

impl SoilRequirements {
    pub fn ph_band(&self) -> Band {
        Band::new(self.ph_min, self.ph_max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateRequirements {
    /// Mean temperature band (°C)
    pub temp_min: f64,
    pub temp_max: f64,

    /// Night (daily minimum) temperature band, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_night_temp: Option<Band>,

    /// Annual rainfall (mm)
    pub rainfall_min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall_max: Option<f64>,

    /// Degree-days above 10°C needed to reach maturity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree_days_requirement: Option<f64>,
}

/// Full requirement profile for one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRequirements {
    /// Lowercase catalog key (e.g., "oignon")
    pub id: String,

    /// Display name (e.g., "Oignon")
    pub name: String,

    pub soil: SoilRequirements,

    pub climate: ClimateRequirements,

    pub water_needs: WaterNeeds,

    /// Yield (t/ha)
    pub yield_range: Band,
}

impl PlantRequirements {
    /// Check the ordering invariants of every band.
    ///
    /// Returns a description of the first violation.
    pub fn validate(&self) -> Result<(), String> {
        let soil = &self.soil;
        let climate = &self.climate;

        if self.id.trim().is_empty() {
            return Err("empty id".to_string());
        }
        if !(0.0..=14.0).contains(&soil.ph_min) || !(0.0..=14.0).contains(&soil.ph_max) {
            return Err(format!("pH band {}-{} outside 0-14", soil.ph_min, soil.ph_max));
        }
        if soil.ph_min > soil.ph_max {
            return Err(format!("phMin {} > phMax {}", soil.ph_min, soil.ph_max));
        }
        if climate.temp_min > climate.temp_max {
            return Err(format!("tempMin {} > tempMax {}", climate.temp_min, climate.temp_max));
        }
        if let Some(night) = climate.ideal_night_temp {
            if night.min > night.max {
                return Err(format!("idealNightTemp {} > {}", night.min, night.max));
            }
        }
        if climate.rainfall_min < 0.0 {
            return Err(format!("negative rainfallMin {}", climate.rainfall_min));
        }
        if let Some(max) = climate.rainfall_max {
            if max < climate.rainfall_min {
                return Err(format!("rainfallMax {} < rainfallMin {}", max, climate.rainfall_min));
            }
        }
        if let Some(dd) = climate.degree_days_requirement {
            if dd < 0.0 {
                return Err(format!("negative degreeDaysRequirement {}", dd));
            }
        }
        if self.yield_range.min > self.yield_range.max {
            return Err(format!(
                "yieldRange {} > {}",
                self.yield_range.min, self.yield_range.max
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONION_JSON: &str = r#"{
        "id": "oignon",
        "name": "Oignon",
        "soil": { "phMin": 5.5, "phMax": 7.0, "preferredTexture": "limoneux", "drainage": "bon" },
        "climate": { "tempMin": 15, "tempMax": 35, "rainfallMin": 400, "rainfallMax": 800 },
        "waterNeeds": "moyen",
        "yieldRange": { "min": 15, "max": 35 }
    }"#;

    #[test]
    fn test_parse_optional_bands() {
        let plant: PlantRequirements = serde_json::from_str(ONION_JSON).unwrap();
        assert_eq!(plant.climate.ideal_night_temp, None);
        assert_eq!(plant.climate.degree_days_requirement, None);
        assert_eq!(plant.climate.rainfall_max, Some(800.0));
        assert_eq!(plant.soil.drainage, Drainage::Bon);
        assert!(plant.validate().is_ok());
    }

    #[test]
    fn test_water_needs_accepts_accented_label() {
        let needs: WaterNeeds = serde_json::from_str("\"élevé\"").unwrap();
        assert_eq!(needs, WaterNeeds::Eleve);
        let needs: WaterNeeds = serde_json::from_str("\"eleve\"").unwrap();
        assert_eq!(needs, WaterNeeds::Eleve);
    }

    #[test]
    fn test_validate_rejects_inverted_bands() {
        let mut plant: PlantRequirements = serde_json::from_str(ONION_JSON).unwrap();
        plant.soil.ph_min = 7.5;
        assert!(plant.validate().is_err());

        let mut plant: PlantRequirements = serde_json::from_str(ONION_JSON).unwrap();
        plant.climate.rainfall_max = Some(300.0);
        assert!(plant.validate().is_err());
    }

    #[test]
    fn test_band_contains_bounds() {
        let band = Band::new(15.0, 22.0);
        assert!(band.contains(15.0));
        assert!(band.contains(22.0));
        assert!(!band.contains(22.1));
        assert_eq!(band.width(), 7.0);
    }
}
