//! Observed soil profile at a site

use serde::{Deserialize, Serialize};

use super::texture::{classify_texture, SoilTexture};

/// Soil profile for one coordinate (topsoil).
///
/// Created fresh per request by the soil adapter, never cached by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilData {
    /// pH (H2O), 0-14
    pub ph: f64,

    pub texture: SoilTexture,

    /// Organic carbon (%)
    pub organic_carbon: f64,

    /// Total nitrogen (g/kg)
    pub nitrogen: f64,

    /// Available phosphorus (mg/kg)
    pub phosphorus: f64,

    /// Exchangeable potassium (cmol/kg)
    pub potassium: f64,

    /// Clay content (%)
    pub clay: f64,

    /// Sand content (%)
    pub sand: f64,

    /// Silt content (%)
    pub silt: f64,
}

impl SoilData {
    /// Profile substituted whenever live soil data is unavailable.
    ///
    /// Identical for every coordinate.
    pub fn fallback() -> Self {
        Self {
            ph: 6.5,
            texture: SoilTexture::Limoneux,
            organic_carbon: 1.0,
            nitrogen: 0.5,
            phosphorus: 10.0,
            potassium: 0.2,
            clay: 20.0,
            sand: 40.0,
            silt: 40.0,
        }
    }

    /// Build a profile from raw provider measurements.
    ///
    /// Missing measurements keep the fallback value. Texture is re-derived
    /// whenever the particle-size fractions are known.
    pub fn from_measurements(raw: &SoilMeasurements) -> Self {
        let base = Self::fallback();

        let clay = raw.clay.unwrap_or(base.clay);
        let sand = raw.sand.unwrap_or(base.sand);
        let silt = raw
            .silt
            .unwrap_or_else(|| (100.0 - clay - sand).max(0.0));

        let texture = if raw.clay.is_some() && raw.sand.is_some() {
            classify_texture(sand, clay, silt)
        } else {
            base.texture
        };

        Self {
            ph: raw.ph.map(|ph| ph.clamp(0.0, 14.0)).unwrap_or(base.ph),
            texture,
            organic_carbon: raw.organic_carbon.unwrap_or(base.organic_carbon),
            nitrogen: raw.nitrogen.unwrap_or(base.nitrogen),
            phosphorus: base.phosphorus,
            potassium: base.potassium,
            clay,
            sand,
            silt,
        }
    }
}

impl Default for SoilData {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Raw, already unit-converted soil measurements from a provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoilMeasurements {
    pub ph: Option<f64>,
    /// %
    pub clay: Option<f64>,
    /// %
    pub sand: Option<f64>,
    /// %
    pub silt: Option<f64>,
    /// %
    pub organic_carbon: Option<f64>,
    /// g/kg
    pub nitrogen: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_profile() {
        let soil = SoilData::fallback();
        assert_eq!(soil.ph, 6.5);
        assert_eq!(soil.texture, SoilTexture::Limoneux);
        assert_eq!(soil.organic_carbon, 1.0);
        assert_eq!(soil.nitrogen, 0.5);
        assert_eq!(soil.phosphorus, 10.0);
        assert_eq!(soil.potassium, 0.2);
        assert_eq!((soil.clay, soil.sand, soil.silt), (20.0, 40.0, 40.0));
    }

    #[test]
    fn test_from_measurements_classifies_texture() {
        let raw = SoilMeasurements {
            ph: Some(5.8),
            clay: Some(8.0),
            sand: Some(82.0),
            silt: Some(10.0),
            organic_carbon: Some(0.4),
            nitrogen: None,
        };
        let soil = SoilData::from_measurements(&raw);
        assert_eq!(soil.texture, SoilTexture::Sableux);
        assert_eq!(soil.ph, 5.8);
        assert_eq!(soil.organic_carbon, 0.4);
        assert_eq!(soil.nitrogen, 0.5);
    }

    #[test]
    fn test_from_measurements_without_fractions_keeps_default_texture() {
        let raw = SoilMeasurements {
            clay: Some(55.0),
            ..Default::default()
        };
        let soil = SoilData::from_measurements(&raw);
        assert_eq!(soil.texture, SoilTexture::Limoneux);
        assert_eq!(soil.clay, 55.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(SoilData::fallback()).unwrap();
        assert_eq!(json["organicCarbon"], 1.0);
        assert_eq!(json["texture"], "limoneux");
    }
}
