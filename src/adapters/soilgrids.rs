//! SoilGrids Client
//!
//! Live [`SoilSource`] backed by the ISRIC SoilGrids v2 properties query.
//! Reads the mean of the 0-5 cm layer and divides by each layer's
//! `d_factor` to get conventional units.

use serde::Deserialize;

use super::AdapterError;
use crate::conditions::SoilMeasurements;

pub const DEFAULT_BASE_URL: &str = "https://rest.isric.org";

const PROPERTIES: [&str; 6] = ["phh2o", "clay", "sand", "silt", "soc", "nitrogen"];
const DEPTH: &str = "0-5cm";

#[derive(Debug, Deserialize)]
pub struct UnitMeasure {
    pub d_factor: f64,
}

#[derive(Debug, Deserialize)]
pub struct DepthValues {
    pub mean: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Depth {
    pub label: String,
    pub values: DepthValues,
}

#[derive(Debug, Deserialize)]
pub struct Layer {
    pub name: String,
    pub unit_measure: UnitMeasure,
    pub depths: Vec<Depth>,
}

#[derive(Debug, Deserialize)]
pub struct LayerProperties {
    pub layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
pub struct PropertiesResponse {
    pub properties: LayerProperties,
}

impl Layer {
    /// Topsoil mean in target units
    fn topsoil_value(&self) -> Option<f64> {
        if self.unit_measure.d_factor <= 0.0 {
            return None;
        }
        self.depths
            .iter()
            .find(|d| d.label == DEPTH)
            .and_then(|d| d.values.mean)
            .map(|v| v / self.unit_measure.d_factor)
    }
}

impl PropertiesResponse {
    /// Convert layers into measurements.
    ///
    /// Organic carbon comes as g/kg and is reported as %. A response without
    /// any topsoil value is malformed.
    pub fn into_measurements(self) -> Result<SoilMeasurements, AdapterError> {
        let mut raw = SoilMeasurements::default();

        for layer in &self.properties.layers {
            let value = layer.topsoil_value();
            match layer.name.as_str() {
                "phh2o" => raw.ph = value,
                "clay" => raw.clay = value,
                "sand" => raw.sand = value,
                "silt" => raw.silt = value,
                "soc" => raw.organic_carbon = value.map(|g_per_kg| g_per_kg / 10.0),
                "nitrogen" => raw.nitrogen = value,
                _ => {}
            }
        }

        if raw == SoilMeasurements::default() {
            return Err(AdapterError::Malformed("no topsoil values in SoilGrids response".to_string()));
        }
        Ok(raw)
    }
}

#[cfg(feature = "live")]
pub use client::SoilGridsClient;

#[cfg(feature = "live")]
mod client {
    use super::*;
    use crate::adapters::soil::SoilSource;
    use crate::config::Config;

    pub struct SoilGridsClient {
        client: reqwest::Client,
        base_url: String,
    }

    impl SoilGridsClient {
        pub fn new(config: &Config) -> Result<Self, AdapterError> {
            let client = reqwest::Client::builder()
                .timeout(config.http_timeout)
                .build()
                .map_err(|e| AdapterError::Transport(e.to_string()))?;

            Ok(Self {
                client,
                base_url: config.soil_api_url.trim_end_matches('/').to_string(),
            })
        }
    }

    impl SoilSource for SoilGridsClient {
        async fn measurements(&self, lat: f64, lng: f64) -> Result<SoilMeasurements, AdapterError> {
            let url = format!("{}/soilgrids/v2.0/properties/query", self.base_url);

            let mut query: Vec<(&str, String)> = vec![
                ("lon", lng.to_string()),
                ("lat", lat.to_string()),
                ("depth", DEPTH.to_string()),
                ("value", "mean".to_string()),
            ];
            query.extend(PROPERTIES.iter().map(|p| ("property", p.to_string())));

            let response = self.client.get(&url).query(&query).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(AdapterError::Status(status.as_u16()));
            }

            let body: PropertiesResponse = response.json().await?;
            body.into_measurements()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(name: &str, d_factor: f64, mean: Option<f64>) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "unit_measure": {"d_factor": d_factor, "mapped_units": "x", "target_units": "y"},
            "depths": [{"range": {"top_depth": 0, "bottom_depth": 5}, "label": "0-5cm", "values": {"mean": mean}}]
        })
    }

    #[test]
    fn test_scales_by_d_factor() {
        let json = serde_json::json!({
            "type": "Feature",
            "properties": {"layers": [
                layer("phh2o", 10.0, Some(62.0)),
                layer("clay", 10.0, Some(120.0)),
                layer("sand", 10.0, Some(780.0)),
                layer("silt", 10.0, Some(100.0)),
                layer("soc", 10.0, Some(85.0)),
                layer("nitrogen", 100.0, Some(70.0)),
            ]}
        });
        let response: PropertiesResponse = serde_json::from_value(json).unwrap();
        let raw = response.into_measurements().unwrap();
        assert_eq!(raw.ph, Some(6.2));
        assert_eq!(raw.clay, Some(12.0));
        assert_eq!(raw.sand, Some(78.0));
        assert_eq!(raw.organic_carbon, Some(0.85));
        assert_eq!(raw.nitrogen, Some(0.7));
    }

    #[test]
    fn test_all_null_layers_are_malformed() {
        let json = serde_json::json!({
            "properties": {"layers": [layer("phh2o", 10.0, None), layer("clay", 10.0, None)]}
        });
        let response: PropertiesResponse = serde_json::from_value(json).unwrap();
        assert!(matches!(response.into_measurements(), Err(AdapterError::Malformed(_))));
    }
}
