//! Plant Requirement Catalog
//!
//! Read-only table of crop requirement profiles keyed by lowercase crop id.
//! Built once at startup (embedded table or a JSON document), then passed by
//! reference into the engine and the ranking aggregator.

pub mod requirements;

pub use requirements::{
    Band, ClimateRequirements, Drainage, PlantRequirements, SoilRequirements, WaterNeeds,
};

use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

/// Crop table shipped with the crate
const BUILTIN_CATALOG: &str = include_str!("../../data/plant_catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse plant catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read plant catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile for '{id}': {reason}")]
    InvalidProfile { id: String, reason: String },

    #[error("duplicate crop id '{0}'")]
    DuplicateCrop(String),

    #[error("unknown crop '{0}'")]
    UnknownCrop(String),
}

/// Immutable crop requirement table.
///
/// Iteration follows document order, which is also the tie-break order of the
/// ranking aggregator.
#[derive(Debug, Clone)]
pub struct PlantCatalog {
    plants: Vec<PlantRequirements>,
    index: FxHashMap<String, usize>,
}

impl PlantCatalog {
    /// Load the embedded crop table
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file (array of profiles)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate a JSON array of profiles
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let plants: Vec<PlantRequirements> = serde_json::from_str(json)?;
        Self::from_profiles(plants)
    }

    /// Build from already-parsed profiles; ids are normalized to lowercase
    pub fn from_profiles(mut plants: Vec<PlantRequirements>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();

        for (idx, plant) in plants.iter_mut().enumerate() {
            plant.id = plant.id.trim().to_lowercase();
            plant
                .validate()
                .map_err(|reason| CatalogError::InvalidProfile {
                    id: plant.id.clone(),
                    reason,
                })?;
            if index.insert(plant.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateCrop(plant.id.clone()));
            }
        }

        tracing::debug!("Loaded plant catalog ({} crops)", plants.len());
        Ok(Self { plants, index })
    }

    /// Look up a crop by id (case-insensitive)
    pub fn get(&self, id: &str) -> Option<&PlantRequirements> {
        let key = id.trim().to_lowercase();
        self.index.get(&key).map(|&idx| &self.plants[idx])
    }

    /// Look up a crop, failing on unknown ids
    pub fn require(&self, id: &str) -> Result<&PlantRequirements, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownCrop(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Profiles in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, PlantRequirements> {
        self.plants.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.plants.iter().map(|p| p.id.as_str())
    }

    /// Number of crops in the catalog
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

impl<'a> IntoIterator for &'a PlantCatalog {
    type Item = &'a PlantRequirements;
    type IntoIter = std::slice::Iter<'a, PlantRequirements>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = PlantCatalog::builtin().unwrap();
        assert!(catalog.len() >= 10);
        let onion = catalog.get("oignon").unwrap();
        assert_eq!(onion.soil.ph_min, 5.5);
        assert_eq!(onion.soil.ph_max, 7.0);
        assert_eq!(onion.climate.rainfall_min, 400.0);
        assert_eq!(onion.climate.rainfall_max, Some(800.0));
        assert_eq!(onion.water_needs, WaterNeeds::Moyen);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = PlantCatalog::builtin().unwrap();
        assert!(catalog.get("Oignon").is_some());
        assert!(catalog.get(" TOMATE ").is_some());
        assert!(matches!(
            catalog.require("baobab"),
            Err(CatalogError::UnknownCrop(id)) if id == "baobab"
        ));
    }

    #[test]
    fn test_ids_are_normalized_and_unique() {
        let json = r#"[
            {"id": "Mil", "name": "Mil",
             "soil": {"phMin": 5.0, "phMax": 8.0, "preferredTexture": "sableux", "drainage": "bon"},
             "climate": {"tempMin": 25, "tempMax": 38, "rainfallMin": 250, "rainfallMax": 700},
             "waterNeeds": "faible", "yieldRange": {"min": 0.5, "max": 2.5}},
            {"id": "mil", "name": "Mil bis",
             "soil": {"phMin": 5.0, "phMax": 8.0, "preferredTexture": "sableux", "drainage": "bon"},
             "climate": {"tempMin": 25, "tempMax": 38, "rainfallMin": 250},
             "waterNeeds": "faible", "yieldRange": {"min": 0.5, "max": 2.5}}
        ]"#;
        assert!(matches!(
            PlantCatalog::from_json(json),
            Err(CatalogError::DuplicateCrop(id)) if id == "mil"
        ));
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let json = r#"[
            {"id": "riz", "name": "Riz",
             "soil": {"phMin": 7.5, "phMax": 5.0, "preferredTexture": "argileux", "drainage": "faible"},
             "climate": {"tempMin": 20, "tempMax": 35, "rainfallMin": 1000},
             "waterNeeds": "élevé", "yieldRange": {"min": 3, "max": 7}}
        ]"#;
        assert!(matches!(
            PlantCatalog::from_json(json),
            Err(CatalogError::InvalidProfile { id, .. }) if id == "riz"
        ));
    }

    #[test]
    fn test_iteration_keeps_document_order() {
        let catalog = PlantCatalog::builtin().unwrap();
        let first = catalog.ids().next().unwrap();
        assert_eq!(first, "oignon");
        assert_eq!(catalog.iter().count(), catalog.len());
    }
}
