//! Crop Ranking Aggregator
//!
//! Runs the scoring engine over the whole catalog for one site, splits the
//! sorted results into the top-3 "ideal" crops and the rest, scores the
//! user's own crop selection and merges advice across crops.
//!
//! Everything here is synchronous and recomputed in full on every call; the
//! catalog holds tens of entries.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::catalog::PlantCatalog;
use crate::conditions::{ClimateData, SoilData};
use crate::suitability::{score, MatchingResult};

/// Number of crops reported as ideal
pub const IDEAL_COUNT: usize = 3;

/// One crop with its result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCrop {
    pub crop_id: String,
    pub name: String,
    pub result: MatchingResult,
}

/// Catalog sorted by descending score, split into ideal and other crops
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRanking {
    pub ideal: Vec<RankedCrop>,
    pub other: Vec<RankedCrop>,
}

impl CropRanking {
    /// All crops, best first (`ideal` followed by `other`)
    pub fn iter(&self) -> impl Iterator<Item = &RankedCrop> {
        self.ideal.iter().chain(self.other.iter())
    }

    pub fn len(&self) -> usize {
        self.ideal.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideal.is_empty() && self.other.is_empty()
    }
}

/// Results for the crops the user selected, in selection order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionScores {
    pub crops: Vec<RankedCrop>,
}

impl SelectionScores {
    pub fn get(&self, crop_id: &str) -> Option<&MatchingResult> {
        let key = crop_id.trim().to_lowercase();
        self.crops
            .iter()
            .find(|crop| crop.crop_id == key)
            .map(|crop| &crop.result)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

/// Deduplicated advice across several crops
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombinedAdvice {
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Score every catalog entry and rank them.
///
/// Sorting is stable: equal scores keep catalog order.
pub fn rank_catalog(catalog: &PlantCatalog, soil: &SoilData, climate: &ClimateData) -> CropRanking {
    let mut ranked: Vec<RankedCrop> = catalog
        .iter()
        .map(|plant| RankedCrop {
            crop_id: plant.id.clone(),
            name: plant.name.clone(),
            result: score(plant, soil, climate),
        })
        .collect();

    ranked.sort_by(|a, b| b.result.score.total_cmp(&a.result.score));

    let other = ranked.split_off(IDEAL_COUNT.min(ranked.len()));

    tracing::debug!(
        "Ranked {} crops (best: {:?})",
        ranked.len() + other.len(),
        ranked.first().map(|c| (&c.crop_id, c.result.score))
    );

    CropRanking { ideal: ranked, other }
}

/// Score only the selected crops.
///
/// Unknown ids are skipped; a crop selected twice is scored once.
pub fn score_selection<S: AsRef<str>>(
    catalog: &PlantCatalog,
    crop_ids: &[S],
    soil: &SoilData,
    climate: &ClimateData,
) -> SelectionScores {
    let mut seen = FxHashSet::default();
    let mut crops = Vec::with_capacity(crop_ids.len());

    for id in crop_ids {
        let Some(plant) = catalog.get(id.as_ref()) else {
            tracing::warn!("Skipping unknown crop '{}'", id.as_ref());
            continue;
        };
        if !seen.insert(plant.id.as_str()) {
            continue;
        }
        crops.push(RankedCrop {
            crop_id: plant.id.clone(),
            name: plant.name.clone(),
            result: score(plant, soil, climate),
        });
    }

    SelectionScores { crops }
}

/// Union of the selected crops' alerts and recommendations, first-seen order.
///
/// A list the selection leaves empty falls back to the ideal crops' union.
pub fn combined_advice(selection: &SelectionScores, ranking: &CropRanking) -> CombinedAdvice {
    let mut alerts = unique_strings(selection.crops.iter().map(|c| &c.result.alerts));
    if alerts.is_empty() {
        alerts = unique_strings(ranking.ideal.iter().map(|c| &c.result.alerts));
    }

    let mut recommendations = unique_strings(selection.crops.iter().map(|c| &c.result.recommendations));
    if recommendations.is_empty() {
        recommendations = unique_strings(ranking.ideal.iter().map(|c| &c.result.recommendations));
    }

    CombinedAdvice { alerts, recommendations }
}

/// Exact-string dedup preserving first occurrence
fn unique_strings<'a>(lists: impl Iterator<Item = &'a Vec<String>>) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut out = Vec::new();

    for text in lists.flatten() {
        if seen.insert(text.as_str()) {
            out.push(text.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_strings_keeps_first_seen_order() {
        let a = vec!["x".to_string(), "y".to_string()];
        let b = vec!["z".to_string(), "x".to_string(), "y".to_string(), "w".to_string()];
        let merged = unique_strings([&a, &b].into_iter());
        assert_eq!(merged, vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn test_unique_strings_is_exact_match() {
        let a = vec!["Irriguer".to_string(), "irriguer".to_string(), "Irriguer ".to_string()];
        let merged = unique_strings([&a].into_iter());
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_small_catalog_ideal_is_whole_catalog() {
        let json = r#"[
            {"id": "mil", "name": "Mil",
             "soil": {"phMin": 5.0, "phMax": 8.0, "preferredTexture": "sableux", "drainage": "bon"},
             "climate": {"tempMin": 25, "tempMax": 38, "rainfallMin": 250, "rainfallMax": 700},
             "waterNeeds": "faible", "yieldRange": {"min": 0.5, "max": 2.5}},
            {"id": "riz", "name": "Riz",
             "soil": {"phMin": 5.0, "phMax": 7.0, "preferredTexture": "argileux", "drainage": "faible"},
             "climate": {"tempMin": 20, "tempMax": 35, "rainfallMin": 1000},
             "waterNeeds": "élevé", "yieldRange": {"min": 3, "max": 7}}
        ]"#;
        let catalog = PlantCatalog::from_json(json).unwrap();
        let ranking = rank_catalog(&catalog, &SoilData::fallback(), &ClimateData::fallback());
        assert_eq!(ranking.ideal.len(), 2);
        assert!(ranking.other.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = PlantCatalog::from_json("[]").unwrap();
        let ranking = rank_catalog(&catalog, &SoilData::fallback(), &ClimateData::fallback());
        assert!(ranking.is_empty());
        let advice = combined_advice(&SelectionScores::default(), &ranking);
        assert!(advice.alerts.is_empty());
        assert!(advice.recommendations.is_empty());
    }
}
