//! Diagnostic Pipeline
//!
//! One call per site visit: fetch soil and climate, rank the catalog, score
//! the user's crops, merge advice and freeze everything into a serializable
//! snapshot. Snapshot ids and storage belong to the caller.
//!
//! ## Architecture
//! - [`evaluate_site`] - Sync part (ranking, selection, advice)
//! - [`build_snapshot`] - Report -> DiagnosticSnapshot
//! - [`run_diagnostic`] - Async entry point (fetch + evaluate + snapshot)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::{fetch_conditions, ClimateAdapter, ClimateSource, SiteConditions, SoilAdapter, SoilSource, Sourced};
use crate::catalog::{PlantCatalog, PlantRequirements};
use crate::conditions::{ClimateData, SoilData};
use crate::ranking::{combined_advice, rank_catalog, score_selection, CombinedAdvice, CropRanking, RankedCrop, SelectionScores};
use crate::suitability::{MatchingResult, MAX_SCORE};

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiagnosticError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("surface must be a positive number of hectares, got {0}")]
    InvalidSurface(f64),
}

/// Site visit submitted by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRequest {
    pub latitude: f64,
    pub longitude: f64,

    /// Crop ids chosen by the user, in their order
    #[serde(default)]
    pub crops: Vec<String>,

    /// Cultivated surface (ha)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_ha: Option<f64>,
}

impl DiagnosticRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            crops: Vec::new(),
            surface_ha: None,
        }
    }

    pub fn with_crops<I, S>(mut self, crops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.crops = crops.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_surface(mut self, hectares: f64) -> Self {
        self.surface_ha = Some(hectares);
        self
    }

    pub fn validate(&self) -> Result<(), DiagnosticError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DiagnosticError::InvalidLatitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DiagnosticError::InvalidLongitude(self.longitude));
        }
        if let Some(surface) = self.surface_ha {
            if !(surface.is_finite() && surface > 0.0) {
                return Err(DiagnosticError::InvalidSurface(surface));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Everything computed for one site before snapshotting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub conditions: SiteConditions,
    pub ranking: CropRanking,
    pub selection: SelectionScores,
    pub advice: CombinedAdvice,
}

/// Rank the catalog, score the selection and merge advice for known conditions
pub fn evaluate_site(
    catalog: &PlantCatalog,
    request: &DiagnosticRequest,
    conditions: SiteConditions,
) -> DiagnosticReport {
    let soil = &conditions.soil.data;
    let climate = &conditions.climate.data;

    let ranking = rank_catalog(catalog, soil, climate);
    let selection = score_selection(catalog, &request.crops, soil, climate);
    let advice = combined_advice(&selection, &ranking);

    DiagnosticReport {
        conditions,
        ranking,
        selection,
        advice,
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Expected harvest (t)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldEstimate {
    pub per_hectare: f64,

    /// `per_hectare × surface` when a surface was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl YieldEstimate {
    /// Interpolate the crop's yield range linearly by score
    pub fn for_score(plant: &PlantRequirements, score: f64, surface_ha: Option<f64>) -> Self {
        let fraction = (score / MAX_SCORE).clamp(0.0, 1.0);
        let per_hectare = round_two_decimals(plant.yield_range.min + plant.yield_range.width() * fraction);
        Self {
            per_hectare,
            total: surface_ha.map(|ha| round_two_decimals(per_hectare * ha)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSnapshot {
    pub crop_id: String,
    pub name: String,
    #[serde(flatten)]
    pub result: MatchingResult,
    pub expected_yield: Option<YieldEstimate>,
}

/// Frozen record of one diagnostic
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSnapshot {
    pub generated_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub crops: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_ha: Option<f64>,

    pub soil: Sourced<SoilData>,
    pub climate: Sourced<ClimateData>,

    pub ideal_crops: Vec<CropSnapshot>,
    pub selected_crops: Vec<CropSnapshot>,

    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,

    /// At least one profile is a fallback
    pub degraded: bool,
    /// A provider answered with a malformed body; asking again may help
    pub retry_suggested: bool,
}

/// Freeze a report into a snapshot stamped with the current time
pub fn build_snapshot(
    request: &DiagnosticRequest,
    catalog: &PlantCatalog,
    report: &DiagnosticReport,
) -> DiagnosticSnapshot {
    let snapshot_crop = |crop: &RankedCrop| CropSnapshot {
        crop_id: crop.crop_id.clone(),
        name: crop.name.clone(),
        result: crop.result.clone(),
        expected_yield: catalog
            .get(&crop.crop_id)
            .map(|plant| YieldEstimate::for_score(plant, crop.result.score, request.surface_ha)),
    };

    DiagnosticSnapshot {
        generated_at: Utc::now(),
        latitude: request.latitude,
        longitude: request.longitude,
        crops: request.crops.clone(),
        surface_ha: request.surface_ha,
        soil: report.conditions.soil.clone(),
        climate: report.conditions.climate.clone(),
        ideal_crops: report.ranking.ideal.iter().map(snapshot_crop).collect(),
        selected_crops: report.selection.crops.iter().map(snapshot_crop).collect(),
        alerts: report.advice.alerts.clone(),
        recommendations: report.advice.recommendations.clone(),
        degraded: report.conditions.is_degraded(),
        retry_suggested: report.conditions.has_structural_failure(),
    }
}

/// Full diagnostic for a site: joint fetch, evaluation, snapshot.
///
/// Only an invalid request fails; provider problems degrade to fallback
/// profiles and are flagged on the snapshot.
pub async fn run_diagnostic<S, C>(
    catalog: &PlantCatalog,
    soil: &SoilAdapter<S>,
    climate: &ClimateAdapter<C>,
    request: &DiagnosticRequest,
) -> Result<DiagnosticSnapshot, DiagnosticError>
where
    S: SoilSource,
    C: ClimateSource,
{
    request.validate()?;

    let conditions = fetch_conditions(soil, climate, request.latitude, request.longitude).await;
    if conditions.is_degraded() {
        tracing::info!(
            "Diagnostic for ({}, {}) uses fallback data (soil: {:?}, climate: {:?})",
            request.latitude,
            request.longitude,
            conditions.soil.origin,
            conditions.climate.origin
        );
    }

    let report = evaluate_site(catalog, request, conditions);
    let snapshot = build_snapshot(request, catalog, &report);

    tracing::info!(
        "Diagnostic ready for ({}, {}): {} ideal crops, {} selected, {} alerts",
        request.latitude,
        request.longitude,
        snapshot.ideal_crops.len(),
        snapshot.selected_crops.len(),
        snapshot.alerts.len()
    );

    Ok(snapshot)
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
