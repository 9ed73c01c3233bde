//! Scoring Engine
//!
//! Pure function `(plant, soil, climate) -> MatchingResult`. Each factor
//! starts at 10, loses points per failed check and is clamped to `[0, 10]`.
//! Checks always run in the same order (soil, climate, water) so the alert
//! and recommendation lists are reproducible.

use super::advice;
use super::assessment::{FactorScore, MatchingResult, ScoreDetails};
use crate::catalog::{Drainage, PlantRequirements, WaterNeeds};
use crate::conditions::{ClimateData, SoilData};

/// Organic carbon (%) below which matter should be added
const LOW_ORGANIC_CARBON: f64 = 1.0;

/// Heat stress when the mean daily maximum exceeds `tempMax` by this much (°C)
const HEAT_STRESS_MARGIN: f64 = 5.0;

/// Share of the degree-day requirement that must be available
const DEGREE_DAYS_TOLERANCE: f64 = 0.8;

/// Rainfall margin under which water-hungry crops need regular irrigation
const HIGH_WATER_NEEDS_MARGIN: f64 = 1.2;

/// Alerts and recommendations in emission order
#[derive(Debug, Default)]
struct Findings {
    alerts: Vec<String>,
    recommendations: Vec<String>,
}

impl Findings {
    fn alert(&mut self, text: String) {
        self.alerts.push(text);
    }

    fn recommend(&mut self, text: String) {
        self.recommendations.push(text);
    }
}

/// Score a crop against the soil and climate of a site.
///
/// Never fails for well-typed inputs; degenerate denominators resolve to no
/// penalty.
pub fn score(plant: &PlantRequirements, soil: &SoilData, climate: &ClimateData) -> MatchingResult {
    let mut findings = Findings::default();

    let soil_score = soil_score(plant, soil, &mut findings);
    let climate_score = climate_score(plant, climate, &mut findings);
    let water_score = water_score(plant, climate, &mut findings);

    let details = ScoreDetails {
        soil_score,
        climate_score,
        water_score,
    };

    MatchingResult::from_details(details, findings.alerts, findings.recommendations)
}

fn soil_score(plant: &PlantRequirements, soil: &SoilData, findings: &mut Findings) -> f64 {
    let mut factor = FactorScore::new();
    let ph_band = plant.soil.ph_band();

    // pH: 2 points per unit away from the nearest bound
    if !ph_band.contains(soil.ph) {
        let distance = (soil.ph - ph_band.min).abs().min((soil.ph - ph_band.max).abs());
        factor.penalize(2.0 * distance);
        findings.alert(advice::ph_alert(soil.ph, ph_band));
        findings.recommend(advice::ph_recommendation(soil.ph, ph_band));
    }

    if !plant.soil.preferred_texture.accepts(soil.texture) {
        factor.penalize(2.0);
        findings.alert(advice::texture_alert(plant, soil.texture));
        findings.recommend(advice::texture_recommendation(soil.texture));
    }

    if plant.soil.drainage == Drainage::Bon && soil.texture.is_clayey() {
        factor.penalize(1.5);
        findings.alert(advice::drainage_alert(soil.texture));
        findings.recommend(advice::drainage_recommendation());
    }

    // Recommendation only, no alert
    if soil.organic_carbon < LOW_ORGANIC_CARBON {
        factor.penalize(1.0);
        findings.recommend(advice::organic_matter_recommendation(soil.organic_carbon));
    }

    factor.finish()
}

fn climate_score(plant: &PlantRequirements, climate: &ClimateData, findings: &mut Findings) -> f64 {
    let mut factor = FactorScore::new();
    let req = &plant.climate;

    // Strict: the bounds themselves are fine
    if climate.average_temperature < req.temp_min || climate.average_temperature > req.temp_max {
        factor.penalize(2.0);
        findings.alert(advice::temperature_alert(
            climate.average_temperature,
            req.temp_min,
            req.temp_max,
        ));
    }

    let heat_limit = req.temp_max + HEAT_STRESS_MARGIN;
    if climate.temperature_range.max > heat_limit {
        factor.penalize(1.5);
        findings.alert(advice::heat_stress_alert(climate.temperature_range.max, heat_limit));
        findings.recommend(advice::heat_stress_recommendation());
    }

    if let Some(night_band) = req.ideal_night_temp {
        if !night_band.contains(climate.temperature_range.min) {
            factor.penalize(1.0);
            findings.alert(advice::night_temperature_alert(
                climate.temperature_range.min,
                night_band,
            ));
        }
    }

    if let Some(required) = req.degree_days_requirement {
        if climate.degree_days < DEGREE_DAYS_TOLERANCE * required {
            factor.penalize(1.0);
            findings.alert(advice::degree_days_alert(climate.degree_days, required));
        }
    }

    factor.finish()
}

fn water_score(plant: &PlantRequirements, climate: &ClimateData, findings: &mut Findings) -> f64 {
    let mut factor = FactorScore::new();
    let rainfall = climate.annual_rainfall;
    let rainfall_min = plant.climate.rainfall_min;

    if rainfall < rainfall_min {
        let deficit = rainfall_min - rainfall;
        // rainfallMin == 0 cannot be in deficit, but keep the division guarded
        if rainfall_min > 0.0 {
            factor.penalize(5.0 * deficit / rainfall_min);
        }
        findings.alert(advice::rainfall_deficit_alert(rainfall, rainfall_min));
        findings.recommend(advice::irrigation_required_recommendation(deficit));
    } else if let Some(rainfall_max) = plant.climate.rainfall_max {
        if rainfall > rainfall_max {
            factor.penalize(1.0);
            findings.alert(advice::rainfall_excess_alert(rainfall, rainfall_max));
            findings.recommend(advice::excess_water_recommendation());
        }
    }

    if plant.water_needs == WaterNeeds::Eleve && rainfall < HIGH_WATER_NEEDS_MARGIN * rainfall_min {
        factor.penalize(1.0);
        findings.recommend(advice::regular_irrigation_recommendation());
    }

    factor.finish()
}
