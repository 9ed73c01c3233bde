//! Advice Text
//!
//! Alert and recommendation wording for each check of the scoring engine.
//! Strings are compared verbatim when advice is merged across crops, so the
//! same situation must always produce the same text.

use crate::catalog::{Band, PlantRequirements};
use crate::conditions::SoilTexture;

// ============================================================================
// Soil
// ============================================================================

pub(crate) fn ph_alert(ph: f64, band: Band) -> String {
    format!(
        "pH du sol ({:.1}) hors de la plage adaptée ({:.1} - {:.1})",
        ph, band.min, band.max
    )
}

pub(crate) fn ph_recommendation(ph: f64, band: Band) -> String {
    if ph < band.min {
        format!(
            "Chauler le sol (chaux agricole ou dolomie) pour remonter le pH vers {:.1}",
            band.min
        )
    } else {
        format!(
            "Acidifier le sol (soufre, matière organique) pour ramener le pH vers {:.1}",
            band.max
        )
    }
}

pub(crate) fn texture_alert(plant: &PlantRequirements, soil: SoilTexture) -> String {
    format!(
        "Texture du sol ({}) différente de la texture préférée ({})",
        soil, plant.soil.preferred_texture
    )
}

pub(crate) fn texture_recommendation(soil: SoilTexture) -> String {
    match soil {
        SoilTexture::Sableux => {
            "Incorporer du compost ou du fumier pour améliorer la rétention en eau".to_string()
        }
        SoilTexture::Argileux => {
            "Apporter de la matière organique et du sable pour alléger le sol".to_string()
        }
        SoilTexture::Limoneux | SoilTexture::LimonoSableux => {
            "Amender le sol avec de la matière organique pour adapter sa structure".to_string()
        }
    }
}

pub(crate) fn drainage_alert(soil: SoilTexture) -> String {
    format!("Sol {} : drainage insuffisant pour cette culture", soil)
}

pub(crate) fn drainage_recommendation() -> String {
    "Cultiver sur billons ou planches surélevées et aménager des rigoles de drainage".to_string()
}

pub(crate) fn organic_matter_recommendation(organic_carbon: f64) -> String {
    format!(
        "Taux de carbone organique faible ({:.1} %) : apporter du compost ou du fumier bien décomposé",
        organic_carbon
    )
}

// ============================================================================
// Climate
// ============================================================================

pub(crate) fn temperature_alert(average: f64, min: f64, max: f64) -> String {
    format!(
        "Température moyenne ({:.1} °C) hors de la plage adaptée ({:.0} - {:.0} °C)",
        average, min, max
    )
}

pub(crate) fn heat_stress_alert(peak: f64, limit: f64) -> String {
    format!(
        "Risque de stress thermique : maximales de {:.1} °C au-delà de {:.0} °C",
        peak, limit
    )
}

pub(crate) fn heat_stress_recommendation() -> String {
    "Irriguer aux heures chaudes et prévoir un ombrage (paillage, filet d'ombrage)".to_string()
}

pub(crate) fn night_temperature_alert(night: f64, band: Band) -> String {
    format!(
        "Températures nocturnes ({:.1} °C) hors de la plage idéale ({:.0} - {:.0} °C)",
        night, band.min, band.max
    )
}

pub(crate) fn degree_days_alert(available: f64, required: f64) -> String {
    format!(
        "Somme de températures insuffisante ({:.0} degrés-jours pour {:.0} requis)",
        available, required
    )
}

// ============================================================================
// Water
// ============================================================================

pub(crate) fn rainfall_deficit_alert(rainfall: f64, required: f64) -> String {
    format!(
        "Déficit hydrique : {:.0} mm/an pour un besoin minimal de {:.0} mm",
        rainfall, required
    )
}

pub(crate) fn irrigation_required_recommendation(deficit: f64) -> String {
    format!(
        "Irrigation obligatoire pour compenser environ {:.0} mm/an de déficit",
        deficit
    )
}

pub(crate) fn rainfall_excess_alert(rainfall: f64, limit: f64) -> String {
    format!(
        "Excès d'eau : {:.0} mm/an au-delà du maximum toléré ({:.0} mm)",
        rainfall, limit
    )
}

pub(crate) fn excess_water_recommendation() -> String {
    "Assurer un bon drainage de la parcelle (fossés, billons) pour éviter l'asphyxie racinaire"
        .to_string()
}

pub(crate) fn regular_irrigation_recommendation() -> String {
    "Culture exigeante en eau : prévoir une irrigation régulière".to_string()
}
