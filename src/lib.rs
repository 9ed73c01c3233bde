//! Crop Suitability Engine
//!
//! Scores how well each crop of a fixed catalog suits a site's soil and
//! climate, ranks the catalog, and explains the result with French alerts
//! and recommendations.
//!
//! Layout:
//! - `catalog/`: Crop requirement profiles (embedded JSON or file)
//! - `conditions/`: Soil/climate profiles and texture classes
//! - `suitability/`: Per-crop scoring engine (soil 40%, climate 40%, water 20%)
//! - `ranking`: Whole-catalog ranking, selection scoring, advice merging
//! - `adapters/`: Soil and climate providers with fallback profiles
//! - `diagnostic`: End-to-end site diagnostic and snapshot
//! - `config`: Environment configuration
//!
//! Scoring and ranking are pure and synchronous; only the adapters do I/O.

pub mod catalog;
pub mod conditions;
pub mod suitability;
pub mod ranking;
pub mod adapters;
pub mod diagnostic;
pub mod config;

// Re-export commonly used types
pub use catalog::{CatalogError, PlantCatalog, PlantRequirements};
pub use conditions::{ClimateData, SoilData, SoilTexture};
pub use suitability::{score, MatchingResult, ScoreDetails, SuitabilityTier};
pub use ranking::{combined_advice, rank_catalog, score_selection, CombinedAdvice, CropRanking, RankedCrop, SelectionScores};
pub use adapters::{fetch_conditions, AdapterError, ClimateAdapter, DataOrigin, SiteConditions, SoilAdapter, Sourced};
pub use diagnostic::{build_snapshot, evaluate_site, run_diagnostic, DiagnosticError, DiagnosticReport, DiagnosticRequest, DiagnosticSnapshot};
pub use config::Config;
