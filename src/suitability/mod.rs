//! Suitability Scoring Engine
//!
//! Compares a crop's requirement profile against the soil and climate of a
//! site and produces a composite score, a tier and explanatory advice.
//!
//! ## Architecture
//! - `engine.rs` - Soil, climate and water checks + composite
//! - `assessment.rs` - MatchingResult, ScoreDetails, SuitabilityTier
//! - `advice.rs` - Alert and recommendation wording

pub mod assessment;
pub mod advice;
pub mod engine;

pub use assessment::{MatchingResult, ScoreDetails, SuitabilityTier, MAX_SCORE};
pub use engine::score;
