//! Site Conditions
//!
//! Soil and climate profiles observed at a coordinate, as consumed by the
//! suitability engine.
//!
//! ## Architecture
//! - `texture.rs` - Texture classes, classification heuristic, compatibility table
//! - `soil.rs` - SoilData + fallback profile
//! - `climate.rs` - ClimateData + fallback profile

pub mod texture;
pub mod soil;
pub mod climate;

pub use texture::{classify_texture, PreferredTexture, SoilTexture};
pub use soil::{SoilData, SoilMeasurements};
pub use climate::{ClimateData, TemperatureRange, MONTHS};
