//! Soil Texture Classes
//!
//! Coarse texture classification (sableux / limoneux / argileux /
//! limono-sableux) derived from sand/silt/clay percentages, plus the
//! compatibility table between a crop's preferred texture and the texture
//! observed at a site.
//!
//! The compatibility table mirrors the historical substring rule (split the
//! preferred class on `-`, accept when either string contains the other's
//! token). That rule lets `limono-sableux` accept `sableux` but reject
//! `limoneux`; whether the partial matches are agronomically intended is
//! still open, so the table keeps them as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Texture class of an observed soil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilTexture {
    #[serde(rename = "sableux")]
    Sableux,
    #[serde(rename = "limoneux")]
    Limoneux,
    #[serde(rename = "argileux")]
    Argileux,
    #[serde(rename = "limono-sableux")]
    LimonoSableux,
}

impl SoilTexture {
    pub const ALL: [SoilTexture; 4] = [
        SoilTexture::Sableux,
        SoilTexture::Limoneux,
        SoilTexture::Argileux,
        SoilTexture::LimonoSableux,
    ];

    /// Label as used in crop tables and alert texts
    pub fn label(&self) -> &'static str {
        match self {
            SoilTexture::Sableux => "sableux",
            SoilTexture::Limoneux => "limoneux",
            SoilTexture::Argileux => "argileux",
            SoilTexture::LimonoSableux => "limono-sableux",
        }
    }

    /// Heavy clay soils drain poorly
    pub fn is_clayey(&self) -> bool {
        matches!(self, SoilTexture::Argileux)
    }
}

impl fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Texture a crop grows best in, as listed in the requirement catalog.
///
/// Includes compound classes that never come out of [`classify_texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreferredTexture {
    #[serde(rename = "sableux")]
    Sableux,
    #[serde(rename = "limoneux")]
    Limoneux,
    #[serde(rename = "argileux")]
    Argileux,
    #[serde(rename = "limono-sableux")]
    LimonoSableux,
    #[serde(rename = "limono-argileux")]
    LimonoArgileux,
    #[serde(rename = "argilo-limoneux")]
    ArgiloLimoneux,
    #[serde(rename = "sablo-argileux")]
    SabloArgileux,
    #[serde(rename = "sablo-limoneux")]
    SabloLimoneux,
}

impl PreferredTexture {
    pub const ALL: [PreferredTexture; 8] = [
        PreferredTexture::Sableux,
        PreferredTexture::Limoneux,
        PreferredTexture::Argileux,
        PreferredTexture::LimonoSableux,
        PreferredTexture::LimonoArgileux,
        PreferredTexture::ArgiloLimoneux,
        PreferredTexture::SabloArgileux,
        PreferredTexture::SabloLimoneux,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PreferredTexture::Sableux => "sableux",
            PreferredTexture::Limoneux => "limoneux",
            PreferredTexture::Argileux => "argileux",
            PreferredTexture::LimonoSableux => "limono-sableux",
            PreferredTexture::LimonoArgileux => "limono-argileux",
            PreferredTexture::ArgiloLimoneux => "argilo-limoneux",
            PreferredTexture::SabloArgileux => "sablo-argileux",
            PreferredTexture::SabloLimoneux => "sablo-limoneux",
        }
    }

    /// Soil texture classes this preference accepts without penalty
    pub fn accepted_soils(&self) -> &'static [SoilTexture] {
        use SoilTexture::*;
        match self {
            PreferredTexture::Sableux => &[Sableux, LimonoSableux],
            PreferredTexture::Limoneux => &[Limoneux],
            PreferredTexture::Argileux => &[Argileux],
            PreferredTexture::LimonoSableux => &[Sableux, LimonoSableux],
            PreferredTexture::LimonoArgileux => &[Argileux, LimonoSableux],
            PreferredTexture::ArgiloLimoneux => &[Limoneux],
            PreferredTexture::SabloArgileux => &[Argileux],
            PreferredTexture::SabloLimoneux => &[Limoneux],
        }
    }

    pub fn accepts(&self, soil: SoilTexture) -> bool {
        self.accepted_soils().contains(&soil)
    }
}

impl fmt::Display for PreferredTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify texture from sand/clay/silt percentages.
///
/// Rules are checked in order; anything left over is treated as limoneux.
#[allow(clippy::if_same_then_else)]
pub fn classify_texture(sand: f64, clay: f64, silt: f64) -> SoilTexture {
    if sand > 70.0 && clay < 20.0 {
        SoilTexture::Sableux
    } else if clay > 40.0 {
        SoilTexture::Argileux
    } else if sand > 50.0 && sand < 70.0 && clay < 20.0 {
        SoilTexture::LimonoSableux
    } else if silt > 50.0 {
        SoilTexture::Limoneux
    } else {
        // Unclassified mixes default to limoneux
        SoilTexture::Limoneux
    }
}
