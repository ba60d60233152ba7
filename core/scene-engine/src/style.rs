//! FILENAME: core/scene-engine/src/style.rs
//! PURPOSE: Presentation parameters carried by a scene: color scale, bar
//! thickness, camera and mesh lighting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

// ============================================================================
// COLOR SCALE
// ============================================================================

/// Named continuous color scale applied to per-vertex intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ColorScale {
    #[default]
    Blues,
    Viridis,
    Cividis,
    Plasma,
    Inferno,
    Magma,
}

impl ColorScale {
    pub const ALL: [ColorScale; 6] = [
        ColorScale::Blues,
        ColorScale::Viridis,
        ColorScale::Cividis,
        ColorScale::Plasma,
        ColorScale::Inferno,
        ColorScale::Magma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorScale::Blues => "Blues",
            ColorScale::Viridis => "Viridis",
            ColorScale::Cividis => "Cividis",
            ColorScale::Plasma => "Plasma",
            ColorScale::Inferno => "Inferno",
            ColorScale::Magma => "Magma",
        }
    }
}

impl fmt::Display for ColorScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScale {
    type Err = SceneError;

    /// Case-insensitive match on the scale name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorScale::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SceneError::UnknownColorScale(s.to_string()))
    }
}

// ============================================================================
// BAR SIZE
// ============================================================================

/// Half-width of a bar footprint, in grid units. Always in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BarSize(f64);

impl BarSize {
    pub const DEFAULT: BarSize = BarSize(0.4);

    pub fn new(half_width: f64) -> Result<Self, SceneError> {
        if half_width.is_finite() && half_width > 0.0 && half_width <= 1.0 {
            Ok(BarSize(half_width))
        } else {
            Err(SceneError::InvalidBarSize(half_width))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for BarSize {
    fn default() -> Self {
        BarSize::DEFAULT
    }
}

impl TryFrom<f64> for BarSize {
    type Error = SceneError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        BarSize::new(value)
    }
}

impl From<BarSize> for f64 {
    fn from(size: BarSize) -> Self {
        size.0
    }
}

// ============================================================================
// CAMERA AND LIGHTING
// ============================================================================

/// Camera eye position relative to the scene center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: [f64; 3],
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            eye: [1.6, 1.6, 1.2],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
}

/// Material hints applied to every cuboid mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshStyle {
    pub opacity: f64,
    pub flat_shading: bool,
    pub lighting: Lighting,
}

impl Default for MeshStyle {
    fn default() -> Self {
        MeshStyle {
            opacity: 0.95,
            flat_shading: true,
            lighting: Lighting {
                ambient: 0.4,
                diffuse: 0.7,
                specular: 0.2,
            },
        }
    }
}
