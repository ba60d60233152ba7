//! FILENAME: core/scene-engine/src/cuboid.rs
//! Cuboid Geometry - One extruded bar per aggregation cell.
//!
//! Every cuboid is a closed box of 8 vertices and 12 triangles. Vertices are
//! ordered bottom face first (z = 0) then top face, both counter-clockwise
//! seen from above:
//!
//! ```text
//!   3 ---- 2        7 ---- 6
//!   |      |        |      |
//!   0 ---- 1        4 ---- 5
//!   bottom          top
//! ```
//!
//! Only positions vary between cuboids; the triangle topology is the shared
//! `CUBOID_TRIANGLES` template.

use serde::{Deserialize, Serialize};

use engine::format_with_separators;

use crate::style::BarSize;

/// Vertices per cuboid.
pub const CUBOID_VERTEX_COUNT: usize = 8;

/// Triangles per cuboid (2 per face).
pub const CUBOID_TRIANGLE_COUNT: usize = 12;

/// Triangle index template shared by every cuboid.
pub const CUBOID_TRIANGLES: [[u32; 3]; CUBOID_TRIANGLE_COUNT] = [
    // bottom
    [0, 1, 2],
    [0, 2, 3],
    // top
    [4, 5, 6],
    [4, 6, 7],
    // sides
    [0, 1, 5],
    [0, 5, 4],
    [1, 2, 6],
    [1, 6, 5],
    [2, 3, 7],
    [2, 7, 6],
    [3, 0, 4],
    [3, 4, 7],
];

/// An extruded bar for one (segment, product) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    pub segment: String,
    pub product: String,

    /// Grid coordinate (segment index, product index).
    pub grid: [u32; 2],

    /// Raw metric value, possibly negative.
    pub value: f64,

    /// Rendered height: `max(0, value)`.
    pub height: f64,

    pub vertices: [[f64; 3]; CUBOID_VERTEX_COUNT],
    pub triangles: [[u32; 3]; CUBOID_TRIANGLE_COUNT],

    /// Color intensity per vertex: 0 at the bottom, `height` at the top.
    pub intensity: [f64; CUBOID_VERTEX_COUNT],

    pub hover_text: String,
}

impl Cuboid {
    /// Builds the bar centered on grid position `(gx, gy)`.
    ///
    /// Negative values give a flat bar at z = 0 (the hover text still shows
    /// the raw value). A zero value also gives a flat bar, never an omitted one.
    pub fn new(
        segment: impl Into<String>,
        product: impl Into<String>,
        grid: [u32; 2],
        value: f64,
        bar_size: BarSize,
    ) -> Self {
        let segment = segment.into();
        let product = product.into();

        let (x, y) = (f64::from(grid[0]), f64::from(grid[1]));
        let half = bar_size.get();
        let (x0, x1) = (x - half, x + half);
        let (y0, y1) = (y - half, y + half);
        let (z0, z1) = (0.0, value.max(0.0));

        let vertices = [
            // bottom
            [x0, y0, z0],
            [x1, y0, z0],
            [x1, y1, z0],
            [x0, y1, z0],
            // top
            [x0, y0, z1],
            [x1, y0, z1],
            [x1, y1, z1],
            [x0, y1, z1],
        ];
        let intensity = [z0, z0, z0, z0, z1, z1, z1, z1];
        let hover_text = hover_label(&segment, &product, value);

        Cuboid {
            segment,
            product,
            grid,
            value,
            height: z1,
            vertices,
            triangles: CUBOID_TRIANGLES,
            intensity,
            hover_text,
        }
    }

    /// Top face z-coordinate.
    pub fn top(&self) -> f64 {
        self.vertices[4][2]
    }
}

/// `Segment: ..<br>Product: ..<br>Value: 1,234.56` with the raw value.
pub fn hover_label(segment: &str, product: &str, value: f64) -> String {
    format!(
        "Segment: {}<br>Product: {}<br>Value: {}",
        segment,
        product,
        format_with_separators(value, 2)
    )
}
