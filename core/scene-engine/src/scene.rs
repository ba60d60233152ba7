//! FILENAME: core/scene-engine/src/scene.rs
//! Scene Assembler - Renderable output for the 3D rendering collaborator.
//!
//! This module turns aggregation cells into a Scene: one cuboid per cell,
//! axis tick metadata in index order, and presentation defaults (camera,
//! color scale, legend). It never produces pixels.

use serde::{Deserialize, Serialize};

use engine::Record;
use pivot_engine::{aggregate, AggregationCell, CategoryAxes, CategoryIndex, CategoryOrder, Metric};

use crate::cuboid::Cuboid;
use crate::error::SceneError;
use crate::style::{BarSize, Camera, ColorScale, MeshStyle};

/// Title of a scene with data.
pub const SCENE_TITLE: &str = "3D metric by segment and product";

/// Title of a scene without any cell.
pub const EMPTY_SCENE_TITLE: &str = "No 3D data";

// ============================================================================
// OPTIONS
// ============================================================================

/// Caller-selected presentation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneOptions {
    #[serde(default)]
    pub color_scale: ColorScale,
    #[serde(default)]
    pub bar_size: BarSize,
    #[serde(default)]
    pub category_order: CategoryOrder,
}

// ============================================================================
// SCENE TYPES
// ============================================================================

/// Tick metadata for one categorical axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    /// Integer grid positions `0..N`.
    pub tick_values: Vec<u32>,
    /// Category labels, `tick_labels[i]` sits at `tick_values[i]`.
    pub tick_labels: Vec<String>,
}

impl Axis {
    fn from_index(title: &str, index: &CategoryIndex) -> Self {
        Axis {
            title: title.to_string(),
            tick_values: (0..index.len() as u32).collect(),
            tick_labels: index.labels().to_vec(),
        }
    }
}

/// Invisible marker whose only purpose is to show a color legend, since
/// per-bar meshes carry no shared legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorLegend {
    pub title: String,
    pub color_scale: ColorScale,
    /// Intensity range covered by the legend.
    pub range: [f64; 2],
    pub opacity: f64,
}

/// Everything the rendering collaborator needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    /// Set when there were no cells to draw.
    pub is_empty: bool,
    pub metric: Metric,
    pub cuboids: Vec<Cuboid>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub z_axis_title: String,
    pub camera: Camera,
    pub color_scale: ColorScale,
    pub mesh_style: MeshStyle,
    pub legend: Option<ColorLegend>,
}

impl Scene {
    /// The explicit "no data" scene.
    pub fn empty(metric: Metric, options: &SceneOptions) -> Self {
        Scene {
            title: EMPTY_SCENE_TITLE.to_string(),
            is_empty: true,
            metric,
            cuboids: Vec::new(),
            x_axis: Axis::from_index("Segment", &CategoryIndex::new()),
            y_axis: Axis::from_index("Product", &CategoryIndex::new()),
            z_axis_title: metric.axis_title().to_string(),
            camera: Camera::default(),
            color_scale: options.color_scale,
            mesh_style: MeshStyle::default(),
            legend: None,
        }
    }

    /// Highest bar top, 0 for an empty or all-flat scene.
    pub fn max_height(&self) -> f64 {
        self.cuboids.iter().map(|c| c.height).fold(0.0, f64::max)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Builds a Scene from cells and their category axes.
///
/// Every cell's segment and product must be present in `axes`; a missing
/// label is a caller error.
pub fn assemble_scene(
    cells: &[AggregationCell],
    axes: &CategoryAxes,
    metric: Metric,
    options: &SceneOptions,
) -> Result<Scene, SceneError> {
    if cells.is_empty() {
        log::debug!("no cells for {}, returning empty scene", metric);
        return Ok(Scene::empty(metric, options));
    }

    let cuboids = cells
        .iter()
        .map(|cell| {
            let gx = axes
                .rows
                .coord(&cell.segment)
                .ok_or_else(|| SceneError::UnindexedCategory(cell.segment.clone()))?;
            let gy = axes
                .columns
                .coord(&cell.product)
                .ok_or_else(|| SceneError::UnindexedCategory(cell.product.clone()))?;
            Ok(Cuboid::new(
                cell.segment.as_str(),
                cell.product.as_str(),
                [gx, gy],
                cell.value,
                options.bar_size,
            ))
        })
        .collect::<Result<Vec<_>, SceneError>>()?;

    let mut scene = Scene {
        title: SCENE_TITLE.to_string(),
        is_empty: false,
        metric,
        cuboids,
        x_axis: Axis::from_index("Segment", &axes.rows),
        y_axis: Axis::from_index("Product", &axes.columns),
        z_axis_title: metric.axis_title().to_string(),
        camera: Camera::default(),
        color_scale: options.color_scale,
        mesh_style: MeshStyle::default(),
        legend: None,
    };

    let max_height = scene.max_height();
    scene.legend = Some(ColorLegend {
        title: metric.colorbar_title().to_string(),
        color_scale: options.color_scale,
        range: [0.0, if max_height > 0.0 { max_height } else { 1.0 }],
        opacity: 0.0,
    });

    log::debug!(
        "assembled scene: {} cuboids on a {}x{} grid ({})",
        scene.cuboids.len(),
        axes.rows.len(),
        axes.columns.len(),
        metric
    );

    Ok(scene)
}

/// Aggregates `records`, indexes the resulting categories and assembles the scene.
pub fn build_scene<'a, I>(
    records: I,
    metric: Metric,
    options: &SceneOptions,
) -> Result<Scene, SceneError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let cells = aggregate(records, metric);
    let axes = CategoryAxes::from_cells(&cells, options.category_order);
    assemble_scene(&cells, &axes, metric, options)
}

/// Convenience wrapper taking the raw bar size, for callers holding an
/// unvalidated value.
pub fn build_scene_with(
    records: &[Record],
    metric: Metric,
    color_scale: ColorScale,
    bar_size: f64,
) -> Result<Scene, SceneError> {
    let options = SceneOptions {
        color_scale,
        bar_size: BarSize::new(bar_size)?,
        category_order: CategoryOrder::FirstSeen,
    };
    build_scene(records, metric, &options)
}
