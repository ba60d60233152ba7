//! FILENAME: core/scene-engine/src/lib.rs
//! 3D bar geometry for segment x product metrics.
//!
//! This crate turns aggregation cells into extruded cuboid meshes and wraps
//! them in a renderer-agnostic Scene description.
//!
//! Layers:
//! - `style`: Presentation parameters (color scale, bar size, camera, lighting)
//! - `cuboid`: Geometry of one bar (vertices, triangle template, intensity, hover)
//! - `scene`: Assembly of all bars plus axis and legend metadata
//! - `mesh`: Optional single-buffer view of a scene

pub mod cuboid;
pub mod error;
pub mod mesh;
pub mod scene;
pub mod style;

pub use cuboid::{
    hover_label, Cuboid, CUBOID_TRIANGLES, CUBOID_TRIANGLE_COUNT, CUBOID_VERTEX_COUNT,
};
pub use error::SceneError;
pub use mesh::MeshBuffer;
pub use scene::{
    assemble_scene, build_scene, build_scene_with, Axis, ColorLegend, Scene, SceneOptions,
    EMPTY_SCENE_TITLE, SCENE_TITLE,
};
pub use style::{BarSize, Camera, ColorScale, Lighting, MeshStyle};
