//! FILENAME: core/scene-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Invalid bar size: {0} (expected a value in (0, 1])")]
    InvalidBarSize(f64),

    #[error("Unknown color scale: {0}")]
    UnknownColorScale(String),

    #[error("Category not present in axis index: {0}")]
    UnindexedCategory(String),
}
