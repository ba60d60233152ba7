//! FILENAME: core/pivot-engine/src/lib.rs
//! Segment x product aggregation subsystem.
//!
//! This crate groups records by two categorical dimensions and reduces a
//! selectable metric per cell. It depends on `engine` only for the shared
//! record model.
//!
//! Layers:
//! - `definition`: Serializable configuration (metric, ordering, filters)
//! - `cache`: Internal representation (category interning, accumulators)
//! - `engine`: Aggregation entry points (cells and category axes)
//! - `kpi`: Headline figures over the same filtered records

pub mod cache;
pub mod definition;
pub mod engine;
pub mod error;
pub mod kpi;

pub use cache::{CategoryId, CategoryIndex, GroupKey, MetricAccumulator};
pub use definition::*;
pub use engine::{aggregate, apply_filters, AggregationCell, CategoryAxes, MetricAggregator};
pub use error::PivotError;
pub use kpi::{compute_kpis, KpiCard, KpiSummary};
