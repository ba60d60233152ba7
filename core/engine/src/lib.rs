//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the shared record model.
//! CONTEXT: Re-exports the record table and display formatting used by the
//! aggregation, scene and persistence crates.

pub mod number_format;
pub mod record;

// Re-export commonly used types at the crate root
pub use number_format::{format_number, format_with_separators, NumberFormat};
pub use record::{Dataset, Record, ALL_CATEGORY};
