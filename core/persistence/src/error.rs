//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Required column missing: {0}")]
    MissingColumn(String),

    #[error("Lock unavailable: {0}")]
    LockUnavailable(String),

    #[error("Invalid generator configuration: {0}")]
    InvalidGeneratorConfig(String),
}
