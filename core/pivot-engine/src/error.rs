//! FILENAME: core/pivot-engine/src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PivotError {
    #[error(
        "Unknown metric: {0} (expected sum_balance, avg_balance, accounts or delinquency_rate)"
    )]
    UnknownMetric(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}
