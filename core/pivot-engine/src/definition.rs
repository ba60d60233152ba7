//! FILENAME: core/pivot-engine/src/definition.rs
//! Aggregation Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE an aggregation:
//! which metric to reduce, how category axes are ordered, and which
//! records take part. These structures are:
//! - Serializable (for config files and JSON output)
//! - Immutable snapshots of caller intent

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use engine::Record;
use serde::{Deserialize, Serialize};

use crate::error::PivotError;

// ============================================================================
// METRIC
// ============================================================================

/// Scalar reduction computed per (segment, product) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Sum of balances over the group.
    #[default]
    SumBalance,
    /// Arithmetic mean of balances over the group.
    AvgBalance,
    /// Number of rows in the group (not distinct customers).
    Accounts,
    /// Mean of the delinquency flag, in percent.
    DelinquencyRate,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::SumBalance,
        Metric::AvgBalance,
        Metric::Accounts,
        Metric::DelinquencyRate,
    ];

    /// Selector key, as accepted by `FromStr`.
    pub fn key(self) -> &'static str {
        match self {
            Metric::SumBalance => "sum_balance",
            Metric::AvgBalance => "avg_balance",
            Metric::Accounts => "accounts",
            Metric::DelinquencyRate => "delinquency_rate",
        }
    }

    /// Human-readable name shown in metric pickers.
    pub fn label(self) -> &'static str {
        match self {
            Metric::SumBalance => "Sum of balances",
            Metric::AvgBalance => "Average balance",
            Metric::Accounts => "Number of accounts",
            Metric::DelinquencyRate => "Delinquency rate (%)",
        }
    }

    /// Title for the value axis of a chart showing this metric.
    pub fn axis_title(self) -> &'static str {
        match self {
            Metric::SumBalance => "Balance (€)",
            Metric::AvgBalance => "Avg. balance (€)",
            Metric::Accounts => "Accounts",
            Metric::DelinquencyRate => "Delinquency rate (%)",
        }
    }

    /// Short title for a color legend.
    pub fn colorbar_title(self) -> &'static str {
        match self {
            Metric::SumBalance => "€",
            Metric::AvgBalance => "Avg (€)",
            Metric::Accounts => "Accounts",
            Metric::DelinquencyRate => "%",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = PivotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.key() == s.trim())
            .ok_or_else(|| PivotError::UnknownMetric(s.to_string()))
    }
}

// ============================================================================
// CATEGORY ORDER
// ============================================================================

/// How coordinates are assigned to category values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CategoryOrder {
    /// Order of first appearance in the input sequence.
    #[default]
    FirstSeen,
    /// Lexicographic ascending order.
    Ascending,
}

// ============================================================================
// FILTER CONTEXT
// ============================================================================

/// Date range and category inclusion lists applied before aggregation.
///
/// Unset bounds are open. An empty inclusion list means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterContext {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub segments: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
}

impl FilterContext {
    /// A context that lets every record through.
    pub fn unrestricted() -> Self {
        FilterContext::default()
    }

    /// Default context for a dataset: its full date range and every
    /// distinct segment and product, sorted ascending.
    pub fn spanning(dataset: &engine::Dataset) -> Self {
        let bounds = dataset.date_bounds();
        FilterContext {
            start_date: bounds.map(|(lo, _)| lo),
            end_date: bounds.map(|(_, hi)| hi),
            segments: dataset.segments(),
            products: dataset.products(),
        }
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_segments<S: Into<String>>(mut self, segments: impl IntoIterator<Item = S>) -> Self {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_products<S: Into<String>>(mut self, products: impl IntoIterator<Item = S>) -> Self {
        self.products = products.into_iter().map(Into::into).collect();
        self
    }

    /// Rejects an inverted date range.
    pub fn validate(&self) -> Result<(), PivotError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                Err(PivotError::InvalidDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// Whether a record passes the filter. Absent categories compare as `"All"`.
    pub fn matches(&self, record: &Record) -> bool {
        if self.start_date.map_or(false, |start| record.date < start) {
            return false;
        }
        if self.end_date.map_or(false, |end| record.date > end) {
            return false;
        }
        if !self.segments.is_empty()
            && !self.segments.iter().any(|s| s == record.segment_or_all())
        {
            return false;
        }
        if !self.products.is_empty()
            && !self.products.iter().any(|p| p == record.product_or_all())
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Metric::default(), Metric::SumBalance);
        assert_eq!(CategoryOrder::default(), CategoryOrder::FirstSeen);
    }

    #[test]
    fn test_metric_keys_parse_back() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_unknown_metric_is_rejected() {
        let err = "median_balance".parse::<Metric>().unwrap_err();
        assert_eq!(err, PivotError::UnknownMetric("median_balance".to_string()));
        assert!(err.to_string().contains("median_balance"));
    }

    #[test]
    fn test_metric_titles() {
        assert_eq!(Metric::AvgBalance.axis_title(), "Avg. balance (€)");
        assert_eq!(Metric::DelinquencyRate.colorbar_title(), "%");
        assert_eq!(Metric::Accounts.label(), "Number of accounts");
    }

    #[test]
    fn test_metric_serde_uses_keys() {
        let json = serde_json::to_string(&Metric::DelinquencyRate).unwrap();
        assert_eq!(json, "\"delinquency_rate\"");
    }

    #[test]
    fn test_filter_matches_dates_and_lists() {
        let filter = FilterContext::unrestricted()
            .with_dates(Some(day(2)), Some(day(4)))
            .with_segments(["Retail"]);

        assert!(filter.matches(&Record::new(day(2), 1, "Retail", "Loan", 1.0, false)));
        assert!(filter.matches(&Record::new(day(4), 1, "Retail", "Invest", 1.0, false)));
        assert!(!filter.matches(&Record::new(day(5), 1, "Retail", "Loan", 1.0, false)));
        assert!(!filter.matches(&Record::new(day(3), 1, "SME", "Loan", 1.0, false)));
    }

    #[test]
    fn test_inverted_range_is_invalid() {
        let filter = FilterContext::unrestricted().with_dates(Some(day(9)), Some(day(1)));
        assert!(matches!(
            filter.validate(),
            Err(PivotError::InvalidDateRange { .. })
        ));
    }
}
