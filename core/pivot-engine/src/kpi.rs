//! FILENAME: core/pivot-engine/src/kpi.rs
//! Headline KPIs over a filtered record set.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use engine::{format_number, format_with_separators, NumberFormat, Record};

use crate::cache::MetricAccumulator;
use crate::definition::Metric;

/// Summary figures for the dashboard header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Number of distinct customers.
    pub customers: usize,
    pub total_balance: f64,
    /// Mean balance per record; 0 when there are no records.
    pub average_balance: f64,
    /// Percentage of delinquent records; 0 when there are no records.
    pub delinquency_rate: f64,
}

/// A labelled, pre-formatted KPI value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    pub help: String,
}

impl KpiSummary {
    /// Formatted cards in display order.
    pub fn cards(&self) -> Vec<KpiCard> {
        let card = |label: &str, value: String, help: &str| KpiCard {
            label: label.to_string(),
            value,
            help: help.to_string(),
        };

        vec![
            card(
                "Customers",
                format_number(self.customers as f64, &NumberFormat::General),
                "Number of unique customers",
            ),
            card(
                "Total balance (M€)",
                format_with_separators(self.total_balance / 1e6, 2),
                "Sum of all balances",
            ),
            card(
                "Avg. balance (€)",
                format_with_separators(self.average_balance, 0),
                "Average balance per account",
            ),
            card(
                "Delinquency rate (%)",
                format_with_separators(self.delinquency_rate, 2),
                "Share of accounts in default",
            ),
        ]
    }
}

/// Computes the KPI summary in one pass.
pub fn compute_kpis<'a, I>(records: I) -> KpiSummary
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut customers = FxHashSet::default();
    let mut acc = MetricAccumulator::new();

    for record in records {
        customers.insert(record.customer_id);
        acc.add(record.balance, record.delinquent.unwrap_or(false));
    }

    KpiSummary {
        customers: customers.len(),
        total_balance: acc.compute(Metric::SumBalance),
        average_balance: acc.compute(Metric::AvgBalance),
        delinquency_rate: acc.compute(Metric::DelinquencyRate),
    }
}
