//! FILENAME: core/pivot-engine/src/engine.rs
//! Aggregation Engine - Reduces records into one value per (segment, product).
//!
//! This module takes filtered records and a Metric and produces sparse
//! AggregationCells, plus the category axes derived from them.
//!
//! Algorithm:
//! 1. Intern segment/product labels and accumulate per GroupKey
//! 2. Order groups ascending by (segment, product) label
//! 3. Emit one cell per observed group (absent pairs produce no cell)
//! 4. Build dense row/column indexes from the emitted cells

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use engine::{Dataset, Record};

use crate::cache::{CategoryIndex, GroupKey, MetricAccumulator};
use crate::definition::{CategoryOrder, FilterContext, Metric};
use crate::error::PivotError;

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// One reduced value for a unique (segment, product) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationCell {
    pub segment: String,
    pub product: String,
    pub value: f64,
}

/// Row (segment) and column (product) indexes for a cell set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAxes {
    pub rows: CategoryIndex,
    pub columns: CategoryIndex,
}

impl CategoryAxes {
    /// Builds both indexes independently, in the order values appear in `cells`.
    pub fn from_cells(cells: &[AggregationCell], order: CategoryOrder) -> Self {
        CategoryAxes {
            rows: CategoryIndex::build(cells.iter().map(|c| c.segment.as_str()), order),
            columns: CategoryIndex::build(cells.iter().map(|c| c.product.as_str()), order),
        }
    }
}

// ============================================================================
// METRIC AGGREGATOR
// ============================================================================

/// Grouping state for one aggregation call.
pub struct MetricAggregator {
    metric: Metric,

    /// Interned segment labels (first-seen order in the input).
    segments: CategoryIndex,

    /// Interned product labels (first-seen order in the input).
    products: CategoryIndex,

    /// Accumulated state per observed group.
    groups: FxHashMap<GroupKey, MetricAccumulator>,

    /// Number of records consumed.
    record_count: usize,
}

impl MetricAggregator {
    pub fn new(metric: Metric) -> Self {
        MetricAggregator {
            metric,
            segments: CategoryIndex::new(),
            products: CategoryIndex::new(),
            groups: FxHashMap::default(),
            record_count: 0,
        }
    }

    /// Adds one record. Missing dimensions fall back to `"All"`; a missing
    /// delinquency flag counts as not delinquent.
    pub fn add(&mut self, record: &Record) {
        let row = self.segments.intern(record.segment_or_all());
        let col = self.products.intern(record.product_or_all());

        self.groups
            .entry(GroupKey::new(row, col))
            .or_default()
            .add(record.balance, record.delinquent.unwrap_or(false));
        self.record_count += 1;
    }

    /// Executes the reduction and returns cells in ascending (segment, product) order.
    pub fn finish(self) -> Vec<AggregationCell> {
        let mut keyed: Vec<(&str, &str, &MetricAccumulator)> = self
            .groups
            .iter()
            .filter_map(|(key, acc)| {
                Some((self.segments.label(key.row)?, self.products.label(key.col)?, acc))
            })
            .collect();

        keyed.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));

        let cells: Vec<AggregationCell> = keyed
            .into_iter()
            .map(|(segment, product, acc)| AggregationCell {
                segment: segment.to_string(),
                product: product.to_string(),
                value: acc.compute(self.metric),
            })
            .collect();

        log::debug!(
            "aggregated {} records into {} cells ({})",
            self.record_count,
            cells.len(),
            self.metric
        );

        cells
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Groups `records` by (segment, product) and reduces `metric` per group.
/// Empty input gives an empty cell collection.
pub fn aggregate<'a, I>(records: I, metric: Metric) -> Vec<AggregationCell>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut aggregator = MetricAggregator::new(metric);
    for record in records {
        aggregator.add(record);
    }
    aggregator.finish()
}

/// Returns the records of `dataset` that pass `filter`.
pub fn apply_filters<'a>(
    dataset: &'a Dataset,
    filter: &FilterContext,
) -> Result<Vec<&'a Record>, PivotError> {
    filter.validate()?;

    let kept: Vec<&Record> = dataset.iter().filter(|r| filter.matches(r)).collect();
    log::debug!("filter kept {} of {} records", kept.len(), dataset.len());
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn record(segment: &str, product: &str, balance: f64, delinquent: bool) -> Record {
        Record::new(day(1), 100000, segment, product, balance, delinquent)
    }

    fn create_test_records() -> Vec<Record> {
        vec![
            record("SME", "Loan", -12000.0, true),
            record("Retail", "Current", 1500.0, false),
            record("Retail", "Current", 500.0, false),
            record("SME", "Savings", 8000.0, false),
            record("Retail", "Loan", -9000.0, false),
        ]
    }

    #[test]
    fn test_scenario_retail_loan_sum_and_rate() {
        let records = vec![
            record("Retail", "Loan", -1000.0, true),
            record("Retail", "Loan", -2000.0, false),
        ];

        let sums = aggregate(&records, Metric::SumBalance);
        assert_eq!(
            sums,
            vec![AggregationCell {
                segment: "Retail".to_string(),
                product: "Loan".to_string(),
                value: -3000.0,
            }]
        );

        let rates = aggregate(&records, Metric::DelinquencyRate);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].value, 50.0);
    }

    #[test]
    fn test_cells_are_sparse_and_ordered() {
        let cells = aggregate(&create_test_records(), Metric::Accounts);

        let keys: Vec<(&str, &str)> = cells
            .iter()
            .map(|c| (c.segment.as_str(), c.product.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Retail", "Current"),
                ("Retail", "Loan"),
                ("SME", "Loan"),
                ("SME", "Savings"),
            ]
        );
        assert_eq!(cells[0].value, 2.0);
    }

    #[test]
    fn test_average_is_sum_over_count() {
        let records = create_test_records();
        let sums = aggregate(&records, Metric::SumBalance);
        let counts = aggregate(&records, Metric::Accounts);
        let avgs = aggregate(&records, Metric::AvgBalance);

        for ((s, c), a) in sums.iter().zip(&counts).zip(&avgs) {
            assert_eq!(a.value, s.value / c.value);
        }
    }

    #[test]
    fn test_missing_dimensions_fall_back_to_all() {
        let records = vec![
            Record {
                date: day(1),
                customer_id: 1,
                segment: None,
                product: Some("Loan".to_string()),
                balance: 10.0,
                delinquent: None,
            },
            Record {
                date: day(2),
                customer_id: 2,
                segment: None,
                product: Some("Savings".to_string()),
                balance: 20.0,
                delinquent: None,
            },
        ];

        let cells = aggregate(&records, Metric::DelinquencyRate);
        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(|c| c.segment == "All"));
        assert!(cells.iter().all(|c| c.value == 0.0));

        let axes = CategoryAxes::from_cells(&cells, CategoryOrder::FirstSeen);
        assert_eq!(axes.rows.labels(), ["All"]);
        assert_eq!(axes.columns.labels(), ["Loan", "Savings"]);
    }

    #[test]
    fn test_empty_input_gives_no_cells() {
        let cells = aggregate(&Vec::<Record>::new(), Metric::SumBalance);
        assert!(cells.is_empty());

        let axes = CategoryAxes::from_cells(&cells, CategoryOrder::FirstSeen);
        assert!(axes.rows.is_empty());
        assert!(axes.columns.is_empty());
    }

    #[test]
    fn test_axes_follow_cell_order() {
        let cells = aggregate(&create_test_records(), Metric::SumBalance);
        let axes = CategoryAxes::from_cells(&cells, CategoryOrder::FirstSeen);

        assert_eq!(axes.rows.labels(), ["Retail", "SME"]);
        assert_eq!(axes.columns.labels(), ["Current", "Loan", "Savings"]);
    }

    #[test]
    fn test_apply_filters() {
        let dataset = Dataset::new(vec![
            Record::new(day(1), 1, "Retail", "Loan", 1.0, false),
            Record::new(day(2), 2, "SME", "Loan", 2.0, false),
            Record::new(day(3), 3, "Retail", "Savings", 3.0, false),
        ]);
        let filter = FilterContext::unrestricted()
            .with_dates(Some(day(2)), None)
            .with_products(["Savings"]);

        let kept = apply_filters(&dataset, &filter).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].customer_id, 3);
    }

    #[test]
    fn test_apply_filters_rejects_inverted_range() {
        let dataset = Dataset::default();
        let filter = FilterContext::unrestricted().with_dates(Some(day(5)), Some(day(1)));
        assert!(apply_filters(&dataset, &filter).is_err());
    }
}
