//! FILENAME: core/pivot-engine/src/cache.rs
//! Aggregation Cache - Internal representation used while grouping.
//!
//! Architecture:
//! - Each distinct category label is stored once and referenced by a dense id
//! - A group is keyed by the pair of ids (row category, column category)
//! - Accumulators hold just enough state to produce every metric

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::definition::{CategoryOrder, Metric};

// ============================================================================
// CATEGORY INDEX
// ============================================================================

/// A dense grid coordinate for a category value.
/// Using u32 to save memory (supports up to 4B distinct values per dimension).
pub type CategoryId = u32;

/// Maps each distinct category value to a dense coordinate `0..N-1`.
///
/// Built fresh per invocation; the same input sequence always yields the
/// same mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryIndex {
    /// Map from label to its coordinate (for deduplication during build).
    label_to_id: FxHashMap<String, CategoryId>,

    /// Labels indexed by coordinate.
    id_to_label: Vec<String>,
}

impl PartialEq for CategoryIndex {
    fn eq(&self, other: &Self) -> bool {
        // label_to_id is derived from id_to_label
        self.id_to_label == other.id_to_label
    }
}

impl CategoryIndex {
    pub fn new() -> Self {
        CategoryIndex::default()
    }

    /// Builds an index from an ordered sequence of values. An empty sequence
    /// gives an empty index.
    pub fn build<I, S>(values: I, order: CategoryOrder) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = CategoryIndex::new();
        for value in values {
            index.intern(value.as_ref());
        }
        if order == CategoryOrder::Ascending {
            index.sort_ascending();
        }
        index
    }

    /// Returns the coordinate of `label`, assigning the next free one if unseen.
    pub fn intern(&mut self, label: &str) -> CategoryId {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }

        let id = self.id_to_label.len() as CategoryId;
        self.id_to_label.push(label.to_string());
        self.label_to_id.insert(label.to_string(), id);
        id
    }

    /// Coordinate of a label, if present.
    pub fn coord(&self, label: &str) -> Option<CategoryId> {
        self.label_to_id.get(label).copied()
    }

    /// Label at a coordinate, if in range.
    pub fn label(&self, id: CategoryId) -> Option<&str> {
        self.id_to_label.get(id as usize).map(String::as_str)
    }

    /// Labels in coordinate order (the tick text of an axis).
    pub fn labels(&self) -> &[String] {
        &self.id_to_label
    }

    pub fn len(&self) -> usize {
        self.id_to_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_label.is_empty()
    }

    /// Reassigns coordinates so labels are in ascending order.
    fn sort_ascending(&mut self) {
        self.id_to_label.sort();
        self.label_to_id = self
            .id_to_label
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i as CategoryId))
            .collect();
    }
}

// ============================================================================
// GROUP KEY
// ============================================================================

/// A (row category, column category) pair identifying one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub row: CategoryId,
    pub col: CategoryId,
}

impl GroupKey {
    pub fn new(row: CategoryId, col: CategoryId) -> Self {
        GroupKey { row, col }
    }
}

// ============================================================================
// METRIC ACCUMULATOR
// ============================================================================

/// Accumulator for computing every metric incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricAccumulator {
    pub balance_sum: f64,
    pub count: u64,
    pub delinquent_count: u64,
}

impl MetricAccumulator {
    pub fn new() -> Self {
        MetricAccumulator::default()
    }

    /// Adds one record's contribution.
    pub fn add(&mut self, balance: f64, delinquent: bool) {
        self.count += 1;
        self.balance_sum += balance;
        if delinquent {
            self.delinquent_count += 1;
        }
    }

    /// Merges another accumulator into this one (for partitioned input).
    pub fn merge(&mut self, other: &MetricAccumulator) {
        self.balance_sum += other.balance_sum;
        self.count += other.count;
        self.delinquent_count += other.delinquent_count;
    }

    /// Computes the final value for a metric. Empty groups yield 0.
    pub fn compute(&self, metric: Metric) -> f64 {
        match metric {
            Metric::SumBalance => self.balance_sum,
            Metric::Accounts => self.count as f64,
            Metric::AvgBalance => {
                if self.count > 0 {
                    self.balance_sum / (self.count as f64)
                } else {
                    0.0
                }
            }
            Metric::DelinquencyRate => {
                if self.count > 0 {
                    (self.delinquent_count as f64) / (self.count as f64) * 100.0
                } else {
                    0.0
                }
            }
        }
    }
}
