//! FILENAME: core/engine/src/record.rs
//! PURPOSE: Defines a single transactional observation and the table holding them.
//! CONTEXT: Records come either from the synthetic generator or from a loaded
//! file. Columns that a loaded file may lack are modelled as `Option` fields;
//! consumers apply the documented fallbacks instead of probing the schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category used when a dimension column is absent from the source.
pub const ALL_CATEGORY: &str = "All";

/// One observation: a customer's account position on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub customer_id: u64,
    /// `None` when the source has no segment column.
    pub segment: Option<String>,
    /// `None` when the source has no product column.
    pub product: Option<String>,
    pub balance: f64,
    /// `None` when the source has no delinquency column (treated as not delinquent).
    pub delinquent: Option<bool>,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        customer_id: u64,
        segment: impl Into<String>,
        product: impl Into<String>,
        balance: f64,
        delinquent: bool,
    ) -> Self {
        Record {
            date,
            customer_id,
            segment: Some(segment.into()),
            product: Some(product.into()),
            balance,
            delinquent: Some(delinquent),
        }
    }

    /// Segment label, falling back to `"All"` when the column is absent.
    pub fn segment_or_all(&self) -> &str {
        self.segment.as_deref().unwrap_or(ALL_CATEGORY)
    }

    /// Product label, falling back to `"All"` when the column is absent.
    pub fn product_or_all(&self) -> &str {
        self.product.as_deref().unwrap_or(ALL_CATEGORY)
    }

    /// Delinquency as a 0/1 flag; absent means not delinquent.
    pub fn delinquent_flag(&self) -> f64 {
        if self.delinquent.unwrap_or(false) {
            1.0
        } else {
            0.0
        }
    }
}

/// An in-memory record table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Earliest and latest day present, or `None` for an empty table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        Some(self.records.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.date), hi.max(r.date))
        }))
    }

    /// Distinct segment labels in ascending order. Records without a segment are skipped.
    pub fn segments(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().filter_map(|r| r.segment.as_deref()))
    }

    /// Distinct product labels in ascending order. Records without a product are skipped.
    pub fn products(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().filter_map(|r| r.product.as_deref()))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
