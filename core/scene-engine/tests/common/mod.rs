//! FILENAME: tests/common/mod.rs
//! Shared fixtures for scene integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use engine::Record;

/// A small banking portfolio with positive, negative and zero balances.
pub struct PortfolioFixture;

impl PortfolioFixture {
    pub fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    /// (customer, segment, product, balance, delinquent)
    pub fn data() -> Vec<(u64, &'static str, &'static str, f64, bool)> {
        vec![
            (100000, "Retail", "Current", 1500.0, false),
            (100001, "Retail", "Loan", -11000.0, true),
            (100002, "Affluent", "Invest", 22000.0, false),
            (100003, "SME", "Savings", 0.0, false),
            (100004, "SME", "Loan", -14000.0, false),
            (100005, "Corporate", "Savings", 9100.0, false),
            (100000, "Retail", "Current", 1700.0, false),
        ]
    }

    pub fn records() -> Vec<Record> {
        Self::data()
            .into_iter()
            .enumerate()
            .map(|(i, (id, seg, prod, bal, del))| {
                Record::new(Self::day(1 + i as u32), id, seg, prod, bal, del)
            })
            .collect()
    }
}
