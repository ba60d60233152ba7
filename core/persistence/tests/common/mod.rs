//! FILENAME: tests/common/mod.rs
//! Shared fixtures for persistence integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use persistence::GeneratorConfig;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small generator configuration pinned to a fixed end date.
pub fn pinned_config(seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        seed,
        days: 14,
        customers: 90,
        end_date: NaiveDate::from_ymd_opt(2024, 9, 30),
        ..GeneratorConfig::default()
    }
}

/// A temporary directory and the dataset path inside it.
pub fn temp_dataset_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("sample").join("transactions.csv");
    (dir, path)
}
