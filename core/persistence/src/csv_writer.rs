//! FILENAME: core/persistence/src/csv_writer.rs

use crate::{PersistenceError, COLUMNS, DATE_FORMAT};
use csv::WriterBuilder;
use engine::Dataset;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn save_csv(dataset: &Dataset, path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_dataset(dataset, File::create(path)?)
}

/// Writes the dataset with the canonical header. Absent categories are
/// written as empty cells; the delinquency flag as `1`/`0`.
pub fn write_dataset<W: Write>(dataset: &Dataset, writer: W) -> Result<(), PersistenceError> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(COLUMNS)?;

    for record in dataset {
        let delinquent = match record.delinquent {
            Some(true) => "1",
            Some(false) => "0",
            None => "",
        };
        csv.write_record([
            record.date.format(DATE_FORMAT).to_string().as_str(),
            record.customer_id.to_string().as_str(),
            record.segment.as_deref().unwrap_or(""),
            record.product.as_deref().unwrap_or(""),
            record.balance.to_string().as_str(),
            delinquent,
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Serializes the dataset into an in-memory CSV buffer.
pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>, PersistenceError> {
    let mut buffer = Vec::new();
    write_dataset(dataset, &mut buffer)?;
    Ok(buffer)
}
