//! FILENAME: core/persistence/src/lib.rs
//! Dataset persistence.
//!
//! Reads and writes the transactions CSV, generates the synthetic portfolio
//! and runs the first-use initializer that ties the two together.

mod csv_reader;
mod csv_writer;
mod error;
mod generator;
mod initializer;
mod storage;

pub use csv_reader::{canonical_product, load_csv, read_dataset};
pub use csv_writer::{save_csv, to_csv_bytes, write_dataset};
pub use error::PersistenceError;
pub use generator::{generate_dataset, GeneratorConfig};
pub use initializer::{ensure_dataset, load_or_generate};
pub use storage::{DatasetStorage, FileStorage, MemoryStorage, StorageLock};

/// Where the dataset lives unless configured otherwise.
pub const DEFAULT_DATASET_PATH: &str = "data/sample/transactions.csv";

/// Column order of the persisted file.
pub const COLUMNS: [&str; 6] = [
    "date",
    "customer_id",
    "segment",
    "product",
    "balance",
    "delinquent",
];

/// Date layout written to the persisted file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
