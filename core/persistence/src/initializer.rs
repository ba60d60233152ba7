//! FILENAME: core/persistence/src/initializer.rs
//! PURPOSE: Load the persisted dataset, or generate and persist it on first use.

use crate::{generate_dataset, DatasetStorage, FileStorage, GeneratorConfig, PersistenceError};
use engine::Dataset;
use std::path::Path;

/// Returns the stored dataset when present; otherwise generates one from
/// `config` and persists it. A failed write is logged and the generated
/// dataset is still returned. A stored file that cannot be parsed is an error.
pub fn load_or_generate<S: DatasetStorage + ?Sized>(
    storage: &S,
    config: &GeneratorConfig,
) -> Result<Dataset, PersistenceError> {
    config.validate()?;

    let _lock = match storage.lock() {
        Ok(lock) => Some(lock),
        Err(e) => {
            log::warn!(
                "could not lock {}, continuing without lock: {}",
                storage.location(),
                e
            );
            None
        }
    };

    if storage.exists() {
        let dataset = storage.read()?;
        log::info!("loaded {} records from {}", dataset.len(), storage.location());
        return Ok(dataset);
    }

    let dataset = generate_dataset(config)?;
    match storage.write(&dataset) {
        Ok(()) => log::info!("saved {} records to {}", dataset.len(), storage.location()),
        Err(e) => log::warn!(
            "could not persist generated dataset to {}: {}",
            storage.location(),
            e
        ),
    }
    Ok(dataset)
}

/// `load_or_generate` over a CSV file at `path`.
pub fn ensure_dataset(path: &Path, config: &GeneratorConfig) -> Result<Dataset, PersistenceError> {
    load_or_generate(&FileStorage::new(path), config)
}
