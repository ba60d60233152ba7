//! FILENAME: core/persistence/src/generator.rs
//! PURPOSE: Deterministic synthetic banking portfolio.
//! CONTEXT: Every random draw comes from one `ChaCha8Rng` stream, consumed in
//! a fixed order, so the same configuration always yields the same records on
//! every platform.

use crate::PersistenceError;
use chrono::{Days, Local, NaiveDate};
use engine::{Dataset, Record};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

// ============================================================================
// PORTFOLIO SHAPE
// ============================================================================

const SEGMENTS: [&str; 4] = ["Retail", "Affluent", "SME", "Corporate"];
const SEGMENT_WEIGHTS: [f64; 4] = [0.5, 0.2, 0.2, 0.1];

const PRODUCTS: [&str; 4] = ["Current", "Savings", "Loan", "Invest"];
const PRODUCT_WEIGHTS: [f64; 4] = [0.45, 0.35, 0.15, 0.05];
/// Base balance per product, index-aligned with `PRODUCTS`.
const PRODUCT_BASE_BALANCE: [f64; 4] = [1500.0, 8000.0, -12000.0, 20000.0];

const BALANCE_NOISE_STD: f64 = 2000.0;
const BALANCE_FLOOR: f64 = -20000.0;
const DELINQUENCY_THRESHOLD: f64 = -5000.0;
const DELINQUENCY_PROBABILITY: f64 = 0.15;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    /// Number of consecutive calendar days, ending at `end_date`.
    pub days: u32,
    /// Size of the customer pool.
    pub customers: u32,
    pub first_customer_id: u64,
    /// Last generated day. `None` means today (local time).
    pub end_date: Option<NaiveDate>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            seed: 42,
            days: 180,
            customers: 1200,
            first_customer_id: 100_000,
            end_date: None,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), PersistenceError> {
        if self.days == 0 {
            return Err(PersistenceError::InvalidGeneratorConfig(
                "days must be greater than zero".to_string(),
            ));
        }
        if self.customers == 0 {
            return Err(PersistenceError::InvalidGeneratorConfig(
                "customers must be greater than zero".to_string(),
            ));
        }
        if self
            .first_customer_id
            .checked_add(u64::from(self.customers))
            .is_none()
        {
            return Err(PersistenceError::InvalidGeneratorConfig(format!(
                "customer ids overflow starting at {}",
                self.first_customer_id
            )));
        }
        Ok(())
    }

    /// The generated days, oldest first.
    pub fn date_range(&self) -> Result<Vec<NaiveDate>, PersistenceError> {
        let end = self.end_date.unwrap_or_else(|| Local::now().date_naive());
        (0..self.days)
            .rev()
            .map(|back| {
                end.checked_sub_days(Days::new(u64::from(back))).ok_or_else(|| {
                    PersistenceError::InvalidGeneratorConfig(format!(
                        "{} days before {} is out of range",
                        back, end
                    ))
                })
            })
            .collect()
    }
}

// ============================================================================
// GENERATION
// ============================================================================

pub fn generate_dataset(config: &GeneratorConfig) -> Result<Dataset, PersistenceError> {
    config.validate()?;
    let dates = config.date_range()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let segment_dist = weighted(&SEGMENT_WEIGHTS)?;
    let product_dist = weighted(&PRODUCT_WEIGHTS)?;
    let noise = Normal::new(0.0, BALANCE_NOISE_STD)
        .map_err(|e| PersistenceError::InvalidGeneratorConfig(e.to_string()))?;

    let pool = config.customers as usize;
    // Each customer keeps one segment for the whole period
    let customer_segments: Vec<&str> = (0..pool)
        .map(|_| SEGMENTS[segment_dist.sample(&mut rng)])
        .collect();

    let active_min = pool / 3;
    let active_max = (pool / 2).max(active_min + 1);

    let mut records = Vec::with_capacity(dates.len() * (active_min + active_max) / 2);
    for &date in &dates {
        let active_count = rng.gen_range(active_min..active_max);
        let active = index::sample(&mut rng, pool, active_count);

        for offset in active.iter() {
            let product = product_dist.sample(&mut rng);
            let balance =
                (PRODUCT_BASE_BALANCE[product] + noise.sample(&mut rng)).max(BALANCE_FLOOR);
            let delinquent =
                balance < DELINQUENCY_THRESHOLD && rng.gen::<f64>() < DELINQUENCY_PROBABILITY;

            records.push(Record::new(
                date,
                config.first_customer_id + offset as u64,
                customer_segments[offset],
                PRODUCTS[product],
                balance,
                delinquent,
            ));
        }
    }

    log::info!(
        "generated {} records over {} days for {} customers (seed {})",
        records.len(),
        dates.len(),
        pool,
        config.seed
    );
    Ok(Dataset::new(records))
}

fn weighted(weights: &[f64]) -> Result<WeightedIndex<f64>, PersistenceError> {
    WeightedIndex::new(weights).map_err(|e| PersistenceError::InvalidGeneratorConfig(e.to_string()))
}
