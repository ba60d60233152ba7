//! FILENAME: core/persistence/src/csv_reader.rs

use crate::{PersistenceError, COLUMNS};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use engine::{Dataset, Record};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Product names written by older versions of the generator, and their current names.
const LEGACY_PRODUCT_NAMES: [(&str, &str); 7] = [
    ("Courant", "Current"),
    ("Épargne", "Savings"),
    ("Epargne", "Savings"),
    ("Crédit", "Loan"),
    ("Credit", "Loan"),
    ("Invest", "Invest"),
    ("Tous", "All"),
];

/// Maps a legacy product label to its current name; other labels pass through.
pub fn canonical_product(label: &str) -> &str {
    LEGACY_PRODUCT_NAMES
        .iter()
        .find(|(legacy, _)| *legacy == label)
        .map_or(label, |(_, current)| current)
}

pub fn load_csv(path: &Path) -> Result<Dataset, PersistenceError> {
    read_dataset(File::open(path)?)
}

/// Column positions resolved from the header row.
struct ColumnMap {
    date: usize,
    customer_id: usize,
    segment: Option<usize>,
    product: Option<usize>,
    balance: usize,
    delinquent: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, PersistenceError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| PersistenceError::MissingColumn(name.to_string()))
        };

        Ok(ColumnMap {
            date: require(COLUMNS[0])?,
            customer_id: require(COLUMNS[1])?,
            segment: find(COLUMNS[2]),
            product: find(COLUMNS[3]),
            balance: require(COLUMNS[4])?,
            delinquent: find(COLUMNS[5]),
        })
    }
}

/// Reads a dataset from CSV. `segment`, `product` and `delinquent` may be
/// absent; the corresponding record fields are then `None`.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, PersistenceError> {
    let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let columns = ColumnMap::from_headers(csv.headers()?)?;

    let mut records = Vec::new();
    for (row_idx, row) in csv.records().enumerate() {
        let row = row?;
        // Header is line 1
        let line = row_idx + 2;

        let field = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(field).filter(|s| !s.is_empty());

        records.push(Record {
            date: parse_date(field(columns.date), line)?,
            customer_id: parse_customer_id(field(columns.customer_id), line)?,
            segment: optional(columns.segment).map(str::to_string),
            product: optional(columns.product).map(|p| canonical_product(p).to_string()),
            balance: parse_balance(field(columns.balance), line)?,
            delinquent: optional(columns.delinquent)
                .map(|s| parse_flag(s, line))
                .transpose()?,
        });
    }

    Ok(Dataset::new(records))
}

fn parse_date(s: &str, line: usize) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| {
            PersistenceError::InvalidFormat(format!("line {}: invalid date '{}'", line, s))
        })
}

fn parse_customer_id(s: &str, line: usize) -> Result<u64, PersistenceError> {
    s.parse::<u64>().map_err(|_| {
        PersistenceError::InvalidFormat(format!("line {}: invalid customer_id '{}'", line, s))
    })
}

fn parse_balance(s: &str, line: usize) -> Result<f64, PersistenceError> {
    s.parse::<f64>().map_err(|_| {
        PersistenceError::InvalidFormat(format!("line {}: invalid balance '{}'", line, s))
    })
}

fn parse_flag(s: &str, line: usize) -> Result<bool, PersistenceError> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" => Ok(true),
        "0" | "0.0" | "false" => Ok(false),
        _ => Err(PersistenceError::InvalidFormat(format!(
            "line {}: invalid delinquent flag '{}'",
            line, s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_full_schema() {
        let csv = "date,customer_id,segment,product,balance,delinquent\n\
                   2024-03-01,100000,Retail,Loan,-6000.5,1\n\
                   2024-03-02 00:00:00,100001,SME,Savings,8000,0\n";

        let dataset = read_dataset(csv.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(first.customer_id, 100000);
        assert_eq!(first.segment.as_deref(), Some("Retail"));
        assert_eq!(first.balance, -6000.5);
        assert_eq!(first.delinquent, Some(true));
        assert_eq!(dataset.records[1].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let csv = "customer_id,date,balance\n100000,2024-03-01,12.5\n";

        let dataset = read_dataset(csv.as_bytes()).unwrap();
        let record = &dataset.records[0];

        assert_eq!(record.segment, None);
        assert_eq!(record.product, None);
        assert_eq!(record.delinquent, None);
        assert_eq!(record.balance, 12.5);
    }

    #[test]
    fn test_legacy_products_are_canonicalized() {
        let csv = "date,customer_id,segment,product,balance,delinquent\n\
                   2024-03-01,1,Retail,Courant,1,0\n\
                   2024-03-01,2,Retail,Épargne,1,0\n\
                   2024-03-01,3,Retail,Credit,1,0\n\
                   2024-03-01,4,Retail,Tous,1,0\n";

        let dataset = read_dataset(csv.as_bytes()).unwrap();
        let products: Vec<&str> = dataset
            .iter()
            .map(|r| r.product.as_deref().unwrap())
            .collect();
        assert_eq!(products, vec!["Current", "Savings", "Loan", "All"]);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "date,segment,balance\n2024-03-01,Retail,1\n";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PersistenceError::MissingColumn(ref c) if c == "customer_id"));
    }

    #[test]
    fn test_bad_date_reports_line() {
        let csv = "date,customer_id,balance\n2024-03-01,1,1\n03/02/2024,2,1\n";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_canonical_product_passthrough() {
        assert_eq!(canonical_product("Savings"), "Savings");
        assert_eq!(canonical_product("Crédit"), "Loan");
    }
}
