use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::Record;
use pivot_engine::{aggregate, compute_kpis, Metric};

const SEGMENTS: [&str; 4] = ["Retail", "Affluent", "SME", "Corporate"];
const PRODUCTS: [&str; 4] = ["Current", "Savings", "Loan", "Invest"];

/// Roughly the size of the default generated dataset (180 days x ~500 active).
fn create_records(count: usize) -> Vec<Record> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            Record::new(
                start + chrono::Days::new((i / 500) as u64),
                100000 + (i % 1200) as u64,
                SEGMENTS[i % SEGMENTS.len()],
                PRODUCTS[(i / 7) % PRODUCTS.len()],
                (i as f64 * 37.0) % 20000.0 - 5000.0,
                i % 53 == 0,
            )
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let records = create_records(90_000);

    for metric in Metric::ALL {
        c.bench_function(&format!("aggregate_{}", metric.key()), |b| {
            b.iter(|| aggregate(black_box(&records), metric))
        });
    }

    c.bench_function("compute_kpis", |b| b.iter(|| compute_kpis(black_box(&records))));
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
