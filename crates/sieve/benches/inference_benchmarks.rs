//! Classification, inference and full pipeline benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sieve::{
    CheckConfig, ColumnInferencer, DataType, Schema, Sieve, SieveConfig, classify,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate clinical-style CSV with a few injected bad values.
fn generate_clinical_data(rows: usize) -> String {
    let mut data = String::from("patient_id,age,gender,weight,visit_date,smoker\n");
    let genders = ["M", "F", "F", "M", "X"];

    for row in 0..rows {
        let age = if row % 97 == 0 {
            "invalid_age".to_string()
        } else {
            (20 + row % 60).to_string()
        };
        let visit = if row % 53 == 0 {
            "not_a_date".to_string()
        } else {
            format!("2024-{:02}-{:02}", (row % 12) + 1, (row % 28) + 1)
        };
        data.push_str(&format!(
            "P{:05},{},{},{:.1},{},{}\n",
            row,
            age,
            genders[row % genders.len()],
            55.0 + (row % 40) as f64 * 0.5,
            visit,
            if row % 3 == 0 { "yes" } else { "no" }
        ));
    }

    data
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for value in ["34", "12.5", "2025-01-02", "01/15/2025", "yes", "invalid_age"] {
        group.bench_with_input(BenchmarkId::from_parameter(value), value, |b, value| {
            b.iter(|| black_box(classify(value)))
        });
    }

    group.finish();
}

fn bench_infer_column(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_column");

    for rows in [100, 1_000, 10_000].iter() {
        let values: Vec<String> = (0..*rows)
            .map(|i| if i % 10 == 0 { format!("bad{i}") } else { i.to_string() })
            .collect();
        let indexed: Vec<(usize, &str)> = values.iter().map(String::as_str).enumerate().collect();

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("mixed_int", rows), &indexed, |b, indexed| {
            let inferencer = ColumnInferencer::new();
            b.iter(|| black_box(inferencer.infer(indexed)))
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    group.sample_size(20);

    let checks = CheckConfig::default().with_schema(Schema::from([
        ("age".to_string(), DataType::Int),
        ("weight".to_string(), DataType::Float),
        ("visit_date".to_string(), DataType::Datetime),
    ]));
    let sieve = Sieve::with_config(SieveConfig {
        checks,
        ..SieveConfig::default()
    });

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_clinical_data(*rows);
        let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
        temp.write_all(data.as_bytes()).unwrap();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("clinical_rows", rows), &temp, |b, temp| {
            b.iter(|| black_box(sieve.check_file(temp.path())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_infer_column, bench_full_pipeline);
criterion_main!(benches);
