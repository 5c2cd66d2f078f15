//! Validation run benchmarks
//!
//! Benchmarks full validator runs, passing and failing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ruleval::{json, RuleSet, Value, ValidatorFactory};

fn signup_rules() -> RuleSet {
    RuleSet::from([
        ("name", "required|between:3,40"),
        ("email", "required|email"),
        ("age", "numeric|min:18"),
        ("role", "in:admin,editor,viewer"),
        ("password", "required|min:8"),
        ("password_confirmation", "same:password"),
    ])
}

fn valid_record() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "age": 36,
        "role": "admin",
        "password": "analytical",
        "password_confirmation": "analytical"
    })
}

fn invalid_record() -> Value {
    json!({
        "name": "A",
        "email": "not-an-email",
        "age": "young",
        "role": "owner",
        "password": "short",
        "password_confirmation": "other"
    })
}

/// Benchmark a run through a shared factory
fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    let factory = ValidatorFactory::default();

    for (name, record) in [("passing", valid_record()), ("failing", invalid_record())] {
        group.bench_with_input(BenchmarkId::new("signup", name), &record, |b, record| {
            b.iter(|| {
                let mut validator = factory.make(record.clone(), signup_rules()).build();
                black_box(validator.passes().unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark run cost as the number of fields grows
fn bench_field_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_count");
    let factory = ValidatorFactory::default();

    for count in [1usize, 10, 50] {
        let rules: RuleSet = (0..count)
            .map(|i| (format!("f{i}"), "required|numeric|between:1,100"))
            .collect();
        let record: serde_json::Map<String, Value> =
            (0..count).map(|i| (format!("f{i}"), json!(i))).collect();
        let record = Value::Object(record);

        group.bench_with_input(BenchmarkId::new("fields", count), &count, |b, _| {
            b.iter(|| {
                let mut validator = factory.make(record.clone(), rules.clone()).build();
                black_box(validator.passes().unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validation, bench_field_count);
criterion_main!(benches);
