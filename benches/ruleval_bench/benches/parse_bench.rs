//! Rule parsing benchmarks
//!
//! Benchmarks rule-string parsing and rule set construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ruleval::{FieldRules, ParsedRule, RuleSet};

/// Benchmark parsing of single rule strings
fn bench_parse_rule(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rule");

    for rule in ["required", "between:3,10", "in:a,b,c,d,e,f", "regex:/^[a-z,]+$/i"] {
        group.bench_with_input(BenchmarkId::new("parse_str", rule), rule, |b, rule| {
            b.iter(|| ParsedRule::parse_str(black_box(rule)))
        });
    }

    group.finish();
}

/// Benchmark splitting piped rule strings
fn bench_explode(c: &mut Criterion) {
    let mut group = c.benchmark_group("explode");

    group.bench_function("piped", |b| {
        b.iter(|| FieldRules::from(black_box("required|numeric|between:1,100|not_in:13,42")).explode())
    });

    group.finish();
}

/// Benchmark deserializing a rule set from JSON
fn bench_rule_set_from_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_set");

    let json = r#"{
        "name": "required|between:3,40",
        "email": "required|email",
        "age": ["numeric", "min:18"],
        "role": "in:admin,editor,viewer"
    }"#;

    group.bench_function("from_json", |b| {
        b.iter(|| serde_json::from_str::<RuleSet>(black_box(json)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_parse_rule, bench_explode, bench_rule_set_from_json);
criterion_main!(benches);
