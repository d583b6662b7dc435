use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use valguard_core::{builtin_registry, Value};

fn bench_function_call(c: &mut Criterion) {
    let registry = builtin_registry().build().unwrap();
    let cidr = registry.get("is_cidr").unwrap();
    let base64 = registry.get("is_base64").unwrap();

    let valid_cidr = Value::string("10.0.0.0/24");
    let invalid_cidr = Value::string("10.0.0.0/99");
    let encoded = Value::string("U29sdmluZyB0aGUgcHJvYmxlbSBvbmNlIGFuZCBmb3IgYWxs");

    c.bench_function("is_cidr valid", |b| {
        b.iter(|| cidr.call(black_box(&valid_cidr)))
    });
    c.bench_function("is_cidr invalid", |b| {
        b.iter(|| cidr.call(black_box(&invalid_cidr)))
    });
    c.bench_function("is_base64 valid", |b| {
        b.iter(|| base64.call(black_box(&encoded)))
    });
    c.bench_function("is_cidr unknown", |b| {
        b.iter(|| cidr.call(black_box(&Value::Unknown)))
    });
}

criterion_group!(benches, bench_function_call);
criterion_main!(benches);
