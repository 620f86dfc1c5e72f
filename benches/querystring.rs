use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nested_qs::{from_str, parse, parse_with_options, stringify, to_string, QsOptions};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Search {
    q: String,
    page: u32,
    filters: Filters,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Filters {
    status: String,
    owner: User,
}

fn sample_search() -> Search {
    Search {
        q: "nested query strings".to_string(),
        page: 4,
        filters: Filters {
            status: "open".to_string(),
            owner: User {
                id: 123,
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                active: true,
            },
        },
        tags: vec!["bug".to_string(), "ui".to_string(), "p1".to_string()],
    }
}

fn benchmark_stringify_flat(c: &mut Criterion) {
    let value = parse("id=123&name=Alice&email=alice%40example.com&active=true");

    c.bench_function("stringify_flat", |b| b.iter(|| stringify(black_box(&value))));
}

fn benchmark_parse_flat(c: &mut Criterion) {
    let input = "id=123&name=Alice&email=alice%40example.com&active=true";

    c.bench_function("parse_flat", |b| b.iter(|| parse(black_box(input))));
}

fn benchmark_nested(c: &mut Criterion) {
    let search = sample_search();
    let text = to_string(&search).unwrap();

    let mut group = c.benchmark_group("nested");
    group.bench_function("to_string", |b| b.iter(|| to_string(black_box(&search))));
    group.bench_function("parse", |b| b.iter(|| parse(black_box(&text))));
    group.bench_function("from_str", |b| {
        b.iter(|| from_str::<Search>(black_box(&text)))
    });
    group.finish();
}

fn benchmark_array_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_array");

    for size in [5, 20, 100, 500].iter() {
        let input = (0..*size)
            .map(|i| format!("items[]=item{}", i))
            .collect::<Vec<_>>()
            .join("&");

        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse(black_box(input)))
        });
    }
    group.finish();
}

fn benchmark_sparse_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_sparse");

    for size in [5, 20].iter() {
        let input = (0..*size)
            .rev()
            .map(|i| format!("a[{}][b]=v{}", i, i))
            .collect::<Vec<_>>()
            .join("&");

        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse(black_box(input)))
        });
    }
    group.finish();
}

fn benchmark_parameter_limit(c: &mut Criterion) {
    let input = (0..5000)
        .map(|i| format!("k{}=v", i))
        .collect::<Vec<_>>()
        .join("&");

    let mut group = c.benchmark_group("parameter_limit");
    group.bench_function("default_limit", |b| b.iter(|| parse(black_box(&input))));

    let unlimited = QsOptions::new().unlimited_parameters();
    group.bench_function("unlimited", |b| {
        b.iter(|| parse_with_options(black_box(&input), &unlimited))
    });
    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let search = sample_search();
    let text = to_string(&search).unwrap();
    let json = serde_json::to_string(&search).unwrap();

    let mut group = c.benchmark_group("comparison");
    group.bench_function("qs_serialize", |b| b.iter(|| to_string(black_box(&search))));
    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&search)))
    });
    group.bench_function("qs_deserialize", |b| {
        b.iter(|| from_str::<Search>(black_box(&text)))
    });
    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Search>(black_box(&json)))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_stringify_flat,
    benchmark_parse_flat,
    benchmark_nested,
    benchmark_array_sizes,
    benchmark_sparse_indices,
    benchmark_parameter_limit,
    benchmark_comparison_with_json
);
criterion_main!(benches);
