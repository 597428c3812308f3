use criterion::{criterion_group, criterion_main, Criterion};
use triage::prelude::*;

fn make_input(n: usize) -> Vec<Value> {
    // deterministic but unsorted
    (0..n)
        .map(|i| Value::Int(((i * 7919) % n) as i64))
        .collect()
}

fn ascending_cmp() -> StageCallback {
    StageCallback::new("ascending", CallableSignature::plain(["a", "b"]), |args| {
        match (&args[0], &args[1]) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int((a - b).signum())),
            _ => Ok(Value::Int(0)),
        }
    })
}

fn bench_full_sort_vs_top_k(c: &mut Criterion) {
    let input = make_input(4096);

    let sort = compile(
        StageSet {
            order_cmp: Some(ascending_cmp()),
            ..StageSet::default()
        },
        PipelineConfig::default(),
    )
    .expect("sort pipeline");
    let top_k = compile(
        StageSet {
            order_cmp: Some(ascending_cmp()),
            ..StageSet::default()
        },
        PipelineConfig {
            cardinality: Cardinality::Fixed(16),
            ..PipelineConfig::default()
        },
    )
    .expect("top-k pipeline");

    c.bench_function("full_sort_4096", |b| {
        b.iter(|| sort.run(input.clone()).expect("sort run"))
    });
    c.bench_function("top_k_16_of_4096", |b| {
        b.iter(|| top_k.run(input.clone()).expect("top-k run"))
    });
}

fn bench_bare_vs_partial_binding(c: &mut Criterion) {
    let input = make_input(4096);

    let bare = compile(
        StageSet {
            predicate: Some(StageCallback::new(
                "small",
                CallableSignature::plain(["chosen"]),
                |args| Ok(Value::Bool(matches!(args[0], Value::Int(i) if i < 2048))),
            )),
            ..StageSet::default()
        },
        PipelineConfig::default(),
    )
    .expect("bare pipeline");

    let sig = CallableSignature::builder()
        .positional("chosen")
        .defaulted("limit", 2048)
        .build();
    let partial = compile(
        StageSet {
            predicate: Some(StageCallback::new("small", sig, |args| {
                match (&args[0], &args[1]) {
                    (Value::Int(i), Value::Int(limit)) => Ok(Value::Bool(i < limit)),
                    _ => Ok(Value::Bool(false)),
                }
            })),
            ..StageSet::default()
        },
        PipelineConfig::default(),
    )
    .expect("partial pipeline");

    c.bench_function("predicate_bare_4096", |b| {
        b.iter(|| bare.run(input.clone()).expect("bare run"))
    });
    c.bench_function("predicate_partial_4096", |b| {
        b.iter(|| partial.run(input.clone()).expect("partial run"))
    });
}

criterion_group!(benches, bench_full_sort_vs_top_k, bench_bare_vs_partial_binding);
criterion_main!(benches);
