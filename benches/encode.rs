//! Criterion benchmarks for the text encoder.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use dtn_ari::prelude::*;

fn sample_flat_ac(len: usize) -> Ari {
    Ari::from((0..len as u64).map(Ari::from).collect::<Ac>())
}

fn sample_nested(depth: usize) -> Ari {
    let mut ari = Ari::from(1u64);
    for _ in 0..depth {
        ari = Ari::from(Ac::from(vec![ari, Ari::from("label")]));
    }
    ari
}

fn sample_rptset(reports: usize) -> Ari {
    let reports = (0..reports)
        .map(|ix| Report {
            reltime: Ari::td(Timespec::new(ix as i64, 0)),
            source: Ari::from(ObjPath::typed("ns1", AriType::Ctrl, ix as i64)),
            items: vec![Ari::from(ix as u64), Ari::from("item")],
        })
        .collect();
    Ari::from(RptSet {
        nonce: Ari::from(7u64),
        reftime: Ari::tp(Timespec::new(0, 0)),
        reports,
    })
}

/// Benchmark: flat array encoding at varying lengths
fn bench_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_flat_ac");
    let opts = EncodeOptions::default();

    for len in [4usize, 16, 64, 256] {
        let ari = sample_flat_ac(len);
        let text = encode(&ari, &opts).expect("valid tree");
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("items", len), &ari, |b, ari| {
            b.iter(|| encode(black_box(ari), &opts));
        });
    }

    group.finish();
}

/// Benchmark: deeply nested containers
fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_nested");
    let opts = EncodeOptions::default();

    for depth in [2usize, 8, 32] {
        let ari = sample_nested(depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &ari, |b, ari| {
            b.iter(|| encode(black_box(ari), &opts));
        });
    }

    group.finish();
}

/// Benchmark: report sets with header fields and time codecs
fn bench_rptset(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_rptset");
    let opts = EncodeOptions::default();

    for reports in [1usize, 8, 32] {
        let ari = sample_rptset(reports);
        group.bench_with_input(BenchmarkId::new("reports", reports), &ari, |b, ari| {
            b.iter(|| encode(black_box(ari), &opts));
        });
    }

    group.finish();
}

/// Benchmark: option variations over one representative value
fn bench_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_options");
    let ari = sample_rptset(4);

    let cases = [
        ("defaults", EncodeOptions::default()),
        ("numeric_time", EncodeOptions::default().with_time_text(false)),
        ("hex_ints", EncodeOptions::default().with_int_base(IntBase::Base16)),
        (
            "int_types",
            EncodeOptions::default().with_show_ari_type(AriTypeForm::Int),
        ),
    ];

    for (name, opts) in cases {
        group.bench_with_input(BenchmarkId::new("opts", name), &opts, |b, opts| {
            b.iter(|| encode(black_box(&ari), opts));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flat, bench_nested, bench_rptset, bench_options);
criterion_main!(benches);
