use std::fmt::Write as _;

use criterion::{Criterion, criterion_group, criterion_main};
use rdr_ranking::fetch::RawPayload;
use rdr_ranking::record::NumericField;
use rdr_ranking::{pipeline, rank};

fn synthetic_report(rows: usize) -> String {
    let mut report = String::from(
        "Instituição financeira;Índice;Quantidade de reclamações reguladas procedentes;\
         Quantidade de reclamações reguladas - outras;Quantidade de reclamações não reguladas;\
         Quantidade total de reclamações\n",
    );
    for i in 0..rows {
        let _ = writeln!(
            report,
            "Banco {i};{}.{:03},{:02};{};{};{};{}",
            i % 90 + 1,
            i % 1000,
            i % 100,
            i % 50,
            i % 20,
            i % 10,
            i % 80
        );
    }
    report
}

fn bench_pipeline(c: &mut Criterion) {
    let payload = RawPayload {
        bytes: synthetic_report(5_000).into_bytes(),
        content_type: None,
    };

    c.bench_function("normalize_5k_rows", |b| {
        b.iter(|| pipeline::normalize(&payload).expect("pipeline"))
    });

    let normalized = pipeline::normalize(&payload).expect("pipeline");
    c.bench_function("rank_5k_rows", |b| {
        b.iter(|| rank::rank_by(&normalized, NumericField::Index))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
