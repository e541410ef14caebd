use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use tempfile::tempdir;
use trackr_core::{
    core::services::{LeaderboardService, SummaryService},
    domain::{Category, MonthKey, Transaction, TransactionKind},
    storage::{JsonStorage, RecordStore},
};

fn build_transactions(count: usize) -> Vec<Transaction> {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let kind = if idx % 10 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            Transaction::new(
                kind,
                Decimal::new(500 + (idx % 10_000) as i64, 2),
                Category::ALL[idx % Category::ALL.len()],
                "bench",
                start + Duration::hours((idx % (24 * 365)) as i64),
            )
            .expect("valid transaction")
        })
        .collect()
}

fn bench_summaries(c: &mut Criterion) {
    let txns = build_transactions(black_box(10_000));
    let march: MonthKey = "2025-03".parse().expect("month key");

    c.bench_function("summarize_10k", |b| {
        b.iter(|| black_box(SummaryService::summarize(&txns)))
    });

    c.bench_function("summarize_month_10k", |b| {
        b.iter(|| black_box(SummaryService::summarize_month(&txns, march)))
    });

    c.bench_function("monthly_comparison_12_10k", |b| {
        b.iter(|| black_box(SummaryService::monthly_comparison(&txns, march, 12)))
    });

    let summaries: BTreeMap<String, _> = (0..1_000)
        .map(|idx| {
            let slice = &txns[idx * 10..idx * 10 + 10];
            (format!("user-{idx:04}"), SummaryService::summarize(slice))
        })
        .collect();
    c.bench_function("rank_1k_users", |b| {
        b.iter(|| black_box(LeaderboardService::rank(&summaries)))
    });
}

fn bench_store_io(c: &mut Criterion) {
    let txns = build_transactions(10_000);
    let dir = tempdir().expect("tempdir");
    let store = JsonStorage::new(Some(dir.path().to_path_buf())).expect("json storage");

    c.bench_function("store_save_10k", |b| {
        b.iter(|| store.save_transactions("bench", &txns).expect("save"))
    });

    store.save_transactions("bench", &txns).expect("seed");

    c.bench_function("store_load_10k", |b| {
        b.iter(|| black_box(store.load_transactions("bench").expect("load")))
    });
}

criterion_group!(benches, bench_summaries, bench_store_io);
criterion_main!(benches);
