use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use mtp_core::{Clock, FixedClock, LedgerStore, MemoryStore, SummaryService};
use mtp_domain::{BudgetSettings, Decimal, TransactionDraft, TransactionKind};
use mtp_storage_json::JsonFileStore;
use tempfile::tempdir;

fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::at_noon(reference_day()))
}

fn drafts(count: usize) -> Vec<TransactionDraft> {
    (0..count)
        .map(|idx| {
            let (kind, category) = if idx % 4 == 0 {
                (TransactionKind::Income, "Salary")
            } else {
                (TransactionKind::Expense, "Food")
            };
            let amount = Decimal::new(500 + (idx % 10_000) as i64, 2);
            let date = reference_day() - Duration::days((idx % 365) as i64);
            TransactionDraft::new(kind, amount, category, date)
        })
        .collect()
}

fn populated_store(count: usize) -> LedgerStore {
    let mut store = LedgerStore::load(Box::new(MemoryStore::new()), clock());
    for draft in drafts(count) {
        store.add_transaction(draft).expect("add");
    }
    store
}

fn bench_aggregation(c: &mut Criterion) {
    let store = populated_store(10_000);
    let now = reference_day().and_hms_opt(18, 0, 0).unwrap();
    let budget = BudgetSettings::default();

    c.bench_function("summarize_10k", |b| {
        b.iter(|| SummaryService::summarize(black_box(store.transactions()), &budget, now))
    });

    c.bench_function("weekly_series_10k", |b| {
        b.iter(|| SummaryService::weekly_series(black_box(store.transactions()), now))
    });

    c.bench_function("search_10k", |b| {
        b.iter(|| black_box(store.search(black_box("food"))).len())
    });
}

fn bench_json_persistence(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("ledger");

    c.bench_function("add_with_json_flush", |b| {
        b.iter_batched(
            || {
                let storage = JsonFileStore::new(root.clone()).expect("store");
                let store = LedgerStore::load(Box::new(storage), clock());
                (store, drafts(1))
            },
            |(mut store, drafts)| {
                for draft in drafts {
                    store.add_transaction(draft).expect("add");
                }
            },
            BatchSize::SmallInput,
        )
    });

    let mut seeded = LedgerStore::load(
        Box::new(JsonFileStore::new(root.clone()).expect("store")),
        clock(),
    );
    for draft in drafts(1_000) {
        seeded.add_transaction(draft).expect("seed");
    }

    c.bench_function("load_json_ledger", |b| {
        b.iter(|| {
            let storage = JsonFileStore::new(root.clone()).expect("store");
            black_box(LedgerStore::load(Box::new(storage), clock()).len())
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_json_persistence);
criterion_main!(benches);
