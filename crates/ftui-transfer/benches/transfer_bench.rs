//! Benchmarks for partitioning and per-cycle recompute.
//!
//! Run with: cargo bench -p ftui-transfer

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ftui_transfer::partition::partition;
use ftui_transfer::{
    Key, Side, Transfer, TransferConfig, TransferItem, TransferProps, TransferRequest,
    title_contains,
};
use std::hint::black_box;
use std::sync::Arc;

fn dataset(n: usize) -> (Arc<[TransferItem]>, Arc<[Key]>) {
    let items: Vec<TransferItem> = (0..n)
        .map(|i| {
            TransferItem::new(format!("key-{i}"))
                .with_title(format!("record {i}"))
                .with_disabled(i % 17 == 0)
        })
        .collect();
    // Every third record on the right, in reverse order.
    let targets: Vec<Key> = (0..n).rev().step_by(3).map(|i| format!("key-{i}")).collect();
    (items.into(), targets.into())
}

// ============================================================================
// Partition
// ============================================================================

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer/partition");
    for n in [100, 1_000, 10_000] {
        let (items, targets) = dataset(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(), |b, _| {
            b.iter(|| black_box(partition(&items, &targets, None)))
        });
    }
    group.finish();
}

// ============================================================================
// Full cycle: sync + search + page + move
// ============================================================================

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer/cycle");
    for n in [100, 1_000, 10_000] {
        let (items, targets) = dataset(n);
        let mut transfer = Transfer::new(
            TransferConfig::default()
                .with_page_size(50)
                .with_filter(title_contains()),
        );
        group.bench_with_input(BenchmarkId::new("sync_search_move", n), &(), |b, _| {
            b.iter(|| {
                transfer.sync(TransferProps {
                    data_source: Arc::clone(&items),
                    target_keys: Arc::clone(&targets),
                    selected_keys: None,
                    search: [None, None],
                });
                transfer.dispatch(TransferRequest::Search {
                    side: Side::Left,
                    query: "1".into(),
                });
                transfer.dispatch(TransferRequest::SelectCurrentPage { side: Side::Left });
                black_box(transfer.dispatch(TransferRequest::Move { to: Side::Right }))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_partition, bench_cycle);
criterion_main!(benches);
