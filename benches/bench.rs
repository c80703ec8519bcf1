// Criterion benchmarks for Swipe Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use swipe_match::services::{MemoryMatchStore, MemorySwipeStore, MemoryUserDirectory};
use swipe_match::{MatchingEngine, User, UserId};
use tokio::runtime::Runtime;

fn engine_with_users(count: UserId) -> MatchingEngine {
    let users = Arc::new(MemoryUserDirectory::with_users(
        (1..=count).map(|id| User::new(id, format!("User {}", id), None)),
    ));
    let swipes = Arc::new(MemorySwipeStore::new(users.clone()));
    MatchingEngine::new(users, swipes, Arc::new(MemoryMatchStore::new()))
}

fn bench_next_candidate(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("next_candidate");

    for user_count in [10, 100, 1000, 10_000].iter() {
        let engine = engine_with_users(*user_count);

        // User 1 has already swiped on half of everyone
        rt.block_on(async {
            for target in 2..=(*user_count / 2) {
                engine.record_swipe(1, target, target % 3 == 0).await.unwrap();
            }
        });

        group.bench_with_input(
            BenchmarkId::from_parameter(user_count),
            user_count,
            |b, _| {
                b.to_async(&rt)
                    .iter(|| async { engine.next_candidate(black_box(1)).await.unwrap() });
            },
        );
    }

    group.finish();
}

fn bench_record_swipe(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");

    c.bench_function("record_swipe_with_mutual_match", |b| {
        b.iter_batched(
            || engine_with_users(100),
            |engine| {
                rt.block_on(async {
                    engine.record_swipe(1, 2, true).await.unwrap();
                    black_box(engine.record_swipe(2, 1, true).await.unwrap())
                })
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_next_candidate, bench_record_swipe);

criterion_main!(benches);
