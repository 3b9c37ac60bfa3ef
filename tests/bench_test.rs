//! Benchmark tests for critical operations
//!
//! Run with: cargo test --release bench -- --ignored --nocapture

use std::sync::Arc;
use std::time::{Duration, Instant};

use urlshort::codec;
use urlshort::service::ShortenerService;
use urlshort::store::{LinkStore, MemoryStore, RedbStore};

fn report(name: &str, iterations: usize, duration: Duration) {
    let avg_us = duration.as_micros() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}us", avg_us);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

async fn bench_create_and_resolve(name: &str, store: Arc<dyn LinkStore>, iterations: usize) {
    let service = ShortenerService::new("http://localhost:8080", store);

    let start = Instant::now();
    for i in 0..iterations {
        service
            .create_link(&format!("https://example.com/bench/{i}"))
            .await
            .unwrap();
    }
    report(&format!("{name}: create"), iterations, start.elapsed());

    let start = Instant::now();
    for i in 1..=iterations as u64 {
        service.resolve(&codec::encode(i)).await.unwrap();
    }
    report(&format!("{name}: resolve"), iterations, start.elapsed());

    service.close().await;
}

#[test]
#[ignore] // Run explicitly with: cargo test bench --release -- --ignored --nocapture
fn bench_codec() {
    println!("\n=== Benchmark: Codec ===\n");

    let iterations = 1_000_000;
    let start = Instant::now();
    for i in 0..iterations as u64 {
        let code = codec::encode(i * 7919);
        assert_eq!(codec::decode(&code), Ok(i * 7919));
    }
    report("encode + decode", iterations, start.elapsed());
}

#[tokio::test]
#[ignore]
async fn bench_memory_store() {
    println!("\n=== Benchmark: Memory Store ===\n");
    bench_create_and_resolve("memory", Arc::new(MemoryStore::new()), 100_000).await;
}

#[tokio::test]
#[ignore]
async fn bench_redb_store() {
    println!("\n=== Benchmark: Redb Store ===\n");

    let temp_dir = tempfile::tempdir().unwrap();
    let store = RedbStore::open(temp_dir.path().join("bench.redb"), Duration::from_secs(5)).unwrap();
    bench_create_and_resolve("redb", Arc::new(store), 1_000).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[ignore]
async fn bench_concurrent_operations() {
    println!("\n=== Benchmark: Concurrent Operations ===\n");

    let service = ShortenerService::new("http://localhost:8080", Arc::new(MemoryStore::new()));

    let num_tasks = 100;
    let ops_per_task = 100;

    println!("  Running {} concurrent tasks with {} ops each...", num_tasks, ops_per_task);

    let start = Instant::now();

    let handles: Vec<_> = (0..num_tasks)
        .map(|task_id| {
            let service = service.clone();
            tokio::spawn(async move {
                for op_id in 0..ops_per_task {
                    let created = service
                        .create_link(&format!("https://example.com/concurrent-{task_id}-{op_id}"))
                        .await
                        .unwrap();
                    service.resolve(&created.shortcode).await.unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    report(
        "create + resolve",
        num_tasks * ops_per_task,
        start.elapsed(),
    );
}
