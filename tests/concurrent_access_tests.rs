//! Concurrent Access Tests
//!
//! A parsed `CacheSpec` is immutable, so it can be read from many threads without
//! synchronization. Parsing itself holds no shared state, so independent threads parsing
//! at the same time must not observe each other.

use cache_spec::{CacheBuilder, CacheSpec, SpecError};
use scoped_threadpool::Pool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const THREADS: u32 = 8;
const ITERATIONS: usize = 1_000;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_record_is_send_and_sync() {
    assert_send_sync::<CacheSpec>();
    assert_send_sync::<SpecError>();
    assert_send_sync::<CacheBuilder<String, Vec<u8>>>();
}

#[test]
fn test_shared_record_reads() {
    let spec = CacheSpec::parse("maximumSize=100,expireAfterWrite=5m,recordStats").unwrap();
    let mut pool = Pool::new(THREADS);

    pool.scoped(|scope| {
        for _ in 0..THREADS {
            let spec = &spec;
            scope.execute(move || {
                for _ in 0..ITERATIONS {
                    assert_eq!(spec.maximum_size(), Some(100));
                    assert_eq!(spec.expire_after_write(), Some(Duration::from_secs(300)));
                    assert!(spec.record_stats());
                }
            });
        }
    });
}

#[test]
fn test_independent_parses() {
    let mismatches = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..THREADS as u64)
        .map(|t| {
            let mismatches = Arc::clone(&mismatches);
            thread::spawn(move || {
                for i in 0..ITERATIONS as u64 {
                    let text = format!("initialCapacity={t},maximumSize={i}");
                    let spec = CacheSpec::parse(&text).unwrap();
                    if spec.initial_capacity() != Some(t) || spec.maximum_size() != Some(i) {
                        mismatches.fetch_add(1, Ordering::Relaxed);
                    }
                    // Every thread also hits the failure path.
                    assert!(CacheSpec::parse(&format!("{text},maximumWeight=1")).is_err());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(mismatches.load(Ordering::Relaxed), 0);
}

#[test]
fn test_builders_from_shared_record() {
    let spec = Arc::new(CacheSpec::parse("maximumWeight=64,weakKeys").unwrap());
    let mut pool = Pool::new(4);

    pool.scoped(|scope| {
        for n in 1..=4u32 {
            let spec = Arc::clone(&spec);
            scope.execute(move || {
                let settings = spec
                    .to_builder::<u32, u32>()
                    .weigher(move |_, v| v * n)
                    .build()
                    .unwrap();
                assert_eq!(settings.weigh(&0, &2), 2 * n);
            });
        }
    });
}
