//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Loggers shared across threads deliver every emitted call
//! - Concurrent styling of the same names converges on one memo entry each
//! - Per-request keys never grow the style memo past its cap
//! - Reconfiguring while other threads build loggers never tears a policy

use named_logger::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

#[test]
fn test_shared_logger_delivers_every_call() {
    let console = Arc::new(MemoryConsole::new());
    let provider = LoggerProvider::builder().console_arc(console.clone()).build();
    provider.configure_logging(LoggingConfig::new().no_style());
    let logger = provider.get_logger().named("Shared");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.warn(format!("thread {} message {}", t, i));
                    logger.debug("filtered");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    assert_eq!(console.len(), THREADS * PER_THREAD);
    assert!(console
        .calls()
        .iter()
        .all(|call| call.names == vec!["Shared".to_string()]));
}

#[test]
fn test_concurrent_styling_memoizes_once() {
    let sink = Arc::new(MemoryConsole::new());
    let provider = Arc::new(LoggerProvider::builder().console_arc(sink.clone()).build());
    let names = ["Alpha", "Beta", "Gamma", "Delta"];

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let provider = Arc::clone(&provider);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    provider
                        .get_logger()
                        .named(names[(t + i) % names.len()])
                        .keyed("Job", i % 3)
                        .error("tick");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("styling thread panicked");
    }

    let ctx = provider.style_context().expect("styling is on by default");
    // "" + 4 names + "Job" + 3 keys
    assert_eq!(ctx.cached_len(), 1 + names.len() + 1 + 3);

    let alpha: Vec<_> = sink
        .calls()
        .into_iter()
        .filter(|call| call.names[0].contains("Alpha"))
        .map(|call| call.names[0].clone())
        .collect();
    assert!(!alpha.is_empty());
    assert!(alpha.iter().all(|rendered| *rendered == alpha[0]));
}

#[test]
fn test_per_request_keys_keep_memo_bounded() {
    let console = Arc::new(MemoryConsole::new());
    let provider = LoggerProvider::builder().console_arc(console.clone()).build();
    let root = provider.get_logger();

    for id in 0..50_000u32 {
        let request = root.keyed("Request", id);
        request.debug("filtered at the default minimum");
    }

    let ctx = provider.style_context().expect("styling is on by default");
    assert!(ctx.cached_len() <= named_logger::MAX_CACHED_NAMES);
    assert!(ctx.is_cached(""));
    assert!(console.is_empty());
}

#[test]
fn test_reconfigure_while_building() {
    let console = Arc::new(MemoryConsole::new());
    let provider = Arc::new(LoggerProvider::builder().console_arc(console.clone()).build());
    let stop = Arc::new(AtomicBool::new(false));

    let builders: Vec<_> = (0..THREADS)
        .map(|_| {
            let provider = Arc::clone(&provider);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut built = 0usize;
                while !stop.load(Ordering::Relaxed) || built == 0 {
                    let logger = provider.get_logger().named("Worker");
                    // a logger always agrees with its own snapshot
                    assert_eq!(
                        logger.enabled(LogKind::Trace),
                        logger.enabled(LogKind::Debug)
                    );
                    logger.trace("maybe");
                    built += 1;
                }
                built
            })
        })
        .collect();

    for round in 0..200 {
        let min = if round % 2 == 0 {
            LogLevel::Trace
        } else {
            LogLevel::Error
        };
        provider.configure_logging(LoggingConfig::new().min(min));
    }
    stop.store(true, Ordering::Relaxed);

    let total: usize = builders
        .into_iter()
        .map(|handle| handle.join().expect("builder thread panicked"))
        .sum();

    assert!(total >= THREADS);
    assert!(console.len() <= total);
    assert!(console
        .calls()
        .iter()
        .all(|call| call.kind == LogKind::Trace));
}
