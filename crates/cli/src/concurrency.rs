// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A fixed-size worker pool pulling indices from a shared atomic cursor.
//!
//! Each worker owns its own result buffer; buffers are concatenated after
//! the scope joins, so there is never a shared mutable accumulator.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Run `work` once per item in `items`, across `worker_count` threads,
/// preserving `items`' order in the returned vector.
///
/// A worker panic re-panics the caller's thread once the scope joins;
/// `work` closures are expected to report failures through their return
/// type (e.g. `Result`) rather than panicking.
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub fn map_bounded<T, R, F>(items: &[T], worker_count: usize, work: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let worker_count = worker_count.max(1).min(items.len().max(1));
    let cursor = AtomicUsize::new(0);
    let mut slots: Vec<Option<R>> = (0..items.len()).map(|_| None).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..worker_count)
            .map(|_| {
                let cursor = &cursor;
                let items = &items;
                let work = &work;
                scope.spawn(move || {
                    let mut local = Vec::new();
                    loop {
                        let idx = cursor.fetch_add(1, Ordering::Relaxed);
                        if idx >= items.len() {
                            break;
                        }
                        local.push((idx, work(&items[idx])));
                    }
                    local
                })
            })
            .collect();

        for handle in handles {
            for (idx, result) in handle.join().expect("worker thread panicked") {
                slots[idx] = Some(result);
            }
        }
    });

    slots.into_iter().map(|s| s.expect("every index visited exactly once")).collect()
}

#[cfg(test)]
#[path = "concurrency_tests.rs"]
mod tests;
