//! Shared state behind locks: Arc<Mutex<T>>, RwLock for read-heavy data,
//! and guards that unlock when dropped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::thread;

/// A counter safe to use from many threads.
#[derive(Default)]
struct SafeCounter {
    counts: Mutex<HashMap<String, u32>>,
}

impl SafeCounter {
    fn inc(&self, key: &str) {
        // A poisoned lock still holds valid data for a counter.
        let mut counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }

    fn value(&self, key: &str) -> u32 {
        let counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        counts.get(key).copied().unwrap_or(0)
    }
}

fn counter() {
    let counter = Arc::new(SafeCounter::default());
    let handles: Vec<_> = (0..10)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..100 {
                    counter.inc("hits");
                }
            })
        })
        .collect();
    for h in handles {
        let _ = h.join();
    }
    println!("  10 threads x 100 increments = {}", counter.value("hits"));
}

fn guard_scope() {
    let data = Mutex::new(vec![1, 2, 3]);
    {
        let mut guard = data.lock().unwrap_or_else(|e| e.into_inner());
        guard.push(4);
        println!("  inside the guard scope: {:?}", *guard);
    } // unlocked here
    println!("  try_lock after scope succeeds: {}", data.try_lock().is_ok());
}

fn read_write() {
    let config = Arc::new(RwLock::new(String::from("v1")));

    let readers: Vec<_> = (0..3)
        .map(|i| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                let value = config.read().map(|v| v.clone()).unwrap_or_default();
                (i, value)
            })
        })
        .collect();
    for r in readers {
        if let Ok((i, value)) = r.join() {
            println!("  reader {i} saw {value}");
        }
    }

    if let Ok(mut value) = config.write() {
        *value = String::from("v2");
    }
    println!("  after write: {}", config.read().map(|v| v.clone()).unwrap_or_default());
}

pub fn run() {
    println!("=== Mutex ===\n");

    println!("--- Arc<Mutex<T>> counter ---");
    counter();

    println!("\n--- Guards unlock on drop ---");
    guard_scope();

    println!("\n--- RwLock ---");
    read_write();

    println!("\n=== Key Points ===");
    println!("1. The Mutex owns the data; you can only reach it through a guard");
    println!("2. Dropping the guard releases the lock");
    println!("3. RwLock allows many readers or one writer");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_counter_across_threads() {
        let counter = Arc::new(SafeCounter::default());
        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..250 {
                        counter.inc("k");
                    }
                });
            }
        });
        assert_eq!(counter.value("k"), 1000);
        assert_eq!(counter.value("missing"), 0);
    }
}
