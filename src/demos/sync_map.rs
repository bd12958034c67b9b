//! A concurrent map shared between threads without an outer lock.

use std::sync::Arc;
use std::thread;

use dashmap::DashMap;

fn concurrent_writes() -> Arc<DashMap<String, usize>> {
    let map = Arc::new(DashMap::new());
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..5 {
                    map.insert(format!("w{worker}-{i}"), worker * 10 + i);
                }
            })
        })
        .collect();
    for h in handles {
        let _ = h.join();
    }
    map
}

fn word_count(text: &str) -> DashMap<String, usize> {
    let counts = DashMap::new();
    thread::scope(|s| {
        for line in text.lines() {
            let counts = &counts;
            s.spawn(move || {
                for word in line.split_whitespace() {
                    *counts.entry(word.to_lowercase()).or_insert(0) += 1;
                }
            });
        }
    });
    counts
}

pub fn run() {
    println!("=== SyncMap ===\n");

    println!("--- Store from many threads ---");
    let map = concurrent_writes();
    println!("  entries: {}", map.len());
    if let Some(v) = map.get("w2-3") {
        println!("  load w2-3 -> {}", *v);
    }
    println!("  load missing -> {:?}", map.get("nope").map(|v| *v));

    println!("\n--- LoadOrStore / Delete ---");
    let existing = *map.entry("w0-0".to_string()).or_insert(999);
    let stored = *map.entry("fresh".to_string()).or_insert(42);
    println!("  existing key keeps {existing}, new key stores {stored}");
    let removed = map.remove("fresh");
    println!("  delete fresh -> {:?}", removed);

    println!("\n--- Range ---");
    let mut keys: Vec<String> = map
        .iter()
        .filter(|e| e.key().starts_with("w1"))
        .map(|e| format!("{}={}", e.key(), e.value()))
        .collect();
    keys.sort();
    println!("  {}", keys.join(" "));

    println!("\n--- Word count ---");
    let counts = word_count("the quick fox\nthe lazy dog\nThe end");
    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort();
    println!("  {:?}", pairs);

    println!("\n=== Key Points ===");
    println!("1. DashMap shards its locks, so threads rarely contend");
    println!("2. entry().or_insert() is load-or-store in one step");
    println!("3. Do not hold a Ref across another write to the same shard");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrent_writes_are_all_kept() {
        let map = concurrent_writes();
        assert_eq!(map.len(), 20);
        assert_eq!(*map.get("w3-4").unwrap(), 34);
    }

    #[test]
    fn test_word_count_folds_case() {
        let counts = word_count("a b\nA c\na");
        assert_eq!(*counts.get("a").unwrap(), 3);
        assert_eq!(*counts.get("c").unwrap(), 1);
    }
}
