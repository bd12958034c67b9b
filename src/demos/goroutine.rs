//! Goroutines become OS threads: spawn, join as a wait group, scoped
//! threads that borrow from the stack, and named workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn say(word: &str, times: usize) {
    for i in 0..times {
        thread::sleep(Duration::from_millis(5));
        println!("  {word} {i}");
    }
}

fn spawn_and_join() {
    let handle = thread::spawn(|| say("world", 3));
    say("hello", 3);
    // Unlike returning from main, joining waits for the thread to finish.
    if handle.join().is_err() {
        println!("  worker panicked");
    }
}

/// Runs five named workers and returns how many finished plus their results.
fn wait_group() -> (usize, Vec<u64>) {
    let done = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (1..=5)
        .map(|id: u64| {
            let done = Arc::clone(&done);
            thread::Builder::new()
                .name(format!("worker-{id}"))
                .spawn(move || {
                    thread::sleep(Duration::from_millis(10 * (6 - id)));
                    done.fetch_add(1, Ordering::SeqCst);
                    id * id
                })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        match handle {
            Ok(h) => match h.join() {
                Ok(v) => results.push(v),
                Err(_) => println!("  a worker panicked"),
            },
            Err(err) => println!("  error: could not spawn worker: {err}"),
        }
    }
    (done.load(Ordering::SeqCst), results)
}

fn scoped() -> (u64, u64) {
    let data: Vec<u64> = (1..=1000).collect();
    let mid = data.len() / 2;
    let (left, right) = data.split_at(mid);

    // Scoped threads may borrow `data`; the scope joins them before returning.
    let (a, b) = thread::scope(|s| {
        let first = s.spawn(|| left.iter().sum::<u64>());
        let second = s.spawn(|| right.iter().sum::<u64>());
        (first.join().unwrap_or(0), second.join().unwrap_or(0))
    });
    (a, b)
}

pub fn run() {
    println!("=== Goroutine ===\n");

    println!("--- spawn + join ---");
    spawn_and_join();

    println!("\n--- Waiting for many workers ---");
    let (finished, results) = wait_group();
    println!("  all workers joined, {finished} finished, results {:?}", results);

    println!("\n--- Scoped threads ---");
    let (a, b) = scoped();
    println!("  partial sums {a} + {b} = {}", a + b);

    println!("\n=== Key Points ===");
    println!("1. thread::spawn needs 'static data; move ownership in");
    println!("2. JoinHandle::join is the wait group");
    println!("3. thread::scope lets threads borrow local data safely");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_group_joins_every_worker() {
        let (finished, results) = wait_group();
        assert_eq!(finished, 5);
        // Join order follows spawn order, not finish order.
        assert_eq!(results, vec![1, 4, 9, 16, 25]);
    }

    #[test]
    fn test_scoped_threads_split_the_sum() {
        let (a, b) = scoped();
        assert_eq!(a, (1..=500).sum::<u64>());
        assert_eq!(a + b, 500_500);
    }
}
