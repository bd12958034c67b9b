//! Select: waiting on several channels at once, timeouts, a non-blocking
//! default branch, and cancelling a worker that is still waiting.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{after, bounded, never, tick, unbounded, Receiver, Sender};
use crossbeam::select;
use rand::Rng;

/// A worker that sends `label` after a delay unless cancelled first.
struct Delayed {
    rx: Receiver<&'static str>,
    cancel: Sender<()>,
    worker: JoinHandle<()>,
}

impl Delayed {
    fn start(label: &'static str, delay: Duration) -> Self {
        let (tx, rx) = bounded(1);
        let (cancel, cancelled) = bounded::<()>(0);
        let worker = thread::spawn(move || {
            select! {
                // Dropping `cancel` disconnects the channel and wakes us.
                recv(cancelled) -> _ => {},
                default(delay) => {
                    let _ = tx.send(label);
                }
            }
        });
        Self { rx, cancel, worker }
    }

    /// Cancels the worker if it is still waiting, then joins it.
    fn finish(self) {
        drop(self.cancel);
        let _ = self.worker.join();
    }
}

/// Receives from two workers in arrival order. A receiver that has
/// delivered is swapped for `never()` so select stops picking it.
fn first_of_two(fast: Duration, slow: Duration) -> Vec<&'static str> {
    let one = Delayed::start("one", fast);
    let two = Delayed::start("two", slow);

    let mut received = Vec::new();
    let (mut got_one, mut got_two) = (false, false);
    while !(got_one && got_two) {
        let one_rx = if got_one { never() } else { one.rx.clone() };
        let two_rx = if got_two { never() } else { two.rx.clone() };
        select! {
            recv(one_rx) -> msg => {
                got_one = true;
                received.extend(msg.ok());
            }
            recv(two_rx) -> msg => {
                got_two = true;
                received.extend(msg.ok());
            }
        }
    }

    one.finish();
    two.finish();
    received
}

/// Waits up to `deadline` for a worker that needs `work`. A worker that
/// misses the deadline is cancelled before returning.
fn with_timeout(work: Duration, deadline: Duration) -> Option<&'static str> {
    let job = Delayed::start("result", work);
    let outcome = select! {
        recv(job.rx) -> msg => msg.ok(),
        recv(after(deadline)) -> _ => None,
    };
    job.finish();
    outcome
}

fn non_blocking() {
    let (tx, rx) = unbounded::<String>();
    select! {
        recv(rx) -> msg => println!("  received {:?}", msg),
        default => println!("  no message waiting"),
    }

    let _ = tx.send("hi".to_string());
    select! {
        recv(rx) -> msg => println!("  received {:?}", msg.unwrap_or_default()),
        default => println!("  no message waiting"),
    }
}

fn ticks_until_quit(every: Duration, quit_after: Duration) -> usize {
    let ticker = tick(every);
    let quit = after(quit_after);
    let mut ticks = 0;
    loop {
        select! {
            recv(ticker) -> _ => ticks += 1,
            recv(quit) -> _ => break,
        }
    }
    ticks
}

pub fn run() {
    println!("=== Select ===\n");

    println!("--- First ready wins ---");
    let mut rng = rand::thread_rng();
    let fast = Duration::from_millis(rng.gen_range(5..20));
    let slow = Duration::from_millis(rng.gen_range(40..60));
    for msg in first_of_two(fast, slow) {
        println!("  received {msg}");
    }

    println!("\n--- Timeouts ---");
    match with_timeout(Duration::from_millis(200), Duration::from_millis(30)) {
        Some(msg) => println!("  got {msg}"),
        None => println!("  timeout after 30ms, slow worker cancelled"),
    }
    match with_timeout(Duration::from_millis(5), Duration::from_millis(500)) {
        Some(msg) => println!("  got {msg} before the 500ms deadline"),
        None => println!("  timeout after 500ms"),
    }

    println!("\n--- default branch ---");
    non_blocking();

    println!("\n--- Ticker with quit channel ---");
    let ticks = ticks_until_quit(Duration::from_millis(10), Duration::from_millis(45));
    println!("  saw {} ticks before quit", if ticks >= 3 { "3+" } else { "a few" });

    println!("\n=== Key Points ===");
    println!("1. select! blocks until one branch is ready");
    println!("2. after() builds a one-shot timeout channel; never() disables a branch");
    println!("3. default makes the select non-blocking");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_both_labels_received_in_arrival_order() {
        let got = first_of_two(Duration::from_millis(5), Duration::from_millis(60));
        assert_eq!(got, vec!["one", "two"]);

        let reversed = first_of_two(Duration::from_millis(60), Duration::from_millis(5));
        assert_eq!(reversed, vec!["two", "one"]);
    }

    #[test]
    fn test_timeout_cancels_slow_worker() {
        let started = Instant::now();
        assert_eq!(with_timeout(Duration::from_secs(10), Duration::from_millis(20)), None);
        // The cancelled worker is joined without waiting out its delay.
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_fast_worker_beats_deadline() {
        assert_eq!(
            with_timeout(Duration::from_millis(1), Duration::from_secs(5)),
            Some("result")
        );
    }

    #[test]
    fn test_ticker_counts_until_quit() {
        let ticks = ticks_until_quit(Duration::from_millis(10), Duration::from_millis(105));
        assert!(ticks >= 3, "only {ticks} ticks");
    }
}
